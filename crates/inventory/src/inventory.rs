use core::cmp::Ordering;

use lootbag_core::{DomainError, DomainResult};
use lootbag_tree::{BinarySearchTree, Iter};

use crate::item::Item;
use crate::report::{Report, SortAttribute};

/// What `try_add_item` did with an accepted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item became a new node.
    Inserted,
    /// The item's quantity was folded into the item already holding its name.
    Merged { quantity: u32 },
}

/// What `try_remove_item` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// One unit was taken off a consumable stack.
    Decremented { remaining: u32 },
    /// The whole node was removed.
    Removed(Item),
}

/// Items ordered alphabetically by name.
///
/// At most one node exists per name. Adding a consumable whose name is
/// already stored merges it into that item; any other duplicate is rejected.
#[derive(Debug, Default)]
pub struct Inventory {
    items: BinarySearchTree<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory by adding each item in order, with the same rules
    /// as [`add_item`](Self::add_item). Rejected items are dropped.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut inventory = Self::new();
        inventory.extend(items);
        inventory
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in ascending name order.
    pub fn iter(&self) -> Iter<'_, Item> {
        self.items.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Adds `candidate`, returning whether the inventory accepted it.
    ///
    /// `false` means the item was invalid (blank name, empty consumable stack)
    /// or a non-stackable duplicate; the inventory is unchanged in both cases.
    pub fn add_item(&mut self, candidate: Item) -> bool {
        self.try_add_item(candidate).is_ok()
    }

    /// Like [`add_item`](Self::add_item), but reports why an item was refused.
    ///
    /// A consumable candidate merges into whatever item holds its name: the
    /// quantities are summed and the candidate's pickup time is taken, even if
    /// it is older than the stored one. The stored item keeps its type. The
    /// candidate is dropped.
    pub fn try_add_item(&mut self, candidate: Item) -> DomainResult<AddOutcome> {
        if let Err(err) = candidate.validate() {
            tracing::warn!(error = %err, "rejected invalid item");
            return Err(err);
        }

        match self.find_item_mut(candidate.name()) {
            Some(existing) if candidate.is_stackable() => {
                let quantity = existing
                    .quantity()
                    .checked_add(candidate.quantity())
                    .ok_or_else(|| {
                        DomainError::validation(format!(
                            "stack of '{}' would overflow",
                            candidate.name()
                        ))
                    })?;
                existing.set_quantity(quantity)?;
                existing.set_time_picked_up(candidate.time_picked_up());
                tracing::debug!(name = candidate.name(), quantity, "merged consumable stack");
                return Ok(AddOutcome::Merged { quantity });
            }
            Some(existing) => {
                tracing::debug!(
                    name = candidate.name(),
                    existing_type = %existing.item_type(),
                    "rejected duplicate item"
                );
                return Err(DomainError::conflict(format!(
                    "item '{}' already exists",
                    candidate.name()
                )));
            }
            None => {}
        }

        let item_type = candidate.item_type();
        self.items.insert(candidate).map_err(|rejected| {
            DomainError::invariant(format!("'{}' appeared during insert", rejected.name()))
        })?;
        tracing::debug!(%item_type, len = self.items.len(), "inserted item");
        Ok(AddOutcome::Inserted)
    }

    /// Removes one unit of `name`, returning whether anything was found.
    ///
    /// A consumable stack above 1 loses one unit and keeps its pickup time;
    /// anything else is removed outright.
    pub fn remove_item(&mut self, name: &str) -> bool {
        self.try_remove_item(name).is_ok()
    }

    pub fn try_remove_item(&mut self, name: &str) -> DomainResult<RemoveOutcome> {
        let existing = self.find_item_mut(name).ok_or_else(DomainError::not_found)?;

        if existing.is_stackable() && existing.quantity() > 1 {
            let remaining = existing.quantity() - 1;
            existing.set_quantity(remaining)?;
            tracing::debug!(name, remaining, "decremented consumable stack");
            return Ok(RemoveOutcome::Decremented { remaining });
        }

        let removed = self.items.remove(name).ok_or_else(DomainError::not_found)?;
        tracing::debug!(name, len = self.items.len(), "removed item");
        Ok(RemoveOutcome::Removed(removed))
    }

    /// Looks `name` up by walking down from the root: left when `name` sorts
    /// before the node's name, right when after. This is the same convention
    /// insertion uses.
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        let mut cursor = self.items.root();
        while let Some(node) = cursor {
            let item = node.item();
            cursor = match name.cmp(item.name()) {
                Ordering::Equal => return Some(item),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// Mutable access to a stored item. The name cannot be changed through it.
    pub fn find_item_mut(&mut self, name: &str) -> Option<&mut Item> {
        let id = self.items.find(name)?;
        self.items.get_mut(id)
    }

    /// Verifies the underlying tree is still ordered by name.
    pub fn check_invariants(&self) -> DomainResult<()> {
        self.items.check_invariants()
    }

    /// Sum of every item's stack value (see [`Item::stack_value`]).
    pub fn total_gold_value(&self) -> i64 {
        self.items.iter().map(Item::stack_value).sum()
    }

    /// Every item, ascending by name.
    pub fn report_in_order(&self) -> Report<'_> {
        Report::new(self.items.iter())
    }

    /// Every item, stable-sorted on `attribute` alone. Ties keep name order.
    pub fn report(&self, ascending: bool, attribute: SortAttribute) -> Report<'_> {
        Report::sorted(self.items.iter(), ascending, attribute)
    }

    /// [`report`](Self::report) with the attribute given by name.
    ///
    /// Fails with [`DomainError::InvalidArgument`] for anything other than
    /// NAME, TYPE, LEVEL, VALUE or TIME.
    pub fn report_by(&self, ascending: bool, attribute: &str) -> DomainResult<Report<'_>> {
        let attribute: SortAttribute = attribute.parse()?;
        Ok(self.report(ascending, attribute))
    }
}

impl Extend<Item> for Inventory {
    fn extend<I: IntoIterator<Item = Item>>(&mut self, iter: I) {
        for item in iter {
            self.add_item(item);
        }
    }
}

impl FromIterator<Item> for Inventory {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Item;
    type IntoIter = Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
