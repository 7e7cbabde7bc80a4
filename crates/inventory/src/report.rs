//! Rendering of inventory contents.
//!
//! A [`Report`] is an ordered list of [`ItemRecord`]s borrowed from the
//! inventory. Each record renders as a fixed block:
//!
//! ```text
//! SMALL HEALTH POTION (CONSUMABLE)
//! Level: 1
//! Value: 10
//! Quantity: 2
//!
//! ```
//!
//! The `Quantity` line only appears for consumables.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use lootbag_core::DomainError;

use crate::item::{Item, ItemType};

/// Attribute a report can be sorted by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortAttribute {
    Name,
    Type,
    Level,
    Value,
    Time,
}

impl SortAttribute {
    pub const ALL: [SortAttribute; 5] = [
        SortAttribute::Name,
        SortAttribute::Type,
        SortAttribute::Level,
        SortAttribute::Value,
        SortAttribute::Time,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortAttribute::Name => "NAME",
            SortAttribute::Type => "TYPE",
            SortAttribute::Level => "LEVEL",
            SortAttribute::Value => "VALUE",
            SortAttribute::Time => "TIME",
        }
    }

    /// Ascending comparison of two items on this attribute alone.
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        match self {
            SortAttribute::Name => a.name().cmp(b.name()),
            SortAttribute::Type => a.item_type().cmp(&b.item_type()),
            SortAttribute::Level => a.level().cmp(&b.level()),
            // Unit value, not stack value.
            SortAttribute::Value => a.gold_value().cmp(&b.gold_value()),
            SortAttribute::Time => a.time_picked_up().cmp(&b.time_picked_up()),
        }
    }
}

impl core::fmt::Display for SortAttribute {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortAttribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortAttribute::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DomainError::invalid_argument(format!(
                    "unsupported sort attribute '{s}' (expected one of NAME, TYPE, LEVEL, VALUE, TIME)"
                ))
            })
    }
}

/// One rendered item.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ItemRecord<'a> {
    item: &'a Item,
}

impl<'a> ItemRecord<'a> {
    pub fn new(item: &'a Item) -> Self {
        Self { item }
    }

    pub fn item(&self) -> &'a Item {
        self.item
    }

    /// `Some` only for consumables.
    pub fn quantity(&self) -> Option<u32> {
        (self.item.item_type() == ItemType::Consumable).then(|| self.item.quantity())
    }
}

impl core::fmt::Display for ItemRecord<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let item = self.item;
        writeln!(f, "{} ({})", item.name(), item.item_type())?;
        writeln!(f, "Level: {}", item.level())?;
        writeln!(f, "Value: {}", item.gold_value())?;
        if let Some(quantity) = self.quantity() {
            writeln!(f, "Quantity: {quantity}")?;
        }
        writeln!(f)
    }
}

/// Ordered snapshot of an inventory, ready to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report<'a> {
    records: Vec<ItemRecord<'a>>,
}

impl<'a> Report<'a> {
    /// Records in the given order.
    pub fn new(items: impl IntoIterator<Item = &'a Item>) -> Self {
        Self {
            records: items.into_iter().map(ItemRecord::new).collect(),
        }
    }

    /// Stable sort of `items` on `attribute`. Items that compare equal keep
    /// their incoming order in both directions.
    pub fn sorted(
        items: impl IntoIterator<Item = &'a Item>,
        ascending: bool,
        attribute: SortAttribute,
    ) -> Self {
        let mut items: Vec<&'a Item> = items.into_iter().collect();
        items.sort_by(|a, b| {
            let ordering = attribute.compare(a, b);
            if ascending { ordering } else { ordering.reverse() }
        });
        Self::new(items)
    }

    pub fn records(&self) -> &[ItemRecord<'a>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.records.iter().map(|r| r.item().name())
    }
}

impl<'a> IntoIterator for Report<'a> {
    type Item = ItemRecord<'a>;
    type IntoIter = std::vec::IntoIter<ItemRecord<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl core::fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for record in &self.records {
            write!(f, "{record}")?;
        }
        Ok(())
    }
}
