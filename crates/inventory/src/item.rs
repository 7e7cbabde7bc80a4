use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use lootbag_core::{DomainError, DomainResult, PickupTime};
use lootbag_tree::Keyed;

/// Kind of item. Only consumables stack.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    #[default]
    Unknown,
    Weapon,
    Armor,
    Consumable,
}

impl ItemType {
    pub const ALL: [ItemType; 4] = [
        ItemType::Unknown,
        ItemType::Weapon,
        ItemType::Armor,
        ItemType::Consumable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Unknown => "UNKNOWN",
            ItemType::Weapon => "WEAPON",
            ItemType::Armor => "ARMOR",
            ItemType::Consumable => "CONSUMABLE",
        }
    }

    pub fn is_stackable(&self) -> bool {
        matches!(self, ItemType::Consumable)
    }
}

/// Types order by their rendered name: ARMOR < CONSUMABLE < UNKNOWN < WEAPON.
impl Ord for ItemType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for ItemType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl core::fmt::Display for ItemType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::invalid_argument(format!("unknown item type '{s}'")))
    }
}

fn default_quantity() -> u32 {
    1
}

/// A game item, identified by its name.
///
/// `quantity` only means something for consumables; other types keep whatever
/// they were built with and it is ignored for valuation and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    name: String,
    #[serde(rename = "type", default)]
    item_type: ItemType,
    #[serde(default)]
    level: i32,
    #[serde(default)]
    gold_value: i32,
    #[serde(default = "default_quantity")]
    quantity: u32,
    #[serde(default)]
    time_picked_up: PickupTime,
}

impl Item {
    /// Build an item picked up now.
    pub fn new(
        name: impl Into<String>,
        item_type: ItemType,
        level: i32,
        gold_value: i32,
        quantity: u32,
    ) -> Self {
        Self {
            name: name.into(),
            item_type,
            level,
            gold_value,
            quantity,
            time_picked_up: PickupTime::now(),
        }
    }

    /// Name-only item (UNKNOWN type, zero stats).
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, ItemType::Unknown, 0, 0, 1)
    }

    pub fn weapon(name: impl Into<String>, level: i32, gold_value: i32) -> Self {
        Self::new(name, ItemType::Weapon, level, gold_value, 1)
    }

    pub fn armor(name: impl Into<String>, level: i32, gold_value: i32) -> Self {
        Self::new(name, ItemType::Armor, level, gold_value, 1)
    }

    pub fn consumable(name: impl Into<String>, level: i32, gold_value: i32, quantity: u32) -> Self {
        Self::new(name, ItemType::Consumable, level, gold_value, quantity)
    }

    /// Replace the pickup stamp (seed data and tests use plain ordinals).
    pub fn picked_up_at(mut self, time: impl Into<PickupTime>) -> Self {
        self.time_picked_up = time.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn gold_value(&self) -> i32 {
        self.gold_value
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn time_picked_up(&self) -> PickupTime {
        self.time_picked_up
    }

    pub fn is_stackable(&self) -> bool {
        self.item_type.is_stackable()
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = level;
    }

    pub fn set_gold_value(&mut self, gold_value: i32) {
        self.gold_value = gold_value;
    }

    /// A consumable stack cannot be emptied in place; remove it instead.
    pub fn set_quantity(&mut self, quantity: u32) -> DomainResult<()> {
        if self.is_stackable() && quantity == 0 {
            return Err(DomainError::validation(format!(
                "consumable '{}' must keep a quantity of at least 1",
                self.name
            )));
        }
        self.quantity = quantity;
        Ok(())
    }

    pub fn set_time_picked_up(&mut self, time: PickupTime) {
        self.time_picked_up = time;
    }

    /// Gold value of the whole stack: `quantity * gold_value` for
    /// consumables, `gold_value` for everything else.
    pub fn stack_value(&self) -> i64 {
        if self.is_stackable() {
            i64::from(self.quantity) * i64::from(self.gold_value)
        } else {
            i64::from(self.gold_value)
        }
    }

    /// Checks the item can enter an inventory.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        if self.is_stackable() && self.quantity == 0 {
            return Err(DomainError::validation(format!(
                "consumable '{}' must have a quantity of at least 1",
                self.name
            )));
        }
        Ok(())
    }
}

impl Keyed for Item {
    type Key = str;

    fn key(&self) -> &str {
        &self.name
    }
}
