use lootbag_core::DomainError;
use lootbag_inventory::{Inventory, Item, ItemType, SortAttribute};

fn starter_backpack() -> Inventory {
    let mut backpack = Inventory::new();
    assert!(backpack.add_item(Item::new("TIRED GAUNTLETS", ItemType::Armor, 3, 25, 1)));
    assert!(backpack.add_item(Item::new("SMALL HEALTH POTION", ItemType::Consumable, 1, 10, 2)));
    backpack
}

#[test]
fn in_order_report_matches_the_item_template() {
    let backpack = starter_backpack();

    let expected = "\
SMALL HEALTH POTION (CONSUMABLE)
Level: 1
Value: 10
Quantity: 2

TIRED GAUNTLETS (ARMOR)
Level: 3
Value: 25

";
    assert_eq!(backpack.report_in_order().to_string(), expected);
    assert_eq!(backpack.total_gold_value(), 45);
}

#[test]
fn descending_level_report() {
    let backpack = Inventory::from_items([
        Item::consumable("NOODLES", 0, 120, 5),
        Item::armor("TIRED GAUNTLETS", 3, 50),
        Item::weapon("FEATHER DUSTER", 5, 100),
        Item::consumable("SMALL HEALTH POTION", 1, 10, 2),
    ]);

    let report = backpack.report_by(false, "LEVEL").unwrap();
    let levels: Vec<i32> = report.records().iter().map(|r| r.item().level()).collect();
    assert_eq!(levels, vec![5, 3, 1, 0]);

    let expected = "\
FEATHER DUSTER (WEAPON)
Level: 5
Value: 100

TIRED GAUNTLETS (ARMOR)
Level: 3
Value: 50

SMALL HEALTH POTION (CONSUMABLE)
Level: 1
Value: 10
Quantity: 2

NOODLES (CONSUMABLE)
Level: 0
Value: 120
Quantity: 5

";
    assert_eq!(report.to_string(), expected);
}

#[test]
fn unsupported_sort_attribute_is_an_error() {
    let backpack = starter_backpack();
    match backpack.report_by(true, "RARITY") {
        Err(DomainError::InvalidArgument(msg)) => assert!(msg.contains("RARITY")),
        other => panic!("Expected InvalidArgument, got {other:?}"),
    }
}

#[test]
fn report_reflects_stack_changes() {
    let mut backpack = starter_backpack();
    assert!(backpack.add_item(Item::consumable("SMALL HEALTH POTION", 1, 10, 3)));
    assert!(backpack.remove_item("SMALL HEALTH POTION"));
    assert!(backpack.remove_item("TIRED GAUNTLETS"));

    assert_eq!(
        backpack.report(true, SortAttribute::Name).to_string(),
        "SMALL HEALTH POTION (CONSUMABLE)\nLevel: 1\nValue: 10\nQuantity: 4\n\n"
    );
    assert_eq!(backpack.total_gold_value(), 40);
}
