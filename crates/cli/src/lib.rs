//! `lootbag` command-line front end.
//!
//! Loads an inventory (from a JSON seed file, or the built-in starter
//! backpack) and writes a report of it to stdout.

pub mod config;

use std::io::Write;

use anyhow::Context;

use lootbag_inventory::{Inventory, Item, ItemType};

pub use config::CliConfig;

/// The backpack used when no seed file is configured.
pub fn starter_backpack() -> Inventory {
    let mut backpack = Inventory::new();
    backpack.add_item(Item::new("TIRED GAUNTLETS", ItemType::Armor, 3, 25, 1));
    backpack.add_item(Item::new("SMALL HEALTH POTION", ItemType::Consumable, 1, 10, 2));
    backpack
}

/// Builds the inventory described by `config`.
///
/// Seed files hold a JSON array of items, added in file order with the usual
/// stacking rules.
pub fn load_inventory(config: &CliConfig) -> anyhow::Result<Inventory> {
    let Some(path) = &config.seed else {
        return Ok(starter_backpack());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let items: Vec<Item> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse seed file {}", path.display()))?;

    let offered = items.len();
    let inventory = Inventory::from_items(items);
    tracing::info!(
        seed = %path.display(),
        offered,
        stored = inventory.len(),
        "seeded inventory"
    );
    Ok(inventory)
}

/// Writes the configured report: sorted when `sort_by` is set, otherwise
/// ascending by name.
pub fn run(config: &CliConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let inventory = load_inventory(config)?;
    tracing::info!(
        items = inventory.len(),
        total_gold_value = inventory.total_gold_value(),
        "inventory loaded"
    );

    let report = match config.sort_by {
        Some(attribute) => inventory.report(config.ascending, attribute),
        None => inventory.report_in_order(),
    };
    write!(out, "{report}").context("failed to write report")?;
    out.flush().context("failed to flush report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lootbag_inventory::SortAttribute;

    fn render(config: &CliConfig) -> String {
        let mut out = Vec::new();
        run(config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn default_run_prints_the_starter_backpack_in_order() {
        let output = render(&CliConfig::default());
        assert_eq!(
            output,
            "SMALL HEALTH POTION (CONSUMABLE)\nLevel: 1\nValue: 10\nQuantity: 2\n\n\
             TIRED GAUNTLETS (ARMOR)\nLevel: 3\nValue: 25\n\n"
        );
    }

    #[test]
    fn sorted_run_uses_the_requested_attribute() {
        let config = CliConfig {
            sort_by: Some(SortAttribute::Level),
            ascending: false,
            ..CliConfig::default()
        };
        let output = render(&config);
        assert!(output.starts_with("TIRED GAUNTLETS (ARMOR)\n"));
    }

    #[test]
    fn seed_file_items_stack() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "NOODLES", "type": "CONSUMABLE", "level": 0, "gold_value": 120, "quantity": 2, "time_picked_up": 1},
                {"name": "FEATHER DUSTER", "type": "WEAPON", "level": 5, "gold_value": 100},
                {"name": "NOODLES", "type": "CONSUMABLE", "level": 0, "gold_value": 120, "quantity": 3, "time_picked_up": 2}
            ]"#,
        )
        .unwrap();

        let config = CliConfig {
            seed: Some(path),
            ..CliConfig::default()
        };
        let inventory = load_inventory(&config).unwrap();
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.find_item("NOODLES").unwrap().quantity(), 5);
        assert_eq!(inventory.total_gold_value(), 700);
    }

    #[test]
    fn unreadable_seed_file_is_reported() {
        let config = CliConfig {
            seed: Some("/definitely/not/here.json".into()),
            ..CliConfig::default()
        };
        let err = load_inventory(&config).unwrap_err();
        assert!(err.to_string().contains("failed to read seed file"));
    }

    #[test]
    fn malformed_seed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, r#"[{"name": "X", "type": "SHIELD"}]"#).unwrap();

        let config = CliConfig {
            seed: Some(path),
            ..CliConfig::default()
        };
        let err = load_inventory(&config).unwrap_err();
        assert!(err.to_string().contains("failed to parse seed file"));
    }
}
