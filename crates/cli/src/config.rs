//! Environment-driven configuration for the `lootbag` binary.

use std::path::PathBuf;

use anyhow::Context;

use lootbag_inventory::SortAttribute;

pub const SEED_ENV: &str = "LOOTBAG_SEED";
pub const SORT_BY_ENV: &str = "LOOTBAG_SORT_BY";
pub const DESCENDING_ENV: &str = "LOOTBAG_DESCENDING";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// JSON array of items to seed the inventory with.
    pub seed: Option<PathBuf>,
    /// Sort the report on this attribute instead of listing by name.
    pub sort_by: Option<SortAttribute>,
    pub ascending: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            seed: None,
            sort_by: None,
            ascending: true,
        }
    }
}

impl CliConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let sort_by = get(SORT_BY_ENV)
            .map(|raw| raw.parse::<SortAttribute>())
            .transpose()
            .with_context(|| format!("invalid {SORT_BY_ENV}"))?;

        let descending = match get(DESCENDING_ENV) {
            None => false,
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("invalid {DESCENDING_ENV}: '{raw}'"))?,
        };

        Ok(Self {
            seed: get(SEED_ENV).map(PathBuf::from),
            sort_by,
            ascending: !descending,
        })
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => anyhow::bail!("expected true/false"),
    }
}
