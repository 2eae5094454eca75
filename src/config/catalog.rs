//! Shop catalog definitions, loadable from a TOML file.
//!
//! The built-in [`default_catalog`] reproduces the live item set; deployments
//! that want a different shop provide a `catalog.toml` instead. Either way the
//! entries are seeded into the `items` table once at startup via
//! [`crate::core::shop::seed_catalog`].

use crate::core::catalog::Seed;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Definition of a single purchasable item.
#[derive(Debug, Deserialize, Clone)]
pub struct ItemConfig {
    /// Stable stock-keeping id
    pub sku: String,
    /// Display name
    pub name: String,
    /// Category: seed, tool, upgrade, consumable, cosmetic or service
    pub category: String,
    /// Structured effect payload as a JSON string
    pub effect: String,
    /// Base price before discounts and the global coefficient
    pub price: f64,
    /// Rarity tier label
    pub rarity: String,
}

/// Catalog file structure
#[derive(Debug, Deserialize)]
struct CatalogFile {
    items: Vec<ItemConfig>,
}

/// Loads a shop catalog from a TOML file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<ItemConfig>> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file: {e}"),
    })?;

    let file: CatalogFile = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog: {e}"),
    })?;
    Ok(file.items)
}

fn entry(sku: &str, name: &str, category: &str, effect: &str, price: f64, rarity: &str) -> ItemConfig {
    ItemConfig {
        sku: sku.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        effect: effect.to_string(),
        price,
        rarity: rarity.to_string(),
    }
}

/// The built-in item set.
///
/// Seed items are generated from the farm's [`Seed`] catalog so the shop and
/// the grow tables cannot drift apart.
pub fn default_catalog() -> Vec<ItemConfig> {
    let mut items = vec![
        // Work gear
        entry("SKU_HARDHAT_1", "Basic Hard Hat", "upgrade", r#"{"safety":1}"#, 250.0, "common"),
        entry("SKU_HARDHAT_2", "Reinforced Hard Hat", "upgrade", r#"{"safety":2}"#, 1_200.0, "uncommon"),
        entry("SKU_RAKE_1", "Rake", "tool", r#"{"farm":1}"#, 180.0, "common"),
        entry("SKU_RAKE_2", "Pro Rake", "tool", r#"{"farm":2}"#, 900.0, "uncommon"),
        entry("SKU_LAMP_1", "Miner's Lamp", "tool", r#"{"mine":1}"#, 600.0, "common"),
        entry("SKU_MEDKIT_1", "First Aid Kit", "consumable", r#"{"heal":1}"#, 800.0, "common"),
        entry("SKU_CHARM_1", "Lucky Charm", "consumable", r#"{"luck":1}"#, 3_000.0, "rare"),

        // Upgraded gear
        entry("SKU_VEST", "Safety Vest", "upgrade", r#"{"safety":3}"#, 5_000.0, "rare"),
        entry("SKU_AXE", "Axe", "tool", r#"{"wood":1}"#, 400.0, "common"),
        entry("SKU_HAMMER", "Sledgehammer", "tool", r#"{"build":1}"#, 700.0, "common"),
        entry("SKU_COFFEE", "Coffee", "consumable", r#"{"speed":1}"#, 350.0, "common"),
        entry("SKU_SUPER_HARDHAT", "Deluxe Hard Hat", "upgrade", r#"{"safety":4}"#, 12_000.0, "epic"),
        entry("SKU_PRO_TOOLS", "Pro Toolkit", "upgrade", r#"{"eff":2}"#, 2_500.0, "rare"),
        entry("SKU_FISH_PRO", "Pro Fishing Tackle", "tool", r#"{"fish":2}"#, 1_800.0, "rare"),

        // Business services
        entry("SKU_MARKETING", "Marketing Package", "service", r#"{"biz_income":1}"#, 8_000.0, "rare"),
        entry("SKU_WORKFORCE", "Work Crew", "service", r#"{"employees":1}"#, 15_000.0, "epic"),
        entry("SKU_SAFE", "Safe", "service", r#"{"storage":1}"#, 2_200.0, "uncommon"),

        // Trinkets
        entry("SKU_LUCK_RING", "Ring of Fortune", "consumable", r#"{"luck":2}"#, 2_000.0, "rare"),
        entry("SKU_HAT_VIP", "VIP Hat", "cosmetic", "{}", 1_000.0, "uncommon"),
        entry("SKU_CLOAK_VIP", "VIP Cloak", "cosmetic", "{}", 3_000.0, "rare"),
        entry("SKU_ENGINEER", "Engineer's Tools", "upgrade", r#"{"eff":3}"#, 7_000.0, "epic"),
        entry("SKU_EMPLOYEE", "Employee Contract", "service", r#"{"employee":1}"#, 5_000.0, "rare"),
        entry("SKU_LICENSE", "Casino License", "service", r#"{"license":1}"#, 6_000.0, "epic"),
        entry("SKU_INVEST", "Investment Package", "service", r#"{"invest":1}"#, 10_000.0, "epic"),
        entry("SKU_LUCK_PLUS", "Lucky Charm +2", "consumable", r#"{"luck":3}"#, 5_000.0, "epic"),

        // Farm infrastructure
        entry("SKU_FARM_EXPAND", "Farm Expansion", "upgrade", r#"{"farm_slots":1}"#, 10_000.0, "rare"),
        entry("SKU_AUTO_WATER", "Auto Sprinkler", "upgrade", r#"{"farm_speed":0.8}"#, 8_000.0, "rare"),
        entry("SKU_FERTILIZER", "Fertilizer", "consumable", r#"{"farm_yield":1.5}"#, 3_000.0, "uncommon"),
        entry("SKU_GREENHOUSE", "Greenhouse", "upgrade", r#"{"farm_income":2.0}"#, 25_000.0, "epic"),
        entry("SKU_IRRIGATION", "Irrigation System", "upgrade", r#"{"farm_growth":0.7}"#, 15_000.0, "rare"),
    ];

    for seed in Seed::ALL {
        items.push(ItemConfig {
            sku: seed.sku().to_string(),
            name: seed.name().to_string(),
            category: "seed".to_string(),
            effect: format!(r#"{{"farm_income":{}}}"#, seed.income_multiplier()),
            price: seed.price(),
            rarity: seed.rarity().to_string(),
        });
    }

    items
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_default_catalog_skus_are_unique() {
        let items = default_catalog();
        let mut skus: Vec<&str> = items.iter().map(|i| i.sku.as_str()).collect();
        skus.sort_unstable();
        skus.dedup();
        assert_eq!(skus.len(), items.len());
    }

    #[test]
    fn test_every_seed_item_resolves_in_the_farm_catalog() {
        for item in default_catalog().iter().filter(|i| i.category == "seed") {
            let seed = Seed::find(&item.name)
                .unwrap_or_else(|| panic!("seed item '{}' has no grow profile", item.name));
            assert_eq!(seed.price(), item.price);
        }
    }

    #[test]
    fn test_effect_payloads_are_valid_json() {
        for item in default_catalog() {
            let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str(&item.effect);
            assert!(parsed.is_ok(), "item '{}' carries malformed effect JSON", item.sku);
        }
    }

    #[test]
    fn test_load_catalog_missing_file_is_a_config_error() {
        let result = load_catalog("does/not/exist/catalog.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_parse_catalog_toml() {
        let toml_str = r#"
            [[items]]
            sku = "SKU_TEST"
            name = "Test Gadget"
            category = "tool"
            effect = '{"farm":1}'
            price = 42.0
            rarity = "common"
        "#;

        let file: CatalogFile = toml::from_str(toml_str).unwrap();
        assert_eq!(file.items.len(), 1);
        assert_eq!(file.items[0].sku, "SKU_TEST");
        assert_eq!(file.items[0].price, 42.0);
    }
}
