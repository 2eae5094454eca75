//! Game tuning constants, loadable from a TOML file.
//!
//! Every payout, price and cooldown formula in [`crate::core`] reads its
//! constants from a [`GameSettings`] value, loaded once at startup. The
//! defaults reproduce the live tuning; a partial `game.toml` overrides only
//! the keys it names.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Tuning constants for the whole economy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Balance granted to a newly registered player
    pub starting_balance: f64,
    /// Base seconds between work actions (halved for VIP)
    pub work_cooldown_secs: i64,
    /// One-time bonus for the referrer when a referred player registers
    pub referral_reward_referrer: f64,
    /// One-time bonus for the newly referred player
    pub referral_reward_new: f64,
    /// Global multiplier applied to every shop price
    pub price_coefficient: f64,
    /// Price factor for VIP players (0.8 = 20% off)
    pub vip_price_discount: f64,
    /// Base income per harvest before seed and level scaling
    pub farm_base_income: f64,
    /// Cost of the first farm level upgrade
    pub farm_upgrade_base_cost: f64,
    /// Geometric growth factor of successive upgrade costs
    pub farm_upgrade_cost_multiplier: f64,
    /// Flat cost of adding one farm slot
    pub farm_expand_cost: f64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            starting_balance: 5_000.0,
            work_cooldown_secs: 8,
            referral_reward_referrer: 500.0,
            referral_reward_new: 200.0,
            price_coefficient: 1.10,
            vip_price_discount: 0.8,
            farm_base_income: 15.0,
            farm_upgrade_base_cost: 5_000.0,
            farm_upgrade_cost_multiplier: 1.5,
            farm_expand_cost: 10_000.0,
        }
    }
}

/// Loads game settings from a TOML file.
///
/// Keys absent from the file keep their defaults, so a tuning file only needs
/// to name what it changes.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<GameSettings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse game settings: {e}"),
    })
}
