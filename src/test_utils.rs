//! Shared test utilities for the economy core.
//!
//! Provides the standard in-memory database setup and small factory/fixture
//! helpers so integration tests stay focused on the behavior under test.

use crate::{
    config::{GameSettings, database, default_catalog},
    core::{player, shop},
    entities::{FarmPlot, Player, farm_plot, inventory_entry},
    errors::{Error, Result},
};
use rand::{SeedableRng, rngs::StdRng};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    database::create_tables(&db).await?;
    Ok(db)
}

/// Default game tuning for tests.
pub fn settings() -> GameSettings {
    GameSettings::default()
}

/// Deterministic random source for payout tests.
pub fn test_rng() -> StdRng {
    StdRng::seed_from_u64(0x5EED_CAFE)
}

/// Registers a test player with sensible defaults (no referrer, default
/// starting balance).
pub async fn create_test_player(
    db: &DatabaseConnection,
    id: i64,
) -> Result<crate::entities::PlayerModel> {
    player::ensure_player(db, id, None, "Test Player", None, &settings()).await
}

/// Sets a player's balance directly, for funding test scenarios.
pub async fn set_balance(db: &DatabaseConnection, id: i64, balance: f64) -> Result<()> {
    let current = Player::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::PlayerNotFound { id })?;
    let mut patch: crate::entities::player::ActiveModel = current.into();
    patch.balance = Set(balance);
    patch.update(db).await?;
    Ok(())
}

/// Seeds the built-in shop catalog.
pub async fn seed_default_catalog(db: &DatabaseConnection) -> Result<()> {
    shop::seed_catalog(db, &default_catalog()).await?;
    Ok(())
}

/// Puts `qty` units of an item into a player's inventory without a purchase.
pub async fn grant_item(
    db: &DatabaseConnection,
    player_id: i64,
    item_id: i64,
    qty: i32,
) -> Result<()> {
    let entry = inventory_entry::ActiveModel {
        player_id: Set(player_id),
        item_id: Set(item_id),
        qty: Set(qty),
    };
    entry.insert(db).await?;
    Ok(())
}

/// Moves a plot's planting time into the past so it reads as grown.
pub async fn backdate_plot(db: &DatabaseConnection, plot_id: i64, seconds: i64) -> Result<()> {
    let plot = FarmPlot::find_by_id(plot_id)
        .one(db)
        .await?
        .ok_or(Error::PlotNotFound { slot: 0 })?;
    let planted_at = plot.planted_at - chrono::Duration::seconds(seconds);
    let mut patch: farm_plot::ActiveModel = plot.into();
    patch.planted_at = Set(planted_at);
    patch.update(db).await?;
    Ok(())
}

/// Initializes test tracing output; safe to call from multiple tests.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
