//! Database configuration module.
//!
//! Handles `SQLite` database connection and table creation using `SeaORM`.
//! Table creation uses `Schema::create_table_from_entity` so the schema is
//! generated from the entity definitions in [`crate::entities`] without any
//! hand-written SQL.

use crate::entities::{FarmPlot, InventoryEntry, Item, Player, Referral, Transaction};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns the default
/// `SQLite` path.
///
/// Looks for `DATABASE_URL` in the environment and falls back to a local
/// `SQLite` file if not found.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/level_game.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database.
///
/// Uses [`get_database_url`] to resolve the location, so the embedding
/// application only needs to export `DATABASE_URL` when the default local
/// file is not wanted.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all database tables from the entity definitions.
///
/// Safe to run against a fresh database only; existing installations already
/// carry the schema.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let player_table = schema.create_table_from_entity(Player);
    let farm_plot_table = schema.create_table_from_entity(FarmPlot);
    let item_table = schema.create_table_from_entity(Item);
    let inventory_table = schema.create_table_from_entity(InventoryEntry);
    let transaction_table = schema.create_table_from_entity(Transaction);
    let referral_table = schema.create_table_from_entity(Referral);

    db.execute(builder.build(&player_table)).await?;
    db.execute(builder.build(&farm_plot_table)).await?;
    db.execute(builder.build(&item_table)).await?;
    db.execute(builder.build(&inventory_table)).await?;
    db.execute(builder.build(&transaction_table)).await?;
    db.execute(builder.build(&referral_table)).await?;

    Ok(())
}
