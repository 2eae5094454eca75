/// Item catalog definitions and loading from catalog.toml
pub mod catalog;

/// Database configuration and connection management
pub mod database;

/// Game tuning constants and loading from game.toml
pub mod game;

pub use catalog::{ItemConfig, default_catalog, load_catalog};
pub use database::{create_connection, create_tables, get_database_url};
pub use game::{GameSettings, load_settings};
