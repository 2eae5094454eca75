//! Unified error types for the economy core.
//!
//! Every domain failure is a recoverable value whose `Display` text is safe to
//! show to the player. Only [`Error::Database`] signals that the enclosing
//! operation failed wholesale.

use thiserror::Error;

/// All errors the economy core can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or validation failed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The underlying store rejected or failed an operation
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No player row exists for this id
    #[error("Player {id} not found")]
    PlayerNotFound {
        /// Chat user id that was looked up
        id: i64,
    },

    /// No catalog item exists for this id
    #[error("Item {id} not found")]
    ItemNotFound {
        /// Catalog item id that was looked up
        id: i64,
    },

    /// No unharvested plot exists at this slot
    #[error("Nothing to collect in slot {slot}")]
    PlotNotFound {
        /// Farm slot index
        slot: i32,
    },

    /// An unharvested plot already sits at this slot
    #[error("Slot {slot} is already occupied")]
    SlotOccupied {
        /// Farm slot index
        slot: i32,
    },

    /// The plot has not finished growing
    #[error("Not grown yet! {minutes_left} min remaining")]
    NotYetGrown {
        /// Whole minutes until the plot is harvestable
        minutes_left: i64,
    },

    /// The work cooldown has not elapsed
    #[error("Take a break! Wait another {seconds_left}s")]
    CooldownActive {
        /// Seconds until the player may work again
        seconds_left: i64,
    },

    /// The balance does not cover the price or cost
    #[error("Not enough money: need {required}, have {available}")]
    InsufficientFunds {
        /// Amount the operation would debit
        required: f64,
        /// Balance at the time of the check
        available: f64,
    },

    /// The player holds no stock of the seed item they tried to plant
    #[error("You don't have any {item}")]
    MissingSeed {
        /// Display name of the seed item
        item: String,
    },

    /// A monetary amount was not a finite number
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
