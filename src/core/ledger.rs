//! Transaction log - The append-only audit trail of the economy.
//!
//! Every balance-affecting operation appends exactly one record here from
//! inside its own database transaction. Records are never mutated or deleted.

use crate::{
    entities::{Transaction, transaction},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};

/// Record kinds written by the economy core.
pub mod kind {
    /// Work payout
    pub const WORK_INCOME: &str = "work_income";
    /// Shop purchase
    pub const PURCHASE: &str = "purchase";
    /// Harvest payout
    pub const FARM_INCOME: &str = "farm_income";
    /// Farm level upgrade
    pub const FARM_UPGRADE: &str = "farm_upgrade";
    /// Farm slot expansion
    pub const FARM_EXPAND: &str = "farm_expand";
}

/// Currency label of the main balance.
pub const CURRENCY_USD: &str = "USD";

/// Appends one record to the transaction log.
///
/// Generic over [`ConnectionTrait`] so compound operations can log from inside
/// their own transaction. `balance_after` is recorded only where the writing
/// operation tracks it.
pub async fn record_transaction<C: ConnectionTrait>(
    db: &C,
    player_id: i64,
    kind: &str,
    currency: &str,
    amount: f64,
    balance_after: Option<f64>,
    meta: Option<serde_json::Value>,
) -> Result<transaction::Model> {
    if !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }

    let record = transaction::ActiveModel {
        player_id: Set(player_id),
        kind: Set(kind.to_string()),
        currency: Set(currency.to_string()),
        amount: Set(amount),
        balance_after: Set(balance_after),
        meta: Set(meta.map(|m| m.to_string())),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    record.insert(db).await.map_err(Into::into)
}

/// Retrieves a player's transaction records, newest first.
pub async fn get_transactions_for_player(
    db: &DatabaseConnection,
    player_id: i64,
) -> Result<Vec<transaction::Model>> {
    Transaction::find()
        .filter(transaction::Column::PlayerId.eq(player_id))
        .order_by_desc(transaction::Column::CreatedAt)
        .order_by_desc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
