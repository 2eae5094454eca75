//! Transaction entity - Append-only log of every balance-affecting event.
//!
//! Each record carries the kind (`work_income`, `purchase`, `farm_income`,
//! `farm_upgrade`, `farm_expand`), the signed amount, the balance after the
//! event where the writing operation records it, and a JSON `meta` payload.
//! Records are write-once; nothing in the crate mutates or deletes them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Player the event belongs to
    pub player_id: i64,
    /// Event kind
    pub kind: String,
    /// Currency label, "USD" for the main balance
    pub currency: String,
    /// Signed delta (positive for income, negative for spending)
    pub amount: f64,
    /// Balance after the event, when the writer recorded it
    pub balance_after: Option<f64>,
    /// Structured metadata as a JSON string
    pub meta: Option<String>,
    /// When the event happened
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each record belongs to one player
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::PlayerId",
        to = "super::player::Column::Id"
    )]
    Player,
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
