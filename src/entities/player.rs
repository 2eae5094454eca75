//! Player entity - One row per chat user, created on first contact.
//!
//! Carries the currency balance, leveling state, work cooldown stamp, VIP and
//! referral bookkeeping, and the farm progression counters. Rows are never
//! deleted; moderation sets the `banned` flag instead.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Player database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    /// Chat user id; assigned by the transport, not auto-incremented
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Chat handle, if the transport supplied one
    pub username: Option<String>,
    /// Display name shown in game messages
    pub display_name: String,
    /// Currency balance; never negative after any debit
    pub balance: f64,
    /// Lifetime count of completed work actions
    pub actions: i32,
    /// Experience toward the next level (residual, not lifetime total)
    pub xp: i64,
    /// Current level, starting at 1
    pub level: i32,
    /// When the player last worked; None until the first work action
    pub last_work_at: Option<DateTimeUtc>,
    /// VIP status flag consumed by payout, discount and cooldown formulas
    pub vip: bool,
    /// When the VIP grant lapses; enforcement belongs to the moderation layer
    pub vip_until: Option<DateTimeUtc>,
    /// Role label, "player" unless promoted by moderation
    pub role: String,
    /// Id of the player who referred this one, if any
    pub referrer_id: Option<i64>,
    /// How many players this one has referred
    pub referrals: i32,
    /// Soft-ban flag; banned players keep their row and history
    pub banned: bool,
    /// How many times the player has prestiged
    pub prestige_count: i32,
    /// Per-player multiplicative work-payout modifier, distinct from VIP doubling
    pub income_multiplier: f64,
    /// Farm level; scales harvest income
    pub farm_level: i32,
    /// Farm slot capacity; gates concurrent plantings
    pub farm_slots: i32,
    /// When the row was created
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Player and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One player has many farm plots
    #[sea_orm(has_many = "super::farm_plot::Entity")]
    FarmPlots,
    /// One player has many inventory entries
    #[sea_orm(has_many = "super::inventory_entry::Entity")]
    Inventory,
    /// One player has many transaction records
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::farm_plot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FarmPlots.def()
    }
}

impl Related<super::inventory_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
