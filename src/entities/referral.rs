//! Referral entity - One row per referral relationship.
//!
//! Written exactly once, when a new player registers with a valid referrer.
//! The reward amounts are copied in at creation time so later tuning changes
//! do not rewrite history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Referral database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "referrals")]
pub struct Model {
    /// Unique identifier for the relationship
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Player who shared the referral link
    pub referrer_id: i64,
    /// Player who registered through it
    pub referred_id: i64,
    /// Bonus credited to the referrer
    pub reward_referrer: f64,
    /// Bonus credited to the new player
    pub reward_referred: f64,
    /// Whether the referrer bonus has been paid out
    pub paid_referrer: bool,
    /// Whether the new-player bonus has been paid out
    pub paid_referred: bool,
    /// When the relationship was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Referral and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
