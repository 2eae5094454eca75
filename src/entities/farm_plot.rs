//! Farm plot entity - One planting at one slot of one player's farm.
//!
//! A plot is "growing" until its grow time elapses, then harvestable; the
//! distinction is derived from `planted_at` at read time, never stored.
//! Harvested plots are kept as history, so at most one *unharvested* plot may
//! exist per (player, slot).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Farm plot database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "farm_plots")]
pub struct Model {
    /// Unique identifier for the planting
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning player's chat user id
    pub player_id: i64,
    /// Slot index on the player's farm
    pub slot: i32,
    /// Display name of the planted seed; unrecognized names fall back to
    /// default grow time and multiplier at harvest
    pub seed_type: String,
    /// When the seed was planted
    pub planted_at: DateTimeUtc,
    /// Terminal flag; set exactly once on collection
    pub harvested: bool,
}

/// Defines relationships between FarmPlot and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each plot belongs to one player
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
