//! Inventory entity - (player, item) quantity counters.
//!
//! Created at quantity 1 on first purchase, incremented and decremented
//! thereafter. Quantities never go negative; planting checks stock before
//! decrementing.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    /// Owning player's chat user id
    #[sea_orm(primary_key, auto_increment = false)]
    pub player_id: i64,
    /// Catalog item id
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_id: i64,
    /// Held quantity; never negative
    pub qty: i32,
}

/// Defines relationships between InventoryEntry and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one player
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::PlayerId",
        to = "super::player::Column::Id"
    )]
    Player,
    /// Each entry counts one catalog item
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id"
    )]
    Item,
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
