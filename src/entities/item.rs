//! Item entity - Shop catalog entries.
//!
//! Seeded once at startup and immutable afterwards except by administrative
//! action. The `effect` payload is a JSON document whose interpretation
//! belongs to the systems that consume the item, not to the shop.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Stable stock-keeping id (e.g. `SKU_SEED_GOLD`)
    #[sea_orm(unique)]
    pub sku: String,
    /// Display name shown in the shop
    pub name: String,
    /// Category: seed, tool, upgrade, consumable, cosmetic or service
    pub category: String,
    /// Structured effect payload as a JSON string
    pub effect: String,
    /// Base price before VIP discount and the global price coefficient
    pub price: f64,
    /// Rarity tier label, informative to this core
    pub rarity: String,
}

/// Defines relationships between Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One item appears in many inventories
    #[sea_orm(has_many = "super::inventory_entry::Entity")]
    Inventory,
}

impl Related<super::inventory_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
