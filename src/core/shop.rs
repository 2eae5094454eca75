//! Shop and inventory - Catalog listing, atomic purchases, holdings.
//!
//! Purchasing is the one flow that must be atomic end-to-end under concurrent
//! calls for the same player: the balance read, the debit, the inventory
//! upsert and the log record all commit in a single database transaction.

use crate::{
    config::{GameSettings, ItemConfig},
    core::ledger,
    entities::{InventoryEntry, Item, Player, inventory_entry, item, player},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// What one purchase produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseOutcome {
    /// Catalog id of the purchased item
    pub item_id: i64,
    /// Display name, for the confirmation message
    pub item_name: String,
    /// Price actually paid, after discount and coefficient
    pub price: f64,
    /// Balance after the debit
    pub new_balance: f64,
    /// Held quantity after the purchase
    pub quantity: i32,
}

/// Lists catalog items, most expensive first.
///
/// With a category, only that shelf; an unknown category is an empty list,
/// not an error.
pub async fn list_items(
    db: &DatabaseConnection,
    category: Option<&str>,
) -> Result<Vec<item::Model>> {
    let mut query = Item::find();
    if let Some(category) = category {
        query = query.filter(item::Column::Category.eq(category));
    }
    query
        .order_by_desc(item::Column::Price)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a catalog item by its stock-keeping id.
pub async fn get_item_by_sku(db: &DatabaseConnection, sku: &str) -> Result<Option<item::Model>> {
    Item::find()
        .filter(item::Column::Sku.eq(sku))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Buys one unit of an item for a player.
///
/// The effective price is
/// `floor(base_price * vip_discount * price_coefficient)`. Fails without any
/// state change when the item or player is absent or the balance does not
/// cover the price; a balance exactly equal to the price is sufficient.
#[instrument(skip(db, settings))]
pub async fn buy_item(
    db: &DatabaseConnection,
    player_id: i64,
    item_id: i64,
    settings: &GameSettings,
) -> Result<PurchaseOutcome> {
    let txn = db.begin().await?;

    let item = Item::find_by_id(item_id)
        .one(&txn)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })?;
    let buyer = Player::find_by_id(player_id)
        .one(&txn)
        .await?
        .ok_or(Error::PlayerNotFound { id: player_id })?;

    let discount = if buyer.vip {
        settings.vip_price_discount
    } else {
        1.0
    };
    let price = (item.price * discount * settings.price_coefficient).floor();

    if buyer.balance < price {
        return Err(Error::InsufficientFunds {
            required: price,
            available: buyer.balance,
        });
    }

    let new_balance = buyer.balance - price;
    let mut debit: player::ActiveModel = buyer.into();
    debit.balance = Set(new_balance);
    debit.update(&txn).await?;

    let quantity = match InventoryEntry::find_by_id((player_id, item_id))
        .one(&txn)
        .await?
    {
        Some(entry) => {
            let quantity = entry.qty + 1;
            let mut credit: inventory_entry::ActiveModel = entry.into();
            credit.qty = Set(quantity);
            credit.update(&txn).await?;
            quantity
        }
        None => {
            inventory_entry::ActiveModel {
                player_id: Set(player_id),
                item_id: Set(item_id),
                qty: Set(1),
            }
            .insert(&txn)
            .await?;
            1
        }
    };

    ledger::record_transaction(
        &txn,
        player_id,
        ledger::kind::PURCHASE,
        ledger::CURRENCY_USD,
        -price,
        Some(new_balance),
        Some(serde_json::json!({
            "item_id": item.id,
            "item_name": item.name,
            "rarity": item.rarity,
        })),
    )
    .await?;

    txn.commit().await?;
    Ok(PurchaseOutcome {
        item_id: item.id,
        item_name: item.name,
        price,
        new_balance,
        quantity,
    })
}

/// Retrieves a player's holdings with quantities, joined to the catalog.
pub async fn get_inventory(
    db: &DatabaseConnection,
    player_id: i64,
) -> Result<Vec<(item::Model, i32)>> {
    let entries = InventoryEntry::find()
        .filter(inventory_entry::Column::PlayerId.eq(player_id))
        .filter(inventory_entry::Column::Qty.gt(0))
        .find_also_related(Item)
        .all(db)
        .await?;

    Ok(entries
        .into_iter()
        .filter_map(|(entry, item)| item.map(|item| (item, entry.qty)))
        .collect())
}

/// Seeds the shop catalog, skipping SKUs that already exist.
///
/// Returns how many items were inserted; safe to run on every startup.
#[instrument(skip(db, items))]
pub async fn seed_catalog(db: &DatabaseConnection, items: &[ItemConfig]) -> Result<usize> {
    let txn = db.begin().await?;

    let mut inserted = 0;
    for config in items {
        let exists = Item::find()
            .filter(item::Column::Sku.eq(&config.sku))
            .one(&txn)
            .await?
            .is_some();
        if exists {
            continue;
        }

        let entry = item::ActiveModel {
            sku: Set(config.sku.clone()),
            name: Set(config.name.clone()),
            category: Set(config.category.clone()),
            effect: Set(config.effect.clone()),
            price: Set(config.price),
            rarity: Set(config.rarity.clone()),
            ..Default::default()
        };
        entry.insert(&txn).await?;
        inserted += 1;
    }

    txn.commit().await?;
    if inserted > 0 {
        info!(inserted, "seeded shop catalog");
    }
    Ok(inserted)
}
