//! Farm subsystem - Plant, harvest, upgrade, expand.
//!
//! A plot's lifecycle per (player, slot) is empty -> growing -> harvestable ->
//! harvested, where "harvestable" is derived from the planting timestamp at
//! read time; nothing advances plots on a clock. Harvested plots stay in the
//! table as history, so the occupancy rule is: at most one unharvested plot
//! per slot.

use crate::{
    config::GameSettings,
    core::{catalog::Seed, ledger},
    entities::{FarmPlot, InventoryEntry, Item, Player, farm_plot, inventory_entry, player},
    errors::{Error, Result},
};
use rand::Rng;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::instrument;

/// What one harvest produced.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestOutcome {
    /// Currency credited for the harvest
    pub income: i64,
    /// Display name of the harvested seed
    pub seed_type: String,
    /// Slot the harvest came from
    pub slot: i32,
}

/// What a farm level upgrade cost and produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeOutcome {
    /// Currency debited
    pub cost: i64,
    /// Farm level after the upgrade
    pub new_level: i32,
}

/// What a farm expansion cost and produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOutcome {
    /// Currency debited
    pub cost: i64,
    /// Slot capacity after the expansion
    pub new_slots: i32,
}

/// A player's unharvested plots, ordered by slot.
pub async fn get_farm_plots(
    db: &DatabaseConnection,
    player_id: i64,
) -> Result<Vec<farm_plot::Model>> {
    FarmPlot::find()
        .filter(farm_plot::Column::PlayerId.eq(player_id))
        .filter(farm_plot::Column::Harvested.eq(false))
        .order_by_asc(farm_plot::Column::Slot)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Seconds until a plot is harvestable; zero or negative when it already is.
pub fn remaining_grow_seconds(plot: &farm_plot::Model, now: chrono::DateTime<chrono::Utc>) -> i64 {
    let (grow_minutes, _) = Seed::profile(&plot.seed_type);
    grow_minutes * 60 - (now - plot.planted_at).num_seconds()
}

/// Plants a seed item into a slot, consuming one unit from the inventory.
///
/// The occupancy check, the inventory decrement and the plot insert commit in
/// one transaction, so a concurrent second action by the same player cannot
/// plant more seeds than it owns. Only seed-category items are plantable; slot
/// indices are chosen by the caller, which derives them from the player's slot
/// capacity.
#[instrument(skip(db))]
pub async fn plant_seed(
    db: &DatabaseConnection,
    player_id: i64,
    slot: i32,
    item_id: i64,
) -> Result<farm_plot::Model> {
    let txn = db.begin().await?;

    let seed_item = Item::find_by_id(item_id)
        .one(&txn)
        .await?
        .filter(|item| item.category == "seed")
        .ok_or(Error::ItemNotFound { id: item_id })?;

    let occupied = FarmPlot::find()
        .filter(farm_plot::Column::PlayerId.eq(player_id))
        .filter(farm_plot::Column::Slot.eq(slot))
        .filter(farm_plot::Column::Harvested.eq(false))
        .one(&txn)
        .await?
        .is_some();
    if occupied {
        return Err(Error::SlotOccupied { slot });
    }

    let stock = InventoryEntry::find_by_id((player_id, item_id))
        .one(&txn)
        .await?
        .filter(|entry| entry.qty > 0)
        .ok_or_else(|| Error::MissingSeed {
            item: seed_item.name.clone(),
        })?;

    let remaining = stock.qty - 1;
    let mut spend: inventory_entry::ActiveModel = stock.into();
    spend.qty = Set(remaining);
    spend.update(&txn).await?;

    let plot = farm_plot::ActiveModel {
        player_id: Set(player_id),
        slot: Set(slot),
        seed_type: Set(seed_item.name),
        planted_at: Set(chrono::Utc::now()),
        harvested: Set(false),
        ..Default::default()
    };
    let plot = plot.insert(&txn).await?;

    txn.commit().await?;
    Ok(plot)
}

/// Harvests the plot at a slot, crediting a level- and seed-scaled payout.
///
/// Income follows
/// `floor(farm_base_income * seed_multiplier * farm_level * (1 + uniform[0,1)))`.
/// Fails while the plot is still growing, reporting whole minutes left. Each
/// planting pays out exactly once: the plot is marked harvested in the same
/// transaction as the credit, and a harvested slot reads as empty afterwards.
#[instrument(skip(db, settings, rng))]
pub async fn harvest_plot<R: Rng>(
    db: &DatabaseConnection,
    player_id: i64,
    slot: i32,
    settings: &GameSettings,
    rng: &mut R,
) -> Result<HarvestOutcome> {
    let txn = db.begin().await?;

    let plot = FarmPlot::find()
        .filter(farm_plot::Column::PlayerId.eq(player_id))
        .filter(farm_plot::Column::Slot.eq(slot))
        .filter(farm_plot::Column::Harvested.eq(false))
        .one(&txn)
        .await?
        .ok_or(Error::PlotNotFound { slot })?;

    let now = chrono::Utc::now();
    let left = remaining_grow_seconds(&plot, now);
    if left > 0 {
        return Err(Error::NotYetGrown {
            minutes_left: left / 60,
        });
    }

    let farmer = Player::find_by_id(player_id)
        .one(&txn)
        .await?
        .ok_or(Error::PlayerNotFound { id: player_id })?;

    let (_, multiplier) = Seed::profile(&plot.seed_type);
    let income = (settings.farm_base_income
        * multiplier
        * f64::from(farmer.farm_level)
        * (1.0 + rng.r#gen::<f64>()))
    .floor();

    Player::update_many()
        .col_expr(
            player::Column::Balance,
            Expr::col(player::Column::Balance).add(income),
        )
        .filter(player::Column::Id.eq(player_id))
        .exec(&txn)
        .await?;

    let seed_type = plot.seed_type.clone();
    let mut reap: farm_plot::ActiveModel = plot.into();
    reap.harvested = Set(true);
    reap.update(&txn).await?;

    ledger::record_transaction(
        &txn,
        player_id,
        ledger::kind::FARM_INCOME,
        ledger::CURRENCY_USD,
        income,
        None,
        Some(serde_json::json!({ "seed_type": seed_type, "slot": slot })),
    )
    .await?;

    txn.commit().await?;
    #[allow(clippy::cast_possible_truncation)]
    Ok(HarvestOutcome {
        income: income as i64,
        seed_type,
        slot,
    })
}

/// Raises the farm level by one for a geometrically growing cost.
///
/// Cost is `floor(base * multiplier^(farm_level - 1))`: 5000 at level 1,
/// 7500 at level 2, and so on.
#[instrument(skip(db, settings))]
pub async fn upgrade_farm(
    db: &DatabaseConnection,
    player_id: i64,
    settings: &GameSettings,
) -> Result<UpgradeOutcome> {
    let txn = db.begin().await?;

    let farmer = Player::find_by_id(player_id)
        .one(&txn)
        .await?
        .ok_or(Error::PlayerNotFound { id: player_id })?;

    let cost = (settings.farm_upgrade_base_cost
        * settings
            .farm_upgrade_cost_multiplier
            .powi(farmer.farm_level - 1))
    .floor();
    if farmer.balance < cost {
        return Err(Error::InsufficientFunds {
            required: cost,
            available: farmer.balance,
        });
    }

    let new_level = farmer.farm_level + 1;
    let new_balance = farmer.balance - cost;
    let mut improve: player::ActiveModel = farmer.into();
    improve.balance = Set(new_balance);
    improve.farm_level = Set(new_level);
    improve.update(&txn).await?;

    ledger::record_transaction(
        &txn,
        player_id,
        ledger::kind::FARM_UPGRADE,
        ledger::CURRENCY_USD,
        -cost,
        None,
        Some(serde_json::json!({ "new_level": new_level })),
    )
    .await?;

    txn.commit().await?;
    #[allow(clippy::cast_possible_truncation)]
    Ok(UpgradeOutcome {
        cost: cost as i64,
        new_level,
    })
}

/// Adds one farm slot for a flat cost.
#[instrument(skip(db, settings))]
pub async fn expand_farm(
    db: &DatabaseConnection,
    player_id: i64,
    settings: &GameSettings,
) -> Result<ExpandOutcome> {
    let txn = db.begin().await?;

    let farmer = Player::find_by_id(player_id)
        .one(&txn)
        .await?
        .ok_or(Error::PlayerNotFound { id: player_id })?;

    let cost = settings.farm_expand_cost;
    if farmer.balance < cost {
        return Err(Error::InsufficientFunds {
            required: cost,
            available: farmer.balance,
        });
    }

    let new_slots = farmer.farm_slots + 1;
    let new_balance = farmer.balance - cost;
    let mut widen: player::ActiveModel = farmer.into();
    widen.balance = Set(new_balance);
    widen.farm_slots = Set(new_slots);
    widen.update(&txn).await?;

    ledger::record_transaction(
        &txn,
        player_id,
        ledger::kind::FARM_EXPAND,
        ledger::CURRENCY_USD,
        -cost,
        None,
        Some(serde_json::json!({ "new_slots": new_slots })),
    )
    .await?;

    txn.commit().await?;
    #[allow(clippy::cast_possible_truncation)]
    Ok(ExpandOutcome {
        cost: cost as i64,
        new_slots,
    })
}
