//! Player ledger - Registration, lookup, patching and the leveling curve.
//!
//! Registration is idempotent and carries the one-time referral rewards; the
//! leveling helpers are shared by every operation that grants experience.

use crate::{
    config::GameSettings,
    entities::{Player, Referral, player, referral},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{debug, instrument};

/// Experience thresholds for levels 1..=14, indexed by current level.
const LEVEL_XP: [i64; 15] = [
    0, 10, 50, 100, 200, 400, 700, 1_000, 1_500, 2_000, 3_000, 5_000, 7_500, 10_000, 15_000,
];

/// Experience growth per level once the table runs out.
const XP_PER_LATE_LEVEL: i64 = 2_000;

/// Experience required to advance from `level` to `level + 1`.
///
/// Fixed table through level 14, then linear growth.
pub fn xp_for_next(level: i32) -> i64 {
    let last = LEVEL_XP.len() - 1;
    usize::try_from(level)
        .ok()
        .and_then(|idx| LEVEL_XP.get(idx).copied())
        .unwrap_or_else(|| LEVEL_XP[last] + (i64::from(level) - last as i64) * XP_PER_LATE_LEVEL)
}

/// Outcome of an experience grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    /// Whether at least one level-up occurred
    pub promoted: bool,
    /// Level after the grant
    pub level: i32,
}

/// Idempotent registration: returns the existing player unchanged, or creates
/// one with the starting balance.
///
/// When a new player arrives with a referrer id that names an existing, other
/// player, the same transaction inserts the referral record, bumps the
/// referrer's counter, and credits both parties their one-time bonus. The
/// bonuses are not written to the transaction log; the starting state implies
/// them. A referrer argument on a repeat call grants nothing.
#[instrument(skip(db, settings))]
pub async fn ensure_player(
    db: &DatabaseConnection,
    id: i64,
    username: Option<&str>,
    display_name: &str,
    referrer_id: Option<i64>,
    settings: &GameSettings,
) -> Result<player::Model> {
    let txn = db.begin().await?;

    if let Some(existing) = Player::find_by_id(id).one(&txn).await? {
        txn.commit().await?;
        return Ok(existing);
    }

    let now = chrono::Utc::now();
    let new_player = player::ActiveModel {
        id: Set(id),
        username: Set(username.map(ToString::to_string)),
        display_name: Set(display_name.to_string()),
        balance: Set(settings.starting_balance),
        actions: Set(0),
        xp: Set(0),
        level: Set(1),
        last_work_at: Set(None),
        vip: Set(false),
        vip_until: Set(None),
        role: Set("player".to_string()),
        referrer_id: Set(None),
        referrals: Set(0),
        banned: Set(false),
        prestige_count: Set(0),
        income_multiplier: Set(1.0),
        farm_level: Set(1),
        farm_slots: Set(3),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let mut created = new_player.insert(&txn).await?;

    // A referral only counts when the referrer is a real, different player.
    if let Some(ref_id) = referrer_id.filter(|&r| r != id) {
        if Player::find_by_id(ref_id).one(&txn).await?.is_some() {
            let record = referral::ActiveModel {
                referrer_id: Set(ref_id),
                referred_id: Set(id),
                reward_referrer: Set(settings.referral_reward_referrer),
                reward_referred: Set(settings.referral_reward_new),
                paid_referrer: Set(true),
                paid_referred: Set(true),
                created_at: Set(now),
                ..Default::default()
            };
            record.insert(&txn).await?;

            Player::update_many()
                .col_expr(
                    player::Column::Referrals,
                    Expr::col(player::Column::Referrals).add(1),
                )
                .col_expr(
                    player::Column::Balance,
                    Expr::col(player::Column::Balance).add(settings.referral_reward_referrer),
                )
                .filter(player::Column::Id.eq(ref_id))
                .exec(&txn)
                .await?;

            Player::update_many()
                .col_expr(
                    player::Column::Balance,
                    Expr::col(player::Column::Balance).add(settings.referral_reward_new),
                )
                .col_expr(player::Column::ReferrerId, Expr::value(ref_id))
                .filter(player::Column::Id.eq(id))
                .exec(&txn)
                .await?;

            created = Player::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or(Error::PlayerNotFound { id })?;
            debug!(player = id, referrer = ref_id, "referral bonus granted");
        }
    }

    txn.commit().await?;
    Ok(created)
}

/// Finds a player by chat user id.
pub async fn get_player(db: &DatabaseConnection, id: i64) -> Result<Option<player::Model>> {
    Player::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Applies a field patch to a player row, refreshing `updated_at`.
///
/// The read that produced the patch and this write are separate store round
/// trips; flows that must be atomic use the operation-level functions instead
/// of patching.
pub async fn update_player(
    db: &DatabaseConnection,
    mut patch: player::ActiveModel,
) -> Result<player::Model> {
    patch.updated_at = Set(chrono::Utc::now());
    patch.update(db).await.map_err(Into::into)
}

/// Grants experience, applying every level-up the new total affords.
///
/// VIP players receive double the nominal amount. Generic over
/// [`ConnectionTrait`] so payout operations can grant from inside their own
/// transaction.
pub async fn add_xp<C: ConnectionTrait>(db: &C, id: i64, amount: i64) -> Result<LevelProgress> {
    let found = Player::find_by_id(id).one(db).await?;
    let current = found.ok_or(Error::PlayerNotFound { id })?;

    let gained = amount * if current.vip { 2 } else { 1 };
    let mut xp = current.xp + gained;
    let mut level = current.level;
    let mut promoted = false;
    while xp >= xp_for_next(level) {
        xp -= xp_for_next(level);
        level += 1;
        promoted = true;
    }

    let mut active: player::ActiveModel = current.into();
    active.xp = Set(xp);
    active.level = Set(level);
    active.update(db).await?;

    Ok(LevelProgress { promoted, level })
}

/// Retrieves the referral records a player earned as referrer.
pub async fn get_referrals(
    db: &DatabaseConnection,
    referrer_id: i64,
) -> Result<Vec<referral::Model>> {
    Referral::find()
        .filter(referral::Column::ReferrerId.eq(referrer_id))
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{settings, setup_test_db};

    #[test]
    fn test_xp_curve_table_and_tail() {
        assert_eq!(xp_for_next(1), 10);
        assert_eq!(xp_for_next(2), 50);
        assert_eq!(xp_for_next(14), 15_000);
        // Linear +2000 once the table runs out
        assert_eq!(xp_for_next(15), 17_000);
        assert_eq!(xp_for_next(20), 27_000);
    }

    #[tokio::test]
    async fn test_ensure_creates_with_starting_state() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = settings();

        let player =
            ensure_player(&db, 42, Some("lvl_fan"), "Level Fan", None, &settings).await?;
        assert_eq!(player.id, 42);
        assert_eq!(player.username.as_deref(), Some("lvl_fan"));
        assert_eq!(player.balance, settings.starting_balance);
        assert_eq!(player.level, 1);
        assert_eq!(player.xp, 0);
        assert_eq!(player.farm_level, 1);
        assert_eq!(player.farm_slots, 3);
        assert_eq!(player.income_multiplier, 1.0);
        assert!(player.last_work_at.is_none());
        assert!(!player.vip);
        assert!(!player.banned);
        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = settings();

        let first = ensure_player(&db, 42, None, "Level Fan", None, &settings).await?;

        // Change a field, then call ensure again: the row comes back unchanged.
        let mut patch: player::ActiveModel = first.clone().into();
        patch.balance = Set(123.0);
        update_player(&db, patch).await?;

        let second = ensure_player(&db, 42, None, "Renamed", None, &settings).await?;
        assert_eq!(second.balance, 123.0);
        assert_eq!(second.display_name, "Level Fan");
        Ok(())
    }

    #[tokio::test]
    async fn test_referral_bonus_granted_once() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = settings();

        let referrer = ensure_player(&db, 1, None, "Referrer", None, &settings).await?;
        let referred = ensure_player(&db, 2, None, "Referred", Some(1), &settings).await?;

        assert_eq!(
            referred.balance,
            settings.starting_balance + settings.referral_reward_new
        );
        assert_eq!(referred.referrer_id, Some(1));

        let referrer = get_player(&db, referrer.id).await?.unwrap();
        assert_eq!(
            referrer.balance,
            settings.starting_balance + settings.referral_reward_referrer
        );
        assert_eq!(referrer.referrals, 1);

        // Registering again with the same referrer argument grants nothing.
        let again = ensure_player(&db, 2, None, "Referred", Some(1), &settings).await?;
        assert_eq!(again.balance, referred.balance);
        let referrer = get_player(&db, 1).await?.unwrap();
        assert_eq!(referrer.referrals, 1);
        assert_eq!(get_referrals(&db, 1).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_or_self_referrer_grants_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = settings();

        let ghost_ref = ensure_player(&db, 5, None, "Player", Some(999), &settings).await?;
        assert_eq!(ghost_ref.balance, settings.starting_balance);
        assert_eq!(ghost_ref.referrer_id, None);

        let self_ref = ensure_player(&db, 6, None, "Selfish", Some(6), &settings).await?;
        assert_eq!(self_ref.balance, settings.starting_balance);
        assert_eq!(self_ref.referrals, 0);
        assert!(get_referrals(&db, 6).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_referral_record_carries_reward_amounts() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = settings();

        ensure_player(&db, 1, None, "Referrer", None, &settings).await?;
        ensure_player(&db, 2, None, "Referred", Some(1), &settings).await?;

        let records = get_referrals(&db, 1).await?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].referred_id, 2);
        assert_eq!(records[0].reward_referrer, settings.referral_reward_referrer);
        assert_eq!(records[0].reward_referred, settings.referral_reward_new);
        assert!(records[0].paid_referrer);
        assert!(records[0].paid_referred);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_player_refreshes_updated_at() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = settings();
        let player = ensure_player(&db, 1, None, "Player", None, &settings).await?;

        let mut patch: player::ActiveModel = player.clone().into();
        patch.role = Set("moderator".to_string());
        let updated = update_player(&db, patch).await?;

        assert_eq!(updated.role, "moderator");
        assert!(updated.updated_at >= player.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_xp_single_level_up() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = settings();
        let player = ensure_player(&db, 1, None, "Player", None, &settings).await?;

        // Below the level-1 threshold of 10: no promotion.
        let progress = add_xp(&db, player.id, 8).await?;
        assert!(!progress.promoted);
        assert_eq!(progress.level, 1);

        // Crossing it promotes and keeps the remainder.
        let progress = add_xp(&db, player.id, 8).await?;
        assert!(progress.promoted);
        assert_eq!(progress.level, 2);
        let player = get_player(&db, player.id).await?.unwrap();
        assert_eq!(player.xp, 6);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_xp_applies_multiple_level_ups() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = settings();
        let player = ensure_player(&db, 1, None, "Player", None, &settings).await?;

        // 10 + 50 + 100 = 160 xp clears levels 1..=3 exactly.
        let progress = add_xp(&db, player.id, 165).await?;
        assert!(progress.promoted);
        assert_eq!(progress.level, 4);
        let player = get_player(&db, player.id).await?.unwrap();
        assert_eq!(player.xp, 5);
        assert!(player.xp < xp_for_next(player.level));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_xp_doubles_for_vip() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = settings();
        let player = ensure_player(&db, 1, None, "Player", None, &settings).await?;

        let mut patch: player::ActiveModel = player.into();
        patch.vip = Set(true);
        update_player(&db, patch).await?;

        // 5 nominal becomes 10 under VIP: exactly the level-1 threshold.
        let progress = add_xp(&db, 1, 5).await?;
        assert!(progress.promoted);
        assert_eq!(progress.level, 2);
        let player = get_player(&db, 1).await?.unwrap();
        assert_eq!(player.xp, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_xp_is_monotonic() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = settings();
        let player = ensure_player(&db, 1, None, "Player", None, &settings).await?;

        let mut last_level = 1;
        for amount in [3, 40, 7, 250, 1, 900] {
            let progress = add_xp(&db, player.id, amount).await?;
            assert!(progress.level >= last_level);
            last_level = progress.level;
            let current = get_player(&db, player.id).await?.unwrap();
            assert!(current.xp < xp_for_next(current.level));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_add_xp_missing_player() -> Result<()> {
        let db = setup_test_db().await?;
        let result = add_xp(&db, 999, 10).await;
        assert!(matches!(result, Err(Error::PlayerNotFound { id: 999 })));
        Ok(())
    }
}
