//! Work subsystem - Cooldown-gated payout generation.
//!
//! [`can_work`] is an advisory probe for menus; [`work`] is the operation.
//! The payout, the cooldown stamp, the experience grant and the log record all
//! commit in one database transaction, and the stamp is written through a
//! conditional update so a concurrent double submission cannot collect twice.

use crate::{
    config::GameSettings,
    core::{catalog::Job, ledger},
    entities::{Player, player},
    errors::{Error, Result},
};
use rand::Rng;
use sea_orm::{Condition, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::instrument;

/// Advisory cooldown state for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkAvailability {
    /// Whether a work action would be accepted right now
    pub ready: bool,
    /// Seconds until the cooldown elapses; 0 when ready
    pub seconds_remaining: i64,
}

/// What one work action produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkOutcome {
    /// Currency earned, after level scaling and multipliers
    pub earned: i64,
    /// Experience granted (nominal; VIP doubling happens in the grant)
    pub xp_gained: i64,
    /// Cosmetic star-reward flag, set with probability 1/50. Delivery of the
    /// reward is the caller's concern; this crate only reports the roll.
    pub star_reward: bool,
    /// Balance after the payout
    pub new_balance: f64,
    /// Whether the experience grant caused at least one level-up
    pub promoted: bool,
    /// Level after the grant
    pub level: i32,
}

/// Effective cooldown for a player: the base length, halved for VIP.
const fn cooldown_secs(vip: bool, settings: &GameSettings) -> i64 {
    settings.work_cooldown_secs / if vip { 2 } else { 1 }
}

/// Reports whether a player may work now, and how long until they can.
///
/// Purely advisory: the authoritative check happens inside [`work`].
pub async fn can_work(
    db: &DatabaseConnection,
    id: i64,
    settings: &GameSettings,
) -> Result<WorkAvailability> {
    let found = Player::find_by_id(id).one(db).await?;
    let current = found.ok_or(Error::PlayerNotFound { id })?;

    let cooldown = cooldown_secs(current.vip, settings);
    Ok(match current.last_work_at {
        None => WorkAvailability {
            ready: true,
            seconds_remaining: 0,
        },
        Some(last) => {
            let elapsed = (chrono::Utc::now() - last).num_seconds();
            WorkAvailability {
                ready: elapsed >= cooldown,
                seconds_remaining: (cooldown - elapsed).max(0),
            }
        }
    })
}

/// Performs one work action in the given job category.
///
/// Earnings follow
/// `floor((base_income + level*2 + uniform(0 ..= level*3)) * multiplier)`
/// where the multiplier is the VIP doubling times the player's income
/// multiplier. The balance is clamped at zero on the way in, the lifetime
/// action counter increments, the job's experience is granted, and one
/// `work_income` record is appended - all in one transaction. The cooldown
/// stamp uses a conditional `UPDATE ... WHERE last_work_at <= threshold`; zero
/// affected rows means another submission won the race and this one fails the
/// cooldown check.
#[instrument(skip(db, settings, rng))]
pub async fn work<R: Rng>(
    db: &DatabaseConnection,
    id: i64,
    job: Job,
    settings: &GameSettings,
    rng: &mut R,
) -> Result<WorkOutcome> {
    let txn = db.begin().await?;

    let found = Player::find_by_id(id).one(&txn).await?;
    let current = found.ok_or(Error::PlayerNotFound { id })?;

    let cooldown = cooldown_secs(current.vip, settings);
    let now = chrono::Utc::now();
    if let Some(last) = current.last_work_at {
        let elapsed = (now - last).num_seconds();
        if elapsed < cooldown {
            return Err(Error::CooldownActive {
                seconds_left: cooldown - elapsed,
            });
        }
    }

    let level = i64::from(current.level);
    let multiplier = if current.vip { 2.0 } else { 1.0 } * current.income_multiplier;
    let roll = rng.gen_range(0..=level * 3);
    #[allow(clippy::cast_precision_loss)]
    let earned = ((job.base_income() + level * 2 + roll) as f64 * multiplier).floor();
    let new_balance = (current.balance + earned).max(0.0);

    let threshold = now - chrono::Duration::seconds(cooldown);
    let stamped = Player::update_many()
        .col_expr(player::Column::Balance, Expr::value(new_balance))
        .col_expr(
            player::Column::Actions,
            Expr::col(player::Column::Actions).add(1),
        )
        .col_expr(player::Column::LastWorkAt, Expr::value(now))
        .filter(player::Column::Id.eq(id))
        .filter(
            Condition::any()
                .add(player::Column::LastWorkAt.is_null())
                .add(player::Column::LastWorkAt.lte(threshold)),
        )
        .exec(&txn)
        .await?;
    if stamped.rows_affected == 0 {
        // Lost the race to a concurrent submission.
        return Err(Error::CooldownActive {
            seconds_left: cooldown,
        });
    }

    ledger::record_transaction(
        &txn,
        id,
        ledger::kind::WORK_INCOME,
        ledger::CURRENCY_USD,
        earned,
        Some(new_balance),
        Some(serde_json::json!({ "job": job.name() })),
    )
    .await?;

    let progress = crate::core::player::add_xp(&txn, id, job.xp_gain()).await?;

    txn.commit().await?;

    let star_reward = rng.gen_range(1..=50) == 1;
    #[allow(clippy::cast_possible_truncation)]
    Ok(WorkOutcome {
        earned: earned as i64,
        xp_gained: job.xp_gain(),
        star_reward,
        new_balance,
        promoted: progress.promoted,
        level: progress.level,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::config::GameSettings;
    use crate::core::player::{get_player, update_player};
    use crate::test_utils::{create_test_player, settings, setup_test_db, test_rng};
    use sea_orm::Set;

    fn no_cooldown() -> GameSettings {
        GameSettings {
            work_cooldown_secs: 0,
            ..settings()
        }
    }

    #[tokio::test]
    async fn test_fresh_player_is_ready() -> Result<()> {
        let db = setup_test_db().await?;
        let player = create_test_player(&db, 1).await?;

        let availability = can_work(&db, player.id, &settings()).await?;
        assert!(availability.ready);
        assert_eq!(availability.seconds_remaining, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_level_one_farm_payout_range() -> Result<()> {
        let db = setup_test_db().await?;
        let player = create_test_player(&db, 1).await?;
        let settings = no_cooldown();
        let mut rng = test_rng();

        // base 12 + level*2 = 14, plus uniform(0..=3), multiplier 1
        let mut balance = player.balance;
        for _ in 0..40 {
            // Pin the player at level 1 so every draw uses the same formula;
            // the xp granted by the previous iteration would level them up.
            let mut reset: player::ActiveModel = get_player(&db, player.id).await?.unwrap().into();
            reset.level = Set(1);
            reset.xp = Set(0);
            update_player(&db, reset).await?;

            let outcome = work(&db, player.id, Job::Farm, &settings, &mut rng).await?;
            assert!((14..=17).contains(&outcome.earned), "earned {}", outcome.earned);
            assert_eq!(outcome.xp_gained, 8);
            assert_eq!(outcome.new_balance, balance + outcome.earned as f64);
            balance = outcome.new_balance;
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_work_updates_counters_and_stamp() -> Result<()> {
        let db = setup_test_db().await?;
        let player = create_test_player(&db, 1).await?;

        let outcome = work(&db, player.id, Job::Mine, &settings(), &mut test_rng()).await?;

        let after = get_player(&db, player.id).await?.unwrap();
        assert_eq!(after.actions, 1);
        assert!(after.last_work_at.is_some());
        assert_eq!(after.balance, outcome.new_balance);
        // Mine grants 12 xp: past the level-1 threshold of 10
        assert!(outcome.promoted);
        assert_eq!(after.level, 2);
        assert_eq!(after.xp, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_work_appends_ledger_record() -> Result<()> {
        let db = setup_test_db().await?;
        let player = create_test_player(&db, 1).await?;

        let outcome = work(&db, player.id, Job::Fish, &settings(), &mut test_rng()).await?;

        let records = ledger::get_transactions_for_player(&db, player.id).await?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ledger::kind::WORK_INCOME);
        assert_eq!(records[0].amount, outcome.earned as f64);
        assert_eq!(records[0].balance_after, Some(outcome.new_balance));
        assert_eq!(records[0].meta.as_deref(), Some(r#"{"job":"fish"}"#));
        Ok(())
    }

    #[tokio::test]
    async fn test_cooldown_blocks_second_action() -> Result<()> {
        let db = setup_test_db().await?;
        let player = create_test_player(&db, 1).await?;
        let settings = settings(); // 8 second cooldown
        let mut rng = test_rng();

        work(&db, player.id, Job::Farm, &settings, &mut rng).await?;
        let result = work(&db, player.id, Job::Farm, &settings, &mut rng).await;
        match result {
            Err(Error::CooldownActive { seconds_left }) => {
                assert!((1..=settings.work_cooldown_secs).contains(&seconds_left));
            }
            other => panic!("expected cooldown error, got {other:?}"),
        }

        let availability = can_work(&db, player.id, &settings).await?;
        assert!(!availability.ready);
        assert!(availability.seconds_remaining > 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_vip_doubles_pay_and_halves_cooldown() -> Result<()> {
        let db = setup_test_db().await?;
        let player = create_test_player(&db, 1).await?;
        let mut patch: crate::entities::player::ActiveModel = player.clone().into();
        patch.vip = Set(true);
        update_player(&db, patch).await?;

        let outcome = work(&db, player.id, Job::Farm, &settings(), &mut test_rng()).await?;
        // Non-VIP range is 14..=17; doubled.
        assert!((28..=34).contains(&outcome.earned), "earned {}", outcome.earned);

        let availability = can_work(&db, player.id, &settings()).await?;
        assert!(availability.seconds_remaining <= settings().work_cooldown_secs / 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_income_multiplier_scales_pay() -> Result<()> {
        let db = setup_test_db().await?;
        let player = create_test_player(&db, 1).await?;
        let mut patch: crate::entities::player::ActiveModel = player.into();
        patch.income_multiplier = Set(1.5);
        update_player(&db, patch).await?;

        let outcome = work(&db, 1, Job::Farm, &settings(), &mut test_rng()).await?;
        // floor(14..=17 * 1.5)
        assert!((21..=25).contains(&outcome.earned), "earned {}", outcome.earned);
        Ok(())
    }

    #[tokio::test]
    async fn test_work_missing_player() -> Result<()> {
        let db = setup_test_db().await?;
        let result = work(&db, 999, Job::Farm, &settings(), &mut test_rng()).await;
        assert!(matches!(result, Err(Error::PlayerNotFound { id: 999 })));
        let probe = can_work(&db, 999, &settings()).await;
        assert!(matches!(probe, Err(Error::PlayerNotFound { id: 999 })));
        Ok(())
    }
}
