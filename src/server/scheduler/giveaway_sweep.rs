use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    config::GIVEAWAY_SWEEP_SCHEDULE,
    error::AppError,
    model::giveaway::EndTrigger,
    service::{
        giveaway::{lock::GiveawayLocks, GiveawayService},
        giveaway_notification::GiveawayNotifier,
        giveaway_permission::GiveawayPermissions,
    },
};

/// Outcome of a single sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Giveaways moved to completed by this sweep.
    pub ended: usize,
    /// Expired giveaways that could not be ended, retried on the next sweep.
    pub failed: usize,
}

/// Starts the giveaway sweep scheduler
///
/// Runs one sweep immediately so giveaways that expired while the bot was offline are
/// resolved, then schedules a sweep on `GIVEAWAY_SWEEP_SCHEDULE`.
///
/// # Arguments
/// - `db`: Database connection
/// - `locks`: Per-giveaway locks shared with the bot
/// - `permissions`: Permission checker, unused by the trusted scheduler trigger but
///   required by the service
/// - `notifier`: Notifier announcing the winners
pub async fn start_scheduler(
    db: DatabaseConnection,
    locks: GiveawayLocks,
    permissions: Arc<dyn GiveawayPermissions>,
    notifier: Arc<dyn GiveawayNotifier>,
) -> Result<(), AppError> {
    match sweep_expired(&db, &locks, permissions.as_ref(), notifier.as_ref(), Utc::now()).await {
        Ok(report) => tracing::info!(
            "Startup sweep ended {} giveaways, {} failed",
            report.ended,
            report.failed
        ),
        Err(e) => tracing::error!("Error during startup giveaway sweep: {}", e),
    }

    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(GIVEAWAY_SWEEP_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();
        let locks = locks.clone();
        let permissions = permissions.clone();
        let notifier = notifier.clone();

        Box::pin(async move {
            if let Err(e) = sweep_expired(
                &db,
                &locks,
                permissions.as_ref(),
                notifier.as_ref(),
                Utc::now(),
            )
            .await
            {
                tracing::error!("Error sweeping expired giveaways: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Giveaway sweep scheduler started");

    Ok(())
}

/// Ends every active giveaway whose end time has been reached.
///
/// Each giveaway is processed on its own: a failure is logged and counted, and the
/// remaining giveaways are still processed. A giveaway whose end failed stays active and
/// is picked up again by the next sweep. A failed announcement does not undo the end.
///
/// # Arguments
/// - `db`: Database connection
/// - `locks`: Per-giveaway locks
/// - `permissions`: Permission checker passed to the service
/// - `notifier`: Notifier announcing the winners
/// - `now`: Time of the sweep
///
/// # Returns
/// - `Ok(SweepReport)` - Counts of ended and failed giveaways
/// - `Err(AppError::DbErr)` - Expired giveaways could not be listed
pub async fn sweep_expired(
    db: &DatabaseConnection,
    locks: &GiveawayLocks,
    permissions: &dyn GiveawayPermissions,
    notifier: &dyn GiveawayNotifier,
    now: DateTime<Utc>,
) -> Result<SweepReport, AppError> {
    let service = GiveawayService::new(db, locks, permissions);
    let mut report = SweepReport::default();

    // Records are loaded one by one in `end`, so a row that cannot be decoded only
    // fails itself
    let expired = service.list_expired_ids(now).await?;

    for id in expired {
        let ended = match service.end(&id, EndTrigger::Scheduler, now).await {
            Ok(Some(ended)) => ended,
            // Ended manually since it was listed
            Ok(None) => continue,
            Err(e) => {
                report.failed += 1;
                if e.is_storage() {
                    tracing::error!("Failed to end giveaway {}, retrying next sweep: {}", id, e);
                } else {
                    tracing::error!("Failed to end giveaway {}: {}", id, e);
                }
                continue;
            }
        };

        report.ended += 1;

        if let Err(e) = notifier.announce_ended(&ended.render()).await {
            tracing::error!(
                "Failed to announce winners of giveaway {}: {}",
                ended.id,
                e
            );
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Duration;
    use serenity::async_trait;
    use test_utils::{builder::TestBuilder, factory};

    use super::*;
    use crate::server::{
        data::giveaway::GiveawayRepository,
        model::giveaway::{
            ActorContext, CreateGiveawayParams, GiveawayAction, GiveawayRender, GiveawayStatus,
        },
    };

    struct DenyAll;

    #[async_trait]
    impl GiveawayPermissions for DenyAll {
        async fn is_authorized(
            &self,
            _guild_id: u64,
            _user_id: u64,
            _action: GiveawayAction,
        ) -> Result<bool, AppError> {
            Ok(false)
        }
    }

    /// Records every announcement instead of posting it.
    #[derive(Default)]
    struct RecordingNotifier {
        ended: Mutex<Vec<GiveawayRender>>,
    }

    impl RecordingNotifier {
        fn ended(&self) -> Vec<GiveawayRender> {
            self.ended.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GiveawayNotifier for RecordingNotifier {
        async fn announce_created(
            &self,
            _giveaway: &GiveawayRender,
        ) -> Result<Option<u64>, AppError> {
            Ok(None)
        }

        async fn announce_entry_count(&self, _giveaway: &GiveawayRender) -> Result<(), AppError> {
            Ok(())
        }

        async fn announce_ended(&self, giveaway: &GiveawayRender) -> Result<(), AppError> {
            self.ended.lock().unwrap().push(giveaway.clone());
            Ok(())
        }

        async fn announce_rerolled(&self, _giveaway: &GiveawayRender) -> Result<(), AppError> {
            Ok(())
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_767_225_600, 0).unwrap()
    }

    /// Tests the full lifecycle of a one minute giveaway resolved by the sweep.
    ///
    /// Expected: one winner drawn from the three entrants, status Completed, announced once
    #[tokio::test]
    async fn ends_expired_giveaway_with_one_winner() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_giveaway_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let locks = GiveawayLocks::new();
        let notifier = RecordingNotifier::default();
        let service = GiveawayService::new(db, &locks, &DenyAll);

        let now = fixed_now();
        let giveaway = service
            .create(
                CreateGiveawayParams {
                    guild_id: 1,
                    channel_id: 2,
                    host_id: 3,
                    prize: "Nitro".to_string(),
                    description: None,
                    winners_count: 1,
                    duration_seconds: 60,
                },
                now,
            )
            .await?;
        for user_id in [10, 20, 30] {
            service
                .enter(&giveaway.id, ActorContext { user_id }, now)
                .await?;
        }

        let report = sweep_expired(
            db,
            &locks,
            &DenyAll,
            &notifier,
            giveaway.ends_at + Duration::seconds(1),
        )
        .await?;

        assert_eq!(report, SweepReport { ended: 1, failed: 0 });

        let stored = service.get(&giveaway.id).await?.unwrap();
        assert_eq!(stored.status, GiveawayStatus::Completed);
        assert_eq!(stored.winners.len(), 1);
        assert!([10, 20, 30].contains(&stored.winners[0]));

        let announced = notifier.ended();
        assert_eq!(announced.len(), 1);
        assert_eq!(announced[0].winners, stored.winners);

        Ok(())
    }

    /// Tests that giveaways still running are left alone.
    ///
    /// Expected: empty report and the giveaway still active
    #[tokio::test]
    async fn skips_running_giveaways() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_giveaway_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let locks = GiveawayLocks::new();
        let notifier = RecordingNotifier::default();

        let giveaway = factory::create_giveaway(db).await?;

        let report = sweep_expired(db, &locks, &DenyAll, &notifier, Utc::now()).await?;

        assert_eq!(report, SweepReport::default());
        assert!(notifier.ended().is_empty());
        let stored = GiveawayRepository::new(db).get(&giveaway.id).await?.unwrap();
        assert_eq!(stored.status, GiveawayStatus::Active);

        Ok(())
    }

    /// Tests that a second sweep does not resolve the same giveaway again.
    ///
    /// Expected: first sweep ends it, second sweep reports nothing
    #[tokio::test]
    async fn completed_giveaways_are_not_swept_twice() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_giveaway_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let locks = GiveawayLocks::new();
        let notifier = RecordingNotifier::default();

        let giveaway = factory::create_expired_giveaway(db, 1).await?;
        factory::create_participant(db, &giveaway.id, 10).await?;

        let now = Utc::now();
        let first = sweep_expired(db, &locks, &DenyAll, &notifier, now).await?;
        let second = sweep_expired(db, &locks, &DenyAll, &notifier, now).await?;

        assert_eq!(first.ended, 1);
        assert_eq!(second, SweepReport::default());
        assert_eq!(notifier.ended().len(), 1);
        assert_eq!(notifier.ended()[0].winners, vec![10]);

        Ok(())
    }

    /// Fails the announcement of one specific giveaway.
    struct FailingNotifier {
        fail_for: String,
        inner: RecordingNotifier,
    }

    #[async_trait]
    impl GiveawayNotifier for FailingNotifier {
        async fn announce_created(
            &self,
            giveaway: &GiveawayRender,
        ) -> Result<Option<u64>, AppError> {
            self.inner.announce_created(giveaway).await
        }

        async fn announce_entry_count(&self, giveaway: &GiveawayRender) -> Result<(), AppError> {
            self.inner.announce_entry_count(giveaway).await
        }

        async fn announce_ended(&self, giveaway: &GiveawayRender) -> Result<(), AppError> {
            if giveaway.id == self.fail_for {
                return Err(sea_orm::DbErr::Custom("channel unavailable".to_string()).into());
            }
            self.inner.announce_ended(giveaway).await
        }

        async fn announce_rerolled(&self, giveaway: &GiveawayRender) -> Result<(), AppError> {
            self.inner.announce_rerolled(giveaway).await
        }
    }

    /// Tests that a failed announcement does not stop other giveaways from being ended.
    ///
    /// Expected: both giveaways completed, only the other one announced
    #[tokio::test]
    async fn announcement_failure_does_not_stop_sweep() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_giveaway_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let locks = GiveawayLocks::new();

        let first = factory::giveaway::GiveawayFactory::new(db)
            .ends_at(Utc::now() - Duration::minutes(10))
            .build()
            .await?;
        let second = factory::giveaway::GiveawayFactory::new(db)
            .ends_at(Utc::now() - Duration::minutes(5))
            .build()
            .await?;

        let notifier = FailingNotifier {
            fail_for: first.id.clone(),
            inner: RecordingNotifier::default(),
        };

        let report = sweep_expired(db, &locks, &DenyAll, &notifier, Utc::now()).await?;

        assert_eq!(report, SweepReport { ended: 2, failed: 0 });

        let repo = GiveawayRepository::new(db);
        for id in [&first.id, &second.id] {
            let stored = repo.get(id).await?.unwrap();
            assert_eq!(stored.status, GiveawayStatus::Completed);
        }

        let announced = notifier.inner.ended();
        assert_eq!(announced.len(), 1);
        assert_eq!(announced[0].id, second.id);

        Ok(())
    }

    /// Tests that a giveaway which cannot be loaded does not block the other expired ones.
    ///
    /// Expected: the valid giveaway completes, the corrupted one is counted as failed and
    /// stays active
    #[tokio::test]
    async fn undecodable_giveaway_does_not_stop_sweep() -> Result<(), AppError> {
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

        let test = TestBuilder::new()
            .with_giveaway_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let locks = GiveawayLocks::new();
        let notifier = RecordingNotifier::default();

        let corrupted = factory::giveaway::GiveawayFactory::new(db)
            .ends_at(Utc::now() - Duration::minutes(10))
            .build()
            .await?;
        entity::prelude::Giveaway::update_many()
            .col_expr(
                entity::giveaway::Column::HostId,
                sea_orm::sea_query::Expr::value("not-a-snowflake"),
            )
            .filter(entity::giveaway::Column::Id.eq(corrupted.id.as_str()))
            .exec(db)
            .await?;
        let valid = factory::giveaway::GiveawayFactory::new(db)
            .ends_at(Utc::now() - Duration::minutes(5))
            .build()
            .await?;

        let report = sweep_expired(db, &locks, &DenyAll, &notifier, Utc::now()).await?;

        assert_eq!(report, SweepReport { ended: 1, failed: 1 });

        let stored = GiveawayRepository::new(db).get(&valid.id).await?.unwrap();
        assert_eq!(stored.status, GiveawayStatus::Completed);

        let row = entity::prelude::Giveaway::find_by_id(corrupted.id.clone())
            .one(db)
            .await?
            .unwrap();
        assert_eq!(row.status, GiveawayStatus::Active.as_str());

        let announced = notifier.ended();
        assert_eq!(announced.len(), 1);
        assert_eq!(announced[0].id, valid.id);

        Ok(())
    }
}
