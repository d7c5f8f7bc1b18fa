use crate::server::{
    data::giveaway::GiveawayRepository,
    error::{giveaway::GiveawayError, AppError},
    model::giveaway::{
        ActorContext, CreateGiveawayParams, EndTrigger, GiveawayAction, GiveawayRender,
        GiveawayStatus,
    },
    service::{
        giveaway::{lock::GiveawayLocks, CreateGiveawayInput, GiveawayService},
        giveaway_notification::GiveawayNotifier,
        giveaway_permission::GiveawayPermissions,
    },
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;
use serenity::async_trait;
use test_utils::{builder::TestBuilder, factory};


const GUILD_ID: u64 = 1;
const CHANNEL_ID: u64 = 2;
const HOST_ID: u64 = 3;
const MANAGER_ID: u64 = 4;
const STRANGER_ID: u64 = 5;

/// Grants every action to a fixed set of users.
struct StaticPermissions {
    allowed: Vec<u64>,
}

impl StaticPermissions {
    fn managers() -> Self {
        Self {
            allowed: vec![MANAGER_ID],
        }
    }
}

#[async_trait]
impl GiveawayPermissions for StaticPermissions {
    async fn is_authorized(
        &self,
        _guild_id: u64,
        user_id: u64,
        _action: GiveawayAction,
    ) -> Result<bool, AppError> {
        Ok(self.allowed.contains(&user_id))
    }
}

/// Records the entry counts shown on announcements.
#[derive(Default)]
struct EntryCountNotifier {
    counts: Mutex<Vec<usize>>,
}

impl EntryCountNotifier {
    fn counts(&self) -> Vec<usize> {
        self.counts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GiveawayNotifier for EntryCountNotifier {
    async fn announce_created(&self, _giveaway: &GiveawayRender) -> Result<Option<u64>, AppError> {
        Ok(None)
    }

    async fn announce_entry_count(&self, giveaway: &GiveawayRender) -> Result<(), AppError> {
        self.counts.lock().unwrap().push(giveaway.participant_count);
        Ok(())
    }

    async fn announce_ended(&self, _giveaway: &GiveawayRender) -> Result<(), AppError> {
        Ok(())
    }

    async fn announce_rerolled(&self, _giveaway: &GiveawayRender) -> Result<(), AppError> {
        Ok(())
    }
}

fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_767_225_600, 0).unwrap()
}

fn params(winners_count: u32, duration_seconds: i64) -> CreateGiveawayParams {
    CreateGiveawayParams {
        guild_id: GUILD_ID,
        channel_id: CHANNEL_ID,
        host_id: HOST_ID,
        prize: "Nitro".to_string(),
        description: None,
        winners_count,
        duration_seconds,
    }
}

fn actor(user_id: u64) -> ActorContext {
    ActorContext { user_id }
}
