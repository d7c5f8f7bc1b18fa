//! Giveaway lifecycle service.
//!
//! This module provides the `GiveawayService`, the state machine behind every giveaway.
//! A giveaway is created `Active`, collects entries until its end time, and is resolved to
//! `Completed` exactly once, either by the periodic sweep or by an authorized member.
//! Completed giveaways can be rerolled to draw new winners.
//!
//! Every mutating operation runs under the giveaway's entry in `GiveawayLocks` and re-reads
//! the record inside that critical section, so validations always see the latest state.
//!
//! - `draw` - Uniform winner selection
//! - `lock` - Per-giveaway locking

pub mod draw;
pub mod lock;

#[cfg(test)]
mod test;

use chrono::{DateTime, TimeDelta, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::giveaway::GiveawayRepository,
    error::{giveaway::GiveawayError, AppError},
    model::giveaway::{
        ActorContext, CreateGiveawayParams, EndTrigger, Giveaway, GiveawayAction,
        GiveawayStatus, MAX_DESCRIPTION_LENGTH, MAX_PRIZE_LENGTH, MAX_WINNERS,
        MIN_DURATION_SECONDS,
    },
    service::{
        giveaway::{draw::draw_winners, lock::GiveawayLocks},
        giveaway_notification::GiveawayNotifier,
        giveaway_permission::GiveawayPermissions,
    },
    util::duration::parse_duration,
};

/// Raw input for creating a giveaway, with the duration still as typed by the user.
#[derive(Debug, Clone)]
pub struct CreateGiveawayInput {
    pub guild_id: u64,
    pub channel_id: u64,
    pub host_id: u64,
    pub prize: String,
    pub description: Option<String>,
    pub winners_count: u32,
    /// Free-form duration such as `1d 12h`, see `parse_duration`.
    pub duration: String,
}

/// Service implementing the giveaway lifecycle.
///
/// Holds references to the database connection, the shared per-giveaway locks and the
/// permission checker consulted when a member other than the host ends or rerolls a
/// giveaway. Operations take the current time as a parameter.
pub struct GiveawayService<'a> {
    db: &'a DatabaseConnection,
    locks: &'a GiveawayLocks,
    permissions: &'a dyn GiveawayPermissions,
}

impl<'a> GiveawayService<'a> {
    /// Creates a new GiveawayService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `locks` - Per-giveaway locks shared by every service instance
    /// - `permissions` - Permission checker for non-host actors
    ///
    /// # Returns
    /// - `GiveawayService` - New service instance
    pub fn new(
        db: &'a DatabaseConnection,
        locks: &'a GiveawayLocks,
        permissions: &'a dyn GiveawayPermissions,
    ) -> Self {
        Self {
            db,
            locks,
            permissions,
        }
    }

    /// Creates and persists a new active giveaway.
    ///
    /// # Arguments
    /// - `params` - Giveaway details with the duration resolved to seconds
    /// - `now` - Creation time, the giveaway ends `duration_seconds` after it
    ///
    /// # Returns
    /// - `Ok(Giveaway)` - The created giveaway
    /// - `Err(GiveawayError::InvalidWinnersCount)` - Winner count outside `1..=MAX_WINNERS`
    /// - `Err(GiveawayError::InvalidDuration)` - Shorter than a minute or out of range
    /// - `Err(GiveawayError::InvalidPrize)` - Empty or overly long prize or description
    /// - `Err(AppError::DbErr)` - Failed to persist the giveaway
    pub async fn create(
        &self,
        params: CreateGiveawayParams,
        now: DateTime<Utc>,
    ) -> Result<Giveaway, AppError> {
        if params.winners_count < 1 || params.winners_count > MAX_WINNERS {
            return Err(GiveawayError::InvalidWinnersCount {
                count: params.winners_count,
                max: MAX_WINNERS,
            }
            .into());
        }

        if params.duration_seconds < MIN_DURATION_SECONDS {
            return Err(GiveawayError::InvalidDuration {
                reason: "Giveaway must last at least 1 minute".to_string(),
            }
            .into());
        }

        let ends_at = TimeDelta::try_seconds(params.duration_seconds)
            .and_then(|duration| now.checked_add_signed(duration))
            .ok_or_else(|| GiveawayError::InvalidDuration {
                reason: "Duration is too long".to_string(),
            })?;

        let prize = validate_prize(&params.prize)?;
        let description = validate_description(params.description)?;

        let giveaway = Giveaway {
            id: uuid::Uuid::new_v4().to_string(),
            guild_id: params.guild_id,
            channel_id: params.channel_id,
            host_id: params.host_id,
            prize,
            description,
            winners_count: params.winners_count,
            status: GiveawayStatus::Active,
            message_id: None,
            created_at: now,
            ends_at,
            ended_at: None,
            rerolled_at: None,
            participants: Default::default(),
            winners: Vec::new(),
        };

        GiveawayRepository::new(self.db).put(&giveaway).await?;

        tracing::info!(
            "Created giveaway {} for '{}' in guild {}, ends at {}",
            giveaway.id,
            giveaway.prize,
            giveaway.guild_id,
            giveaway.ends_at
        );

        Ok(giveaway)
    }

    /// Parses the raw duration and creates the giveaway.
    ///
    /// # Arguments
    /// - `input` - Giveaway details with the duration as typed by the user
    /// - `now` - Creation time
    ///
    /// # Returns
    /// - `Ok(Giveaway)` - The created giveaway
    /// - `Err(GiveawayError::InvalidDuration)` - Duration could not be parsed
    /// - Any error of `create`
    pub async fn create_from_input(
        &self,
        input: CreateGiveawayInput,
        now: DateTime<Utc>,
    ) -> Result<Giveaway, AppError> {
        let duration_seconds = parse_duration(&input.duration)?;

        self.create(
            CreateGiveawayParams {
                guild_id: input.guild_id,
                channel_id: input.channel_id,
                host_id: input.host_id,
                prize: input.prize,
                description: input.description,
                winners_count: input.winners_count,
                duration_seconds,
            },
            now,
        )
        .await
    }

    /// Enters a member into a running giveaway.
    ///
    /// The end time is checked against `now` directly, so entries are refused as soon as
    /// the giveaway expires even if the sweep has not resolved it yet.
    ///
    /// # Arguments
    /// - `id` - ID of the giveaway
    /// - `actor` - Member entering
    /// - `now` - Time of entry
    ///
    /// # Returns
    /// - `Ok(Giveaway)` - The giveaway including the new participant
    /// - `Err(GiveawayError::NotFound)` - No giveaway with this ID
    /// - `Err(GiveawayError::NotActive)` - Giveaway already completed
    /// - `Err(GiveawayError::AlreadyExpired)` - End time has passed
    /// - `Err(GiveawayError::AlreadyEntered)` - Member is already a participant
    /// - `Err(AppError::DbErr)` - Failed to store the entry
    pub async fn enter(
        &self,
        id: &str,
        actor: ActorContext,
        now: DateTime<Utc>,
    ) -> Result<Giveaway, AppError> {
        let _guard = self.locks.acquire(id).await;
        let repo = GiveawayRepository::new(self.db);

        let mut giveaway = self.get_existing(&repo, id).await?;

        if !giveaway.is_active() {
            return Err(GiveawayError::NotActive(id.to_string()).into());
        }

        if giveaway.is_expired(now) {
            return Err(GiveawayError::AlreadyExpired(id.to_string()).into());
        }

        if giveaway.participants.contains(&actor.user_id) {
            return Err(GiveawayError::AlreadyEntered {
                giveaway_id: id.to_string(),
                user_id: actor.user_id,
            }
            .into());
        }

        repo.add_participant(id, actor.user_id, now).await?;
        giveaway.participants.insert(actor.user_id);

        tracing::debug!(
            "User {} entered giveaway {} ({} entries)",
            actor.user_id,
            id,
            giveaway.participants.len()
        );

        Ok(giveaway)
    }

    /// Ends a giveaway and draws its winners.
    ///
    /// The scheduler trigger is trusted and silently skips giveaways that are no longer
    /// active, so a giveaway ended manually between two sweeps is not resolved twice. An
    /// actor trigger requires the actor to be the host or to be permitted to end
    /// giveaways.
    ///
    /// # Arguments
    /// - `id` - ID of the giveaway
    /// - `trigger` - Scheduler or requesting member
    /// - `now` - Completion time
    ///
    /// # Returns
    /// - `Ok(Some(Giveaway))` - The completed giveaway with its winners
    /// - `Ok(None)` - Scheduler trigger on a giveaway that is no longer active
    /// - `Err(GiveawayError::NotFound)` - No giveaway with this ID
    /// - `Err(GiveawayError::AlreadyCompleted)` - Actor trigger on a completed giveaway
    /// - `Err(GiveawayError::NotAuthorized)` - Actor is neither host nor permitted
    /// - `Err(AppError::DbErr)` - Failed to persist, the giveaway stays active
    pub async fn end(
        &self,
        id: &str,
        trigger: EndTrigger,
        now: DateTime<Utc>,
    ) -> Result<Option<Giveaway>, AppError> {
        let _guard = self.locks.acquire(id).await;
        let repo = GiveawayRepository::new(self.db);

        let mut giveaway = self.get_existing(&repo, id).await?;

        if !giveaway.is_active() {
            return match trigger {
                EndTrigger::Scheduler => {
                    tracing::debug!("Skipping giveaway {}, already completed", id);
                    Ok(None)
                }
                EndTrigger::Actor(_) => Err(GiveawayError::AlreadyCompleted(id.to_string()).into()),
            };
        }

        if let EndTrigger::Actor(actor) = trigger {
            self.authorize(&giveaway, actor, GiveawayAction::End).await?;
        }

        giveaway.winners = draw_winners(&giveaway.participants, giveaway.drawable_winners());
        giveaway.status = GiveawayStatus::Completed;
        giveaway.ended_at = Some(now);

        repo.put(&giveaway).await?;

        tracing::info!(
            "Ended giveaway {} with {} of {} winners from {} entries",
            id,
            giveaway.winners.len(),
            giveaway.winners_count,
            giveaway.participants.len()
        );

        Ok(Some(giveaway))
    }

    /// Draws new winners for a completed giveaway.
    ///
    /// Winners are drawn from all participants, previous winners included.
    ///
    /// # Arguments
    /// - `id` - ID of the giveaway
    /// - `actor` - Member requesting the reroll
    /// - `count` - Number of winners to draw, defaults to `min(winners_count, entries)`
    /// - `now` - Reroll time
    ///
    /// # Returns
    /// - `Ok(Giveaway)` - The giveaway with its new winners
    /// - `Err(GiveawayError::NotFound)` - No giveaway with this ID
    /// - `Err(GiveawayError::NotCompleted)` - Giveaway is still running
    /// - `Err(GiveawayError::NotAuthorized)` - Actor is neither host nor permitted
    /// - `Err(GiveawayError::NoParticipants)` - Nobody entered
    /// - `Err(GiveawayError::InvalidCount)` - Count outside `1..=min(winners_count, entries)`
    /// - `Err(AppError::DbErr)` - Failed to persist, previous winners are kept
    pub async fn reroll(
        &self,
        id: &str,
        actor: ActorContext,
        count: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<Giveaway, AppError> {
        let _guard = self.locks.acquire(id).await;
        let repo = GiveawayRepository::new(self.db);

        let mut giveaway = self.get_existing(&repo, id).await?;

        if giveaway.is_active() {
            return Err(GiveawayError::NotCompleted(id.to_string()).into());
        }

        self.authorize(&giveaway, actor, GiveawayAction::Reroll)
            .await?;

        if giveaway.participants.is_empty() {
            return Err(GiveawayError::NoParticipants(id.to_string()).into());
        }

        let max = giveaway.drawable_winners() as u32;
        let count = count.unwrap_or(max);
        if count < 1 || count > max {
            return Err(GiveawayError::InvalidCount { count, max }.into());
        }

        giveaway.winners = draw_winners(&giveaway.participants, count as usize);
        giveaway.rerolled_at = Some(now);

        repo.put(&giveaway).await?;

        tracing::info!(
            "User {} rerolled giveaway {}, drew {} winners",
            actor.user_id,
            id,
            giveaway.winners.len()
        );

        Ok(giveaway)
    }

    /// Refreshes the entry count shown on the giveaway's announcement.
    ///
    /// Runs under the giveaway's lock and renders the record as currently stored, so
    /// refreshes triggered by concurrent entries are applied in order and the last one
    /// always shows the latest count.
    ///
    /// # Arguments
    /// - `id` - ID of the giveaway
    /// - `notifier` - Notifier editing the announcement
    ///
    /// # Returns
    /// - `Ok(())` - Announcement refreshed, or the giveaway no longer exists
    /// - `Err(AppError)` - Loading the giveaway or editing the announcement failed
    pub async fn refresh_entry_count(
        &self,
        id: &str,
        notifier: &dyn GiveawayNotifier,
    ) -> Result<(), AppError> {
        let _guard = self.locks.acquire(id).await;

        let Some(giveaway) = GiveawayRepository::new(self.db).get(id).await? else {
            return Ok(());
        };

        notifier.announce_entry_count(&giveaway.render()).await
    }

    /// Records the announcement message of a giveaway.
    ///
    /// # Returns
    /// - `Ok(())` - Message ID stored
    /// - `Err(GiveawayError::NotFound)` - No giveaway with this ID
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn attach_message(&self, id: &str, message_id: u64) -> Result<(), AppError> {
        let _guard = self.locks.acquire(id).await;

        if !GiveawayRepository::new(self.db)
            .set_message_id(id, message_id)
            .await?
        {
            return Err(GiveawayError::NotFound(id.to_string()).into());
        }

        Ok(())
    }

    /// Finds a giveaway by ID.
    pub async fn get(&self, id: &str) -> Result<Option<Giveaway>, AppError> {
        GiveawayRepository::new(self.db).get(id).await
    }

    /// Lists running giveaways, optionally for a single guild, soonest end first.
    pub async fn list_active(&self, guild_id: Option<u64>) -> Result<Vec<Giveaway>, AppError> {
        GiveawayRepository::new(self.db).list_active(guild_id).await
    }

    /// IDs of active giveaways whose end time has been reached, soonest end first.
    pub async fn list_expired_ids(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError> {
        GiveawayRepository::new(self.db).list_expired_ids(now).await
    }

    /// Lists completed giveaways, optionally for a single guild.
    pub async fn list_completed(&self, guild_id: Option<u64>) -> Result<Vec<Giveaway>, AppError> {
        GiveawayRepository::new(self.db).list_completed(guild_id).await
    }

    /// Checks a guild level permission outside of any specific giveaway.
    ///
    /// # Returns
    /// - `Ok(())` - Member is permitted
    /// - `Err(GiveawayError::NotAuthorized)` - Member is not permitted
    pub async fn ensure_permitted(
        &self,
        guild_id: u64,
        actor: ActorContext,
        action: GiveawayAction,
    ) -> Result<(), AppError> {
        if self
            .permissions
            .is_authorized(guild_id, actor.user_id, action)
            .await?
        {
            return Ok(());
        }

        Err(GiveawayError::NotAuthorized {
            giveaway_id: String::new(),
            user_id: actor.user_id,
        }
        .into())
    }

    async fn get_existing(
        &self,
        repo: &GiveawayRepository<'_>,
        id: &str,
    ) -> Result<Giveaway, AppError> {
        repo.get(id)
            .await?
            .ok_or_else(|| GiveawayError::NotFound(id.to_string()).into())
    }

    /// The host may always act on their own giveaway, anyone else needs permission.
    async fn authorize(
        &self,
        giveaway: &Giveaway,
        actor: ActorContext,
        action: GiveawayAction,
    ) -> Result<(), AppError> {
        if actor.user_id == giveaway.host_id {
            return Ok(());
        }

        if self
            .permissions
            .is_authorized(giveaway.guild_id, actor.user_id, action)
            .await?
        {
            return Ok(());
        }

        tracing::debug!(
            "User {} denied {:?} on giveaway {}",
            actor.user_id,
            action,
            giveaway.id
        );

        Err(GiveawayError::NotAuthorized {
            giveaway_id: giveaway.id.clone(),
            user_id: actor.user_id,
        }
        .into())
    }
}

fn validate_prize(prize: &str) -> Result<String, GiveawayError> {
    let prize = prize.trim();

    if prize.is_empty() {
        return Err(GiveawayError::InvalidPrize {
            reason: "Prize cannot be empty.".to_string(),
        });
    }

    if prize.chars().count() > MAX_PRIZE_LENGTH {
        return Err(GiveawayError::InvalidPrize {
            reason: format!("Prize must be at most {MAX_PRIZE_LENGTH} characters."),
        });
    }

    Ok(prize.to_string())
}

fn validate_description(description: Option<String>) -> Result<Option<String>, GiveawayError> {
    let Some(description) = description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
    else {
        return Ok(None);
    };

    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(GiveawayError::InvalidPrize {
            reason: format!("Description must be at most {MAX_DESCRIPTION_LENGTH} characters."),
        });
    }

    Ok(Some(description))
}
