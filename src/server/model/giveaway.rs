//! Domain & parameter models for giveaway operations
//!
//! Defines the giveaway domain model with its lifecycle status, the parameters used to
//! create a giveaway, the actor & trigger types used to authorize lifecycle operations,
//! and the render model handed to notifiers.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::server::{
    error::{internal::InternalError, AppError},
    util::parse::{parse_optional_u64, parse_u64_from_string},
};

/// Maximum number of winners a single giveaway can draw.
pub const MAX_WINNERS: u32 = 20;
/// Shortest allowed giveaway, in seconds.
pub const MIN_DURATION_SECONDS: i64 = 60;
/// Maximum prize length in characters.
pub const MAX_PRIZE_LENGTH: usize = 100;
/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Lifecycle state of a giveaway.
///
/// Giveaways start `Active` and move to `Completed` exactly once. There is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiveawayStatus {
    Active,
    Completed,
}

impl GiveawayStatus {
    /// Value stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Parses the stored `status` column.
    ///
    /// # Returns
    /// - `Ok(GiveawayStatus)` - Known status
    /// - `Err(AppError::InternalErr(UnknownGiveawayStatus))` - Unrecognized stored value
    pub fn from_str(value: &str) -> Result<Self, AppError> {
        match value {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(InternalError::UnknownGiveawayStatus(other.to_string()).into()),
        }
    }
}

/// The giveaway domain model
///
/// A prize draw hosted in a guild channel. Members enter while the giveaway is active,
/// and once it ends up to `winners_count` distinct participants are drawn as winners.
#[derive(Debug, Clone, PartialEq)]
pub struct Giveaway {
    /// Opaque unique identifier (UUID v4).
    pub id: String,
    pub guild_id: u64,
    pub channel_id: u64,
    /// Discord ID of the member who created the giveaway.
    pub host_id: u64,
    pub prize: String,
    pub description: Option<String>,
    /// Number of winners requested at creation, never changed afterwards.
    pub winners_count: u32,
    pub status: GiveawayStatus,
    /// Announcement message, once posted.
    pub message_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub rerolled_at: Option<DateTime<Utc>>,
    /// Discord IDs of everyone who entered.
    pub participants: BTreeSet<u64>,
    /// Drawn winners in draw order, empty until the giveaway ends.
    pub winners: Vec<u64>,
}

impl Giveaway {
    /// Converts the entity model and its child rows to the giveaway domain model
    ///
    /// # Arguments
    /// - `entity` - The giveaway row
    /// - `participants` - Participant rows belonging to the giveaway
    /// - `winners` - Winner rows belonging to the giveaway, in any order
    ///
    /// # Returns
    /// - `Ok(Giveaway)` - The converted giveaway domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - A stored snowflake is not a valid u64
    /// - `Err(AppError::InternalErr(UnknownGiveawayStatus))` - Stored status is unknown
    pub fn from_entity(
        entity: entity::giveaway::Model,
        participants: Vec<entity::giveaway_participant::Model>,
        mut winners: Vec<entity::giveaway_winner::Model>,
    ) -> Result<Self, AppError> {
        winners.sort_by_key(|winner| winner.position);

        let participants = participants
            .into_iter()
            .map(|participant| parse_u64_from_string(participant.user_id))
            .collect::<Result<BTreeSet<_>, _>>()?;
        let winners = winners
            .into_iter()
            .map(|winner| parse_u64_from_string(winner.user_id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            host_id: parse_u64_from_string(entity.host_id)?,
            status: GiveawayStatus::from_str(&entity.status)?,
            message_id: parse_optional_u64(entity.message_id)?,
            winners_count: entity.winners_count.max(0) as u32,
            id: entity.id,
            prize: entity.prize,
            description: entity.description,
            created_at: entity.created_at,
            ends_at: entity.ends_at,
            ended_at: entity.ended_at,
            rerolled_at: entity.rerolled_at,
            participants,
            winners,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == GiveawayStatus::Active
    }

    /// Whether the end time has been reached, regardless of the stored status.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.ends_at
    }

    /// Number of winners that can actually be drawn given the current entrants.
    pub fn drawable_winners(&self) -> usize {
        (self.winners_count as usize).min(self.participants.len())
    }

    /// Builds the render model consumed by notifiers.
    pub fn render(&self) -> GiveawayRender {
        GiveawayRender {
            id: self.id.clone(),
            guild_id: self.guild_id,
            channel_id: self.channel_id,
            message_id: self.message_id,
            host_id: self.host_id,
            prize: self.prize.clone(),
            description: self.description.clone(),
            status: self.status,
            winners_count: self.winners_count,
            participant_count: self.participants.len(),
            winners: self.winners.clone(),
            ends_at: self.ends_at,
            ended_at: self.ended_at,
            rerolled_at: self.rerolled_at,
        }
    }
}

/// Parameters for creating a new giveaway
///
/// The duration is already resolved to seconds. Use `GiveawayService::create_from_input`
/// to create from a raw duration string.
#[derive(Debug, Clone)]
pub struct CreateGiveawayParams {
    pub guild_id: u64,
    pub channel_id: u64,
    pub host_id: u64,
    pub prize: String,
    pub description: Option<String>,
    pub winners_count: u32,
    pub duration_seconds: i64,
}

/// Member performing a lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorContext {
    pub user_id: u64,
}

/// What caused a giveaway to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndTrigger {
    /// Periodic sweep after the end time passed. Trusted, skips authorization.
    Scheduler,
    /// Explicit request from a member, subject to host or permission checks.
    Actor(ActorContext),
}

/// Operations gated behind giveaway management permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiveawayAction {
    End,
    Reroll,
    /// Create & list giveaways.
    Manage,
    /// Change which roles may manage giveaways. Manager roles do not grant this.
    Configure,
}

/// Presentation data for a giveaway, free of any Discord markup.
#[derive(Debug, Clone, PartialEq)]
pub struct GiveawayRender {
    pub id: String,
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: Option<u64>,
    pub host_id: u64,
    pub prize: String,
    pub description: Option<String>,
    pub status: GiveawayStatus,
    pub winners_count: u32,
    pub participant_count: usize,
    pub winners: Vec<u64>,
    pub ends_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub rerolled_at: Option<DateTime<Utc>>,
}
