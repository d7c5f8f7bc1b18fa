//! Giveaway factory for creating test giveaway entities.
//!
//! This module provides factory methods for creating giveaway rows with sensible defaults,
//! reducing boilerplate in tests. The factory supports customization through a builder
//! pattern.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test giveaways with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::giveaway::GiveawayFactory;
///
/// let giveaway = GiveawayFactory::new(&db)
///     .prize("Nitro")
///     .winners_count(3)
///     .ends_at(Utc::now() - Duration::minutes(1))
///     .build()
///     .await?;
/// ```
pub struct GiveawayFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    guild_id: String,
    channel_id: String,
    host_id: String,
    prize: String,
    description: Option<String>,
    winners_count: i32,
    status: String,
    message_id: Option<String>,
    created_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl<'a> GiveawayFactory<'a> {
    /// Creates a new GiveawayFactory with default values.
    ///
    /// Defaults:
    /// - id: random UUID v4
    /// - guild_id / channel_id / host_id: unique counter based snowflakes
    /// - prize: `"Prize {id}"`
    /// - winners_count: `1`
    /// - status: `"active"`
    /// - created_at: now, ends_at: 1 hour from now
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `GiveawayFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        let now = Utc::now();
        Self {
            db,
            id: uuid::Uuid::new_v4().to_string(),
            guild_id: format!("{}", 100_000 + id),
            channel_id: format!("{}", 200_000 + id),
            host_id: format!("{}", 300_000 + id),
            prize: format!("Prize {}", id),
            description: None,
            winners_count: 1,
            status: "active".to_string(),
            message_id: None,
            created_at: now,
            ends_at: now + Duration::hours(1),
            ended_at: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn guild_id(mut self, guild_id: u64) -> Self {
        self.guild_id = guild_id.to_string();
        self
    }

    pub fn channel_id(mut self, channel_id: u64) -> Self {
        self.channel_id = channel_id.to_string();
        self
    }

    pub fn host_id(mut self, host_id: u64) -> Self {
        self.host_id = host_id.to_string();
        self
    }

    pub fn prize(mut self, prize: impl Into<String>) -> Self {
        self.prize = prize.into();
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn winners_count(mut self, winners_count: i32) -> Self {
        self.winners_count = winners_count;
        self
    }

    pub fn message_id(mut self, message_id: u64) -> Self {
        self.message_id = Some(message_id.to_string());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets the end time. Use a past time to create an expired giveaway.
    pub fn ends_at(mut self, ends_at: DateTime<Utc>) -> Self {
        self.ends_at = ends_at;
        self
    }

    /// Marks the giveaway as completed, ended at its end time.
    pub fn completed(mut self) -> Self {
        self.status = "completed".to_string();
        self.ended_at = Some(self.ends_at);
        self
    }

    /// Builds and inserts the giveaway entity into the database.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created giveaway entity
    /// - `Err(DbErr)` - Database error during insertion
    pub async fn build(self) -> Result<entity::giveaway::Model, DbErr> {
        entity::giveaway::ActiveModel {
            id: ActiveValue::Set(self.id),
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            host_id: ActiveValue::Set(self.host_id),
            prize: ActiveValue::Set(self.prize),
            description: ActiveValue::Set(self.description),
            winners_count: ActiveValue::Set(self.winners_count),
            status: ActiveValue::Set(self.status),
            message_id: ActiveValue::Set(self.message_id),
            created_at: ActiveValue::Set(self.created_at),
            ends_at: ActiveValue::Set(self.ends_at),
            ended_at: ActiveValue::Set(self.ended_at),
            rerolled_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active giveaway with default values.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(Model)` - The created giveaway entity
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_giveaway(db: &DatabaseConnection) -> Result<entity::giveaway::Model, DbErr> {
    GiveawayFactory::new(db).build().await
}

/// Creates an active giveaway whose end time has already passed.
///
/// # Arguments
/// - `db` - Database connection
/// - `guild_id` - Guild the giveaway belongs to
///
/// # Returns
/// - `Ok(Model)` - The created giveaway entity
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_expired_giveaway(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::giveaway::Model, DbErr> {
    let now = Utc::now();
    GiveawayFactory::new(db)
        .guild_id(guild_id)
        .created_at(now - Duration::hours(2))
        .ends_at(now - Duration::minutes(1))
        .build()
        .await
}
