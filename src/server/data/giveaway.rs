//! Giveaway data repository for database operations
//!
//! Provides the `GiveawayRepository`, the durable store of giveaway records. A record is
//! spread over three tables (the giveaway row, its participants and its winners) and the
//! repository always reads and writes it as a whole, converting entity models into the
//! `Giveaway` domain model at the boundary.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::server::{
    error::AppError,
    model::giveaway::{Giveaway, GiveawayStatus},
};

/// Repository providing database operations for giveaway records.
///
/// This struct holds a reference to the database connection. Reads return fully loaded
/// records (participants and winners included) and `put` persists a full record inside a
/// single transaction.
pub struct GiveawayRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GiveawayRepository<'a> {
    /// Creates a new GiveawayRepository instance
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `GiveawayRepository` - new repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a giveaway by ID
    ///
    /// # Arguments
    /// - `id` - ID of the giveaway to retrieve
    ///
    /// # Returns
    /// - `Ok(Some(Giveaway))` - The giveaway with its participants and winners
    /// - `Ok(None)` - No giveaway exists with the given ID
    /// - `Err(AppError::DbErr)` - Database error during query
    /// - `Err(AppError::InternalErr)` - Stored row could not be converted
    pub async fn get(&self, id: &str) -> Result<Option<Giveaway>, AppError> {
        let Some(entity) = entity::prelude::Giveaway::find_by_id(id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let participants = entity::prelude::GiveawayParticipant::find()
            .filter(entity::giveaway_participant::Column::GiveawayId.eq(id))
            .all(self.db)
            .await?;
        let winners = entity::prelude::GiveawayWinner::find()
            .filter(entity::giveaway_winner::Column::GiveawayId.eq(id))
            .all(self.db)
            .await?;

        Ok(Some(Giveaway::from_entity(entity, participants, winners)?))
    }

    /// Gets all active giveaways, optionally restricted to a single guild
    ///
    /// # Arguments
    /// - `guild_id` - Only return giveaways of this guild when set
    ///
    /// # Returns
    /// - `Ok(Vec<Giveaway>)` - Active giveaways ordered by end time, soonest first
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn list_active(&self, guild_id: Option<u64>) -> Result<Vec<Giveaway>, AppError> {
        self.list_by_status(GiveawayStatus::Active, guild_id).await
    }

    /// Gets all completed giveaways, optionally restricted to a single guild
    ///
    /// # Arguments
    /// - `guild_id` - Only return giveaways of this guild when set
    ///
    /// # Returns
    /// - `Ok(Vec<Giveaway>)` - Completed giveaways ordered by end time, oldest first
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn list_completed(&self, guild_id: Option<u64>) -> Result<Vec<Giveaway>, AppError> {
        self.list_by_status(GiveawayStatus::Completed, guild_id).await
    }

    /// Gets the IDs of active giveaways whose end time has been reached
    ///
    /// Only the ID column is read, so a row that would fail to convert into a `Giveaway`
    /// is still listed and can fail on its own when loaded.
    ///
    /// # Arguments
    /// - `now` - Giveaways ending at or before this time are listed
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - IDs ordered by end time, soonest first
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn list_expired_ids(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError> {
        let ids = entity::prelude::Giveaway::find()
            .select_only()
            .column(entity::giveaway::Column::Id)
            .filter(entity::giveaway::Column::Status.eq(GiveawayStatus::Active.as_str()))
            .filter(entity::giveaway::Column::EndsAt.lte(now))
            .order_by_asc(entity::giveaway::Column::EndsAt)
            .into_tuple::<String>()
            .all(self.db)
            .await?;

        Ok(ids)
    }

    /// Inserts or fully replaces a giveaway record
    ///
    /// Upserts the giveaway row by ID, then brings the participant and winner rows in line
    /// with the record. Everything happens inside one transaction so the stored status and
    /// winners can never disagree. Writing the same record twice leaves the database
    /// unchanged.
    ///
    /// # Arguments
    /// - `giveaway` - The complete record to persist
    ///
    /// # Returns
    /// - `Ok(())` - Record persisted
    /// - `Err(AppError::DbErr)` - Database error, nothing was written
    pub async fn put(&self, giveaway: &Giveaway) -> Result<(), AppError> {
        use entity::{giveaway, giveaway_participant, giveaway_winner};

        let txn = self.db.begin().await?;

        entity::prelude::Giveaway::insert(giveaway::ActiveModel {
            id: ActiveValue::Set(giveaway.id.clone()),
            guild_id: ActiveValue::Set(giveaway.guild_id.to_string()),
            channel_id: ActiveValue::Set(giveaway.channel_id.to_string()),
            host_id: ActiveValue::Set(giveaway.host_id.to_string()),
            prize: ActiveValue::Set(giveaway.prize.clone()),
            description: ActiveValue::Set(giveaway.description.clone()),
            winners_count: ActiveValue::Set(giveaway.winners_count as i32),
            status: ActiveValue::Set(giveaway.status.as_str().to_string()),
            message_id: ActiveValue::Set(giveaway.message_id.map(|id| id.to_string())),
            created_at: ActiveValue::Set(giveaway.created_at),
            ends_at: ActiveValue::Set(giveaway.ends_at),
            ended_at: ActiveValue::Set(giveaway.ended_at),
            rerolled_at: ActiveValue::Set(giveaway.rerolled_at),
        })
        .on_conflict(
            OnConflict::column(giveaway::Column::Id)
                .update_columns([
                    giveaway::Column::GuildId,
                    giveaway::Column::ChannelId,
                    giveaway::Column::HostId,
                    giveaway::Column::Prize,
                    giveaway::Column::Description,
                    giveaway::Column::WinnersCount,
                    giveaway::Column::Status,
                    giveaway::Column::MessageId,
                    giveaway::Column::CreatedAt,
                    giveaway::Column::EndsAt,
                    giveaway::Column::EndedAt,
                    giveaway::Column::RerolledAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        // Keep existing participant rows so their entry time survives a rewrite
        let stored: BTreeSet<u64> = entity::prelude::GiveawayParticipant::find()
            .filter(giveaway_participant::Column::GiveawayId.eq(giveaway.id.as_str()))
            .all(&txn)
            .await?
            .into_iter()
            .filter_map(|row| row.user_id.parse::<u64>().ok())
            .collect();

        let removed: Vec<String> = stored
            .difference(&giveaway.participants)
            .map(|user_id| user_id.to_string())
            .collect();
        if !removed.is_empty() {
            entity::prelude::GiveawayParticipant::delete_many()
                .filter(giveaway_participant::Column::GiveawayId.eq(giveaway.id.as_str()))
                .filter(giveaway_participant::Column::UserId.is_in(removed))
                .exec(&txn)
                .await?;
        }

        let entered_at = Utc::now();
        for user_id in giveaway.participants.difference(&stored) {
            insert_participant(&txn, &giveaway.id, *user_id, entered_at).await?;
        }

        entity::prelude::GiveawayWinner::delete_many()
            .filter(giveaway_winner::Column::GiveawayId.eq(giveaway.id.as_str()))
            .exec(&txn)
            .await?;

        for (position, user_id) in giveaway.winners.iter().enumerate() {
            giveaway_winner::ActiveModel {
                giveaway_id: ActiveValue::Set(giveaway.id.clone()),
                position: ActiveValue::Set(position as i32),
                user_id: ActiveValue::Set(user_id.to_string()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(())
    }

    /// Adds a single participant to a giveaway
    ///
    /// Only inserts the participant row, the giveaway row itself is left untouched. The
    /// `(giveaway_id, user_id)` primary key rejects duplicate entries.
    ///
    /// # Arguments
    /// - `id` - ID of the giveaway being entered
    /// - `user_id` - Discord ID of the participant
    /// - `entered_at` - Time of entry
    ///
    /// # Returns
    /// - `Ok(())` - Participant stored
    /// - `Err(AppError::DbErr)` - Database error, including a duplicate entry
    pub async fn add_participant(
        &self,
        id: &str,
        user_id: u64,
        entered_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        insert_participant(self.db, id, user_id, entered_at).await
    }

    /// Records the announcement message of a giveaway
    ///
    /// # Arguments
    /// - `id` - ID of the giveaway
    /// - `message_id` - Discord ID of the posted announcement
    ///
    /// # Returns
    /// - `Ok(true)` - Message ID stored
    /// - `Ok(false)` - No giveaway exists with the given ID
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn set_message_id(&self, id: &str, message_id: u64) -> Result<bool, AppError> {
        let result = entity::prelude::Giveaway::update_many()
            .col_expr(
                entity::giveaway::Column::MessageId,
                Expr::value(Some(message_id.to_string())),
            )
            .filter(entity::giveaway::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn list_by_status(
        &self,
        status: GiveawayStatus,
        guild_id: Option<u64>,
    ) -> Result<Vec<Giveaway>, AppError> {
        let mut query = entity::prelude::Giveaway::find()
            .filter(entity::giveaway::Column::Status.eq(status.as_str()));
        if let Some(guild_id) = guild_id {
            query = query.filter(entity::giveaway::Column::GuildId.eq(guild_id.to_string()));
        }

        let entities = query
            .order_by_asc(entity::giveaway::Column::EndsAt)
            .all(self.db)
            .await?;
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = entities.iter().map(|e| e.id.clone()).collect();

        let mut participants: HashMap<String, Vec<entity::giveaway_participant::Model>> =
            HashMap::new();
        for row in entity::prelude::GiveawayParticipant::find()
            .filter(entity::giveaway_participant::Column::GiveawayId.is_in(ids.clone()))
            .all(self.db)
            .await?
        {
            participants.entry(row.giveaway_id.clone()).or_default().push(row);
        }

        let mut winners: HashMap<String, Vec<entity::giveaway_winner::Model>> = HashMap::new();
        for row in entity::prelude::GiveawayWinner::find()
            .filter(entity::giveaway_winner::Column::GiveawayId.is_in(ids))
            .all(self.db)
            .await?
        {
            winners.entry(row.giveaway_id.clone()).or_default().push(row);
        }

        entities
            .into_iter()
            .map(|entity| {
                let entity_participants = participants.remove(&entity.id).unwrap_or_default();
                let entity_winners = winners.remove(&entity.id).unwrap_or_default();
                Giveaway::from_entity(entity, entity_participants, entity_winners)
            })
            .collect()
    }
}

async fn insert_participant<C: ConnectionTrait>(
    db: &C,
    giveaway_id: &str,
    user_id: u64,
    entered_at: DateTime<Utc>,
) -> Result<(), AppError> {
    entity::giveaway_participant::ActiveModel {
        giveaway_id: ActiveValue::Set(giveaway_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        entered_at: ActiveValue::Set(entered_at),
    }
    .insert(db)
    .await?;

    Ok(())
}
