//! Giveaway settings repository for database operations
//!
//! Stores the per-guild roles that are allowed to manage giveaways in addition to
//! administrators and the bot owner.

use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

/// Repository providing database operations for giveaway manager roles.
pub struct GiveawaySettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GiveawaySettingsRepository<'a> {
    /// Creates a new GiveawaySettingsRepository instance
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Grants a role giveaway management permissions in a guild
    ///
    /// Adding a role that is already a manager role is a no-op.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `role_id` - Discord role ID to grant
    /// - `now` - Time the role was added
    ///
    /// # Returns
    /// - `Ok(())` - Role is a manager role
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn add_manager_role(
        &self,
        guild_id: u64,
        role_id: u64,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        entity::prelude::GiveawayManagerRole::insert(entity::giveaway_manager_role::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            role_id: ActiveValue::Set(role_id.to_string()),
            created_at: ActiveValue::Set(now),
        })
        .on_conflict(
            OnConflict::columns([
                entity::giveaway_manager_role::Column::GuildId,
                entity::giveaway_manager_role::Column::RoleId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Revokes giveaway management permissions from a role
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `role_id` - Discord role ID to revoke
    ///
    /// # Returns
    /// - `Ok(true)` - Role was a manager role and has been removed
    /// - `Ok(false)` - Role was not a manager role
    /// - `Err(AppError::DbErr)` - Database error during delete
    pub async fn remove_manager_role(&self, guild_id: u64, role_id: u64) -> Result<bool, AppError> {
        let result = entity::prelude::GiveawayManagerRole::delete_many()
            .filter(entity::giveaway_manager_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::giveaway_manager_role::Column::RoleId.eq(role_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets the manager roles of a guild
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Vec<u64>)` - Role IDs in the order they were added
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn get_manager_roles(&self, guild_id: u64) -> Result<Vec<u64>, AppError> {
        let entities = entity::prelude::GiveawayManagerRole::find()
            .filter(entity::giveaway_manager_role::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::giveaway_manager_role::Column::CreatedAt)
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(|entity| parse_u64_from_string(entity.role_id))
            .collect()
    }
}
