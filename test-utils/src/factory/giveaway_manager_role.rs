//! Giveaway manager role factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Grants a role giveaway management permissions in a guild.
///
/// # Arguments
/// - `db` - Database connection
/// - `guild_id` - Discord guild ID
/// - `role_id` - Discord role ID
///
/// # Returns
/// - `Ok(Model)` - The created manager role entity
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_manager_role(
    db: &DatabaseConnection,
    guild_id: u64,
    role_id: u64,
) -> Result<entity::giveaway_manager_role::Model, DbErr> {
    entity::giveaway_manager_role::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        role_id: ActiveValue::Set(role_id.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
