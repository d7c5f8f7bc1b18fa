//! Giveaway participant factory for creating test entry rows.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a participant row for a giveaway.
///
/// # Arguments
/// - `db` - Database connection
/// - `giveaway_id` - ID of the giveaway being entered
/// - `user_id` - Discord ID of the participant
///
/// # Returns
/// - `Ok(Model)` - The created participant entity
/// - `Err(DbErr)` - Database error during insertion, including a duplicate entry
pub async fn create_participant(
    db: &DatabaseConnection,
    giveaway_id: &str,
    user_id: u64,
) -> Result<entity::giveaway_participant::Model, DbErr> {
    entity::giveaway_participant::ActiveModel {
        giveaway_id: ActiveValue::Set(giveaway_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        entered_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

/// Creates participant rows for every provided user.
///
/// # Arguments
/// - `db` - Database connection
/// - `giveaway_id` - ID of the giveaway being entered
/// - `user_ids` - Discord IDs of the participants
///
/// # Returns
/// - `Ok(Vec<Model>)` - The created participant entities in input order
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_participants(
    db: &DatabaseConnection,
    giveaway_id: &str,
    user_ids: &[u64],
) -> Result<Vec<entity::giveaway_participant::Model>, DbErr> {
    let mut participants = Vec::with_capacity(user_ids.len());
    for user_id in user_ids {
        participants.push(create_participant(db, giveaway_id, *user_id).await?);
    }
    Ok(participants)
}
