//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// This function provides monotonically increasing values for use in
/// generating unique test identifiers across all factories.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an active giveaway with the given participants already entered.
///
/// # Arguments
/// - `db` - Database connection
/// - `winners_count` - Number of winners the giveaway draws
/// - `user_ids` - Discord IDs of the participants
///
/// # Returns
/// - `Ok((giveaway, participants))` - The created giveaway and participant entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_giveaway_with_participants(
    db: &DatabaseConnection,
    winners_count: i32,
    user_ids: &[u64],
) -> Result<
    (
        entity::giveaway::Model,
        Vec<entity::giveaway_participant::Model>,
    ),
    DbErr,
> {
    let giveaway = crate::factory::giveaway::GiveawayFactory::new(db)
        .winners_count(winners_count)
        .build()
        .await?;
    let participants =
        crate::factory::giveaway_participant::create_participants(db, &giveaway.id, user_ids)
            .await?;

    Ok((giveaway, participants))
}
