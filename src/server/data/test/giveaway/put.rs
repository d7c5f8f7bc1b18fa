use super::*;
use std::collections::BTreeSet;

fn new_giveaway(id: &str) -> Giveaway {
    let now = chrono::DateTime::from_timestamp(1_767_225_600, 0).unwrap();
    Giveaway {
        id: id.to_string(),
        guild_id: 1,
        channel_id: 2,
        host_id: 3,
        prize: "Nitro".to_string(),
        description: Some("One month".to_string()),
        winners_count: 2,
        status: GiveawayStatus::Active,
        message_id: None,
        created_at: now,
        ends_at: now + Duration::hours(1),
        ended_at: None,
        rerolled_at: None,
        participants: BTreeSet::new(),
        winners: Vec::new(),
    }
}

/// Tests inserting a brand new record.
///
/// Expected: Ok and the record reads back unchanged
#[tokio::test]
async fn inserts_new_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut giveaway = new_giveaway("g-1");
    giveaway.participants.extend([10, 20]);

    let repo = GiveawayRepository::new(db);
    repo.put(&giveaway).await?;

    let stored = repo.get("g-1").await?.unwrap();
    assert_eq!(stored, giveaway);

    Ok(())
}

/// Tests that completing a record replaces status and winners together.
///
/// Expected: Ok with status Completed and winners in draw order
#[tokio::test]
async fn replaces_status_and_winners() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut giveaway = new_giveaway("g-2");
    giveaway.participants.extend([10, 20, 30]);

    let repo = GiveawayRepository::new(db);
    repo.put(&giveaway).await?;

    giveaway.status = GiveawayStatus::Completed;
    giveaway.ended_at = Some(giveaway.ends_at);
    giveaway.winners = vec![30, 10];
    repo.put(&giveaway).await?;

    let stored = repo.get("g-2").await?.unwrap();
    assert_eq!(stored.status, GiveawayStatus::Completed);
    assert_eq!(stored.winners, vec![30, 10]);
    assert_eq!(stored.ended_at, giveaway.ended_at);

    // Reroll shrinks the winner list
    giveaway.winners = vec![20];
    repo.put(&giveaway).await?;

    let stored = repo.get("g-2").await?.unwrap();
    assert_eq!(stored.winners, vec![20]);

    Ok(())
}

/// Tests that writing the same record twice is a no-op.
///
/// Expected: Ok with a single giveaway row and no duplicate participant rows
#[tokio::test]
async fn is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut giveaway = new_giveaway("g-3");
    giveaway.participants.extend([10, 20]);

    let repo = GiveawayRepository::new(db);
    repo.put(&giveaway).await?;
    repo.put(&giveaway).await?;

    let giveaways = entity::prelude::Giveaway::find().count(db).await?;
    let participants = entity::prelude::GiveawayParticipant::find()
        .filter(entity::giveaway_participant::Column::GiveawayId.eq("g-3"))
        .count(db)
        .await?;
    assert_eq!(giveaways, 1);
    assert_eq!(participants, 2);

    Ok(())
}

/// Tests that entry times of existing participants survive a rewrite.
///
/// Expected: Ok with the original entered_at value kept
#[tokio::test]
async fn keeps_existing_participant_rows() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (entity, participants) =
        factory::helpers::create_giveaway_with_participants(db, 1, &[5]).await?;

    let repo = GiveawayRepository::new(db);
    let mut giveaway = repo.get(&entity.id).await?.unwrap();
    giveaway.participants.insert(6);
    repo.put(&giveaway).await?;

    let original = entity::prelude::GiveawayParticipant::find_by_id((
        entity.id.clone(),
        "5".to_string(),
    ))
    .one(db)
    .await?
    .unwrap();
    assert_eq!(original.entered_at, participants[0].entered_at);
    assert_eq!(repo.get(&entity.id).await?.unwrap().participants.len(), 2);

    Ok(())
}
