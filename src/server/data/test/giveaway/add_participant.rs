use super::*;

/// Tests adding a participant to an existing giveaway.
///
/// Expected: Ok and the participant shows up on the record
#[tokio::test]
async fn adds_participant() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let giveaway = factory::create_giveaway(db).await?;

    let repo = GiveawayRepository::new(db);
    repo.add_participant(&giveaway.id, 42, Utc::now()).await?;

    let stored = repo.get(&giveaway.id).await?.unwrap();
    assert!(stored.participants.contains(&42));
    assert_eq!(stored.participants.len(), 1);

    Ok(())
}

/// Tests that the same user cannot be stored twice for one giveaway.
///
/// Expected: Err(AppError::DbErr) on the second insert
#[tokio::test]
async fn rejects_duplicate_participant() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let giveaway = factory::create_giveaway(db).await?;

    let repo = GiveawayRepository::new(db);
    repo.add_participant(&giveaway.id, 42, Utc::now()).await?;
    let result = repo.add_participant(&giveaway.id, 42, Utc::now()).await;

    assert!(result.is_err_and(|e| e.is_storage()));
    assert_eq!(repo.get(&giveaway.id).await?.unwrap().participants.len(), 1);

    Ok(())
}
