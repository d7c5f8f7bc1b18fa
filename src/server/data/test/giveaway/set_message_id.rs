use super::*;

/// Tests storing the announcement message of a giveaway.
///
/// Expected: Ok(true) and the message ID reads back
#[tokio::test]
async fn stores_message_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let giveaway = factory::create_giveaway(db).await?;

    let repo = GiveawayRepository::new(db);
    let updated = repo.set_message_id(&giveaway.id, 987654321).await?;

    assert!(updated);
    assert_eq!(
        repo.get(&giveaway.id).await?.unwrap().message_id,
        Some(987654321)
    );

    Ok(())
}

/// Tests storing a message ID for a giveaway that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GiveawayRepository::new(db);
    let updated = repo.set_message_id("missing", 1).await?;

    assert!(!updated);

    Ok(())
}
