use super::*;

/// Tests that only completed giveaways are listed for the requested guild.
///
/// Expected: Ok with the completed giveaway of the guild only
#[tokio::test]
async fn lists_only_completed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let completed = factory::giveaway::GiveawayFactory::new(db)
        .guild_id(7)
        .ends_at(Utc::now() - Duration::hours(1))
        .completed()
        .build()
        .await?;
    factory::giveaway::GiveawayFactory::new(db)
        .guild_id(7)
        .build()
        .await?;
    factory::giveaway::GiveawayFactory::new(db)
        .guild_id(8)
        .completed()
        .build()
        .await?;

    let repo = GiveawayRepository::new(db);
    let result = repo.list_completed(Some(7)).await?;

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, completed.id);
    assert_eq!(result[0].status, GiveawayStatus::Completed);
    assert!(result[0].ended_at.is_some());

    Ok(())
}
