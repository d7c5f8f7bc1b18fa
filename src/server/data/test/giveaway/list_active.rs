use super::*;

/// Tests that only active giveaways are listed, soonest end first.
///
/// Expected: Ok with active giveaways ordered by ends_at ascending
#[tokio::test]
async fn lists_only_active_ordered_by_end_time() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let later = factory::giveaway::GiveawayFactory::new(db)
        .ends_at(now + Duration::hours(5))
        .build()
        .await?;
    let sooner = factory::giveaway::GiveawayFactory::new(db)
        .ends_at(now + Duration::minutes(5))
        .build()
        .await?;
    factory::giveaway::GiveawayFactory::new(db)
        .ends_at(now - Duration::hours(1))
        .completed()
        .build()
        .await?;

    let repo = GiveawayRepository::new(db);
    let result = repo.list_active(None).await?;

    let ids: Vec<&str> = result.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec![sooner.id.as_str(), later.id.as_str()]);
    assert!(result.iter().all(Giveaway::is_active));

    Ok(())
}

/// Tests filtering active giveaways by guild.
///
/// Expected: Ok with only the giveaways of the requested guild
#[tokio::test]
async fn filters_by_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ours = factory::giveaway::GiveawayFactory::new(db)
        .guild_id(1)
        .build()
        .await?;
    factory::giveaway::GiveawayFactory::new(db)
        .guild_id(2)
        .build()
        .await?;

    let repo = GiveawayRepository::new(db);
    let result = repo.list_active(Some(1)).await?;

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, ours.id);
    assert_eq!(result[0].guild_id, 1);

    Ok(())
}

/// Tests that listed giveaways carry their participants.
///
/// Expected: Ok with each record's own participant set
#[tokio::test]
async fn loads_participants_per_giveaway() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (first, _) = factory::helpers::create_giveaway_with_participants(db, 1, &[1, 2]).await?;
    let (second, _) = factory::helpers::create_giveaway_with_participants(db, 1, &[3]).await?;

    let repo = GiveawayRepository::new(db);
    let result = repo.list_active(None).await?;

    let first = result.iter().find(|g| g.id == first.id).unwrap();
    let second = result.iter().find(|g| g.id == second.id).unwrap();
    assert_eq!(first.participants.len(), 2);
    assert!(second.participants.contains(&3));
    assert_eq!(second.participants.len(), 1);

    Ok(())
}

/// Tests listing when there are no giveaways.
///
/// Expected: Ok with empty vector
#[tokio::test]
async fn returns_empty_without_giveaways() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GiveawayRepository::new(db);
    let result = repo.list_active(None).await?;

    assert!(result.is_empty());

    Ok(())
}
