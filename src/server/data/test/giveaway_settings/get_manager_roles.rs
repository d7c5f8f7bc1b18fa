use super::*;

/// Tests that manager roles are scoped per guild.
///
/// Expected: Ok with only the roles of the requested guild
#[tokio::test]
async fn returns_roles_of_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_manager_role(db, 1, 500).await?;
    factory::create_manager_role(db, 2, 700).await?;

    let repo = GiveawaySettingsRepository::new(db);
    let roles = repo.get_manager_roles(1).await?;

    assert_eq!(roles, vec![500]);

    Ok(())
}

/// Tests a guild without manager roles.
///
/// Expected: Ok with empty vector
#[tokio::test]
async fn returns_empty_for_unconfigured_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GiveawaySettingsRepository::new(db);

    assert!(repo.get_manager_roles(1).await?.is_empty());

    Ok(())
}
