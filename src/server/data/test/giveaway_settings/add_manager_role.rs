use super::*;

/// Tests granting a role management permissions.
///
/// Expected: Ok and the role is listed for the guild
#[tokio::test]
async fn adds_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GiveawaySettingsRepository::new(db);
    repo.add_manager_role(1, 500, Utc::now()).await?;

    assert_eq!(repo.get_manager_roles(1).await?, vec![500]);

    Ok(())
}

/// Tests that adding an existing manager role does not fail or duplicate it.
///
/// Expected: Ok with the role listed once
#[tokio::test]
async fn ignores_existing_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_manager_role(db, 1, 500).await?;

    let repo = GiveawaySettingsRepository::new(db);
    repo.add_manager_role(1, 500, Utc::now()).await?;

    assert_eq!(repo.get_manager_roles(1).await?, vec![500]);

    Ok(())
}
