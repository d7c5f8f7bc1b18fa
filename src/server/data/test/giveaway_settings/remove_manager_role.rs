use super::*;

/// Tests revoking a manager role.
///
/// Expected: Ok(true) and the role is no longer listed
#[tokio::test]
async fn removes_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_manager_role(db, 1, 500).await?;
    factory::create_manager_role(db, 1, 600).await?;

    let repo = GiveawaySettingsRepository::new(db);
    let removed = repo.remove_manager_role(1, 500).await?;

    assert!(removed);
    assert_eq!(repo.get_manager_roles(1).await?, vec![600]);

    Ok(())
}

/// Tests revoking a role that is not a manager role.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    // Same role ID in another guild must not be touched
    factory::create_manager_role(db, 2, 500).await?;

    let repo = GiveawaySettingsRepository::new(db);
    let removed = repo.remove_manager_role(1, 500).await?;

    assert!(!removed);
    assert_eq!(repo.get_manager_roles(2).await?, vec![500]);

    Ok(())
}
