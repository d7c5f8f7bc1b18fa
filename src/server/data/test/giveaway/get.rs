use super::*;

/// Tests loading a giveaway with its participants and winners.
///
/// Expected: Ok(Some) with participants and winners in draw order
#[tokio::test]
async fn returns_full_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (giveaway, _) =
        factory::helpers::create_giveaway_with_participants(db, 2, &[11, 22, 33]).await?;
    for (position, user_id) in [(0, "33"), (1, "11")] {
        entity::prelude::GiveawayWinner::insert(entity::giveaway_winner::ActiveModel {
            giveaway_id: sea_orm::ActiveValue::Set(giveaway.id.clone()),
            position: sea_orm::ActiveValue::Set(position),
            user_id: sea_orm::ActiveValue::Set(user_id.to_string()),
        })
        .exec_without_returning(db)
        .await?;
    }

    let repo = GiveawayRepository::new(db);
    let result = repo.get(&giveaway.id).await?.unwrap();

    assert_eq!(result.id, giveaway.id);
    assert_eq!(result.prize, giveaway.prize);
    assert_eq!(result.winners_count, 2);
    assert_eq!(result.status, GiveawayStatus::Active);
    assert_eq!(result.participants.iter().copied().collect::<Vec<_>>(), vec![11, 22, 33]);
    assert_eq!(result.winners, vec![33, 11]);

    Ok(())
}

/// Tests loading a giveaway that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GiveawayRepository::new(db);
    let result = repo.get("missing").await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests that a corrupted stored snowflake surfaces as an internal error.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn fails_on_corrupted_host_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let giveaway = factory::create_giveaway(db).await?;
    entity::prelude::Giveaway::update_many()
        .col_expr(
            entity::giveaway::Column::HostId,
            sea_orm::sea_query::Expr::value("not-a-snowflake"),
        )
        .filter(entity::giveaway::Column::Id.eq(giveaway.id.as_str()))
        .exec(db)
        .await?;

    let repo = GiveawayRepository::new(db);
    let result = repo.get(&giveaway.id).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
