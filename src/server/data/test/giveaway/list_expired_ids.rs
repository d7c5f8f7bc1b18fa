use super::*;

/// Tests that only active giveaways past their end time are listed, soonest end first.
///
/// Expected: Ok with the IDs of the two expired active giveaways
#[tokio::test]
async fn lists_expired_active_ids() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let recent = factory::giveaway::GiveawayFactory::new(db)
        .ends_at(now - Duration::minutes(1))
        .build()
        .await?;
    let oldest = factory::giveaway::GiveawayFactory::new(db)
        .ends_at(now - Duration::hours(1))
        .build()
        .await?;
    factory::giveaway::GiveawayFactory::new(db)
        .ends_at(now + Duration::minutes(5))
        .build()
        .await?;
    factory::giveaway::GiveawayFactory::new(db)
        .ends_at(now - Duration::hours(2))
        .completed()
        .build()
        .await?;

    let ids = GiveawayRepository::new(db).list_expired_ids(now).await?;

    assert_eq!(ids, vec![oldest.id, recent.id]);

    Ok(())
}

/// Tests that rows which cannot be converted to a giveaway are still listed.
///
/// Expected: Ok with the ID of the corrupted giveaway
#[tokio::test]
async fn lists_undecodable_rows() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let giveaway = factory::create_expired_giveaway(db, 1).await?;
    entity::prelude::Giveaway::update_many()
        .col_expr(
            entity::giveaway::Column::HostId,
            sea_orm::sea_query::Expr::value("not-a-snowflake"),
        )
        .filter(entity::giveaway::Column::Id.eq(giveaway.id.as_str()))
        .exec(db)
        .await?;

    let ids = GiveawayRepository::new(db).list_expired_ids(Utc::now()).await?;

    assert_eq!(ids, vec![giveaway.id]);

    Ok(())
}
