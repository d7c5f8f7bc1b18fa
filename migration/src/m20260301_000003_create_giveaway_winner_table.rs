use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_giveaway_table::Giveaway;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GiveawayWinner::Table)
                    .if_not_exists()
                    .col(string(GiveawayWinner::GiveawayId))
                    .col(integer(GiveawayWinner::Position))
                    .col(string(GiveawayWinner::UserId))
                    .primary_key(
                        Index::create()
                            .col(GiveawayWinner::GiveawayId)
                            .col(GiveawayWinner::Position),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_giveaway_winner_giveaway_id")
                            .from(GiveawayWinner::Table, GiveawayWinner::GiveawayId)
                            .to(Giveaway::Table, Giveaway::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GiveawayWinner::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GiveawayWinner {
    Table,
    GiveawayId,
    Position,
    UserId,
}
