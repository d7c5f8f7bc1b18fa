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
                    .table(GiveawayParticipant::Table)
                    .if_not_exists()
                    .col(string(GiveawayParticipant::GiveawayId))
                    .col(string(GiveawayParticipant::UserId))
                    .col(
                        timestamp(GiveawayParticipant::EnteredAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    // One entry per user per giveaway
                    .primary_key(
                        Index::create()
                            .col(GiveawayParticipant::GiveawayId)
                            .col(GiveawayParticipant::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_giveaway_participant_giveaway_id")
                            .from(GiveawayParticipant::Table, GiveawayParticipant::GiveawayId)
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
            .drop_table(Table::drop().table(GiveawayParticipant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GiveawayParticipant {
    Table,
    GiveawayId,
    UserId,
    EnteredAt,
}
