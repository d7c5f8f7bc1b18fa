use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Giveaway::Table)
                    .if_not_exists()
                    .col(string(Giveaway::Id).primary_key())
                    .col(string(Giveaway::GuildId))
                    .col(string(Giveaway::ChannelId))
                    .col(string(Giveaway::HostId))
                    .col(string(Giveaway::Prize))
                    .col(text_null(Giveaway::Description))
                    .col(integer(Giveaway::WinnersCount))
                    .col(string(Giveaway::Status))
                    .col(string_null(Giveaway::MessageId))
                    .col(timestamp(Giveaway::CreatedAt))
                    .col(timestamp(Giveaway::EndsAt))
                    .col(timestamp_null(Giveaway::EndedAt))
                    .col(timestamp_null(Giveaway::RerolledAt))
                    .to_owned(),
            )
            .await?;

        // The sweep scans active giveaways by end time
        manager
            .create_index(
                Index::create()
                    .name("idx_giveaway_status_ends_at")
                    .table(Giveaway::Table)
                    .col(Giveaway::Status)
                    .col(Giveaway::EndsAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_giveaway_guild_id")
                    .table(Giveaway::Table)
                    .col(Giveaway::GuildId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_giveaway_guild_id")
                    .table(Giveaway::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_giveaway_status_ends_at")
                    .table(Giveaway::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Giveaway::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Giveaway {
    Table,
    Id,
    GuildId,
    ChannelId,
    HostId,
    Prize,
    Description,
    WinnersCount,
    Status,
    MessageId,
    CreatedAt,
    EndsAt,
    EndedAt,
    RerolledAt,
}
