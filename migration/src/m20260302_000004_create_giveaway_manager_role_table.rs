use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GiveawayManagerRole::Table)
                    .if_not_exists()
                    .col(string(GiveawayManagerRole::GuildId))
                    .col(string(GiveawayManagerRole::RoleId))
                    .col(
                        timestamp(GiveawayManagerRole::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(GiveawayManagerRole::GuildId)
                            .col(GiveawayManagerRole::RoleId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GiveawayManagerRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GiveawayManagerRole {
    Table,
    GuildId,
    RoleId,
    CreatedAt,
}
