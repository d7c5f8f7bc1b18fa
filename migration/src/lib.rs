pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_giveaway_table;
mod m20260301_000002_create_giveaway_participant_table;
mod m20260301_000003_create_giveaway_winner_table;
mod m20260302_000004_create_giveaway_manager_role_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_giveaway_table::Migration),
            Box::new(m20260301_000002_create_giveaway_participant_table::Migration),
            Box::new(m20260301_000003_create_giveaway_winner_table::Migration),
            Box::new(m20260302_000004_create_giveaway_manager_role_table::Migration),
        ]
    }
}
