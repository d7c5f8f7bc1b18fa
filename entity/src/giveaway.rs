use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "giveaway")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub guild_id: String,
    pub channel_id: String,
    pub host_id: String,
    pub prize: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub winners_count: i32,
    pub status: String,
    #[sea_orm(nullable)]
    pub message_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub ends_at: DateTimeUtc,
    #[sea_orm(nullable)]
    pub ended_at: Option<DateTimeUtc>,
    #[sea_orm(nullable)]
    pub rerolled_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::giveaway_participant::Entity")]
    GiveawayParticipant,
    #[sea_orm(has_many = "super::giveaway_winner::Entity")]
    GiveawayWinner,
}

impl Related<super::giveaway_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GiveawayParticipant.def()
    }
}

impl Related<super::giveaway_winner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GiveawayWinner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
