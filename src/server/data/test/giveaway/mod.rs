use crate::server::{
    data::giveaway::GiveawayRepository,
    error::AppError,
    model::giveaway::{Giveaway, GiveawayStatus},
};
use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

mod add_participant;
mod get;
mod list_active;
mod list_completed;
mod list_expired_ids;
mod put;
mod set_message_id;
