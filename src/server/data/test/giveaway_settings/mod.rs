use crate::server::{data::giveaway_settings::GiveawaySettingsRepository, error::AppError};
use chrono::Utc;
use test_utils::{builder::TestBuilder, factory};

mod add_manager_role;
mod get_manager_roles;
mod remove_manager_role;
