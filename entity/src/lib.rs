//! SeaORM entities for the giveaway bot database.

pub mod prelude;

pub mod giveaway;
pub mod giveaway_manager_role;
pub mod giveaway_participant;
pub mod giveaway_winner;
