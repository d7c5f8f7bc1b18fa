pub use super::giveaway::Entity as Giveaway;
pub use super::giveaway_manager_role::Entity as GiveawayManagerRole;
pub use super::giveaway_participant::Entity as GiveawayParticipant;
pub use super::giveaway_winner::Entity as GiveawayWinner;
