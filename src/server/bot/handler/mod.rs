use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, Interaction, Ready};
use serenity::async_trait;

use crate::server::service::giveaway::lock::GiveawayLocks;

pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub locks: GiveawayLocks,
    pub bot_owner_id: u64,
    /// Guild to register commands in, globally when unset.
    pub command_guild_id: Option<u64>,
}

impl Handler {
    pub fn new(
        db: DatabaseConnection,
        locks: GiveawayLocks,
        bot_owner_id: u64,
        command_guild_id: Option<u64>,
    ) -> Self {
        Self {
            db,
            locks,
            bot_owner_id,
            command_guild_id,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready, self.command_guild_id).await;
    }

    /// Called for slash commands and button clicks
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(self, ctx, interaction).await;
    }
}
