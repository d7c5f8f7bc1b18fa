//! Ready event handler for bot initialization.
//!
//! This module handles the `ready` event which is fired when the bot successfully
//! connects to Discord's gateway. The handler registers the giveaway slash commands,
//! either in the configured guild, where they are available immediately, or globally.

use serenity::all::{ActivityData, Command, Context, GuildId, Ready};

use crate::server::bot::command::commands;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `ctx` - Discord context for registering commands and setting activity status
/// - `ready` - Ready event data containing bot user information
/// - `command_guild_id` - Guild to register commands in, globally when `None`
pub async fn handle_ready(ctx: Context, ready: Ready, command_guild_id: Option<u64>) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::custom("Hosting giveaways 🎉")));

    let result = match command_guild_id {
        Some(guild_id) => GuildId::new(guild_id)
            .set_commands(&ctx.http, commands())
            .await
            .map(|registered| (registered.len(), format!("guild {guild_id}"))),
        None => Command::set_global_commands(&ctx.http, commands())
            .await
            .map(|registered| (registered.len(), "all guilds".to_string())),
    };

    match result {
        Ok((count, scope)) => tracing::info!("Registered {} commands for {}", count, scope),
        Err(e) => tracing::error!("Failed to register commands: {}", e),
    }
}
