use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};
use serenity::http::Http;

use crate::server::{
    bot::handler::Handler, config::Config, error::AppError,
    service::giveaway::lock::GiveawayLocks,
};

/// Builds the Discord bot client.
///
/// The client is returned together with its HTTP client so the giveaway sweep can post
/// results through the same connection before the gateway is started.
///
/// # Arguments
/// - `config` - Application configuration
/// - `db` - Database connection for the bot to use
/// - `locks` - Per-giveaway locks shared with the giveaway sweep
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client ready to be started and its HTTP client
/// - `Err(AppError)` - Client could not be built
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    locks: GiveawayLocks,
) -> Result<(Client, Arc<Http>), AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;

    let handler = Handler::new(db, locks, config.bot_owner_id, config.guild_id);

    let client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await?;
    let http = client.http.clone();

    Ok((client, http))
}

/// Starts the Discord bot in a blocking manner
///
/// This function should be called from within a tokio::spawn task since it will block
/// until the bot shuts down.
///
/// # Returns
/// - `Ok(())` if the bot ran and shut down cleanly
/// - `Err(AppError)` if the gateway connection fails
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
