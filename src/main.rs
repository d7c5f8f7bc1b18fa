mod server;

use std::sync::Arc;

use crate::server::{
    bot,
    config::Config,
    error::AppError,
    scheduler::giveaway_sweep,
    service::{
        giveaway::lock::GiveawayLocks, giveaway_notification::DiscordGiveawayNotifier,
        giveaway_permission::DiscordGiveawayPermissions,
    },
    startup,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let locks = GiveawayLocks::new();

    tracing::info!("Starting giveaway bot");

    let (bot_client, discord_http) =
        bot::start::init_bot(&config, db.clone(), locks.clone()).await?;

    // Start giveaway sweep scheduler
    let permissions = Arc::new(DiscordGiveawayPermissions::new(
        discord_http.clone(),
        db.clone(),
        config.bot_owner_id,
    ));
    let notifier = Arc::new(DiscordGiveawayNotifier::new(discord_http));
    tokio::spawn(async move {
        if let Err(e) = giveaway_sweep::start_scheduler(db, locks, permissions, notifier).await {
            tracing::error!("Giveaway sweep scheduler error: {}", e);
        }
    });

    // Runs until the gateway connection shuts down
    bot::start::start_bot(bot_client).await
}
