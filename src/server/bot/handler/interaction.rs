//! Interaction handler for slash commands and buttons.
//!
//! Every interaction is deferred as an ephemeral reply first, then the giveaway service
//! is called and the reply is edited with the outcome. Errors are answered with
//! `AppError::user_message`, which keeps internal details out of the channel.

use chrono::Utc;
use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, EditInteractionResponse, Interaction,
};

use crate::server::{
    bot::{
        command::{
            parse_giveaway_command, parse_roles_command, GiveawayCommand, RolesCommand,
            GIVEAWAY_COMMAND, GIVEAWAY_ROLES_COMMAND,
        },
        handler::Handler,
    },
    data::giveaway_settings::GiveawaySettingsRepository,
    error::{giveaway::GiveawayError, AppError},
    model::giveaway::{ActorContext, EndTrigger, Giveaway, GiveawayAction},
    service::{
        giveaway::{CreateGiveawayInput, GiveawayService},
        giveaway_notification::{
            builder::{message_link, parse_enter_button},
            DiscordGiveawayNotifier, GiveawayNotifier,
        },
        giveaway_permission::DiscordGiveawayPermissions,
    },
};

const GUILD_ONLY_MESSAGE: &str = "Giveaways can only be managed inside a server.";
const UNKNOWN_COMMAND_MESSAGE: &str = "Unknown command.";

/// Dispatches an interaction to the command or button handler.
///
/// # Arguments
/// - `handler` - Event handler holding the database connection and locks
/// - `ctx` - Discord context for replying
/// - `interaction` - The received interaction
pub async fn handle_interaction(handler: &Handler, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => handle_command(handler, &ctx, &command).await,
        Interaction::Component(component) => handle_component(handler, &ctx, &component).await,
        _ => {}
    }
}

async fn handle_command(handler: &Handler, ctx: &Context, command: &CommandInteraction) {
    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        tracing::error!("Failed to defer /{} interaction: {}", command.data.name, e);
        return;
    }

    let reply = match command.guild_id {
        Some(guild_id) => match run_command(handler, ctx, command, guild_id.get()).await {
            Ok(reply) => reply,
            Err(e) => e.user_message(),
        },
        None => GUILD_ONLY_MESSAGE.to_string(),
    };

    if let Err(e) = command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(reply))
        .await
    {
        tracing::error!("Failed to reply to /{} interaction: {}", command.data.name, e);
    }
}

async fn run_command(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
) -> Result<String, AppError> {
    let options = command.data.options();
    let actor = ActorContext {
        user_id: command.user.id.get(),
    };

    match command.data.name.as_str() {
        GIVEAWAY_COMMAND => match parse_giveaway_command(&options) {
            Some(giveaway_command) => {
                run_giveaway_command(
                    handler,
                    ctx,
                    giveaway_command,
                    guild_id,
                    command.channel_id.get(),
                    actor,
                )
                .await
            }
            None => Ok(UNKNOWN_COMMAND_MESSAGE.to_string()),
        },
        GIVEAWAY_ROLES_COMMAND => match parse_roles_command(&options) {
            Some(roles_command) => {
                run_roles_command(handler, ctx, roles_command, guild_id, actor).await
            }
            None => Ok(UNKNOWN_COMMAND_MESSAGE.to_string()),
        },
        other => {
            tracing::warn!("Received unknown command /{}", other);
            Ok(UNKNOWN_COMMAND_MESSAGE.to_string())
        }
    }
}

async fn run_giveaway_command(
    handler: &Handler,
    ctx: &Context,
    giveaway_command: GiveawayCommand,
    guild_id: u64,
    channel_id: u64,
    actor: ActorContext,
) -> Result<String, AppError> {
    let permissions =
        DiscordGiveawayPermissions::new(ctx.http.clone(), handler.db.clone(), handler.bot_owner_id);
    let notifier = DiscordGiveawayNotifier::new(ctx.http.clone());
    let service = GiveawayService::new(&handler.db, &handler.locks, &permissions);

    match giveaway_command {
        GiveawayCommand::Create {
            prize,
            duration,
            winners,
            description,
        } => {
            service
                .ensure_permitted(guild_id, actor, GiveawayAction::Manage)
                .await?;

            let giveaway = service
                .create_from_input(
                    CreateGiveawayInput {
                        guild_id,
                        channel_id,
                        host_id: actor.user_id,
                        prize,
                        description,
                        winners_count: winners,
                        duration,
                    },
                    Utc::now(),
                )
                .await?;

            match notifier.announce_created(&giveaway.render()).await {
                Ok(Some(message_id)) => service.attach_message(&giveaway.id, message_id).await?,
                Ok(None) => {}
                Err(e) => {
                    tracing::error!("Failed to post giveaway {}: {}", giveaway.id, e);
                    return Ok(format!(
                        "Giveaway `{}` was created but could not be posted in this channel. \
                         Winners will still be drawn <t:{}:R>.",
                        giveaway.id,
                        giveaway.ends_at.timestamp()
                    ));
                }
            }

            Ok(format!(
                "🎉 Giveaway for **{}** started! It ends <t:{}:R>.\nID: `{}`",
                giveaway.prize,
                giveaway.ends_at.timestamp(),
                giveaway.id
            ))
        }
        GiveawayCommand::List => {
            service
                .ensure_permitted(guild_id, actor, GiveawayAction::Manage)
                .await?;

            let giveaways = service.list_active(Some(guild_id)).await?;

            Ok(format_giveaway_list(&giveaways))
        }
        GiveawayCommand::End { id } => {
            // An actor trigger never skips, a completed giveaway is an error instead
            let giveaway = service
                .end(&id, EndTrigger::Actor(actor), Utc::now())
                .await?
                .ok_or_else(|| GiveawayError::AlreadyCompleted(id.clone()))?;

            if let Err(e) = notifier.announce_ended(&giveaway.render()).await {
                tracing::error!("Failed to announce winners of giveaway {}: {}", id, e);
            }

            Ok(format!(
                "Giveaway for **{}** ended with {} winner(s).",
                giveaway.prize,
                giveaway.winners.len()
            ))
        }
        GiveawayCommand::Reroll { id, count } => {
            // Negative counts are rejected by the service as out of range
            let count = count.map(|count| u32::try_from(count).unwrap_or(0));

            let giveaway = service.reroll(&id, actor, count, Utc::now()).await?;

            if let Err(e) = notifier.announce_rerolled(&giveaway.render()).await {
                tracing::error!("Failed to announce reroll of giveaway {}: {}", id, e);
            }

            Ok(format!(
                "Drew {} new winner(s) for **{}**.",
                giveaway.winners.len(),
                giveaway.prize
            ))
        }
    }
}

async fn run_roles_command(
    handler: &Handler,
    ctx: &Context,
    roles_command: RolesCommand,
    guild_id: u64,
    actor: ActorContext,
) -> Result<String, AppError> {
    let permissions =
        DiscordGiveawayPermissions::new(ctx.http.clone(), handler.db.clone(), handler.bot_owner_id);
    GiveawayService::new(&handler.db, &handler.locks, &permissions)
        .ensure_permitted(guild_id, actor, GiveawayAction::Configure)
        .await?;

    let repo = GiveawaySettingsRepository::new(&handler.db);

    match roles_command {
        RolesCommand::Add { role_id } => {
            repo.add_manager_role(guild_id, role_id, Utc::now()).await?;
            tracing::info!(
                "User {} allowed role {} to manage giveaways in guild {}",
                actor.user_id,
                role_id,
                guild_id
            );

            Ok(format!("<@&{role_id}> can now manage giveaways."))
        }
        RolesCommand::Remove { role_id } => {
            if !repo.remove_manager_role(guild_id, role_id).await? {
                return Ok(format!("<@&{role_id}> was not a giveaway manager role."));
            }
            tracing::info!(
                "User {} removed giveaway manager role {} in guild {}",
                actor.user_id,
                role_id,
                guild_id
            );

            Ok(format!("<@&{role_id}> can no longer manage giveaways."))
        }
        RolesCommand::List => {
            let roles = repo.get_manager_roles(guild_id).await?;
            if roles.is_empty() {
                return Ok("No giveaway manager roles are configured. \
                           Only administrators can manage giveaways."
                    .to_string());
            }

            Ok(format!(
                "Giveaway manager roles: {}",
                roles
                    .iter()
                    .map(|role_id| format!("<@&{role_id}>"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        }
    }
}

async fn handle_component(handler: &Handler, ctx: &Context, component: &ComponentInteraction) {
    let Some(giveaway_id) = parse_enter_button(&component.data.custom_id) else {
        return;
    };

    if let Err(e) = component.defer_ephemeral(&ctx.http).await {
        tracing::error!("Failed to defer entry into giveaway {}: {}", giveaway_id, e);
        return;
    }

    let reply = match enter_giveaway(handler, ctx, giveaway_id, component.user.id.get()).await {
        Ok(reply) => reply,
        Err(e) => e.user_message(),
    };

    if let Err(e) = component
        .edit_response(&ctx.http, EditInteractionResponse::new().content(reply))
        .await
    {
        tracing::error!("Failed to reply to entry into giveaway {}: {}", giveaway_id, e);
    }
}

async fn enter_giveaway(
    handler: &Handler,
    ctx: &Context,
    giveaway_id: &str,
    user_id: u64,
) -> Result<String, AppError> {
    let permissions =
        DiscordGiveawayPermissions::new(ctx.http.clone(), handler.db.clone(), handler.bot_owner_id);
    let service = GiveawayService::new(&handler.db, &handler.locks, &permissions);

    let giveaway = service
        .enter(giveaway_id, ActorContext { user_id }, Utc::now())
        .await?;

    // The entry stands even if the count on the announcement could not be refreshed
    if let Err(e) = service
        .refresh_entry_count(giveaway_id, &DiscordGiveawayNotifier::new(ctx.http.clone()))
        .await
    {
        tracing::warn!("Failed to refresh entries of giveaway {}: {}", giveaway_id, e);
    }

    Ok(format!(
        "🎉 You have entered the giveaway for **{}**! Good luck!",
        giveaway.prize
    ))
}

/// Formats the running giveaways of a guild for the `/giveaway list` reply.
fn format_giveaway_list(giveaways: &[Giveaway]) -> String {
    if giveaways.is_empty() {
        return "There are no active giveaways.".to_string();
    }

    giveaways
        .iter()
        .map(|giveaway| {
            let render = giveaway.render();
            let title = match message_link(&render) {
                Some(link) => format!("[{}]({})", render.prize, link),
                None => format!("**{}**", render.prize),
            };

            format!(
                "• {} ends <t:{}:R>, {} entries, {} winner(s)\n  ID: `{}`",
                title,
                render.ends_at.timestamp(),
                render.participant_count,
                render.winners_count,
                render.id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
