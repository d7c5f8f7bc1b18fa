//! Giveaway embed builder utilities.
//!
//! This module turns a `GiveawayRender` into the Discord embeds, message content and
//! buttons used by the Discord notifier. All Discord markup for giveaways lives here.

use chrono::{DateTime, Utc};
use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, Timestamp,
};

use crate::server::{
    error::{internal::InternalError, AppError},
    model::giveaway::GiveawayRender,
};

/// Custom ID prefix of the enter button, followed by the giveaway ID.
pub const ENTER_BUTTON_PREFIX: &str = "giveaway_enter:";

const COLOR_ACTIVE: u32 = 0xF1C40F;
const COLOR_ENDED: u32 = 0x607D8B;
const COLOR_WINNERS: u32 = 0x57F287;
const COLOR_NO_WINNERS: u32 = 0xED4245;

/// Builds the enter button attached to an active giveaway announcement.
///
/// # Arguments
/// - `giveaway_id` - ID of the giveaway the button enters
///
/// # Returns
/// - `CreateActionRow` - Row containing the single enter button
pub fn build_enter_button(giveaway_id: &str) -> CreateActionRow {
    CreateActionRow::Buttons(vec![CreateButton::new(format!(
        "{ENTER_BUTTON_PREFIX}{giveaway_id}"
    ))
    .label("Enter Giveaway")
    .emoji('🎉')
    .style(ButtonStyle::Secondary)])
}

/// Extracts the giveaway ID from an enter button custom ID.
///
/// # Returns
/// - `Some(&str)` - Giveaway ID
/// - `None` - Custom ID does not belong to an enter button
pub fn parse_enter_button(custom_id: &str) -> Option<&str> {
    custom_id
        .strip_prefix(ENTER_BUTTON_PREFIX)
        .filter(|id| !id.is_empty())
}

/// Builds the announcement embed of a running giveaway.
///
/// # Arguments
/// - `giveaway` - Render model of the giveaway
///
/// # Returns
/// - `Ok(CreateEmbed)` - Embed showing prize, winner count, entries and end time
/// - `Err(AppError::InternalErr)` - End time cannot be represented as a Discord timestamp
pub fn build_active_embed(giveaway: &GiveawayRender) -> Result<CreateEmbed, AppError> {
    let mut embed = CreateEmbed::new()
        .title("🎉 Giveaway")
        .description(format!("**{}**", giveaway.prize))
        .color(COLOR_ACTIVE);

    if let Some(description) = &giveaway.description {
        embed = embed.field("Description", description, false);
    }

    embed = embed
        .field("🏆 Winners", giveaway.winners_count.to_string(), true)
        .field("👥 Entries", giveaway.participant_count.to_string(), true)
        .field("⏰ Ends", relative_time(giveaway.ends_at), true)
        .field("Hosted by", format!("<@{}>", giveaway.host_id), false)
        .footer(CreateEmbedFooter::new("Click the button below to enter!"))
        .timestamp(discord_timestamp(giveaway.ends_at)?);

    Ok(embed)
}

/// Builds the final state of the original announcement once the giveaway ended.
///
/// # Arguments
/// - `giveaway` - Render model of the completed giveaway
///
/// # Returns
/// - `Ok(CreateEmbed)` - Greyed out embed listing the winners
/// - `Err(AppError::InternalErr)` - End time cannot be represented as a Discord timestamp
pub fn build_ended_embed(giveaway: &GiveawayRender) -> Result<CreateEmbed, AppError> {
    let ended_at = giveaway.ended_at.unwrap_or(giveaway.ends_at);

    let mut embed = CreateEmbed::new()
        .title("🎉 Giveaway Ended")
        .description(format!("**{}**", giveaway.prize))
        .color(COLOR_ENDED);

    if let Some(description) = &giveaway.description {
        embed = embed.field("Description", description, false);
    }

    let winners = if giveaway.winners.is_empty() {
        "No participants".to_string()
    } else {
        mention_list(&giveaway.winners)
    };

    embed = embed
        .field(winners_label(giveaway.winners.len()), winners, true)
        .field("👥 Entries", giveaway.participant_count.to_string(), true)
        .field("⏳ Ended", relative_time(ended_at), true)
        .field("Hosted by", format!("<@{}>", giveaway.host_id), false)
        .timestamp(discord_timestamp(ended_at)?);

    Ok(embed)
}

/// Builds the winner announcement posted when a giveaway ends or is rerolled.
///
/// # Arguments
/// - `giveaway` - Render model of the completed giveaway
/// - `rerolled` - Whether the winners come from a reroll
///
/// # Returns
/// - `CreateEmbed` - Winners embed, or a "no participants" embed when nobody won
pub fn build_winners_embed(giveaway: &GiveawayRender, rerolled: bool) -> CreateEmbed {
    if giveaway.winners.is_empty() {
        let mut embed = CreateEmbed::new()
            .title("🎉 Giveaway Ended 🎉")
            .description(format!(
                "The giveaway for **{}** has ended, but there were no participants!",
                giveaway.prize
            ))
            .color(COLOR_NO_WINNERS);

        if let Some(description) = &giveaway.description {
            embed = embed.field("📝 Description", description, false);
        }

        return embed;
    }

    let (title, description) = if rerolled {
        (
            "🔄 Giveaway Rerolled",
            format!("New winners were drawn for **{}**!", giveaway.prize),
        )
    } else {
        (
            "🎉 Giveaway Winners",
            format!("The giveaway for **{}** has ended!", giveaway.prize),
        )
    };

    let mut embed = CreateEmbed::new()
        .title(title)
        .description(description)
        .color(COLOR_WINNERS)
        .field(
            winners_label(giveaway.winners.len()),
            giveaway
                .winners
                .iter()
                .map(|winner| format!("• <@{winner}>"))
                .collect::<Vec<_>>()
                .join("\n"),
            false,
        );

    if let Some(description) = &giveaway.description {
        embed = embed.field("📝 Description", description, false);
    }

    if let Some(link) = message_link(giveaway) {
        embed = embed.field("Link to Giveaway", format!("[via Message]({link})"), false);
    }

    embed
}

/// Builds the message content pinging the winners.
///
/// # Returns
/// - `Some(String)` - Congratulation text mentioning every winner
/// - `None` - Nobody won
pub fn build_winners_content(giveaway: &GiveawayRender) -> Option<String> {
    if giveaway.winners.is_empty() {
        return None;
    }

    Some(format!(
        "🎊 Congratulations {}! You won the giveaway!",
        mention_list(&giveaway.winners)
    ))
}

/// Link to the original announcement, when it was posted.
pub fn message_link(giveaway: &GiveawayRender) -> Option<String> {
    giveaway.message_id.map(|message_id| {
        format!(
            "https://discord.com/channels/{}/{}/{}",
            giveaway.guild_id, giveaway.channel_id, message_id
        )
    })
}

fn winners_label(count: usize) -> &'static str {
    if count == 1 {
        "🏆 Winner"
    } else {
        "🏆 Winners"
    }
}

fn mention_list(user_ids: &[u64]) -> String {
    user_ids
        .iter()
        .map(|user_id| format!("<@{user_id}>"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn relative_time(time: DateTime<Utc>) -> String {
    format!("<t:{}:R>", time.timestamp())
}

fn discord_timestamp(time: DateTime<Utc>) -> Result<Timestamp, AppError> {
    Timestamp::from_unix_timestamp(time.timestamp()).map_err(|e| {
        AppError::InternalErr(InternalError::InvalidDiscordTimestamp {
            timestamp: time.timestamp(),
            reason: e.to_string(),
        })
    })
}
