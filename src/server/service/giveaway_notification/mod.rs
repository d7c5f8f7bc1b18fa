//! Giveaway notifications.
//!
//! Defines the `GiveawayNotifier` trait through which giveaway lifecycle events are
//! announced, and `DiscordGiveawayNotifier` which posts and edits the giveaway messages in
//! the giveaway's channel. The lifecycle engine never formats markup itself, it hands a
//! `GiveawayRender` to the notifier.
//!
//! - `builder` - Embed, content and button building

pub mod builder;

use std::sync::Arc;

use serenity::{
    all::{ChannelId, CreateMessage, EditMessage, MessageId},
    async_trait,
    http::Http,
};

use crate::server::{
    error::AppError,
    model::giveaway::GiveawayRender,
    service::giveaway_notification::builder::{
        build_active_embed, build_ended_embed, build_enter_button, build_winners_content,
        build_winners_embed,
    },
};

/// Publishes giveaway lifecycle events.
#[async_trait]
pub trait GiveawayNotifier: Send + Sync {
    /// Posts the announcement of a newly created giveaway.
    ///
    /// # Returns
    /// - `Ok(Some(u64))` - ID of the posted announcement
    /// - `Ok(None)` - Announcement was not posted anywhere that can be referenced
    /// - `Err(AppError)` - Posting failed
    async fn announce_created(&self, giveaway: &GiveawayRender) -> Result<Option<u64>, AppError>;

    /// Refreshes the entry count shown on the announcement.
    async fn announce_entry_count(&self, giveaway: &GiveawayRender) -> Result<(), AppError>;

    /// Announces the winners of a giveaway that just ended.
    async fn announce_ended(&self, giveaway: &GiveawayRender) -> Result<(), AppError>;

    /// Announces newly drawn winners after a reroll.
    async fn announce_rerolled(&self, giveaway: &GiveawayRender) -> Result<(), AppError>;
}

/// Notifier posting giveaway messages to the giveaway's Discord channel.
pub struct DiscordGiveawayNotifier {
    http: Arc<Http>,
}

impl DiscordGiveawayNotifier {
    /// Creates a new DiscordGiveawayNotifier instance.
    ///
    /// # Arguments
    /// - `http` - Arc-wrapped Discord HTTP client for API requests
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Posts the winners message for a completed giveaway.
    async fn post_winners(
        &self,
        giveaway: &GiveawayRender,
        rerolled: bool,
    ) -> Result<(), AppError> {
        let mut message = CreateMessage::new().embed(build_winners_embed(giveaway, rerolled));
        if let Some(content) = build_winners_content(giveaway) {
            message = message.content(content);
        }

        ChannelId::new(giveaway.channel_id)
            .send_message(&self.http, message)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl GiveawayNotifier for DiscordGiveawayNotifier {
    async fn announce_created(&self, giveaway: &GiveawayRender) -> Result<Option<u64>, AppError> {
        let message = CreateMessage::new()
            .embed(build_active_embed(giveaway)?)
            .components(vec![build_enter_button(&giveaway.id)]);

        let posted = ChannelId::new(giveaway.channel_id)
            .send_message(&self.http, message)
            .await?;

        tracing::info!(
            "Posted giveaway {} to channel {}",
            giveaway.id,
            giveaway.channel_id
        );

        Ok(Some(posted.id.get()))
    }

    async fn announce_entry_count(&self, giveaway: &GiveawayRender) -> Result<(), AppError> {
        let Some(message_id) = giveaway.message_id else {
            return Ok(());
        };

        let edit = EditMessage::new().embed(build_active_embed(giveaway)?);
        self.http
            .edit_message(
                ChannelId::new(giveaway.channel_id),
                MessageId::new(message_id),
                &edit,
                vec![],
            )
            .await?;

        Ok(())
    }

    async fn announce_ended(&self, giveaway: &GiveawayRender) -> Result<(), AppError> {
        if let Some(message_id) = giveaway.message_id {
            let edit = EditMessage::new()
                .embed(build_ended_embed(giveaway)?)
                .components(vec![]);

            // The winners are still announced if the original message is gone
            if let Err(e) = self
                .http
                .edit_message(
                    ChannelId::new(giveaway.channel_id),
                    MessageId::new(message_id),
                    &edit,
                    vec![],
                )
                .await
            {
                tracing::warn!(
                    "Failed to update announcement of giveaway {}: {}",
                    giveaway.id,
                    e
                );
            }
        }

        self.post_winners(giveaway, false).await
    }

    async fn announce_rerolled(&self, giveaway: &GiveawayRender) -> Result<(), AppError> {
        if let Some(message_id) = giveaway.message_id {
            let edit = EditMessage::new().embed(build_ended_embed(giveaway)?);

            if let Err(e) = self
                .http
                .edit_message(
                    ChannelId::new(giveaway.channel_id),
                    MessageId::new(message_id),
                    &edit,
                    vec![],
                )
                .await
            {
                tracing::warn!(
                    "Failed to update announcement of rerolled giveaway {}: {}",
                    giveaway.id,
                    e
                );
            }
        }

        self.post_winners(giveaway, true).await
    }
}
