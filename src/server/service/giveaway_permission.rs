//! Giveaway permission checks.
//!
//! Defines the `GiveawayPermissions` trait consulted by `GiveawayService` when a member
//! other than the host tries to end or reroll a giveaway, and by the bot before creating,
//! listing or configuring giveaways. The Discord implementation grants access to the bot
//! owner, guild administrators and members holding one of the guild's giveaway manager
//! roles.

use std::{collections::HashMap, sync::Arc};

use sea_orm::DatabaseConnection;
use serenity::{
    all::{GuildId, Permissions, Role, RoleId, UserId},
    async_trait,
    http::Http,
};

use crate::server::{
    data::giveaway_settings::GiveawaySettingsRepository, error::AppError,
    model::giveaway::GiveawayAction,
};

/// Answers whether a member may perform a giveaway action in a guild.
#[async_trait]
pub trait GiveawayPermissions: Send + Sync {
    /// # Arguments
    /// - `guild_id` - Guild the giveaway belongs to
    /// - `user_id` - Member performing the action
    /// - `action` - The action being attempted
    ///
    /// # Returns
    /// - `Ok(true)` - Member is permitted
    /// - `Ok(false)` - Member is not permitted
    /// - `Err(AppError)` - Permission data could not be retrieved
    async fn is_authorized(
        &self,
        guild_id: u64,
        user_id: u64,
        action: GiveawayAction,
    ) -> Result<bool, AppError>;
}

/// Permission checks backed by Discord guild data and the stored manager roles.
pub struct DiscordGiveawayPermissions {
    http: Arc<Http>,
    db: DatabaseConnection,
    bot_owner_id: u64,
}

impl DiscordGiveawayPermissions {
    /// Creates a new DiscordGiveawayPermissions instance
    ///
    /// # Arguments
    /// - `http` - Discord HTTP client used to fetch guild and member data
    /// - `db` - Database connection for reading manager roles
    /// - `bot_owner_id` - Discord ID of the bot owner, always permitted
    pub fn new(http: Arc<Http>, db: DatabaseConnection, bot_owner_id: u64) -> Self {
        Self {
            http,
            db,
            bot_owner_id,
        }
    }
}

#[async_trait]
impl GiveawayPermissions for DiscordGiveawayPermissions {
    async fn is_authorized(
        &self,
        guild_id: u64,
        user_id: u64,
        action: GiveawayAction,
    ) -> Result<bool, AppError> {
        if user_id == self.bot_owner_id {
            return Ok(true);
        }

        let guild = self.http.get_guild(GuildId::new(guild_id)).await?;
        let member = self
            .http
            .get_member(GuildId::new(guild_id), UserId::new(user_id))
            .await?;

        let access = MemberAccess {
            guild_id,
            guild_owner_id: guild.owner_id.get(),
            user_id,
            member_roles: &member.roles,
            guild_roles: &guild.roles,
        };

        if access.is_administrator() {
            return Ok(true);
        }

        // Manager roles never grant access to the role configuration itself
        if action == GiveawayAction::Configure {
            return Ok(false);
        }

        let manager_roles = GiveawaySettingsRepository::new(&self.db)
            .get_manager_roles(guild_id)
            .await?;

        Ok(access.has_any_role(&manager_roles))
    }
}

/// Guild data needed to decide on a member's giveaway permissions.
pub struct MemberAccess<'a> {
    pub guild_id: u64,
    pub guild_owner_id: u64,
    pub user_id: u64,
    pub member_roles: &'a [RoleId],
    pub guild_roles: &'a HashMap<RoleId, Role>,
}

impl MemberAccess<'_> {
    /// Whether the member owns the guild or holds the administrator permission.
    ///
    /// The `@everyone` role shares its ID with the guild and applies to every member.
    pub fn is_administrator(&self) -> bool {
        if self.user_id == self.guild_owner_id {
            return true;
        }

        let everyone = RoleId::new(self.guild_id);

        self.member_roles
            .iter()
            .chain(std::iter::once(&everyone))
            .filter_map(|role_id| self.guild_roles.get(role_id))
            .any(|role| role.permissions.contains(Permissions::ADMINISTRATOR))
    }

    /// Whether the member holds at least one of the given roles.
    pub fn has_any_role(&self, role_ids: &[u64]) -> bool {
        self.member_roles
            .iter()
            .any(|role_id| role_ids.contains(&role_id.get()))
    }
}
