//! Discord bot integration for running giveaways.
//!
//! This module provides the Discord side of the application: the serenity client, slash
//! command registration and the dispatch of command and button interactions to the
//! giveaway service. The bot's HTTP client is shared with the giveaway sweep to post
//! results without maintaining multiple connections to Discord.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild data and interactions
//! - `GUILD_MEMBERS` - Resolve member roles for permission checks (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
