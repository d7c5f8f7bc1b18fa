//! Giveaway bot backend and business logic.
//!
//! This module contains the complete implementation of the giveaway bot, including the
//! Discord integration, lifecycle logic, data access, and infrastructure services.
//! SeaORM is used for database operations and Serenity for the Discord bot.
//!
//! # Architecture
//!
//! The bot follows a layered architecture with clear separation of concerns:
//!
//! - **Bot Layer** (`bot/`) - Slash commands, buttons and their replies
//! - **Service Layer** (`service/`) - Giveaway lifecycle, permissions and notifications
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and user-facing messages
//!
//! # Infrastructure
//!
//! Supporting modules provide application infrastructure:
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **Startup** (`startup`) - Initialization of database and logging
//! - **Scheduler** (`scheduler/`) - Cron job ending expired giveaways
//! - **Utilities** (`util/`) - ID and duration parsing
//!
//! # Interaction Flow
//!
//! 1. **Bot** receives a slash command or button click and defers the reply
//! 2. **Service** checks permissions, validates and applies the lifecycle transition
//! 3. **Data** persists the giveaway, converting between entities and domain models
//! 4. **Notifier** posts or edits the giveaway messages in the channel
//! 5. **Bot** edits the deferred reply with the outcome

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
