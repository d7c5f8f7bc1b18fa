//! Error types and Discord reply handling.
//!
//! This module provides the application's error hierarchy. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and knows how to turn
//! itself into the short message shown to a Discord user when an interaction fails.

pub mod config;
pub mod giveaway;
pub mod internal;

use thiserror::Error;

use crate::server::error::{config::ConfigError, giveaway::GiveawayError, internal::InternalError};

/// Generic reply used when an error must not leak implementation details.
const GENERIC_ERROR_MESSAGE: &str = "Something went wrong, please try again later.";

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most variants
/// use `#[from]` for automatic error conversion. Giveaway rule violations carry their own
/// user-facing message, while infrastructure failures are logged and reported to the user
/// with a generic message.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Giveaway lifecycle rule violation.
    ///
    /// Expected outcome of a request (already entered, not authorized, ...), reported
    /// back to the user as-is.
    #[error(transparent)]
    GiveawayErr(#[from] GiveawayError),

    /// Unexpected internal state such as an unparsable stored ID.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    ///
    /// This is the storage failure kind: the write did not happen and callers such as
    /// the giveaway sweep treat it as transient and retry on their next run.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Whether the error came from the persistence layer.
    ///
    /// Storage failures leave the affected record untouched, so periodic jobs skip the
    /// record and pick it up again on the next run instead of aborting.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::DbErr(_))
    }

    /// Returns the giveaway rule violation wrapped by this error, if any.
    pub fn as_giveaway(&self) -> Option<&GiveawayError> {
        match self {
            Self::GiveawayErr(err) => Some(err),
            _ => None,
        }
    }

    /// Converts the error into the message shown to the Discord user.
    ///
    /// Giveaway errors are expected and map to their own message. Everything else is
    /// logged with full details and replaced by a generic message so internals are not
    /// leaked into the channel.
    pub fn user_message(&self) -> String {
        match self {
            Self::GiveawayErr(err) => err.user_message(),
            err => {
                tracing::error!("{}", err);
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }
}
