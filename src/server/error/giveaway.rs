use thiserror::Error;

/// Rule violations raised by giveaway lifecycle operations.
///
/// Each variant is a distinct, expected outcome of a request rather than a fault.
/// The bot layer answers with `user_message()` as an ephemeral reply; nothing is
/// retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GiveawayError {
    /// Duration string could not be parsed, or resolved below the minimum.
    #[error("Invalid duration: {reason}")]
    InvalidDuration {
        /// Why the duration was rejected
        reason: String,
    },

    /// Requested number of winners is outside of the allowed range.
    #[error("Invalid winners count {count}, must be between 1 and {max}")]
    InvalidWinnersCount { count: u32, max: u32 },

    /// Prize is empty or longer than allowed.
    #[error("Invalid prize: {reason}")]
    InvalidPrize { reason: String },

    /// No giveaway exists with the given ID.
    #[error("Giveaway {0} not found")]
    NotFound(String),

    /// Giveaway is no longer accepting entries.
    #[error("Giveaway {0} is not active")]
    NotActive(String),

    /// Giveaway end time has passed, even if the sweep has not processed it yet.
    #[error("Giveaway {0} has already expired")]
    AlreadyExpired(String),

    /// Actor is already a participant.
    #[error("User {user_id} already entered giveaway {giveaway_id}")]
    AlreadyEntered { giveaway_id: String, user_id: u64 },

    /// Explicit end requested on a giveaway that has already been resolved.
    #[error("Giveaway {0} has already completed")]
    AlreadyCompleted(String),

    /// Reroll requested on a giveaway that is still running.
    #[error("Giveaway {0} has not completed yet")]
    NotCompleted(String),

    /// Actor is neither the host nor permitted to manage giveaways.
    #[error("User {user_id} is not authorized to manage giveaway {giveaway_id}")]
    NotAuthorized { giveaway_id: String, user_id: u64 },

    /// Reroll requested on a giveaway nobody entered.
    #[error("Giveaway {0} has no participants")]
    NoParticipants(String),

    /// Reroll count is outside of `1..=max`.
    #[error("Invalid reroll count {count}, must be between 1 and {max}")]
    InvalidCount { count: u32, max: u32 },
}

impl GiveawayError {
    /// Short human readable message for Discord replies.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidDuration { reason } => {
                format!("{reason}. Examples: 1d 12h, 30min, 2hours, 1week")
            }
            Self::InvalidWinnersCount { max, .. } => {
                format!("Number of winners must be between 1 and {max}.")
            }
            Self::InvalidPrize { reason } => reason.clone(),
            Self::NotFound(_) => "This giveaway no longer exists.".to_string(),
            Self::NotActive(_) => "This giveaway is no longer active!".to_string(),
            Self::AlreadyExpired(_) => "This giveaway has ended!".to_string(),
            Self::AlreadyEntered { .. } => "You have already entered this giveaway!".to_string(),
            Self::AlreadyCompleted(_) => "This giveaway has already ended.".to_string(),
            Self::NotCompleted(_) => {
                "This giveaway is still running, end it before rerolling.".to_string()
            }
            Self::NotAuthorized { .. } => {
                "Only the host or a giveaway manager can do that.".to_string()
            }
            Self::NoParticipants(_) => "Nobody entered this giveaway.".to_string(),
            Self::InvalidCount { max, .. } => {
                format!("Number of winners to reroll must be between 1 and {max}.")
            }
        }
    }
}
