//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and used
//! throughout the service layer, the giveaway sweep and the bot command handlers.

pub mod giveaway;
