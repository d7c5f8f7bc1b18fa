//! Cron jobs for automated tasks.
//!
//! - `giveaway_sweep` - Ends expired giveaways and announces their winners

pub mod giveaway_sweep;
