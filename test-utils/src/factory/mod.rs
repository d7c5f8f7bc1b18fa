//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let giveaway = factory::create_giveaway(&db).await?;
//!     factory::create_participant(&db, &giveaway.id, 42).await?;
//!
//!     // Create with participants
//!     let (giveaway, participants) =
//!         factory::helpers::create_giveaway_with_participants(&db, 2, &[1, 2, 3]).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let giveaway = factory::giveaway::GiveawayFactory::new(&db)
//!     .guild_id(123)
//!     .winners_count(3)
//!     .completed()
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `giveaway` - Create giveaway entities
//! - `giveaway_participant` - Create participant entities
//! - `giveaway_manager_role` - Create manager role entities
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod giveaway;
pub mod giveaway_manager_role;
pub mod giveaway_participant;
pub mod helpers;

// Re-export commonly used factory functions for concise usage
pub use giveaway::{create_expired_giveaway, create_giveaway};
pub use giveaway_manager_role::create_manager_role;
pub use giveaway_participant::{create_participant, create_participants};
