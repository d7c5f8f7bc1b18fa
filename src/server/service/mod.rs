//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! bot layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing the giveaway lifecycle rules and validation
//! - **Orchestration**: Coordinating repository calls, permission checks and notifications
//! - **Domain Models**: Working with domain models rather than entity models

pub mod giveaway;
pub mod giveaway_notification;
pub mod giveaway_permission;
