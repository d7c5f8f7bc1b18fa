//! Test factories for creating Serenity API objects.
//!
//! When testing code that inspects Discord data, these factories build valid Serenity
//! structs by deserializing JSON, simulating what Discord's API would return.
//!
//! # Usage
//!
//! ```rust,ignore
//! use serenity::all::Permissions;
//! use test_utils::serenity::create_test_role;
//!
//! let admin_role = create_test_role(111111111, "Admin", Permissions::ADMINISTRATOR);
//! ```

pub mod role;

pub use role::create_test_role;
