//! Test factory for creating Serenity Role objects.
//!
//! This module provides factory functions for creating mock Serenity `Role` structs
//! for testing purposes. These factories create valid Role objects by deserializing
//! JSON, simulating what Discord's API would return.

use serenity::all::{Permissions, Role};

/// Creates a test Serenity Role with the given permissions.
///
/// Creates a Role object by deserializing JSON with the provided values.
/// All other fields are set to reasonable defaults (not hoisted, not managed,
/// not mentionable, no color).
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name
/// - `permissions` - Permission bits granted by the role
///
/// # Returns
/// - `Role` - A valid Serenity Role struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use serenity::all::Permissions;
/// use test_utils::serenity::role::create_test_role;
///
/// let admin = create_test_role(123456789, "Admin", Permissions::ADMINISTRATOR);
/// let member = create_test_role(987654321, "Member", Permissions::empty());
/// ```
pub fn create_test_role(role_id: u64, name: &str, permissions: Permissions) -> Role {
    serde_json::from_value(serde_json::json!({
        "id": role_id.to_string(),
        "name": name,
        "color": 0,
        "colors": {
            "primary_color": 0,
            "secondary_color": null,
            "tertiary_color": null,
        },
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": 1,
        "permissions": permissions.bits().to_string(),
        "managed": false,
        "mentionable": false,
    }))
    .expect("Failed to create test role - invalid JSON structure")
}
