//! User domain model
//!
//! Warden does not own authentication; who the current user is comes from
//! the surrounding application. This entity is the minimal identity record
//! the store needs to anchor role assignments and cascade deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user identity that roles can be assigned to.
///
/// The roles a user holds live in the user-role association maintained by
/// the store, not on this struct.
///
/// # Examples
///
/// ```
/// use warden_rbac::User;
///
/// let user = User::new("Alice", "alice@example.com");
/// assert_eq!(user.email, "alice@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// When the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a generated UUID v7 ID.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name
    /// * `email` - Email address
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("Alice", "alice@example.com");
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn test_user_serde_round_trip() {
        let user = User::new("Bob", "bob@example.com");
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(user, back);
    }
}
