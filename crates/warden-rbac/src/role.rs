//! Role domain model
//!
//! A role is a named bundle of permissions that can be assigned to users.
//! Roles carry no behavior of their own; which permissions a role grants
//! is recorded in the role-permission association maintained by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named grouping of permissions assignable to users.
///
/// Roles are linked to users and to permissions through many-to-many
/// associations owned by the store layer; the entity itself only carries
/// identity and descriptive fields.
///
/// # Examples
///
/// ```
/// use warden_rbac::Role;
///
/// let role = Role::new("editor").with_description("Can create and edit content");
/// assert_eq!(role.name, "editor");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role ID
    pub id: Uuid,

    /// Role name (unique per application by convention, not enforced here)
    pub name: String,

    /// Optional human-readable description
    pub description: Option<String>,

    /// When the role was created
    pub created_at: DateTime<Utc>,
}

impl Role {
    /// Creates a new role with a generated UUID v7 ID.
    ///
    /// # Arguments
    ///
    /// * `name` - The role name
    ///
    /// # Examples
    ///
    /// ```
    /// use warden_rbac::Role;
    ///
    /// let role = Role::new("admin");
    /// assert!(role.description.is_none());
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            description: None,
            created_at: Utc::now(),
        }
    }

    /// Set a description for this role.
    ///
    /// # Arguments
    ///
    /// * `description` - The description text
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_creation() {
        let role = Role::new("editor");
        assert_eq!(role.name, "editor");
        assert!(role.description.is_none());
    }

    #[test]
    fn test_role_with_description() {
        let role = Role::new("admin").with_description("Full control");
        assert_eq!(role.description.as_deref(), Some("Full control"));
    }

    #[test]
    fn test_role_ids_are_unique() {
        let a = Role::new("a");
        let b = Role::new("a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_role_serde_round_trip() {
        let role = Role::new("viewer").with_description("Read-only");
        let json = serde_json::to_string(&role).unwrap();
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(role, back);
    }
}
