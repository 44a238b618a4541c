//! Reference normalization
//!
//! Evaluator entry points accept role and permission references in several
//! shapes: a single ID, a list of IDs, a loaded entity, or a collection of
//! entities. Each shape is an explicit tagged variant rather than a value
//! inspected at runtime, and every variant normalizes to the same thing: an
//! ordered list of IDs.
//!
//! Normalization never fails, never deduplicates, and is idempotent: the
//! `Ids` variant comes back unchanged.

use uuid::Uuid;

use crate::permission::Permission;
use crate::role::Role;

/// A role reference in one of the accepted input shapes.
///
/// `From` conversions cover each shape, so call sites can pass an ID, a
/// `Vec` of IDs, a `Role`, or a `Vec<Role>` wherever an
/// `impl Into<RoleRef>` is expected.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use warden_rbac::{Role, RoleRef};
///
/// let id = Uuid::now_v7();
/// assert_eq!(RoleRef::from(id).into_ids(), vec![id]);
///
/// let role = Role::new("editor");
/// let role_id = role.id;
/// assert_eq!(RoleRef::from(role).into_ids(), vec![role_id]);
/// ```
#[derive(Debug, Clone)]
pub enum RoleRef {
    /// A single role ID
    Id(Uuid),

    /// An already-normalized list of role IDs
    Ids(Vec<Uuid>),

    /// A loaded role entity
    Entity(Role),

    /// A collection of loaded role entities
    Entities(Vec<Role>),
}

impl RoleRef {
    /// Normalize this reference to an ordered list of role IDs.
    ///
    /// Entity collections map to their IDs in iteration order; the `Ids`
    /// variant is returned as-is.
    pub fn into_ids(self) -> Vec<Uuid> {
        match self {
            Self::Id(id) => vec![id],
            Self::Ids(ids) => ids,
            Self::Entity(role) => vec![role.id],
            Self::Entities(roles) => roles.iter().map(|role| role.id).collect(),
        }
    }
}

impl From<Uuid> for RoleRef {
    fn from(id: Uuid) -> Self {
        Self::Id(id)
    }
}

impl From<Vec<Uuid>> for RoleRef {
    fn from(ids: Vec<Uuid>) -> Self {
        Self::Ids(ids)
    }
}

impl From<&[Uuid]> for RoleRef {
    fn from(ids: &[Uuid]) -> Self {
        Self::Ids(ids.to_vec())
    }
}

impl From<Role> for RoleRef {
    fn from(role: Role) -> Self {
        Self::Entity(role)
    }
}

impl From<Vec<Role>> for RoleRef {
    fn from(roles: Vec<Role>) -> Self {
        Self::Entities(roles)
    }
}

/// A permission reference in one of the accepted input shapes.
///
/// Mirrors [`RoleRef`] for permissions.
///
/// # Examples
///
/// ```
/// use warden_rbac::{Permission, PermissionRef};
///
/// let perm = Permission::new("articles.list", "/articles", "GET");
/// let perm_id = perm.id;
/// assert_eq!(PermissionRef::from(perm).into_ids(), vec![perm_id]);
/// ```
#[derive(Debug, Clone)]
pub enum PermissionRef {
    /// A single permission ID
    Id(Uuid),

    /// An already-normalized list of permission IDs
    Ids(Vec<Uuid>),

    /// A loaded permission entity
    Entity(Permission),

    /// A collection of loaded permission entities
    Entities(Vec<Permission>),
}

impl PermissionRef {
    /// Normalize this reference to an ordered list of permission IDs.
    pub fn into_ids(self) -> Vec<Uuid> {
        match self {
            Self::Id(id) => vec![id],
            Self::Ids(ids) => ids,
            Self::Entity(permission) => vec![permission.id],
            Self::Entities(permissions) => {
                permissions.iter().map(|permission| permission.id).collect()
            }
        }
    }
}

impl From<Uuid> for PermissionRef {
    fn from(id: Uuid) -> Self {
        Self::Id(id)
    }
}

impl From<Vec<Uuid>> for PermissionRef {
    fn from(ids: Vec<Uuid>) -> Self {
        Self::Ids(ids)
    }
}

impl From<&[Uuid]> for PermissionRef {
    fn from(ids: &[Uuid]) -> Self {
        Self::Ids(ids.to_vec())
    }
}

impl From<Permission> for PermissionRef {
    fn from(permission: Permission) -> Self {
        Self::Entity(permission)
    }
}

impl From<Vec<Permission>> for PermissionRef {
    fn from(permissions: Vec<Permission>) -> Self {
        Self::Entities(permissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_id_normalizes_to_one_element() {
        let id = Uuid::now_v7();
        assert_eq!(RoleRef::from(id).into_ids(), vec![id]);
        assert_eq!(PermissionRef::from(id).into_ids(), vec![id]);
    }

    #[test]
    fn test_id_list_passes_through_unchanged() {
        let ids = vec![Uuid::now_v7(), Uuid::now_v7()];
        assert_eq!(RoleRef::from(ids.clone()).into_ids(), ids);
    }

    #[test]
    fn test_entity_normalizes_to_its_id() {
        let role = Role::new("editor");
        let expected = vec![role.id];
        assert_eq!(RoleRef::from(role).into_ids(), expected);
    }

    #[test]
    fn test_entity_collection_preserves_iteration_order() {
        let a = Role::new("a");
        let b = Role::new("b");
        let expected = vec![a.id, b.id];
        assert_eq!(RoleRef::from(vec![a, b]).into_ids(), expected);
    }

    #[test]
    fn test_normalization_does_not_deduplicate() {
        let id = Uuid::now_v7();
        let ids = vec![id, id];
        assert_eq!(PermissionRef::from(ids.clone()).into_ids(), ids);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let perm = Permission::new("articles.list", "/articles", "GET");
        let once = PermissionRef::from(vec![perm]).into_ids();
        let twice = PermissionRef::from(once.clone()).into_ids();
        assert_eq!(once, twice);
    }
}
