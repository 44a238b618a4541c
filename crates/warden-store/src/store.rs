//! Association store abstraction
//!
//! This module defines the store trait that resolves the user-role and
//! role-permission graphs, along with its error types. Associations are
//! only ever created through the explicit attach/sync/detach operations
//! here; nothing attaches implicitly.
//!
//! Ordering is part of the contract: `roles_for_user` returns roles in
//! attachment order and `permissions_for_role` returns permissions in grant
//! order, which is what makes first-match route checking deterministic.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use warden_rbac::{Permission, Role, User};

/// Store error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No user row with this ID
    #[error("Unknown user: {0}")]
    UnknownUser(Uuid),

    /// No role row with this ID
    #[error("Unknown role: {0}")]
    UnknownRole(Uuid),

    /// No permission row with this ID
    #[error("Unknown permission: {0}")]
    UnknownPermission(Uuid),

    /// A user with this ID already exists
    #[error("User already exists: {0}")]
    DuplicateUser(Uuid),

    /// A role with this ID already exists
    #[error("Role already exists: {0}")]
    DuplicateRole(Uuid),

    /// A permission with this ID already exists
    #[error("Permission already exists: {0}")]
    DuplicatePermission(Uuid),

    /// Backend failure (connection loss, query error)
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The delta produced by a sync operation.
///
/// Syncing replaces an entity's full association set; the outcome reports
/// which IDs were newly attached and which were detached in the process.
///
/// # Examples
///
/// ```
/// use warden_store::SyncOutcome;
///
/// let outcome = SyncOutcome::default();
/// assert!(outcome.is_unchanged());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    /// IDs that were not associated before the sync
    pub attached: Vec<Uuid>,

    /// IDs that were associated before the sync and no longer are
    pub detached: Vec<Uuid>,
}

impl SyncOutcome {
    /// Check whether the sync left the association set as it was.
    pub fn is_unchanged(&self) -> bool {
        self.attached.is_empty() && self.detached.is_empty()
    }
}

/// Store trait resolving the user-role and role-permission graphs.
///
/// Implementations must preserve attachment order for user-role rows and
/// grant order for role-permission rows. Reads are total: asking for the
/// associations of an ID with no rows yields an empty result, not an
/// error. Mutations validate that the entities they link exist.
///
/// Deletion cascades are explicit two-step operations: detach every
/// association referencing the entity, then remove the entity row. The
/// trait establishes no transaction boundary around the two steps beyond
/// per-call atomicity of the backend.
#[async_trait]
pub trait AccessStore: Send + Sync {
    // Catalog operations

    /// Insert a user row.
    async fn create_user(&self, user: User) -> StoreResult<()>;

    /// Fetch a user row by ID.
    async fn user(&self, user_id: Uuid) -> StoreResult<Option<User>>;

    /// List all users in creation order.
    async fn users(&self) -> StoreResult<Vec<User>>;

    /// Insert a role row.
    async fn create_role(&self, role: Role) -> StoreResult<()>;

    /// Fetch a role row by ID.
    async fn role(&self, role_id: Uuid) -> StoreResult<Option<Role>>;

    /// List all roles in creation order.
    async fn roles(&self) -> StoreResult<Vec<Role>>;

    /// Insert a permission row.
    async fn create_permission(&self, permission: Permission) -> StoreResult<()>;

    /// Fetch a permission row by ID.
    async fn permission(&self, permission_id: Uuid) -> StoreResult<Option<Permission>>;

    /// List all permissions in creation order.
    async fn permissions(&self) -> StoreResult<Vec<Permission>>;

    // User-role associations

    /// Attach roles to a user, skipping IDs that are already attached.
    ///
    /// Returns the number of rows actually inserted. Fails if the user or
    /// any referenced role does not exist.
    async fn attach_roles(&self, user_id: Uuid, role_ids: &[Uuid]) -> StoreResult<usize>;

    /// Replace the user's full role set with the given IDs.
    ///
    /// Attachment order afterwards follows the input order (first
    /// occurrence wins for duplicated IDs). Fails if the user or any
    /// referenced role does not exist.
    async fn sync_roles(&self, user_id: Uuid, role_ids: &[Uuid]) -> StoreResult<SyncOutcome>;

    /// Detach the given roles from a user.
    ///
    /// IDs that are not attached are ignored. Returns the number of rows
    /// removed.
    async fn detach_roles(&self, user_id: Uuid, role_ids: &[Uuid]) -> StoreResult<usize>;

    /// Detach every role from a user. Returns the number of rows removed.
    async fn detach_all_roles(&self, user_id: Uuid) -> StoreResult<usize>;

    /// The user's roles in attachment order. Empty for unknown users.
    async fn roles_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Role>>;

    // Role-permission associations

    /// Grant permissions to a role, skipping IDs that are already granted.
    ///
    /// Returns the number of rows actually inserted. Fails if the role or
    /// any referenced permission does not exist.
    async fn grant_permissions(&self, role_id: Uuid, permission_ids: &[Uuid])
        -> StoreResult<usize>;

    /// Replace the role's full permission set with the given IDs.
    async fn sync_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> StoreResult<SyncOutcome>;

    /// Revoke the given permissions from a role. Returns the number of
    /// rows removed.
    async fn revoke_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> StoreResult<usize>;

    /// Revoke every permission from a role. Returns the number of rows
    /// removed.
    async fn revoke_all_permissions(&self, role_id: Uuid) -> StoreResult<usize>;

    /// The role's permissions in grant order. Empty for unknown roles.
    async fn permissions_for_role(&self, role_id: Uuid) -> StoreResult<Vec<Permission>>;

    /// The roles holding a permission, in role creation order.
    async fn roles_with_permission(&self, permission_id: Uuid) -> StoreResult<Vec<Role>>;

    // Cascade deletion

    /// Detach all of a user's role assignments, then remove the user row.
    async fn delete_user(&self, user_id: Uuid) -> StoreResult<()>;

    /// Detach the role from every user, revoke all its permission grants,
    /// then remove the role row.
    async fn delete_role(&self, role_id: Uuid) -> StoreResult<()>;

    /// Revoke the permission from every role, then remove the permission
    /// row.
    async fn delete_permission(&self, permission_id: Uuid) -> StoreResult<()>;
}
