//! In-memory store implementation
//!
//! This backend is suitable for single-process applications and testing.
//! Join tables are order-preserving vectors, which is what gives the route
//! checker its deterministic first-match traversal. All tables sit behind
//! one `RwLock`, so each call is atomic on its own; a cascade delete is
//! still detach-then-remove with no outer transaction, matching what a
//! SQL backend without one would do.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use warden_rbac::{Permission, Role, User};

use crate::config::StoreConfig;
use crate::store::{AccessStore, StoreError, StoreResult, SyncOutcome};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    roles: HashMap<Uuid, Role>,
    permissions: HashMap<Uuid, Permission>,
    /// user id → role ids, in attachment order
    user_roles: HashMap<Uuid, Vec<Uuid>>,
    /// role id → permission ids, in grant order
    role_permissions: HashMap<Uuid, Vec<Uuid>>,
}

/// In-memory [`AccessStore`] implementation.
///
/// # Examples
///
/// ```
/// use warden_store::{MemoryStore, StoreConfig};
///
/// let store = MemoryStore::new();
/// let labelled = MemoryStore::with_config(StoreConfig::default());
/// # let _ = (store, labelled);
/// ```
pub struct MemoryStore {
    config: StoreConfig,
    inner: Arc<RwLock<Tables>>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("config", &self.config)
            .finish()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store with default table names.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            inner: Arc::new(RwLock::new(Tables::default())),
        }
    }

    /// The configuration this store was built with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn ensure_roles_exist(tables: &Tables, role_ids: &[Uuid]) -> StoreResult<()> {
        for id in role_ids {
            if !tables.roles.contains_key(id) {
                return Err(StoreError::UnknownRole(*id));
            }
        }
        Ok(())
    }

    fn ensure_permissions_exist(tables: &Tables, permission_ids: &[Uuid]) -> StoreResult<()> {
        for id in permission_ids {
            if !tables.permissions.contains_key(id) {
                return Err(StoreError::UnknownPermission(*id));
            }
        }
        Ok(())
    }

    /// Dedup an ID list preserving first occurrence.
    fn dedup(ids: &[Uuid]) -> Vec<Uuid> {
        let mut result: Vec<Uuid> = Vec::with_capacity(ids.len());
        for id in ids {
            if !result.contains(id) {
                result.push(*id);
            }
        }
        result
    }

    fn sync_join(current: &mut Vec<Uuid>, ids: &[Uuid]) -> SyncOutcome {
        let next = Self::dedup(ids);
        let attached = next
            .iter()
            .copied()
            .filter(|id| !current.contains(id))
            .collect();
        let detached = current
            .iter()
            .copied()
            .filter(|id| !next.contains(id))
            .collect();
        *current = next;
        SyncOutcome { attached, detached }
    }
}

#[async_trait]
impl AccessStore for MemoryStore {
    async fn create_user(&self, user: User) -> StoreResult<()> {
        let mut tables = self.inner.write().await;
        if tables.users.contains_key(&user.id) {
            return Err(StoreError::DuplicateUser(user.id));
        }
        tables.users.insert(user.id, user);
        Ok(())
    }

    async fn user(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables.users.get(&user_id).cloned())
    }

    async fn users(&self) -> StoreResult<Vec<User>> {
        let tables = self.inner.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn create_role(&self, role: Role) -> StoreResult<()> {
        let mut tables = self.inner.write().await;
        if tables.roles.contains_key(&role.id) {
            return Err(StoreError::DuplicateRole(role.id));
        }
        tables.roles.insert(role.id, role);
        Ok(())
    }

    async fn role(&self, role_id: Uuid) -> StoreResult<Option<Role>> {
        let tables = self.inner.read().await;
        Ok(tables.roles.get(&role_id).cloned())
    }

    async fn roles(&self) -> StoreResult<Vec<Role>> {
        let tables = self.inner.read().await;
        let mut roles: Vec<Role> = tables.roles.values().cloned().collect();
        roles.sort_by_key(|role| role.id);
        Ok(roles)
    }

    async fn create_permission(&self, permission: Permission) -> StoreResult<()> {
        let mut tables = self.inner.write().await;
        if tables.permissions.contains_key(&permission.id) {
            return Err(StoreError::DuplicatePermission(permission.id));
        }
        tables.permissions.insert(permission.id, permission);
        Ok(())
    }

    async fn permission(&self, permission_id: Uuid) -> StoreResult<Option<Permission>> {
        let tables = self.inner.read().await;
        Ok(tables.permissions.get(&permission_id).cloned())
    }

    async fn permissions(&self) -> StoreResult<Vec<Permission>> {
        let tables = self.inner.read().await;
        let mut permissions: Vec<Permission> = tables.permissions.values().cloned().collect();
        permissions.sort_by_key(|permission| permission.id);
        Ok(permissions)
    }

    async fn attach_roles(&self, user_id: Uuid, role_ids: &[Uuid]) -> StoreResult<usize> {
        let mut tables = self.inner.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::UnknownUser(user_id));
        }
        Self::ensure_roles_exist(&tables, role_ids)?;

        let assigned = tables.user_roles.entry(user_id).or_default();
        let mut attached = 0;
        for id in role_ids {
            if !assigned.contains(id) {
                assigned.push(*id);
                attached += 1;
            }
        }
        Ok(attached)
    }

    async fn sync_roles(&self, user_id: Uuid, role_ids: &[Uuid]) -> StoreResult<SyncOutcome> {
        let mut tables = self.inner.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::UnknownUser(user_id));
        }
        Self::ensure_roles_exist(&tables, role_ids)?;

        let current = tables.user_roles.entry(user_id).or_default();
        Ok(Self::sync_join(current, role_ids))
    }

    async fn detach_roles(&self, user_id: Uuid, role_ids: &[Uuid]) -> StoreResult<usize> {
        let mut tables = self.inner.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::UnknownUser(user_id));
        }
        let assigned = tables.user_roles.entry(user_id).or_default();
        let before = assigned.len();
        assigned.retain(|id| !role_ids.contains(id));
        Ok(before - assigned.len())
    }

    async fn detach_all_roles(&self, user_id: Uuid) -> StoreResult<usize> {
        let mut tables = self.inner.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::UnknownUser(user_id));
        }
        Ok(tables
            .user_roles
            .remove(&user_id)
            .map(|assigned| assigned.len())
            .unwrap_or(0))
    }

    async fn roles_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Role>> {
        let tables = self.inner.read().await;
        let assigned = tables.user_roles.get(&user_id).cloned().unwrap_or_default();
        Ok(assigned
            .iter()
            .filter_map(|id| tables.roles.get(id).cloned())
            .collect())
    }

    async fn grant_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> StoreResult<usize> {
        let mut tables = self.inner.write().await;
        if !tables.roles.contains_key(&role_id) {
            return Err(StoreError::UnknownRole(role_id));
        }
        Self::ensure_permissions_exist(&tables, permission_ids)?;

        let granted = tables.role_permissions.entry(role_id).or_default();
        let mut inserted = 0;
        for id in permission_ids {
            if !granted.contains(id) {
                granted.push(*id);
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn sync_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> StoreResult<SyncOutcome> {
        let mut tables = self.inner.write().await;
        if !tables.roles.contains_key(&role_id) {
            return Err(StoreError::UnknownRole(role_id));
        }
        Self::ensure_permissions_exist(&tables, permission_ids)?;

        let current = tables.role_permissions.entry(role_id).or_default();
        Ok(Self::sync_join(current, permission_ids))
    }

    async fn revoke_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> StoreResult<usize> {
        let mut tables = self.inner.write().await;
        if !tables.roles.contains_key(&role_id) {
            return Err(StoreError::UnknownRole(role_id));
        }
        let granted = tables.role_permissions.entry(role_id).or_default();
        let before = granted.len();
        granted.retain(|id| !permission_ids.contains(id));
        Ok(before - granted.len())
    }

    async fn revoke_all_permissions(&self, role_id: Uuid) -> StoreResult<usize> {
        let mut tables = self.inner.write().await;
        if !tables.roles.contains_key(&role_id) {
            return Err(StoreError::UnknownRole(role_id));
        }
        Ok(tables
            .role_permissions
            .remove(&role_id)
            .map(|granted| granted.len())
            .unwrap_or(0))
    }

    async fn permissions_for_role(&self, role_id: Uuid) -> StoreResult<Vec<Permission>> {
        let tables = self.inner.read().await;
        let granted = tables
            .role_permissions
            .get(&role_id)
            .cloned()
            .unwrap_or_default();
        Ok(granted
            .iter()
            .filter_map(|id| tables.permissions.get(id).cloned())
            .collect())
    }

    async fn roles_with_permission(&self, permission_id: Uuid) -> StoreResult<Vec<Role>> {
        let tables = self.inner.read().await;
        let mut holders: Vec<Role> = tables
            .role_permissions
            .iter()
            .filter(|(_, granted)| granted.contains(&permission_id))
            .filter_map(|(role_id, _)| tables.roles.get(role_id).cloned())
            .collect();
        holders.sort_by_key(|role| role.id);
        Ok(holders)
    }

    async fn delete_user(&self, user_id: Uuid) -> StoreResult<()> {
        let mut tables = self.inner.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::UnknownUser(user_id));
        }
        // Detach first, then remove the row.
        let detached = tables
            .user_roles
            .remove(&user_id)
            .map(|assigned| assigned.len())
            .unwrap_or(0);
        tables.users.remove(&user_id);
        debug!(user_id = %user_id, detached, "deleted user after detaching role assignments");
        Ok(())
    }

    async fn delete_role(&self, role_id: Uuid) -> StoreResult<()> {
        let mut tables = self.inner.write().await;
        if !tables.roles.contains_key(&role_id) {
            return Err(StoreError::UnknownRole(role_id));
        }
        let mut detached = 0;
        for assigned in tables.user_roles.values_mut() {
            let before = assigned.len();
            assigned.retain(|id| *id != role_id);
            detached += before - assigned.len();
        }
        let revoked = tables
            .role_permissions
            .remove(&role_id)
            .map(|granted| granted.len())
            .unwrap_or(0);
        tables.roles.remove(&role_id);
        debug!(role_id = %role_id, detached, revoked, "deleted role after clearing associations");
        Ok(())
    }

    async fn delete_permission(&self, permission_id: Uuid) -> StoreResult<()> {
        let mut tables = self.inner.write().await;
        if !tables.permissions.contains_key(&permission_id) {
            return Err(StoreError::UnknownPermission(permission_id));
        }
        let mut revoked = 0;
        for granted in tables.role_permissions.values_mut() {
            let before = granted.len();
            granted.retain(|id| *id != permission_id);
            revoked += before - granted.len();
        }
        tables.permissions.remove(&permission_id);
        debug!(permission_id = %permission_id, revoked, "deleted permission after revoking grants");
        Ok(())
    }
}
