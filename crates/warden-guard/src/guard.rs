//! Authorization guard
//!
//! The guard answers two kinds of question against the store's graphs:
//! ability queries (`can` / `is` / `ability`) returning booleans, and the
//! route check (`check`) which additionally applies the open/closing
//! status gate and the unauthenticated failure mode.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use warden_rbac::{PermissionRef, RoleRef};
use warden_store::AccessStore;

use crate::error::{GuardError, GuardResult};

/// Central authorization checker over an [`AccessStore`].
///
/// All methods are request-scoped and stateless; the guard holds nothing
/// but the store handle and can be cloned cheaply into request handlers.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use uuid::Uuid;
/// use warden_guard::Guard;
/// use warden_store::MemoryStore;
///
/// # async fn demo() -> warden_guard::GuardResult<()> {
/// let guard = Guard::new(Arc::new(MemoryStore::new()));
/// let user_id = Uuid::now_v7();
///
/// // Ability queries report denial as Ok(false).
/// let allowed = guard.can(user_id, vec![Uuid::now_v7()], false).await?;
/// assert!(!allowed);
///
/// // Route checks fail without a current user.
/// assert!(guard.check(None, "/articles", "GET").await.is_err());
/// # Ok(())
/// # }
/// ```
pub struct Guard<S> {
    store: Arc<S>,
}

impl<S> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> std::fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").finish()
    }
}

impl<S: AccessStore> Guard<S> {
    /// Create a guard over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Count the distinct requested IDs present in `held`.
    ///
    /// Each requested ID counts at most once no matter how often it occurs
    /// in either list, so the count is compared against the full requested
    /// length by the `all` branch.
    fn matched_count(requested: &[Uuid], held: &[Uuid]) -> usize {
        let mut seen: Vec<Uuid> = Vec::new();
        for id in requested {
            if held.contains(id) && !seen.contains(id) {
                seen.push(*id);
            }
        }
        seen.len()
    }

    /// Determine if the user holds the given permissions.
    ///
    /// The requested reference is normalized to an ID list `P`, and the
    /// IDs of every permission reachable through any of the user's roles
    /// are gathered into `U` (a permission granted via two roles appears
    /// twice in `U`; the matched count follows `P`, so this cannot change
    /// the outcome). Each requested ID counts at most once against the
    /// requested length, so a request with duplicate IDs cannot satisfy
    /// the `all` branch.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user whose roles are traversed
    /// * `permissions` - Requested permissions, in any accepted shape
    /// * `all` - `true` requires every requested permission to be held;
    ///   `false` requires at least one
    ///
    /// # Returns
    ///
    /// `Ok(false)` for a user with no roles or an empty request; an error
    /// only on store failure.
    pub async fn can(
        &self,
        user_id: Uuid,
        permissions: impl Into<PermissionRef>,
        all: bool,
    ) -> GuardResult<bool> {
        let requested = permissions.into().into_ids();
        if requested.is_empty() {
            return Ok(false);
        }

        let mut held: Vec<Uuid> = Vec::new();
        for role in self.store.roles_for_user(user_id).await? {
            for permission in self.store.permissions_for_role(role.id).await? {
                held.push(permission.id);
            }
        }

        let matched = Self::matched_count(&requested, &held);
        let granted = if all {
            matched == requested.len()
        } else {
            matched > 0
        };
        debug!(
            user_id = %user_id,
            requested = requested.len(),
            matched,
            all,
            granted,
            "evaluated permission check"
        );
        Ok(granted)
    }

    /// Determine if the user holds the given roles.
    ///
    /// Structurally identical to [`can`](Self::can) over the user's
    /// assigned role IDs. The `all` branch compares against the requested
    /// set's count.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user whose role assignments are read
    /// * `roles` - Requested roles, in any accepted shape
    /// * `all` - `true` requires every requested role; `false` requires at
    ///   least one
    pub async fn is(
        &self,
        user_id: Uuid,
        roles: impl Into<RoleRef>,
        all: bool,
    ) -> GuardResult<bool> {
        let requested = roles.into().into_ids();
        if requested.is_empty() {
            return Ok(false);
        }

        let held: Vec<Uuid> = self
            .store
            .roles_for_user(user_id)
            .await?
            .iter()
            .map(|role| role.id)
            .collect();

        let matched = Self::matched_count(&requested, &held);
        let granted = if all {
            matched == requested.len()
        } else {
            matched > 0
        };
        debug!(
            user_id = %user_id,
            requested = requested.len(),
            matched,
            all,
            granted,
            "evaluated role check"
        );
        Ok(granted)
    }

    /// Combined permission and role check.
    ///
    /// With `all` set, both [`can`](Self::can) and [`is`](Self::is) must
    /// succeed; otherwise either one suffices.
    pub async fn ability(
        &self,
        user_id: Uuid,
        permissions: impl Into<PermissionRef>,
        roles: impl Into<RoleRef>,
        all: bool,
    ) -> GuardResult<bool> {
        let can = self.can(user_id, permissions, all).await?;
        let is = self.is(user_id, roles, all).await?;
        Ok(if all { can && is } else { can || is })
    }

    /// Determine if the given URI and verb should be granted for the
    /// current user.
    ///
    /// Roles are traversed in attachment order and each role's permissions
    /// in grant order; the first permission matching `(uri, verb)` exactly
    /// decides the outcome.
    ///
    /// # Arguments
    ///
    /// * `current_user` - The authenticated user, if any
    /// * `uri` - The requested URI, matched verbatim
    /// * `verb` - The requested HTTP verb, matched verbatim
    ///
    /// # Returns
    ///
    /// `Ok(true)` when an open permission matches, `Ok(false)` when no
    /// permission matches. Fails with [`GuardError::Unauthenticated`]
    /// before any store lookup when there is no current user, and with
    /// [`GuardError::ResourceHidden`] when the first match is closing.
    pub async fn check(
        &self,
        current_user: Option<Uuid>,
        uri: &str,
        verb: &str,
    ) -> GuardResult<bool> {
        let user_id = current_user.ok_or(GuardError::Unauthenticated)?;

        for role in self.store.roles_for_user(user_id).await? {
            for permission in self.store.permissions_for_role(role.id).await? {
                if permission.matches(uri, verb) {
                    if permission.is_closing() {
                        debug!(
                            user_id = %user_id,
                            uri,
                            verb,
                            role = %role.name,
                            "matched closing permission, masking route"
                        );
                        return Err(GuardError::ResourceHidden);
                    }
                    debug!(user_id = %user_id, uri, verb, role = %role.name, "route allowed");
                    return Ok(true);
                }
            }
        }

        debug!(user_id = %user_id, uri, verb, "no matching permission");
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_rbac::{Permission, PermissionStatus, Role, User};
    use warden_store::MemoryStore;

    async fn fixture() -> (Guard<MemoryStore>, Arc<MemoryStore>, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let user = User::new("Alice", "alice@example.com");
        let user_id = user.id;
        store.create_user(user).await.unwrap();
        (Guard::new(Arc::clone(&store)), store, user_id)
    }

    async fn role_with_permissions(
        store: &MemoryStore,
        name: &str,
        permissions: &[Uuid],
    ) -> Uuid {
        let role = Role::new(name);
        let role_id = role.id;
        store.create_role(role).await.unwrap();
        store.grant_permissions(role_id, permissions).await.unwrap();
        role_id
    }

    async fn make_permission(store: &MemoryStore, name: &str, uri: &str, verb: &str) -> Uuid {
        let permission = Permission::new(name, uri, verb);
        let id = permission.id;
        store.create_permission(permission).await.unwrap();
        id
    }

    #[tokio::test]
    async fn test_can_any_across_roles() {
        let (guard, store, user_id) = fixture().await;
        let read = make_permission(&store, "articles.list", "/articles", "GET").await;
        let write = make_permission(&store, "articles.create", "/articles", "POST").await;
        let reader = role_with_permissions(&store, "reader", &[read]).await;
        store.attach_roles(user_id, &[reader]).await.unwrap();

        assert!(guard.can(user_id, read, false).await.unwrap());
        assert!(!guard.can(user_id, write, false).await.unwrap());
        // Any-of over a mixed list succeeds through the held one.
        assert!(guard.can(user_id, vec![read, write], false).await.unwrap());
    }

    #[tokio::test]
    async fn test_can_all_requires_every_requested_permission() {
        let (guard, store, user_id) = fixture().await;
        let read = make_permission(&store, "articles.list", "/articles", "GET").await;
        let write = make_permission(&store, "articles.create", "/articles", "POST").await;
        let reader = role_with_permissions(&store, "reader", &[read]).await;
        let writer = role_with_permissions(&store, "writer", &[write]).await;

        store.attach_roles(user_id, &[reader]).await.unwrap();
        assert!(!guard.can(user_id, vec![read, write], true).await.unwrap());

        // Held across two different roles still counts.
        store.attach_roles(user_id, &[writer]).await.unwrap();
        assert!(guard.can(user_id, vec![read, write], true).await.unwrap());
    }

    #[tokio::test]
    async fn test_can_all_counts_duplicate_requests_once() {
        let (guard, store, user_id) = fixture().await;
        let read = make_permission(&store, "articles.list", "/articles", "GET").await;
        let reader = role_with_permissions(&store, "reader", &[read]).await;
        store.attach_roles(user_id, &[reader]).await.unwrap();

        // A duplicated id counts once against the requested length, so the
        // all-branch cannot be satisfied; any-of still matches.
        assert!(!guard.can(user_id, vec![read, read], true).await.unwrap());
        assert!(guard.can(user_id, vec![read, read], false).await.unwrap());
    }

    #[tokio::test]
    async fn test_can_is_false_without_roles() {
        let (guard, store, user_id) = fixture().await;
        let read = make_permission(&store, "articles.list", "/articles", "GET").await;
        assert!(!guard.can(user_id, read, false).await.unwrap());
    }

    #[tokio::test]
    async fn test_can_with_empty_request_is_false() {
        let (guard, _store, user_id) = fixture().await;
        assert!(!guard.can(user_id, Vec::<Uuid>::new(), false).await.unwrap());
        assert!(!guard.can(user_id, Vec::<Uuid>::new(), true).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_matches_assigned_roles() {
        let (guard, store, user_id) = fixture().await;
        let editor = role_with_permissions(&store, "editor", &[]).await;
        let admin = role_with_permissions(&store, "admin", &[]).await;
        store.attach_roles(user_id, &[editor]).await.unwrap();

        assert!(guard.is(user_id, editor, false).await.unwrap());
        assert!(!guard.is(user_id, admin, false).await.unwrap());
        assert!(guard.is(user_id, vec![editor, admin], false).await.unwrap());
        assert!(!guard.is(user_id, vec![editor, admin], true).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_all_uses_requested_set_count() {
        let (guard, store, user_id) = fixture().await;
        let editor = role_with_permissions(&store, "editor", &[]).await;
        let extra = role_with_permissions(&store, "extra", &[]).await;
        store.attach_roles(user_id, &[editor, extra]).await.unwrap();

        // Roles held beyond the requested set do not fail the all-branch.
        assert!(guard.is(user_id, vec![editor], true).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_all_counts_duplicate_requests_once() {
        let (guard, store, user_id) = fixture().await;
        let editor = role_with_permissions(&store, "editor", &[]).await;
        store.attach_roles(user_id, &[editor]).await.unwrap();

        assert!(!guard.is(user_id, vec![editor, editor], true).await.unwrap());
        assert!(guard.is(user_id, vec![editor, editor], false).await.unwrap());
    }

    #[tokio::test]
    async fn test_ability_composition() {
        let (guard, store, user_id) = fixture().await;
        let read = make_permission(&store, "articles.list", "/articles", "GET").await;
        let reader = role_with_permissions(&store, "reader", &[read]).await;
        let admin = role_with_permissions(&store, "admin", &[]).await;
        store.attach_roles(user_id, &[reader]).await.unwrap();

        // can=true, is=false: OR passes, AND fails.
        assert!(guard.ability(user_id, read, admin, false).await.unwrap());
        assert!(!guard.ability(user_id, read, admin, true).await.unwrap());

        // Both hold: AND passes.
        assert!(guard.ability(user_id, read, reader, true).await.unwrap());
    }

    #[tokio::test]
    async fn test_check_requires_current_user() {
        let (guard, _store, _user_id) = fixture().await;
        let err = guard.check(None, "/articles", "GET").await.unwrap_err();
        assert!(matches!(err, GuardError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_check_allows_open_match() {
        let (guard, store, user_id) = fixture().await;
        let read = make_permission(&store, "articles.list", "/articles", "GET").await;
        let reader = role_with_permissions(&store, "reader", &[read]).await;
        store.attach_roles(user_id, &[reader]).await.unwrap();

        assert!(guard.check(Some(user_id), "/articles", "GET").await.unwrap());
        assert!(!guard.check(Some(user_id), "/articles", "POST").await.unwrap());
        assert!(!guard.check(Some(user_id), "/other", "GET").await.unwrap());
    }

    #[tokio::test]
    async fn test_check_masks_closing_match() {
        let (guard, store, user_id) = fixture().await;
        let closed = Permission::new("admin.panel", "/admin", "GET")
            .with_status(PermissionStatus::Closing);
        let closed_id = closed.id;
        store.create_permission(closed).await.unwrap();
        let admin = role_with_permissions(&store, "admin", &[closed_id]).await;
        store.attach_roles(user_id, &[admin]).await.unwrap();

        let err = guard.check(Some(user_id), "/admin", "GET").await.unwrap_err();
        assert!(matches!(err, GuardError::ResourceHidden));
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_check_match_is_case_sensitive() {
        let (guard, store, user_id) = fixture().await;
        let read = make_permission(&store, "articles.list", "/articles", "GET").await;
        let reader = role_with_permissions(&store, "reader", &[read]).await;
        store.attach_roles(user_id, &[reader]).await.unwrap();

        assert!(!guard.check(Some(user_id), "/articles", "get").await.unwrap());
        assert!(!guard.check(Some(user_id), "/Articles", "GET").await.unwrap());
    }
}
