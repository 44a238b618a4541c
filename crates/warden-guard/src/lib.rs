//! # Warden authorization guard
//!
//! This crate provides the central checker that answers "is this user
//! allowed to do X" over the role and permission graphs resolved by
//! `warden-store`.
//!
//! ## Overview
//!
//! The warden-guard crate handles:
//! - **Ability checks**: `can` (permissions), `is` (roles), and `ability`
//!   (both), each with an ALL/ANY quantifier and denial reported as
//!   `Ok(false)`
//! - **Route checks**: `check(current_user, uri, verb)` with first-match
//!   traversal and the open/closing status gate
//! - **Error taxonomy**: `Unauthenticated` (401), `ResourceHidden` (404,
//!   deliberately indistinguishable from a nonexistent route), and store
//!   failures
//!
//! ## Decision model
//!
//! ```text
//! can(user, P, all):   P ∩ permissions-of-user's-roles
//!                      all ? every id of P matched : any matched
//! is(user, R, all):    R ∩ user's roles, same quantifier
//! ability(P, R, all):  all ? can && is : can || is
//! check(user, uri, verb):
//!   no user          → Unauthenticated
//!   first (uri, verb) match, closing → ResourceHidden
//!   first (uri, verb) match, open    → allowed
//!   no match                         → denied (false)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use warden_guard::Guard;
//! use warden_rbac::{Permission, Role, User};
//! use warden_store::{AccessStore, MemoryStore};
//!
//! # async fn demo() -> warden_guard::GuardResult<()> {
//! let store = Arc::new(MemoryStore::new());
//! let guard = Guard::new(Arc::clone(&store));
//!
//! let user = User::new("Alice", "alice@example.com");
//! let role = Role::new("editor");
//! let perm = Permission::new("articles.list", "/articles", "GET");
//! let (user_id, role_id, perm_id) = (user.id, role.id, perm.id);
//!
//! store.create_user(user).await?;
//! store.create_role(role).await?;
//! store.create_permission(perm).await?;
//! store.grant_permissions(role_id, &[perm_id]).await?;
//! store.attach_roles(user_id, &[role_id]).await?;
//!
//! assert!(guard.can(user_id, perm_id, false).await?);
//! assert!(guard.check(Some(user_id), "/articles", "GET").await?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod guard;

// Re-export main types for convenience
pub use error::{GuardError, GuardResult};
pub use guard::Guard;
