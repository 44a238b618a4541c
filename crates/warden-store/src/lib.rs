//! # Warden association store
//!
//! This crate resolves the many-to-many graphs behind the warden access
//! control model: which roles a user holds and which permissions a role
//! grants.
//!
//! ## Overview
//!
//! The warden-store crate handles:
//! - **Catalog rows**: users, roles, and permissions
//! - **Associations**: explicit attach/sync/detach operations over the
//!   user-role and role-permission join tables
//! - **Cascade deletion**: detach-then-delete for users, roles, and
//!   permissions, so no dangling join rows remain
//! - **Configuration**: externally supplied table names via [`StoreConfig`]
//!
//! ## Architecture
//!
//! ```text
//! AccessStore (trait)
//!   └─ MemoryStore (order-preserving join tables behind one RwLock)
//!
//! user_roles:       user id → [role id, ...]        (attachment order)
//! role_permissions: role id → [permission id, ...]  (grant order)
//! ```
//!
//! Ordering is part of the store contract: the guard's first-match route
//! traversal is only deterministic because backends preserve attachment
//! and grant order.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use warden_rbac::{Role, User};
//! use warden_store::{AccessStore, MemoryStore};
//!
//! # async fn demo() -> warden_store::StoreResult<()> {
//! let store = MemoryStore::new();
//!
//! let user = User::new("Alice", "alice@example.com");
//! let role = Role::new("editor");
//! let (user_id, role_id) = (user.id, role.id);
//!
//! store.create_user(user).await?;
//! store.create_role(role).await?;
//! store.attach_roles(user_id, &[role_id]).await?;
//!
//! // Deleting the user detaches its role assignments first.
//! store.delete_user(user_id).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Integration
//!
//! This crate is designed to work with:
//! - `warden-rbac`: the domain model stored here
//! - `warden-guard`: traverses these graphs to answer ability and route
//!   checks

pub mod config;
pub mod memory;
pub mod store;

// Re-export main types for convenience
pub use config::StoreConfig;
pub use memory::MemoryStore;
pub use store::{AccessStore, StoreError, StoreResult, SyncOutcome};
