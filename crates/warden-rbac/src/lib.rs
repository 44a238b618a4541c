//! # Warden RBAC domain model
//!
//! This crate provides the role-based access control domain model shared by
//! the warden crates: users, roles, permissions, and the reference
//! normalization used by every ability check.
//!
//! ## Overview
//!
//! The warden-rbac crate handles:
//! - **Users**: identity records that roles are assigned to
//! - **Roles**: named bundles of permissions
//! - **Permissions**: route grants keyed by `(uri, verb)` with an
//!   open/closing status gate
//! - **References**: tagged input shapes (`RoleRef`, `PermissionRef`) that
//!   normalize to ordered ID lists
//!
//! ## Architecture
//!
//! ```text
//! User ──┐
//!        ├─ user-role association ──→ Role
//!        │                              └─ role-permission association ──→ Permission (uri, verb, status)
//!        └─ ability checks normalize RoleRef / PermissionRef to ID lists
//! ```
//!
//! The associations themselves live in `warden-store`; this crate only
//! defines the entities and the normalization rules.
//!
//! ## Usage
//!
//! ```rust
//! use warden_rbac::{Permission, PermissionStatus, Role, RoleRef};
//!
//! let role = Role::new("editor").with_description("Can edit articles");
//! let perm = Permission::new("articles.edit", "/articles/1", "PUT");
//! assert_eq!(perm.status, PermissionStatus::Open);
//!
//! // Any accepted input shape normalizes to an ID list.
//! let ids = RoleRef::from(role).into_ids();
//! assert_eq!(ids.len(), 1);
//! ```
//!
//! ## Integration
//!
//! This crate is designed to work with:
//! - `warden-store`: association storage and cascade deletion
//! - `warden-guard`: the authorization evaluator and route checker

pub mod permission;
pub mod refs;
pub mod role;
pub mod user;

// Re-export main types for convenience
pub use permission::{Permission, PermissionStatus};
pub use refs::{PermissionRef, RoleRef};
pub use role::Role;
pub use user::User;
