//! Permission domain model
//!
//! A permission grants access to one route, identified by its URI and HTTP
//! verb. Every permission carries a status: an open permission serves the
//! route normally, a closing permission masks it as not-found when matched
//! by the route checker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Administrative status of a permission.
///
/// The status gates how a matched route permission behaves:
///
/// - **Open**: the route is served normally.
/// - **Closing**: the route is administratively deactivated; a match is
///   reported as resource-not-found rather than forbidden, so callers
///   cannot distinguish a closed endpoint from a nonexistent one.
///
/// # Examples
///
/// ```
/// use warden_rbac::PermissionStatus;
///
/// assert_eq!(PermissionStatus::parse("open"), Some(PermissionStatus::Open));
/// assert_eq!(PermissionStatus::Closing.as_str(), "closing");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    /// Serve the route normally
    #[default]
    Open,

    /// Mask the route as not-found when matched
    Closing,
}

impl PermissionStatus {
    /// Parse status from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(PermissionStatus)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use warden_rbac::PermissionStatus;
    ///
    /// assert_eq!(PermissionStatus::parse("CLOSING"), Some(PermissionStatus::Closing));
    /// assert_eq!(PermissionStatus::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closing" => Some(Self::Closing),
            _ => None,
        }
    }

    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closing => "closing",
        }
    }
}

/// An access grant for a specific `(uri, verb)` route.
///
/// The permission ID is the canonical key used in all set comparisons by
/// the evaluator. The `(uri, verb)` pair is not required to be unique
/// across permissions; the route checker resolves collisions by taking the
/// first match in traversal order.
///
/// # Examples
///
/// ```
/// use warden_rbac::{Permission, PermissionStatus};
///
/// let perm = Permission::new("articles.list", "/articles", "GET");
/// assert_eq!(perm.status, PermissionStatus::Open);
/// assert!(perm.matches("/articles", "GET"));
/// assert!(!perm.matches("/articles", "get"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    /// Unique permission ID
    pub id: Uuid,

    /// Permission name (e.g. "articles.list")
    pub name: String,

    /// Route URI this permission grants, matched verbatim
    pub uri: String,

    /// HTTP verb this permission grants, matched verbatim
    pub verb: String,

    /// Open/closing status gate
    pub status: PermissionStatus,

    /// When the permission was created
    pub created_at: DateTime<Utc>,
}

impl Permission {
    /// Creates a new open permission with a generated UUID v7 ID.
    ///
    /// # Arguments
    ///
    /// * `name` - The permission name
    /// * `uri` - The route URI
    /// * `verb` - The HTTP verb
    ///
    /// # Examples
    ///
    /// ```
    /// use warden_rbac::Permission;
    ///
    /// let perm = Permission::new("articles.create", "/articles", "POST");
    /// assert_eq!(perm.verb, "POST");
    /// ```
    pub fn new(name: impl Into<String>, uri: impl Into<String>, verb: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            uri: uri.into(),
            verb: verb.into(),
            status: PermissionStatus::Open,
            created_at: Utc::now(),
        }
    }

    /// Set the status for this permission.
    ///
    /// # Arguments
    ///
    /// * `status` - The status gate to apply
    pub fn with_status(mut self, status: PermissionStatus) -> Self {
        self.status = status;
        self
    }

    /// Check whether this permission grants the given route.
    ///
    /// Matching is exact, case-sensitive string equality on both URI and
    /// verb. No pattern matching, no wildcards, no path parameters.
    ///
    /// # Arguments
    ///
    /// * `uri` - The requested URI
    /// * `verb` - The requested HTTP verb
    pub fn matches(&self, uri: &str, verb: &str) -> bool {
        self.uri == uri && self.verb == verb
    }

    /// Check if this permission is administratively closed.
    pub fn is_closing(&self) -> bool {
        self.status == PermissionStatus::Closing
    }
}
