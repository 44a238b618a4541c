//! Store configuration
//!
//! The persistence names warden does not own (the user table and the two
//! join tables live in the host application's schema) are supplied here,
//! resolved once by the composing application and passed to the store at
//! construction. There are no ambient configuration lookups.

use serde::{Deserialize, Serialize};

/// Externally supplied persistence names for a store backend.
///
/// The in-memory backend only surfaces these in diagnostics; SQL-backed
/// implementations address their tables through them.
///
/// # Examples
///
/// ```
/// use warden_store::StoreConfig;
///
/// let config = StoreConfig {
///     users_table: "accounts".to_string(),
///     ..StoreConfig::default()
/// };
/// assert_eq!(config.user_role_table, "user_role");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name of the host application's user table
    pub users_table: String,

    /// Name of the role table
    pub roles_table: String,

    /// Name of the permission table
    pub permissions_table: String,

    /// Name of the user-role join table
    pub user_role_table: String,

    /// Name of the role-permission join table
    pub role_permission_table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            users_table: "users".to_string(),
            roles_table: "roles".to_string(),
            permissions_table: "permissions".to_string(),
            user_role_table: "user_role".to_string(),
            role_permission_table: "role_permission".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_names() {
        let config = StoreConfig::default();
        assert_eq!(config.users_table, "users");
        assert_eq!(config.user_role_table, "user_role");
        assert_eq!(config.role_permission_table, "role_permission");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"users_table": "accounts"}"#).unwrap();
        assert_eq!(config.users_table, "accounts");
        assert_eq!(config.roles_table, "roles");
    }
}
