//! Account type definitions

use serde::{Deserialize, Serialize};

/// Scope token granting access to every platform
pub const ALL_PLATFORMS: &str = "all";

/// A stored portal account
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String, // SHA-256 hex, unsalted
    pub role: Role,
    pub authorized_platforms: Vec<String>,
    pub created_at: String,
    #[serde(default)]
    pub last_login: Option<String>,
}

/// Account roles. Stored as `"admin"` / `"user"`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "admin")]
    Administrator,
    #[serde(rename = "user")]
    Standard,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Administrator => write!(f, "admin"),
            Role::Standard => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = crate::error::PortalError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" | "administrator" => Ok(Role::Administrator),
            "user" | "standard" => Ok(Role::Standard),
            _ => Err(crate::error::PortalError::InvalidRole(s.to_string())),
        }
    }
}

impl Account {
    /// Check if account has the administrator role
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Administrator)
    }

    pub fn has_unrestricted_scope(&self) -> bool {
        self.authorized_platforms.iter().any(|p| p == ALL_PLATFORMS)
    }

    /// Whether the scope list names `platform_id` or the `"all"` sentinel.
    /// Nothing in the directory enforces this.
    pub fn is_authorized_for(&self, platform_id: &str) -> bool {
        self.has_unrestricted_scope() || self.authorized_platforms.iter().any(|p| p == platform_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(scopes: &[&str]) -> Account {
        Account {
            id: "USR20240101000000".to_string(),
            name: "Ana Souza".to_string(),
            email: "ana@x.com".to_string(),
            password_hash: "00".repeat(32),
            role: Role::Standard,
            authorized_platforms: scopes.iter().map(|s| s.to_string()).collect(),
            created_at: "2024-01-01 00:00:00".to_string(),
            last_login: None,
        }
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(serde_json::to_string(&Role::Administrator).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::Standard).unwrap(), "\"user\"");

        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Administrator);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Administrator);
        assert_eq!("standard".parse::<Role>().unwrap(), Role::Standard);
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::Standard.to_string(), "user");
    }

    #[test]
    fn test_scope_checks() {
        let all = account(&["all"]);
        assert!(all.has_unrestricted_scope());
        assert!(all.is_authorized_for("finance"));

        let limited = account(&["sales", "hr"]);
        assert!(!limited.has_unrestricted_scope());
        assert!(limited.is_authorized_for("hr"));
        assert!(!limited.is_authorized_for("finance"));
        assert!(!limited.is_admin());
    }

    #[test]
    fn test_missing_last_login_defaults_to_none() {
        let json = r#"{
            "id": "USR1", "name": "n", "email": "e", "password_hash": "h",
            "role": "user", "authorized_platforms": [], "created_at": "t"
        }"#;
        let parsed: Account = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.last_login, None);
    }
}
