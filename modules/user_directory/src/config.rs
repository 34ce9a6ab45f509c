use serde::{Deserialize, Serialize};

use crate::contract::model::UserStatus;

/// Configuration for the user_directory module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Role a freshly opened create form starts with.
    #[serde(default = "default_role")]
    pub default_role: String,
    #[serde(default)]
    pub default_status: UserStatus,
    /// Login stamp stored on users created through the directory.
    #[serde(default = "default_never_logged_in")]
    pub never_logged_in: String,
    /// Roles offered by the console; `default_role` must be one of them.
    /// Saving never consults this list. Empty means unrestricted.
    #[serde(default = "default_allowed_roles")]
    pub allowed_roles: Vec<String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            default_role: default_role(),
            default_status: UserStatus::default(),
            never_logged_in: default_never_logged_in(),
            allowed_roles: default_allowed_roles(),
        }
    }
}

impl DirectoryConfig {
    pub fn role_allowed(&self, role: &str) -> bool {
        self.allowed_roles.is_empty() || self.allowed_roles.iter().any(|r| r == role)
    }
}

fn default_role() -> String {
    "user".to_string()
}

fn default_never_logged_in() -> String {
    "Never".to_string()
}

fn default_allowed_roles() -> Vec<String> {
    ["admin", "manager", "user"]
        .into_iter()
        .map(String::from)
        .collect()
}
