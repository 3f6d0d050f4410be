//! Host account database configuration.

use serde::{Deserialize, Serialize};

/// Where the host probe reads account information from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Path of the passwd database.
    #[serde(default = "default_passwd_path")]
    pub passwd_path: String,
    /// Path of the group database.
    #[serde(default = "default_group_path")]
    pub group_path: String,
    /// Home directory prefixes that mark an account as interactive.
    #[serde(default = "default_home_prefixes")]
    pub home_prefixes: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            passwd_path: default_passwd_path(),
            group_path: default_group_path(),
            home_prefixes: default_home_prefixes(),
        }
    }
}

fn default_passwd_path() -> String {
    "/etc/passwd".to_string()
}

fn default_group_path() -> String {
    "/etc/group".to_string()
}

fn default_home_prefixes() -> Vec<String> {
    vec!["/home".to_string(), "/Users".to_string()]
}
