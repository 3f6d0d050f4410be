//! Privilege grant configuration.

use serde::{Deserialize, Serialize};

/// Settings for the sudoers drop-in artifacts written on grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantConfig {
    /// Directory that receives one drop-in file per granted principal.
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: String,
    /// File name prefix for drop-in files.
    #[serde(default = "default_artifact_prefix")]
    pub artifact_prefix: String,
    /// Upper bound on a single grant in hours. `None` means unbounded.
    #[serde(default)]
    pub max_duration_hours: Option<i64>,
    /// Path to `visudo`. When set, every drop-in is syntax-checked
    /// before it is moved into place.
    #[serde(default)]
    pub visudo_path: Option<String>,
}

impl Default for GrantConfig {
    fn default() -> Self {
        Self {
            artifact_dir: default_artifact_dir(),
            artifact_prefix: default_artifact_prefix(),
            max_duration_hours: None,
            visudo_path: None,
        }
    }
}

fn default_artifact_dir() -> String {
    "/etc/sudoers.d".to_string()
}

fn default_artifact_prefix() -> String {
    "temp_sudo_".to_string()
}
