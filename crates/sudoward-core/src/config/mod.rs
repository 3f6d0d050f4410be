//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a default so the service can start
//! without any file present.

pub mod app;
pub mod audit;
pub mod grant;
pub mod host;
pub mod logging;
pub mod sweeper;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::audit::AuditConfig;
pub use self::grant::GrantConfig;
pub use self::host::HostConfig;
pub use self::logging::LoggingConfig;
pub use self::sweeper::SweeperConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// (base file + environment overlay + `SUDOWARD__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Artifact settings for grants.
    #[serde(default)]
    pub grant: GrantConfig,
    /// Audit log settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Expiry sweeper settings.
    #[serde(default)]
    pub sweeper: SweeperConfig,
    /// Host account database settings.
    #[serde(default)]
    pub host: HostConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges the base file at `config_path`, an optional `config/{env}`
    /// overlay, and environment variables such as
    /// `SUDOWARD__SWEEPER__INTERVAL_SECONDS`. Missing files are skipped.
    pub fn load(config_path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SUDOWARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.sweeper.interval_seconds == 0 {
            return Err(AppError::configuration(
                "sweeper.interval_seconds must be greater than zero",
            ));
        }
        if self.audit.tail_limit == 0 {
            return Err(AppError::configuration(
                "audit.tail_limit must be greater than zero",
            ));
        }
        if self.grant.artifact_dir.trim().is_empty() {
            return Err(AppError::configuration("grant.artifact_dir must not be empty"));
        }
        let prefix = &self.grant.artifact_prefix;
        if prefix.is_empty() || prefix.contains('.') || prefix.contains('/') {
            // sudo skips drop-in files whose names contain a dot
            return Err(AppError::configuration(format!(
                "grant.artifact_prefix '{prefix}' must be non-empty and contain no '.' or '/'"
            )));
        }
        if let Some(max) = self.grant.max_duration_hours {
            if max <= 0 {
                return Err(AppError::configuration(
                    "grant.max_duration_hours must be positive when set",
                ));
            }
        }
        Ok(())
    }
}
