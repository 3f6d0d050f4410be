//! CLI command definitions and dispatch.

pub mod artifacts;
pub mod audit;
pub mod config;
pub mod principals;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use sudoward_core::config::AppConfig;
use sudoward_core::error::AppError;

/// Sudoward: time-bounded superuser grants
#[derive(Debug, Parser)]
#[command(name = "sudoward", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "SUDOWARD_CONFIG", default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the Sudoward server
    Serve(serve::ServeArgs),
    /// Audit log
    Audit(audit::AuditArgs),
    /// Host accounts
    Principals(principals::PrincipalsArgs),
    /// Sudoers drop-ins on this host
    Artifacts(artifacts::ArtifactsArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Commands {
    /// Whether the command initializes logging from `[logging]` itself.
    pub fn logs_from_config(&self) -> bool {
        matches!(self, Commands::Serve(_))
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Audit(args) => audit::execute(args, &self.config, self.format).await,
            Commands::Principals(args) => {
                principals::execute(args, &self.config, self.format).await
            }
            Commands::Artifacts(args) => {
                artifacts::execute(args, &self.config, self.format).await
            }
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file, the `SUDOWARD_ENV` overlay and
/// the environment
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("SUDOWARD_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(config_path, &env)
}
