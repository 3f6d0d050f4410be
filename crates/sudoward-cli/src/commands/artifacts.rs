//! Sudoers drop-in CLI commands.
//!
//! The server does not persist sessions, so after a restart any drop-in
//! left behind keeps granting rights. These commands let an operator find
//! and remove them.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use sudoward_core::error::AppError;
use sudoward_core::traits::ArtifactWriter;
use sudoward_core::types::Principal;
use sudoward_host::SudoersArtifactWriter;

/// Arguments for artifact commands
#[derive(Debug, Args)]
pub struct ArtifactsArgs {
    /// Artifacts subcommand
    #[command(subcommand)]
    pub command: ArtifactsCommand,
}

/// Artifacts subcommands
#[derive(Debug, Subcommand)]
pub enum ArtifactsCommand {
    /// List drop-ins managed by Sudoward
    List,
    /// Remove the drop-in for one principal
    Remove {
        /// Account whose drop-in to remove
        principal: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Artifact display row
#[derive(Debug, Serialize, Tabled)]
struct ArtifactRow {
    path: String,
}

/// Execute artifact commands
pub async fn execute(
    args: &ArtifactsArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let writer = SudoersArtifactWriter::new(&config.grant);

    match &args.command {
        ArtifactsCommand::List => {
            let rows: Vec<ArtifactRow> = writer
                .list()
                .await?
                .into_iter()
                .map(|artifact| ArtifactRow {
                    path: artifact.to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        ArtifactsCommand::Remove { principal, force } => {
            let principal = Principal::parse(principal)?;
            let artifact = writer.artifact_ref(&principal);

            if !artifact.as_path().exists() {
                output::print_warning(&format!("No drop-in for '{}' at {}", principal, artifact));
                return Ok(());
            }

            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Remove {} and revoke sudo for '{}'?", artifact, principal))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            writer.remove(&artifact).await?;
            output::print_success(&format!("Removed {}", artifact));
            output::print_warning(
                "A running server still lists the session until it expires or is revoked",
            );
        }
    }

    Ok(())
}
