//! Host account CLI commands.

use clap::{Args, Subcommand};
use futures::future::join_all;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use sudoward_core::error::AppError;
use sudoward_core::traits::SystemProbe;
use sudoward_host::PasswdProbe;

/// Arguments for principal commands
#[derive(Debug, Args)]
pub struct PrincipalsArgs {
    /// Principals subcommand
    #[command(subcommand)]
    pub command: PrincipalsCommand,
}

/// Principals subcommands
#[derive(Debug, Subcommand)]
pub enum PrincipalsCommand {
    /// List interactive accounts and their groups
    List,
}

/// Principal display row
#[derive(Debug, Serialize, Tabled)]
struct PrincipalRow {
    principal: String,
    groups: String,
}

/// Execute principal commands
pub async fn execute(
    args: &PrincipalsArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let probe = PasswdProbe::new(&config.host);

    match &args.command {
        PrincipalsCommand::List => {
            let principals = probe.list_principals().await?;
            let rows: Vec<PrincipalRow> = join_all(principals.into_iter().map(|principal| {
                let probe = &probe;
                async move {
                    let groups = probe.groups(&principal).await;
                    PrincipalRow {
                        principal: principal.into(),
                        groups: groups.join(", "),
                    }
                }
            }))
            .await;

            output::print_list(&rows, format);
        }
    }

    Ok(())
}
