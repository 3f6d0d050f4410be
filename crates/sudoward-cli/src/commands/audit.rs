//! Audit log CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use sudoward_audit::JsonlAuditLog;
use sudoward_core::error::AppError;
use sudoward_core::types::AuditEntry;

/// Arguments for audit commands
#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Audit subcommand
    #[command(subcommand)]
    pub command: AuditCommand,
}

/// Audit subcommands
#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// Show the most recent entries, oldest first
    Tail {
        /// Number of entries; defaults to `audit.tail_limit`
        #[arg(short, long)]
        limit: Option<usize>,
        /// Only entries for this principal; `--limit` counts matching entries
        #[arg(short, long)]
        principal: Option<String>,
    },
}

/// Audit display row
#[derive(Debug, Serialize, Tabled)]
struct AuditRow {
    time: String,
    principal: String,
    action: String,
    actor: String,
    details: String,
}

impl From<AuditEntry> for AuditRow {
    fn from(entry: AuditEntry) -> Self {
        Self {
            time: entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            principal: entry.principal,
            action: entry.action.to_string(),
            actor: entry.actor,
            details: entry.details,
        }
    }
}

/// Execute audit commands
pub async fn execute(
    args: &AuditArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let log = JsonlAuditLog::new(&config.audit);

    match &args.command {
        AuditCommand::Tail { limit, principal } => {
            let limit = limit.unwrap_or(config.audit.tail_limit);
            let entries: Vec<AuditEntry> = log
                .recent_matching(limit, |e| {
                    principal.as_ref().is_none_or(|p| &e.principal == p)
                })
                .await?;

            match format {
                OutputFormat::Json => output::print_item(&entries, format),
                OutputFormat::Table => {
                    let rows: Vec<AuditRow> = entries.into_iter().map(AuditRow::from).collect();
                    output::print_list(&rows, format);
                }
            }
        }
    }

    Ok(())
}
