//! Newline-delimited JSON audit log on disk.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

use sudoward_core::config::AuditConfig;
use sudoward_core::error::{AppError, ErrorKind};
use sudoward_core::result::AppResult;
use sudoward_core::traits::AuditSink;
use sudoward_core::types::AuditEntry;

/// Audit log stored as one JSON object per line.
///
/// Appends are serialized through an in-process lock so concurrent writers
/// never interleave partial lines.
#[derive(Debug)]
pub struct JsonlAuditLog {
    /// Log file location.
    path: PathBuf,
    /// Serializes appends and reads.
    io_lock: Mutex<()>,
}

impl JsonlAuditLog {
    /// Create a log writing to `config.path`.
    pub fn new(config: &AuditConfig) -> Self {
        Self::at(&config.path)
    }

    /// Create a log writing to an explicit path.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            io_lock: Mutex::new(()),
        }
    }

    /// Log file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The last `limit` entries that satisfy `keep`, oldest first.
    ///
    /// The filter runs before the tail is taken, so a narrow filter still
    /// yields up to `limit` entries.
    pub async fn recent_matching<F>(&self, limit: usize, keep: F) -> AppResult<Vec<AuditEntry>>
    where
        F: Fn(&AuditEntry) -> bool + Send,
    {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let content = {
            let _guard = self.io_lock.lock().await;
            match fs::read_to_string(&self.path).await {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
                Err(e) => {
                    return Err(AppError::with_source(
                        ErrorKind::AuditRead,
                        format!("Failed to read audit log {}", self.path.display()),
                        e,
                    ));
                }
            }
        };

        let mut tail: VecDeque<AuditEntry> = VecDeque::with_capacity(limit.min(1024));
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditEntry>(line) {
                Ok(entry) if !keep(&entry) => {}
                Ok(entry) => {
                    if tail.len() == limit {
                        tail.pop_front();
                    }
                    tail.push_back(entry);
                }
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        line = index + 1,
                        error = %e,
                        "Skipping malformed audit line"
                    );
                }
            }
        }

        Ok(tail.into())
    }

    async fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}

#[async_trait]
impl AuditSink for JsonlAuditLog {
    async fn append(&self, entry: &AuditEntry) -> AppResult<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let _guard = self.io_lock.lock().await;
        self.write_line(&line).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::AuditWrite,
                format!("Failed to append to audit log {}", self.path.display()),
                e,
            )
        })
    }

    async fn recent(&self, limit: usize) -> AppResult<Vec<AuditEntry>> {
        self.recent_matching(limit, |_| true).await
    }
}
