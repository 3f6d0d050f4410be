//! Sudoers drop-in artifacts.
//!
//! Each grant is one file in the drop-in directory holding a single rule
//! line. Files are written under a hidden temporary name and renamed into
//! place, so sudo never parses a half-written rule.

use std::fs::Permissions;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use sudoward_core::config::GrantConfig;
use sudoward_core::error::{AppError, ErrorKind};
use sudoward_core::result::AppResult;
use sudoward_core::traits::ArtifactWriter;
use sudoward_core::types::{ArtifactRef, Principal};

/// Owner and group read-only, as sudo requires.
pub const ARTIFACT_MODE: u32 = 0o440;

/// The rule granting `principal` unrestricted rights without a password prompt.
pub fn rule_line(principal: &Principal) -> String {
    format!("{principal} ALL=(ALL) NOPASSWD:ALL\n")
}

/// Writes one sudoers drop-in per principal.
#[derive(Debug, Clone)]
pub struct SudoersArtifactWriter {
    /// Drop-in directory.
    dir: PathBuf,
    /// File name prefix marking files owned by this service.
    prefix: String,
    /// Optional `visudo` used to syntax-check files before install.
    visudo: Option<PathBuf>,
}

impl SudoersArtifactWriter {
    /// Create a writer from configuration.
    pub fn new(config: &GrantConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.artifact_dir),
            prefix: config.artifact_prefix.clone(),
            visudo: config.visudo_path.as_ref().map(PathBuf::from),
        }
    }

    /// Drop-in file name for a principal.
    ///
    /// sudo ignores drop-ins containing `.`, so dots are percent-encoded.
    /// `%` is outside the principal alphabet, which keeps the mapping injective.
    fn file_name(&self, principal: &Principal) -> String {
        format!("{}{}", self.prefix, principal.as_str().replace('.', "%2E"))
    }

    fn temp_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(format!(".{file_name}.tmp"))
    }

    async fn write_temp(&self, tmp: &Path, principal: &Principal) -> std::io::Result<()> {
        match fs::remove_file(tmp).await {
            Ok(()) => debug!(path = %tmp.display(), "Removed stale temporary drop-in"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(ARTIFACT_MODE)
            .open(tmp)
            .await?;
        file.write_all(rule_line(principal).as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        // umask may have narrowed the creation mode
        fs::set_permissions(tmp, Permissions::from_mode(ARTIFACT_MODE)).await
    }

    async fn check_syntax(&self, tmp: &Path) -> AppResult<()> {
        let Some(visudo) = &self.visudo else {
            return Ok(());
        };

        let output = Command::new(visudo)
            .arg("-cf")
            .arg(tmp)
            .output()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ArtifactWrite,
                    format!("Failed to run {}", visudo.display()),
                    e,
                )
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(AppError::artifact_write(format!(
                "visudo rejected drop-in: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }

    async fn discard_temp(tmp: &Path) {
        if let Err(e) = fs::remove_file(tmp).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %tmp.display(), error = %e, "Failed to remove temporary drop-in");
            }
        }
    }
}

#[async_trait]
impl ArtifactWriter for SudoersArtifactWriter {
    fn artifact_ref(&self, principal: &Principal) -> ArtifactRef {
        ArtifactRef::new(
            self.dir
                .join(self.file_name(principal))
                .to_string_lossy()
                .into_owned(),
        )
    }

    async fn create(&self, principal: &Principal) -> AppResult<ArtifactRef> {
        let file_name = self.file_name(principal);
        let target = self.dir.join(&file_name);
        let tmp = self.temp_path(&file_name);

        if let Err(e) = self.write_temp(&tmp, principal).await {
            Self::discard_temp(&tmp).await;
            return Err(AppError::with_source(
                ErrorKind::ArtifactWrite,
                format!("Failed to write sudoers drop-in for '{principal}'"),
                e,
            ));
        }

        if let Err(e) = self.check_syntax(&tmp).await {
            Self::discard_temp(&tmp).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&tmp, &target).await {
            Self::discard_temp(&tmp).await;
            return Err(AppError::with_source(
                ErrorKind::ArtifactWrite,
                format!("Failed to install sudoers drop-in {}", target.display()),
                e,
            ));
        }

        info!(principal = %principal, path = %target.display(), "Sudoers drop-in installed");
        Ok(ArtifactRef::new(target.to_string_lossy().into_owned()))
    }

    async fn remove(&self, artifact: &ArtifactRef) -> AppResult<()> {
        let path = artifact.as_path();
        if path.parent() != Some(self.dir.as_path()) {
            return Err(AppError::artifact_removal(format!(
                "Refusing to remove {} outside {}",
                path.display(),
                self.dir.display()
            )));
        }

        match fs::remove_file(path).await {
            Ok(()) => {
                info!(path = %path.display(), "Sudoers drop-in removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Sudoers drop-in already absent");
                Ok(())
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::ArtifactRemoval,
                format!("Failed to remove sudoers drop-in {}", path.display()),
                e,
            )),
        }
    }

    async fn list(&self) -> AppResult<Vec<ArtifactRef>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to list {}", self.dir.display()),
                    e,
                ));
            }
        };

        let mut artifacts = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(&self.prefix) {
                artifacts.push(ArtifactRef::new(entry.path().to_string_lossy().into_owned()));
            }
        }
        artifacts.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(artifacts)
    }
}
