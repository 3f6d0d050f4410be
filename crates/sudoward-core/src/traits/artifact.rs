//! Host privilege artifacts.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{ArtifactRef, Principal};

/// Creates and removes the host-level object that actually grants rights.
///
/// Both mutating operations are all-or-nothing from the caller's view.
#[async_trait]
pub trait ArtifactWriter: Send + Sync + std::fmt::Debug + 'static {
    /// Deterministic reference for a principal's artifact.
    fn artifact_ref(&self, principal: &Principal) -> ArtifactRef;

    /// Create or replace the artifact for `principal`.
    async fn create(&self, principal: &Principal) -> AppResult<ArtifactRef>;

    /// Remove an artifact. Removing an absent artifact succeeds.
    async fn remove(&self, artifact: &ArtifactRef) -> AppResult<()>;

    /// Artifacts currently present on the host.
    async fn list(&self) -> AppResult<Vec<ArtifactRef>>;
}
