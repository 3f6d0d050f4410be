//! Detection of artifacts with no tracked session.
//!
//! Sessions do not survive a restart, so any artifact left on the host by a
//! previous process keeps granting rights that nothing will revoke. These are
//! reported for an operator to clean up, never removed silently.

use std::collections::HashSet;

use tracing::warn;

use sudoward_core::result::AppResult;
use sudoward_core::traits::ArtifactWriter;
use sudoward_core::types::ArtifactRef;

use crate::store::PrivilegeStore;

/// Artifacts on the host that no session in `store` refers to.
///
/// Each one is logged at `warn` level.
pub async fn find_orphans(
    artifacts: &dyn ArtifactWriter,
    store: &PrivilegeStore,
) -> AppResult<Vec<ArtifactRef>> {
    let tracked: HashSet<ArtifactRef> = store
        .list()
        .into_iter()
        .map(|(_, session)| session.artifact_ref)
        .collect();

    let orphans: Vec<ArtifactRef> = artifacts
        .list()
        .await?
        .into_iter()
        .filter(|artifact| !tracked.contains(artifact))
        .collect();

    for artifact in &orphans {
        warn!(
            artifact = %artifact,
            "Sudo artifact has no tracked session; remove it with `sudoward artifacts remove`"
        );
    }

    Ok(orphans)
}
