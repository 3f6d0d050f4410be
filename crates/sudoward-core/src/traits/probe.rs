//! Host account queries.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::Principal;

/// Read-only view of the host's account databases.
#[async_trait]
pub trait SystemProbe: Send + Sync + std::fmt::Debug + 'static {
    /// Whether the principal exists on the host.
    ///
    /// Returns `Ok(false)` for an absent principal and an error of kind
    /// `Probe` only when the query itself failed.
    async fn exists(&self, principal: &Principal) -> AppResult<bool>;

    /// Group names of the principal, primary group first.
    ///
    /// Best-effort: returns an empty list when the lookup fails.
    async fn groups(&self, principal: &Principal) -> Vec<String>;

    /// Interactive accounts on the host.
    async fn list_principals(&self) -> AppResult<Vec<Principal>>;
}
