//! Expiry sweeper configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Background expiry sweeper configuration.
///
/// The sweeper always runs with the server; there is no switch to turn it off.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweeperConfig {
    /// Seconds between two sweeps.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
}

impl SweeperConfig {
    /// The sweep interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval(),
        }
    }
}

fn default_interval() -> u64 {
    60
}
