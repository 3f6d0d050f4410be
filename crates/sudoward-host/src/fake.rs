//! In-memory host collaborators for tests.
//!
//! Simulates the account databases and the drop-in directory without
//! touching the host, and lets tests inject failures or park an artifact
//! write mid-flight.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use sudoward_core::error::AppError;
use sudoward_core::result::AppResult;
use sudoward_core::traits::{ArtifactWriter, SystemProbe};
use sudoward_core::types::{ArtifactRef, Principal};

const FAKE_SCHEME: &str = "fake://";

/// Fake account database.
#[derive(Debug, Default)]
pub struct FakeSystemProbe {
    /// Account name -> groups, primary first.
    users: Mutex<BTreeMap<String, Vec<String>>>,
    /// When set, every query fails.
    failing: AtomicBool,
}

impl FakeSystemProbe {
    /// Create an empty account database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`add_user`](Self::add_user).
    pub fn with_user(self, name: &str, groups: &[&str]) -> Self {
        self.add_user(name, groups);
        self
    }

    /// Add or replace an account.
    pub fn add_user(&self, name: &str, groups: &[&str]) {
        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        users.insert(
            name.to_string(),
            groups.iter().map(|g| g.to_string()).collect(),
        );
    }

    /// Make every query fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_failing(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::probe("Simulated account database failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SystemProbe for FakeSystemProbe {
    async fn exists(&self, principal: &Principal) -> AppResult<bool> {
        self.check_failing()?;
        let users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        Ok(users.contains_key(principal.as_str()))
    }

    async fn groups(&self, principal: &Principal) -> Vec<String> {
        if self.check_failing().is_err() {
            return Vec::new();
        }
        let users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        users.get(principal.as_str()).cloned().unwrap_or_default()
    }

    async fn list_principals(&self) -> AppResult<Vec<Principal>> {
        self.check_failing()?;
        let users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        users.keys().map(|name| Principal::parse(name)).collect()
    }
}

/// Fake drop-in directory.
#[derive(Debug, Default)]
pub struct FakeArtifactWriter {
    /// Principals whose artifact currently exists.
    present: Mutex<BTreeSet<String>>,
    /// Principals whose next creates fail.
    fail_create: Mutex<HashSet<String>>,
    /// Principals whose next removals fail.
    fail_remove: Mutex<HashSet<String>>,
    /// Gates that park `create` for a principal until released.
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    /// Principals currently parked at a gate.
    parked: Mutex<HashSet<String>>,
    /// Successful create calls.
    creates: AtomicUsize,
    /// Successful remove calls.
    removes: AtomicUsize,
}

impl FakeArtifactWriter {
    /// Create an empty drop-in directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the artifact for `name` exists.
    pub fn exists(&self, name: &str) -> bool {
        let present = self.present.lock().unwrap_or_else(|e| e.into_inner());
        present.contains(name)
    }

    /// Place an artifact directly, as a previous process would have left it.
    pub fn plant(&self, name: &str) {
        let mut present = self.present.lock().unwrap_or_else(|e| e.into_inner());
        present.insert(name.to_string());
    }

    /// Delete an artifact outside the writer, as an operator might.
    pub fn erase(&self, name: &str) {
        let mut present = self.present.lock().unwrap_or_else(|e| e.into_inner());
        present.remove(name);
    }

    /// Make `create` fail for `name` until cleared.
    pub fn fail_create_for(&self, name: &str) {
        let mut set = self.fail_create.lock().unwrap_or_else(|e| e.into_inner());
        set.insert(name.to_string());
    }

    /// Make `remove` fail for `name` until cleared.
    pub fn fail_remove_for(&self, name: &str) {
        let mut set = self.fail_remove.lock().unwrap_or_else(|e| e.into_inner());
        set.insert(name.to_string());
    }

    /// Clear every injected failure.
    pub fn clear_failures(&self) {
        self.fail_create
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        self.fail_remove
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Park the next `create` for `name` until [`release`](Self::release).
    pub fn hold(&self, name: &str) {
        let mut gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
        gates.insert(name.to_string(), Arc::new(Semaphore::new(0)));
    }

    /// Let a parked `create` for `name` continue.
    pub fn release(&self, name: &str) {
        let gate = self
            .gates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(name);
        if let Some(gate) = gate {
            gate.add_permits(1);
        }
    }

    /// Wait until a `create` for `name` is parked at its gate.
    pub async fn wait_parked(&self, name: &str) {
        loop {
            if self
                .parked
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .contains(name)
            {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    }

    /// Number of successful creates.
    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    /// Number of successful removals.
    pub fn remove_count(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    fn name_of(artifact: &ArtifactRef) -> &str {
        artifact
            .as_str()
            .strip_prefix(FAKE_SCHEME)
            .unwrap_or(artifact.as_str())
    }
}

#[async_trait]
impl ArtifactWriter for FakeArtifactWriter {
    fn artifact_ref(&self, principal: &Principal) -> ArtifactRef {
        ArtifactRef::new(format!("{FAKE_SCHEME}{principal}"))
    }

    async fn create(&self, principal: &Principal) -> AppResult<ArtifactRef> {
        let name = principal.as_str();
        let gate = self
            .gates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned();
        if let Some(gate) = gate {
            self.parked
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .insert(name.to_string());
            let _permit = gate
                .acquire()
                .await
                .map_err(|_| AppError::internal("Gate closed"))?;
            self.parked
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .remove(name);
        }

        if self
            .fail_create
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(name)
        {
            return Err(AppError::artifact_write(format!(
                "Simulated write failure for '{name}'"
            )));
        }

        self.plant(name);
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(self.artifact_ref(principal))
    }

    async fn remove(&self, artifact: &ArtifactRef) -> AppResult<()> {
        let name = Self::name_of(artifact);
        if self
            .fail_remove
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(name)
        {
            return Err(AppError::artifact_removal(format!(
                "Simulated removal failure for '{name}'"
            )));
        }

        self.present
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(name);
        self.removes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<ArtifactRef>> {
        let present = self.present.lock().unwrap_or_else(|e| e.into_inner());
        Ok(present
            .iter()
            .map(|name| ArtifactRef::new(format!("{FAKE_SCHEME}{name}")))
            .collect())
    }
}
