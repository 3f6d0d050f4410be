//! In-memory store of active grant sessions.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use sudoward_core::types::{Principal, Session};

/// Authoritative mapping of principal to active [`Session`].
///
/// Individual operations are atomic. Sequences that check state and then
/// act on the host must hold the principal's [`lock`](Self::lock) for the
/// whole sequence. Nothing here survives a restart.
#[derive(Debug, Default)]
pub struct PrivilegeStore {
    /// Active sessions.
    sessions: DashMap<Principal, Session>,
    /// Per-principal mutation locks.
    locks: DashMap<Principal, Arc<Mutex<()>>>,
}

impl PrivilegeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the mutation lock for one principal.
    ///
    /// Locks are independent per principal; holding one never blocks
    /// another principal's operations. The registry entry is dropped once
    /// the last holder or waiter releases it.
    pub async fn lock(&self, principal: &Principal) -> PrincipalGuard<'_> {
        let mutex = self
            .locks
            .entry(principal.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = mutex.lock_owned().await;
        PrincipalGuard {
            locks: &self.locks,
            principal: principal.clone(),
            guard: Some(guard),
        }
    }

    /// Number of principals with a registered mutation lock.
    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }

    /// Insert or replace the session for `session.principal`.
    ///
    /// Returns the session it replaced, if any.
    pub fn put(&self, session: Session) -> Option<Session> {
        self.sessions.insert(session.principal.clone(), session)
    }

    /// Current session for a principal.
    pub fn get(&self, principal: &Principal) -> Option<Session> {
        self.sessions.get(principal).map(|s| s.value().clone())
    }

    /// Remove and return the session for a principal.
    pub fn remove(&self, principal: &Principal) -> Option<Session> {
        self.sessions.remove(principal).map(|(_, s)| s)
    }

    /// Snapshot of all sessions, ordered by principal.
    pub fn list(&self) -> Vec<(Principal, Session)> {
        let mut sessions: Vec<(Principal, Session)> = self
            .sessions
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        sessions.sort_by(|a, b| a.0.cmp(&b.0));
        sessions
    }

    /// Number of active sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is active.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Held mutation lock for one principal. See [`PrivilegeStore::lock`].
#[derive(Debug)]
pub struct PrincipalGuard<'a> {
    locks: &'a DashMap<Principal, Arc<Mutex<()>>>,
    principal: Principal,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for PrincipalGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the registry holds the mutex now: nobody is waiting on it,
        // and the shard lock keeps anyone from cloning it meanwhile.
        self.locks
            .remove_if(&self.principal, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
