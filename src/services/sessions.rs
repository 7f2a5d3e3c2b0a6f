use crate::core::{FinderSession, SessionError};
use moka::ops::compute::Op;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// In-memory store of finder sessions
///
/// Sessions expire after sitting idle for the configured timeout and the
/// store evicts the least recently used ones beyond `max_sessions`. Nothing
/// survives a restart.
pub struct SessionStore {
    sessions: moka::future::Cache<Uuid, FinderSession>,
    idle_timeout_secs: u64,
}

impl SessionStore {
    /// Create a new session store
    pub fn new(max_sessions: u64, idle_timeout_secs: u64) -> Self {
        let sessions = moka::future::CacheBuilder::new(max_sessions)
            .time_to_idle(Duration::from_secs(idle_timeout_secs))
            .build();

        Self {
            sessions,
            idle_timeout_secs,
        }
    }

    /// Start a fresh session in the `Selecting` phase
    pub async fn create(&self) -> FinderSession {
        let session = FinderSession::new();
        self.sessions.insert(session.id, session.clone()).await;
        tracing::debug!("Session created: {}", session.id);
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<FinderSession, SessionError> {
        self.sessions
            .get(&id)
            .await
            .ok_or(SessionError::NotFound(id))
    }

    /// Apply `apply` to a session and store the result
    ///
    /// Runs under the cache's per-key lock, so a concurrent removal or expiry
    /// is never undone. The session is left untouched when `apply` fails.
    pub async fn update<F, T>(&self, id: Uuid, apply: F) -> Result<(FinderSession, T), SessionError>
    where
        F: FnOnce(&mut FinderSession) -> Result<T, SessionError>,
    {
        let mut outcome = None;
        self.sessions
            .entry(id)
            .and_compute_with(|entry| {
                let op = match entry {
                    Some(entry) => {
                        let mut session = entry.into_value();
                        match apply(&mut session) {
                            Ok(output) => {
                                outcome = Some(Ok((session.clone(), output)));
                                Op::Put(session)
                            }
                            Err(err) => {
                                outcome = Some(Err(err));
                                Op::Nop
                            }
                        }
                    }
                    None => Op::Nop,
                };
                std::future::ready(op)
            })
            .await;

        let updated = outcome.unwrap_or(Err(SessionError::NotFound(id)))?;
        tracing::trace!("Session updated: {}", id);
        Ok(updated)
    }

    pub async fn remove(&self, id: Uuid) {
        self.sessions.invalidate(&id).await;
    }

    /// Get store statistics
    ///
    /// Pending cache maintenance runs first so the count reflects recent
    /// inserts, removals and expiries.
    pub async fn stats(&self) -> SessionStats {
        self.sessions.run_pending_tasks().await;
        SessionStats {
            active_sessions: self.sessions.entry_count(),
            idle_timeout_secs: self.idle_timeout_secs,
        }
    }
}

/// Session store statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    #[serde(rename = "activeSessions")]
    pub active_sessions: u64,
    #[serde(rename = "idleTimeoutSecs")]
    pub idle_timeout_secs: u64,
}
