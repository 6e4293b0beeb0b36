//! Per-client consultation state and the in-memory keyed store behind it.
//!
//! The store is the session persistence collaborator: get/put semantics plus
//! time-based eviction. There is no per-session locking beyond the map's own
//! `RwLock`; two concurrent requests for the same session id race
//! read-modify-write, the last write wins and the history cap is reapplied.

mod messages;

pub use messages::{Message, Role};

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::persona::DoctorId;

/// Hard cap on retained history entries per session. Oldest entries are
/// truncated first (FIFO, not LRU).
pub const HISTORY_CAP: usize = 50;

/// How often the idle-session sweeper wakes up.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub active_doctor: DoctorId,
    pub history: Vec<Message>,
    pub consultation_start: DateTime<Utc>,
}

impl Session {
    fn new(id: String) -> Self {
        Self {
            id,
            active_doctor: DoctorId::default(),
            history: Vec::new(),
            consultation_start: Utc::now(),
        }
    }
}

struct SessionEntry {
    session: Session,
    last_seen: Instant,
}

impl SessionEntry {
    fn fresh(id: &str) -> Self {
        Self {
            session: Session::new(id.to_string()),
            last_seen: Instant::now(),
        }
    }
}

/// In-memory session map. Cheap to clone; clones share the map.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionEntry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a new random session id (UUID v4).
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Creates a fresh session and returns its id.
    pub async fn create(&self) -> String {
        let id = Self::generate_id();
        let mut map = self.inner.write().await;
        map.insert(id.clone(), SessionEntry::fresh(&id));
        id
    }

    /// Returns a snapshot of the session, creating it with defaults if absent.
    pub async fn get_or_create(&self, id: &str) -> Session {
        let mut map = self.inner.write().await;
        let entry = map
            .entry(id.to_string())
            .or_insert_with(|| SessionEntry::fresh(id));
        entry.last_seen = Instant::now();
        entry.session.clone()
    }

    /// Applies `f` to the session (creating it first if needed) and
    /// re-enforces the history cap afterwards.
    pub async fn mutate<F>(&self, id: &str, f: F)
    where
        F: FnOnce(&mut Session),
    {
        let mut map = self.inner.write().await;
        let entry = map
            .entry(id.to_string())
            .or_insert_with(|| SessionEntry::fresh(id));
        f(&mut entry.session);
        let len = entry.session.history.len();
        if len > HISTORY_CAP {
            entry.session.history.drain(..len - HISTORY_CAP);
        }
        entry.last_seen = Instant::now();
    }

    /// Drops the session and starts a new one under a regenerated id. Used by
    /// "clear chat": a fresh consultation under the same transport binding.
    pub async fn reset(&self, id: &str) -> String {
        let new_id = Self::generate_id();
        let mut map = self.inner.write().await;
        map.remove(id);
        map.insert(new_id.clone(), SessionEntry::fresh(&new_id));
        new_id
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Evicts sessions idle longer than `ttl`; returns how many were dropped.
    pub async fn sweep(&self, ttl: Duration) -> usize {
        let mut map = self.inner.write().await;
        let before = map.len();
        map.retain(|_, entry| entry.last_seen.elapsed() < ttl);
        before - map.len()
    }
}

/// Background eviction task, spawned once at startup.
pub fn spawn_ttl_sweeper(store: SessionStore, ttl: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            tick.tick().await;
            let evicted = store.sweep(ttl).await;
            if evicted > 0 {
                tracing::debug!("evicted {} idle sessions", evicted);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_or_create_starts_with_defaults() {
        let store = SessionStore::new();
        let session = store.get_or_create("s1").await;

        assert_eq!(session.active_doctor, DoctorId::General);
        assert!(session.history.is_empty());
    }

    #[tokio::test]
    async fn mutate_enforces_the_history_cap() {
        let store = SessionStore::new();
        store
            .mutate("s1", |session| {
                for i in 0..HISTORY_CAP + 7 {
                    session.history.push(Message::patient(format!("turn {}", i)));
                }
            })
            .await;

        let session = store.get_or_create("s1").await;
        assert_eq!(session.history.len(), HISTORY_CAP);
        // Oldest entries go first.
        assert_eq!(session.history[0].body, "turn 7");
        assert_eq!(
            session.history[HISTORY_CAP - 1].body,
            format!("turn {}", HISTORY_CAP + 6)
        );
    }

    #[tokio::test]
    async fn reset_regenerates_the_id_and_discards_state() {
        let store = SessionStore::new();
        store
            .mutate("s1", |session| {
                session.active_doctor = DoctorId::Cardiologist;
                session.history.push(Message::patient("hello"));
            })
            .await;

        let new_id = store.reset("s1").await;
        assert_ne!(new_id, "s1");
        assert_eq!(store.len().await, 1);

        let session = store.get_or_create(&new_id).await;
        assert_eq!(session.active_doctor, DoctorId::General);
        assert!(session.history.is_empty());
    }

    #[tokio::test]
    async fn sweep_evicts_idle_sessions() {
        let store = SessionStore::new();
        store.get_or_create("s1").await;
        store.get_or_create("s2").await;

        assert_eq!(store.sweep(Duration::from_secs(3600)).await, 0);
        assert_eq!(store.sweep(Duration::ZERO).await, 2);
        assert_eq!(store.len().await, 0);
    }
}
