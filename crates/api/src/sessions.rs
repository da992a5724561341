//! Registry of open dashboard sessions.
//!
//! Each login gets a random key; the browser sends it back in the
//! `x-dashboard-session` header. A session lives in memory until logout, or
//! until it goes unused for longer than the registry's idle timeout.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use impacto_core::session::DashboardSession;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use uuid::Uuid;

/// Header carrying the session key.
pub const SESSION_HEADER: &str = "x-dashboard-session";

/// Interval between sweeps for idle sessions (in seconds).
const SWEEP_INTERVAL_SECS: u64 = 60;

/// A session shared between concurrent requests from the same tab.
pub type SharedSession = Arc<Mutex<DashboardSession>>;

struct Entry {
    session: SharedSession,
    last_seen: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant, idle_timeout: Duration) -> bool {
        now.duration_since(self.last_seen) >= idle_timeout
    }
}

/// Thread-safe via interior `RwLock`; wrapped in `Arc` in [`crate::state::AppState`].
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Register a session under a fresh key. Expired sessions are swept first
    /// so repeated logins cannot grow the map without bound.
    pub async fn open(&self, session: DashboardSession) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let shared = Arc::new(Mutex::new(session));
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| !entry.is_expired(now, self.idle_timeout));
        sessions.insert(
            id,
            Entry {
                session: Arc::clone(&shared),
                last_seen: now,
            },
        );
        (id, shared)
    }

    /// Look up a live session and refresh its idle clock. An expired session
    /// is dropped and reported as unknown.
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        if entry.is_expired(now, self.idle_timeout) {
            sessions.remove(&id);
            tracing::debug!(session_id = %id, "Dashboard session expired");
            return None;
        }
        entry.last_seen = now;
        Some(Arc::clone(&entry.session))
    }

    /// Drop a session. Returns whether it existed.
    pub async fn close(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Drop every idle session. Returns how many were removed.
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(now, self.idle_timeout));
        before - sessions.len()
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Spawn a background task that periodically drops idle sessions.
///
/// Runs until aborted; `main` aborts it on shutdown.
pub fn start_session_sweeper(registry: Arc<SessionRegistry>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));

        loop {
            interval.tick().await;
            let removed = registry.sweep_expired().await;
            if removed > 0 {
                let open = registry.count().await;
                tracing::debug!(removed, open, "Swept idle dashboard sessions");
            }
        }
    })
}
