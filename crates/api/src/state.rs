use std::sync::Arc;
use std::time::Duration;

use impacto_db::PgStore;

use crate::config::ServerConfig;
use crate::sessions::SessionRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly only by the health check.
    pub pool: impacto_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Fail-soft persistence gateway handed to dashboard sessions.
    pub store: Arc<PgStore>,
    /// Open dashboard sessions.
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(pool: impacto_db::DbPool, config: ServerConfig) -> Self {
        let idle_timeout = Duration::from_secs(config.session_idle_timeout_secs);
        Self {
            store: Arc::new(PgStore::new(pool.clone())),
            pool,
            config: Arc::new(config),
            sessions: Arc::new(SessionRegistry::new(idle_timeout)),
        }
    }
}
