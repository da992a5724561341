use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use impacto_api::config::ServerConfig;
use impacto_api::router::build_app_router;
use impacto_api::sessions::start_session_sweeper;
use impacto_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "impacto_api=debug,impacto_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid server configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");
    if config.admin_password_hash.is_none() {
        tracing::warn!("ADMIN_PASSWORD_HASH is unset; administrator logins will be refused");
    }

    // --- Database ---
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        tracing::error!("DATABASE_URL must be set");
        std::process::exit(1);
    };

    let pool = match impacto_db::create_pool(&database_url).await {
        Ok(pool) => {
            tracing::info!("Database connection pool created");
            match impacto_db::run_migrations(&pool).await {
                Ok(()) => tracing::info!("Database migrations applied"),
                Err(e) => tracing::error!(error = %e, "Failed to run database migrations"),
            }
            pool
        }
        // Keep serving: reads come back empty and writes report a fault
        // until the database is reachable again.
        Err(e) => {
            tracing::error!(error = %e, "Database unreachable, starting in degraded mode");
            match impacto_db::create_lazy_pool(&database_url) {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!(error = %e, "Invalid DATABASE_URL");
                    std::process::exit(1);
                }
            }
        }
    };

    // --- App state and router ---
    let state = AppState::new(pool, config.clone());
    let sessions = state.sessions.clone();
    let sweeper_handle = start_session_sweeper(sessions.clone());
    tracing::info!(
        idle_timeout_secs = config.session_idle_timeout_secs,
        "Session sweeper started"
    );
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = match config.host.parse() {
        Ok(ip) => SocketAddr::new(ip, config.port),
        Err(e) => {
            tracing::error!(host = %config.host, error = %e, "Invalid HOST address");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, "Starting server");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind to address");
            std::process::exit(1);
        }
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .into_future();
    let drain = Duration::from_secs(config.shutdown_timeout_secs);

    // The server future only completes once in-flight requests finish; give
    // them `drain` after the signal before exiting anyway.
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Server error");
            }
        }
        () = async {
            shutdown_signal().await;
            tokio::time::sleep(drain).await;
        } => {
            tracing::warn!(drain_secs = drain.as_secs(), "Shutdown drain timed out");
        }
    }

    sweeper_handle.abort();
    let open = sessions.count().await;
    tracing::info!(open_sessions = open, "Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
