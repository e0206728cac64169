//! Minimart - a minimal session-cart e-commerce demo.
//!
//! This binary serves the catalog, cart, and admin pages on one port
//! (default 3000).
//!
//! # Startup
//!
//! Startup is an explicit bootstrap sequence: load configuration, init
//! tracing, connect the pool, apply embedded migrations, then bind and
//! serve. Nothing database-shaped happens lazily on first request.

#![cfg_attr(not(test), forbid(unsafe_code))]

use minimart_server::config::ServerConfig;
use minimart_server::state::AppState;
use minimart_server::{app, db};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "minimart_server=info,tower_http=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.session_secret_is_default {
        tracing::warn!(
            "MINIMART_SESSION_SECRET is not set; session cookies are signed with the \
             built-in dev secret and can be forged. Set a real secret before deploying."
        );
    }
    if config.admin_password.is_none() {
        tracing::warn!(
            "MINIMART_ADMIN_PASSWORD is not set; /admin is open to anyone who can reach \
             this server."
        );
    }

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // Apply embedded migrations before accepting traffic
    db::bootstrap(&pool)
        .await
        .expect("Failed to apply database migrations");
    tracing::info!("Database migrations applied");

    // Build application state and router
    let state = AppState::new(config.clone(), pool);
    let app = app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("minimart listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
