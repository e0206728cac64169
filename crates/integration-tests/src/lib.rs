//! Integration tests for minimart.
//!
//! Each test spawns the full axum application in-process on an ephemeral
//! port with a private in-memory `SQLite` database, then drives it over
//! real HTTP with a cookie-holding `reqwest` client. Nothing external is
//! required; the suite runs with a plain `cargo test`.
//!
//! # Test Categories
//!
//! - `storefront_flows` - Catalog, cart, and session behavior
//! - `admin_products` - Product creation and the admin auth guard

use std::str::FromStr;

use reqwest::{Client, redirect};
use secrecy::SecretString;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use minimart_server::config::ServerConfig;
use minimart_server::state::AppState;
use minimart_server::{app, db};

/// A running in-process server plus a client pointed at it.
pub struct TestContext {
    /// Cookie-holding client; redirects are NOT followed so tests can
    /// assert on 303 responses directly.
    pub client: Client,
    /// Base URL of the spawned server, e.g. `http://127.0.0.1:49152`.
    pub base_url: String,
    /// Handle to the server's database for direct assertions.
    pub pool: SqlitePool,
}

impl TestContext {
    /// Spawn a server with the default test configuration (no admin
    /// password, fixed test session secret).
    pub async fn spawn() -> Self {
        Self::spawn_with(|config| config).await
    }

    /// Spawn a server with an adjusted configuration.
    pub async fn spawn_with(configure: impl FnOnce(ServerConfig) -> ServerConfig) -> Self {
        let config = configure(test_config());

        let pool = in_memory_pool().await;
        db::bootstrap(&pool)
            .await
            .expect("Failed to apply migrations");

        let state = AppState::new(config, pool.clone());
        let router = app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server error");
        });

        Self {
            client: new_client(),
            base_url: format!("http://{addr}"),
            pool,
        }
    }

    /// Absolute URL for a path on the spawned server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Create a product through the admin form and assert the redirect.
    ///
    /// Ids are assigned sequentially from 1 in each test's fresh database.
    pub async fn create_product(&self, title: &str, price: &str) {
        let resp = self
            .client
            .post(self.url("/admin"))
            .form(&[
                ("title", title),
                ("description", ""),
                ("price", price),
                ("image", ""),
            ])
            .send()
            .await
            .expect("Failed to post product form");

        assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);
    }
}

/// A fresh cookie-holding client, for tests that need a second visitor.
#[must_use]
pub fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

fn test_config() -> ServerConfig {
    ServerConfig {
        // The test pool is built separately; this value is carried for
        // completeness and never dialed.
        database_url: SecretString::from("sqlite::memory:"),
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        session_secret: SecretString::from("integration-test-session-secret-0123456789"),
        session_secret_is_default: false,
        admin_password: None,
    }
}

/// One-connection in-memory pool.
///
/// Every `sqlite::memory:` connection is its own database, so the pool is
/// pinned to a single connection that is never recycled; recycling would
/// silently swap in an empty database mid-test.
async fn in_memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").expect("valid sqlite url");

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database")
}
