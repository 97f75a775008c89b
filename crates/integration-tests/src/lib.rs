//! End-to-end test harness for the salon admin API.
//!
//! Each test spawns the real router on an ephemeral port backed by its own
//! in-memory `SQLite` database, then drives it with a cookie-carrying HTTP
//! client. No external services are needed.
//!
//! ```bash
//! cargo test -p salon-admin-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::str::FromStr;

use reqwest::Client;
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use salon_admin_api::config::Config;
use salon_admin_api::db::{AdminRepository, MIGRATOR};
use salon_admin_api::services::auth::hash_password;
use salon_admin_core::{AdminId, Email};

/// Credentials used by [`TestApp::login_as_admin`].
pub const ADMIN_EMAIL: &str = "admin@email.com";
pub const ADMIN_PASSWORD: &str = "admin123";

/// A running application instance plus a client that keeps its cookies.
pub struct TestApp {
    pub base_url: String,
    pub client: Client,
    pub pool: SqlitePool,
}

impl TestApp {
    /// Spawn the app on an ephemeral port over a fresh in-memory database.
    pub async fn spawn() -> Self {
        // A single connection keeps the in-memory database alive; separate
        // connections would each see their own empty database.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .expect("Failed to open in-memory database");

        MIGRATOR.run(&pool).await.expect("Failed to run migrations");

        let config = Config {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://localhost".to_owned(),
        };

        let app = salon_admin_api::app(config, pool.clone())
            .await
            .expect("Failed to build application");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("http://{addr}"),
            client,
            pool,
        }
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Insert an admin directly into the store, bypassing HTTP.
    pub async fn seed_admin(&self, email: &str, password: &str) -> AdminId {
        let email = Email::parse(email).unwrap();
        let hash = hash_password(password).expect("Failed to hash password");

        AdminRepository::new(&self.pool)
            .create(&email, "Test Admin", &hash)
            .await
            .expect("Failed to seed admin")
            .id
    }

    /// POST /api/v1/auth with the given credentials.
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/v1/auth"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Login request failed")
    }

    /// Seed the default admin and establish a session.
    pub async fn login_as_admin(&self) -> AdminId {
        let id = self.seed_admin(ADMIN_EMAIL, ADMIN_PASSWORD).await;
        let response = self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
        assert_eq!(response.status(), 200, "seeded admin login should succeed");
        id
    }

    /// Create a staff member via the API and return the response body.
    pub async fn create_user(&self, name: &str) -> Value {
        let response = self
            .client
            .post(self.url("/api/v1/user"))
            .json(&json!({ "name": name }))
            .send()
            .await
            .expect("Create user request failed");
        assert_eq!(response.status(), 201);
        response.json().await.expect("Invalid JSON body")
    }

    /// Create a calendar event via the API and return the response body.
    pub async fn create_event(&self, title: &str, user_id: &str) -> Value {
        let response = self
            .client
            .post(self.url("/api/v1/event"))
            .json(&json!({
                "title": title,
                "description": "scheduled appointment",
                "startDate": "2025-06-01T10:00:00Z",
                "endDate": "2025-06-01T10:30:00Z",
                "userId": user_id,
            }))
            .send()
            .await
            .expect("Create event request failed");
        assert_eq!(response.status(), 201);
        response.json().await.expect("Invalid JSON body")
    }
}
