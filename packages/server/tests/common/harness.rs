//! Test harness with testcontainers for integration testing.
//!
//! Uses a shared Postgres container across all tests for dramatically
//! improved performance. The container and migrations are initialized once
//! on first test, then reused, so tests must keep their fixture data
//! distinct (unique names, routes, or time windows).

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use server_core::common::types::CityEvent;
use server_core::kernel::{
    BaseCityFeed, NoopMailer, SchemaCapabilities, ServerDeps, StaticCityFeed,
};
use server_core::server::build_app;
use server_core::Config;

/// Token the test router accepts on admin routes.
pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Respect RUST_LOG when running tests with -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness giving each test a fresh pool (and router) over the shared
/// database.
pub struct TestHarness {
    pub db_pool: PgPool,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self { db_pool })
    }

    /// Server deps with a no-op mailer and no city feed.
    pub fn deps(&self) -> Arc<ServerDeps> {
        Arc::new(ServerDeps::new(
            self.db_pool.clone(),
            Arc::new(NoopMailer),
            None,
            SchemaCapabilities::assume_current(),
        ))
    }

    /// Server deps whose city feed serves a fixed set of events.
    pub fn deps_with_feed(&self, events: Vec<CityEvent>) -> Arc<ServerDeps> {
        let feed: Arc<dyn BaseCityFeed> = Arc::new(StaticCityFeed(events));
        Arc::new(ServerDeps::new(
            self.db_pool.clone(),
            Arc::new(NoopMailer),
            Some(feed),
            SchemaCapabilities::assume_current(),
        ))
    }

    /// A fresh application router wired to the shared database.
    pub fn router(&self) -> Router {
        let config = Config {
            database_url: String::new(),
            port: 0,
            admin_token: TEST_ADMIN_TOKEN.to_string(),
            allowed_origins: Vec::new(),
            city_feed_url: None,
            mail_api_key: None,
            mail_from: None,
        };
        build_app(self.db_pool.clone(), self.deps(), &config)
    }
}
