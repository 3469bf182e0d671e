//! Server dependencies for domain actions (using traits for testability)

use std::sync::Arc;

use sqlx::PgPool;

use super::schema_probe::SchemaCapabilities;
use super::traits::{BaseCityFeed, BaseMailer};

/// Server dependencies accessible to route handlers and domain actions.
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Moderation notification mailer. A no-op when mail is unconfigured.
    pub mailer: Arc<dyn BaseMailer>,
    /// External city calendar feed (optional — the public calendar degrades
    /// to community events only when absent).
    pub city_feed: Option<Arc<dyn BaseCityFeed>>,
    /// Result of the startup schema probe.
    pub schema: SchemaCapabilities,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        mailer: Arc<dyn BaseMailer>,
        city_feed: Option<Arc<dyn BaseCityFeed>>,
        schema: SchemaCapabilities,
    ) -> Self {
        Self {
            db_pool,
            mailer,
            city_feed,
            schema,
        }
    }
}
