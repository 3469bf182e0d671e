// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::kernel::{
    ApiMailer, BaseCityFeed, BaseMailer, HttpCityFeed, NoopMailer, SchemaCapabilities, ServerDeps,
};
use server_core::server::build_app;
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting North Harbor Guide API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Probe the schema once for the late-added ad columns
    let schema = SchemaCapabilities::probe(&pool)
        .await
        .context("Failed to probe schema capabilities")?;

    // Mailer: real sender only when mail credentials are configured
    let mailer: Arc<dyn BaseMailer> = match (&config.mail_api_key, &config.mail_from) {
        (Some(api_key), Some(from)) => Arc::new(ApiMailer::new(api_key.clone(), from.clone())),
        _ => {
            tracing::warn!("MAIL_API_KEY/MAIL_FROM not set, moderation emails disabled");
            Arc::new(NoopMailer)
        }
    };

    // City feed: optional; without it the calendar serves community events only
    let city_feed: Option<Arc<dyn BaseCityFeed>> = match &config.city_feed_url {
        Some(url) => Some(Arc::new(HttpCityFeed::new(url.clone()))),
        None => {
            tracing::warn!("CITY_FEED_URL not set, calendar will serve community events only");
            None
        }
    };

    let deps = Arc::new(ServerDeps::new(pool.clone(), mailer, city_feed, schema));

    // Build application
    let app = build_app(pool, deps, &config);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
