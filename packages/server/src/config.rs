use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Bearer token required on admin routes (moderation, ads, blog, settings).
    pub admin_token: String,
    /// Origins allowed by CORS. Empty means allow any (development).
    pub allowed_origins: Vec<String>,
    /// External city calendar feed. When unset the public calendar serves
    /// community events only.
    pub city_feed_url: Option<String>,
    /// Mail API credentials for moderation notifications. When unset the
    /// mailer is a no-op and notifications are skipped.
    pub mail_api_key: Option<String>,
    pub mail_from: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            admin_token: env::var("ADMIN_TOKEN").context("ADMIN_TOKEN must be set")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            city_feed_url: env::var("CITY_FEED_URL").ok(),
            mail_api_key: env::var("MAIL_API_KEY").ok(),
            mail_from: env::var("MAIL_FROM").ok(),
        })
    }
}
