// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The moderation
// actions decide WHEN to notify; the mailer only knows how to send.

use anyhow::Result;
use async_trait::async_trait;

use crate::common::types::CityEvent;

// =============================================================================
// Mailer (moderation notification emails)
// =============================================================================

#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Send a plain-text notification email.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

// =============================================================================
// City calendar feed
// =============================================================================

#[async_trait]
pub trait BaseCityFeed: Send + Sync {
    /// Fetch the current set of city events from the external calendar.
    async fn fetch_events(&self) -> Result<Vec<CityEvent>>;
}
