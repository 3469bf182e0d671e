//! Test fixtures for creating test data.
//!
//! These fixtures use the action/model methods directly, the same code paths
//! the routes call.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use server_core::common::AnalyticsEventId;
use server_core::domains::directory::actions::BusinessSubmissionInput;
use server_core::domains::events::actions::EventSubmissionInput;

/// A valid business submission payload with the given name.
pub fn business_input(business_name: &str) -> BusinessSubmissionInput {
    BusinessSubmissionInput {
        business_name: business_name.to_string(),
        mode: "new".to_string(),
        category: "Eat & Drink".to_string(),
        address: "1 Main St".to_string(),
        contact_name: "Alex Owner".to_string(),
        contact_email: "owner@example.com".to_string(),
        phone: None,
        website_url: Some("https://example.com".to_string()),
        image_url: None,
        notes: None,
        linked_listing_id: None,
        audience: vec!["visitors".to_string()],
        tags: vec!["coffee".to_string()],
    }
}

/// A valid community event payload with the given title.
pub fn event_input(title: &str) -> EventSubmissionInput {
    EventSubmissionInput {
        title: title.to_string(),
        start_at: Some(Utc::now() + Duration::days(7)),
        end_at: None,
        location: "Harbor Park Pavilion".to_string(),
        audience: Some("family".to_string()),
        cost: Some("Free".to_string()),
        description: Some("Bring a blanket.".to_string()),
        accessibility: None,
        external_url: None,
        contact_email: "organizer@example.com".to_string(),
        contact_name: "Sam Organizer".to_string(),
        attachments: Vec::new(),
    }
}

/// Insert an analytics event with an explicit timestamp (the model method
/// always stamps NOW(), which window tests can't use).
pub async fn record_event_at(
    name: &str,
    route: &str,
    meta: serde_json::Value,
    occurred_at: DateTime<Utc>,
    pool: &PgPool,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO analytics_events (id, name, route, occurred_at, meta)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(AnalyticsEventId::new())
    .bind(name)
    .bind(route)
    .bind(occurred_at)
    .bind(meta)
    .execute(pool)
    .await?;

    Ok(())
}

/// A unique suffix for fixture names so tests sharing the database don't
/// collide.
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
