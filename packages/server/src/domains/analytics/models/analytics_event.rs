use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::AnalyticsEventId;

/// One logged interaction. Append-only: nothing in this system updates or
/// deletes these rows, the summary queries only aggregate them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnalyticsEvent {
    pub id: AnalyticsEventId,
    pub name: String,
    pub route: String,
    pub occurred_at: DateTime<Utc>,
    /// Free-form metadata; may carry an inferred `country` code and/or
    /// `country_name`.
    pub meta: serde_json::Value,
}

/// The known event kinds. Events logged under other names still count toward
/// the grand total but are not bucketed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PageView,
    ListingClick,
    EventClick,
    AdClick,
    Reaction,
    Search,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::PageView,
        EventKind::ListingClick,
        EventKind::EventClick,
        EventKind::AdClick,
        EventKind::Reaction,
        EventKind::Search,
    ];
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::PageView => write!(f, "page_view"),
            EventKind::ListingClick => write!(f, "listing_click"),
            EventKind::EventClick => write!(f, "event_click"),
            EventKind::AdClick => write!(f, "ad_click"),
            EventKind::Reaction => write!(f, "reaction"),
            EventKind::Search => write!(f, "search"),
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "page_view" => Ok(EventKind::PageView),
            "listing_click" => Ok(EventKind::ListingClick),
            "event_click" => Ok(EventKind::EventClick),
            "ad_click" => Ok(EventKind::AdClick),
            "reaction" => Ok(EventKind::Reaction),
            "search" => Ok(EventKind::Search),
            _ => Err(anyhow::anyhow!("Unknown event kind: {}", s)),
        }
    }
}

impl AnalyticsEvent {
    /// Append an event, stamped with the server clock.
    pub async fn record(
        name: &str,
        route: &str,
        meta: serde_json::Value,
        pool: &PgPool,
    ) -> Result<Self> {
        let event = sqlx::query_as::<_, AnalyticsEvent>(
            r#"
            INSERT INTO analytics_events (id, name, route, meta)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(AnalyticsEventId::new())
        .bind(name)
        .bind(route)
        .bind(meta)
        .fetch_one(pool)
        .await?;

        Ok(event)
    }
}
