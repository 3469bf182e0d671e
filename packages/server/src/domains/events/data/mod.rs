//! API representation of calendar entries.
//!
//! The public calendar is a union of two origins, so the wire type carries a
//! `source` discriminator instead of exposing either row shape directly.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::types::CityEvent;
use crate::domains::events::models::EventSubmission;

/// One entry on the public calendar.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEventData {
    /// "city" for feed events, "community" for approved submissions.
    pub source: String,
    pub id: String,
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    /// Community events only.
    pub audience: Option<String>,
    pub cost: Option<String>,
    pub accessibility: Option<String>,
}

impl From<CityEvent> for CalendarEventData {
    fn from(event: CityEvent) -> Self {
        Self {
            source: "city".to_string(),
            id: event.external_id,
            title: event.title,
            start_at: event.start_at,
            end_at: event.end_at,
            location: event.location,
            url: event.url,
            description: event.description,
            audience: None,
            cost: None,
            accessibility: None,
        }
    }
}

impl From<EventSubmission> for CalendarEventData {
    fn from(submission: EventSubmission) -> Self {
        Self {
            source: "community".to_string(),
            id: submission.id.to_string(),
            title: submission.title,
            start_at: submission.start_at,
            end_at: submission.end_at,
            location: Some(submission.location),
            url: submission.external_url,
            description: submission.description,
            audience: Some(submission.audience),
            cost: submission.cost,
            accessibility: submission.accessibility,
        }
    }
}
