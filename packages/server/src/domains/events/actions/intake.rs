use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use std::str::FromStr;
use tracing::info;

use crate::common::validation::{check_optional_url, require, require_email};
use crate::common::ApiError;
use crate::domains::events::models::{EventAudience, EventSubmission};

/// Public form payload for a community event.
///
/// Required fields default to empty/absent so a missing field fails shape
/// validation (which names the field) rather than deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct EventSubmissionInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub cost: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub accessibility: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl EventSubmissionInput {
    fn validate(&self) -> Result<(DateTime<Utc>, EventAudience), ApiError> {
        require("title", &self.title)?;
        require("location", &self.location)?;
        require("contact_name", &self.contact_name)?;
        require_email("contact_email", &self.contact_email)?;
        check_optional_url("external_url", self.external_url.as_deref())?;

        let start_at = self
            .start_at
            .ok_or_else(|| ApiError::Validation("start_at".to_string()))?;

        if let Some(end_at) = self.end_at {
            if end_at < start_at {
                return Err(ApiError::Validation("end_at".to_string()));
            }
        }

        let audience = match self.audience.as_deref() {
            Some(raw) => EventAudience::from_str(raw)
                .map_err(|_| ApiError::Validation("audience".to_string()))?,
            None => EventAudience::Family,
        };

        Ok((start_at, audience))
    }
}

/// Persist a public event submission as a pending record.
pub async fn submit_event(
    input: EventSubmissionInput,
    pool: &PgPool,
) -> Result<EventSubmission, ApiError> {
    let (start_at, audience) = input.validate()?;

    let submission = EventSubmission::create(
        input.title,
        start_at,
        input.end_at,
        input.location,
        audience,
        input.cost,
        input.description,
        input.accessibility,
        input.external_url,
        input.contact_email,
        input.contact_name,
        input.attachments,
        pool,
    )
    .await?;

    info!(
        submission_id = %submission.id,
        title = %submission.title,
        start_at = %submission.start_at,
        "Event submission received"
    );

    Ok(submission)
}
