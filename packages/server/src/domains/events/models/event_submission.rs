use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::EventSubmissionId;

/// A community-submitted calendar event awaiting review.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventSubmission {
    pub id: EventSubmissionId,
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub location: String,
    pub audience: String, // 'family' | '18plus' | '21plus'
    pub cost: Option<String>,
    pub description: Option<String>,
    pub accessibility: Option<String>,
    pub external_url: Option<String>,
    pub contact_email: String,
    pub contact_name: String,
    pub attachments: Vec<String>,
    pub status: String, // 'pending' | 'approved' | 'rejected'
    pub submitted_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

/// Who the event is for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventAudience {
    Family,
    EighteenPlus,
    TwentyOnePlus,
}

impl std::fmt::Display for EventAudience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAudience::Family => write!(f, "family"),
            EventAudience::EighteenPlus => write!(f, "18plus"),
            EventAudience::TwentyOnePlus => write!(f, "21plus"),
        }
    }
}

impl std::str::FromStr for EventAudience {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "family" => Ok(EventAudience::Family),
            "18plus" => Ok(EventAudience::EighteenPlus),
            "21plus" => Ok(EventAudience::TwentyOnePlus),
            _ => Err(anyhow::anyhow!("Invalid event audience: {}", s)),
        }
    }
}

impl EventSubmission {
    pub async fn find_by_id(id: EventSubmissionId, pool: &PgPool) -> Result<Option<Self>> {
        let submission = sqlx::query_as::<_, EventSubmission>(
            r#"
            SELECT * FROM event_submissions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(submission)
    }

    /// Moderation queue: newest first, optionally filtered by status.
    pub async fn find_by_status(
        status: Option<&str>,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let submissions = match status {
            Some(status) => {
                sqlx::query_as::<_, EventSubmission>(
                    r#"
                    SELECT * FROM event_submissions
                    WHERE status = $1
                    ORDER BY submitted_at DESC
                    LIMIT $2
                    "#,
                )
                .bind(status)
                .bind(limit)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, EventSubmission>(
                    r#"
                    SELECT * FROM event_submissions
                    ORDER BY submitted_at DESC
                    LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(pool)
                .await?
            }
        };

        Ok(submissions)
    }

    /// Approved events with a start time from `from` onward, soonest first.
    /// This is the community half of the public calendar.
    pub async fn find_approved_upcoming(
        from: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let submissions = sqlx::query_as::<_, EventSubmission>(
            r#"
            SELECT * FROM event_submissions
            WHERE status = 'approved' AND start_at >= $1
            ORDER BY start_at ASC
            "#,
        )
        .bind(from)
        .fetch_all(pool)
        .await?;

        Ok(submissions)
    }

    /// Insert a new submission with status forced to 'pending'.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        title: String,
        start_at: DateTime<Utc>,
        end_at: Option<DateTime<Utc>>,
        location: String,
        audience: EventAudience,
        cost: Option<String>,
        description: Option<String>,
        accessibility: Option<String>,
        external_url: Option<String>,
        contact_email: String,
        contact_name: String,
        attachments: Vec<String>,
        pool: &PgPool,
    ) -> Result<Self> {
        let submission = sqlx::query_as::<_, EventSubmission>(
            r#"
            INSERT INTO event_submissions
                (id, title, start_at, end_at, location, audience, cost, description,
                 accessibility, external_url, contact_email, contact_name, attachments,
                 status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 'pending')
            RETURNING *
            "#,
        )
        .bind(EventSubmissionId::new())
        .bind(title)
        .bind(start_at)
        .bind(end_at)
        .bind(location)
        .bind(audience.to_string())
        .bind(cost)
        .bind(description)
        .bind(accessibility)
        .bind(external_url)
        .bind(contact_email)
        .bind(contact_name)
        .bind(attachments)
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }

    /// Set status and stamp the review time. Returns None if the id is gone.
    pub async fn set_status(
        id: EventSubmissionId,
        status: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let submission = sqlx::query_as::<_, EventSubmission>(
            r#"
            UPDATE event_submissions
            SET status = $2, last_reviewed_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        Ok(submission)
    }
}
