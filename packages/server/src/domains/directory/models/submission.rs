use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ListingId, SubmissionId};

/// A request to create or claim a public directory entry.
///
/// Created by the public form, mutated only by moderation actions, never
/// hard-deleted (rejection is a status flag, not removal).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BusinessSubmission {
    pub id: SubmissionId,
    pub business_name: String,
    pub mode: String, // 'new' | 'claim'
    pub category: String,
    pub status: String, // 'pending' | 'approved' | 'rejected'
    pub contact_name: String,
    pub contact_email: String,
    pub notes: Option<String>,
    /// Present for 'claim' mode: the listing the submitter says is theirs.
    pub linked_listing_id: Option<ListingId>,
    pub address: String,
    pub phone: Option<String>,
    pub website_url: Option<String>,
    pub image_url: Option<String>,
    pub audience: Vec<String>,
    pub tags: Vec<String>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Whether the submission proposes a new entry or claims an existing one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionMode {
    New,
    Claim,
}

impl std::fmt::Display for SubmissionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionMode::New => write!(f, "new"),
            SubmissionMode::Claim => write!(f, "claim"),
        }
    }
}

impl std::str::FromStr for SubmissionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "new" => Ok(SubmissionMode::New),
            "claim" => Ok(SubmissionMode::Claim),
            _ => Err(anyhow::anyhow!("Invalid submission mode: {}", s)),
        }
    }
}

impl BusinessSubmission {
    pub async fn find_by_id(id: SubmissionId, pool: &PgPool) -> Result<Option<Self>> {
        let submission = sqlx::query_as::<_, BusinessSubmission>(
            r#"
            SELECT * FROM business_submissions
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
                sqlx::query_as::<_, BusinessSubmission>(
                    r#"
                    SELECT * FROM business_submissions
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
                sqlx::query_as::<_, BusinessSubmission>(
                    r#"
                    SELECT * FROM business_submissions
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

    /// Insert a new submission. Status is always 'pending' here: intake
    /// ignores any client-supplied status.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        business_name: String,
        mode: SubmissionMode,
        category: String,
        contact_name: String,
        contact_email: String,
        notes: Option<String>,
        linked_listing_id: Option<ListingId>,
        address: String,
        phone: Option<String>,
        website_url: Option<String>,
        image_url: Option<String>,
        audience: Vec<String>,
        tags: Vec<String>,
        pool: &PgPool,
    ) -> Result<Self> {
        let submission = sqlx::query_as::<_, BusinessSubmission>(
            r#"
            INSERT INTO business_submissions
                (id, business_name, mode, category, status, contact_name, contact_email,
                 notes, linked_listing_id, address, phone, website_url, image_url,
                 audience, tags)
            VALUES ($1, $2, $3, $4, 'pending', $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(SubmissionId::new())
        .bind(business_name)
        .bind(mode.to_string())
        .bind(category)
        .bind(contact_name)
        .bind(contact_email)
        .bind(notes)
        .bind(linked_listing_id)
        .bind(address)
        .bind(phone)
        .bind(website_url)
        .bind(image_url)
        .bind(audience)
        .bind(tags)
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }
}
