use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ListingId, SubmissionId};

/// A published directory entry.
///
/// Derived from an approved submission (which sets `source_submission_id`),
/// or created directly by an admin. Public pages only ever see rows with
/// `is_published = true`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BusinessListing {
    pub id: ListingId,
    pub slug: String,
    pub name: String,
    pub category: String,
    pub price_level: i32, // 1..=4
    pub address: String,
    pub phone: Option<String>,
    pub website_url: Option<String>,
    pub audience: Vec<String>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub is_published: bool,
    /// The submission this listing was derived from, if any. Rejecting that
    /// submission unpublishes this row; re-approving republishes it.
    pub source_submission_id: Option<SubmissionId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BusinessListing {
    /// Public read path: published listings only, newest first.
    pub async fn find_published(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let listings = sqlx::query_as::<_, BusinessListing>(
            r#"
            SELECT * FROM business_listings
            WHERE is_published = TRUE
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(listings)
    }

    pub async fn find_published_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        let listing = sqlx::query_as::<_, BusinessListing>(
            r#"
            SELECT * FROM business_listings
            WHERE slug = $1 AND is_published = TRUE
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(listing)
    }

    pub async fn find_by_id(id: ListingId, pool: &PgPool) -> Result<Option<Self>> {
        let listing = sqlx::query_as::<_, BusinessListing>(
            r#"
            SELECT * FROM business_listings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(listing)
    }

    pub async fn find_by_submission_id(
        submission_id: SubmissionId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let listing = sqlx::query_as::<_, BusinessListing>(
            r#"
            SELECT * FROM business_listings
            WHERE source_submission_id = $1
            "#,
        )
        .bind(submission_id)
        .fetch_optional(pool)
        .await?;

        Ok(listing)
    }
}
