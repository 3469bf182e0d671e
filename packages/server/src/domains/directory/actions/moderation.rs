//! Approve/reject state machine for business submissions.
//!
//! Transitions are idempotent in effect: re-approving re-runs the listing
//! derivation against the same row, re-rejecting re-unpublishes. The status
//! update and the listing write share one transaction so a submission is
//! never marked approved without its listing.

use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use crate::common::slug::slugify_or_placeholder;
use crate::common::{ApiError, ListingId, ModerationStatus, SubmissionId};
use crate::domains::directory::models::{BusinessListing, BusinessSubmission};

/// Approve a submission: upsert its published listing and mark it approved.
///
/// Returns both the updated submission and the derived listing.
pub async fn approve_business_submission(
    id: SubmissionId,
    pool: &PgPool,
) -> Result<(BusinessSubmission, BusinessListing), ApiError> {
    let submission = BusinessSubmission::find_by_id(id, pool)
        .await?
        .ok_or(ApiError::NotFound("business submission"))?;

    let mut tx = pool.begin().await?;

    // Which listing does this approval land on? Re-approval targets the row
    // derived earlier; an approved claim targets the listing being claimed;
    // anything else derives a fresh row.
    let mut existing = sqlx::query_as::<_, BusinessListing>(
        r#"
        SELECT * FROM business_listings
        WHERE source_submission_id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    if existing.is_none() {
        if let Some(linked_id) = submission.linked_listing_id {
            existing = sqlx::query_as::<_, BusinessListing>(
                r#"
                SELECT * FROM business_listings
                WHERE id = $1
                "#,
            )
            .bind(linked_id)
            .fetch_optional(&mut *tx)
            .await?;
        }
    }

    let listing = match existing {
        // Update in place, keeping the row's slug and price level. The
        // approved submission takes over as the listing's source, so a later
        // rejection of this submission retracts exactly this row.
        Some(listing) => {
            sqlx::query_as::<_, BusinessListing>(
                r#"
                UPDATE business_listings
                SET name = $2,
                    category = $3,
                    address = $4,
                    phone = $5,
                    website_url = $6,
                    image_url = $7,
                    audience = $8,
                    tags = $9,
                    is_published = TRUE,
                    source_submission_id = $10,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
                "#,
            )
            .bind(listing.id)
            .bind(&submission.business_name)
            .bind(&submission.category)
            .bind(&submission.address)
            .bind(&submission.phone)
            .bind(&submission.website_url)
            .bind(&submission.image_url)
            .bind(&submission.audience)
            .bind(&submission.tags)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?
        }
        None => {
            let slug =
                next_free_slug(slugify_or_placeholder(&submission.business_name), &mut tx).await?;

            sqlx::query_as::<_, BusinessListing>(
                r#"
                INSERT INTO business_listings
                    (id, slug, name, category, address, phone, website_url, image_url,
                     audience, tags, is_published, source_submission_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, TRUE, $11)
                RETURNING *
                "#,
            )
            .bind(ListingId::new())
            .bind(&slug)
            .bind(&submission.business_name)
            .bind(&submission.category)
            .bind(&submission.address)
            .bind(&submission.phone)
            .bind(&submission.website_url)
            .bind(&submission.image_url)
            .bind(&submission.audience)
            .bind(&submission.tags)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?
        }
    };

    let submission = set_status(id, ModerationStatus::Approved, &mut tx).await?;

    tx.commit().await?;

    info!(
        submission_id = %id,
        listing_id = %listing.id,
        slug = %listing.slug,
        "Business submission approved"
    );

    Ok((submission, listing))
}

/// Reject a submission and retract any listing derived from it.
///
/// Retraction is an unpublish, not a delete: the row stays so a later
/// re-approval republishes the same listing. Unpublished rows are invisible
/// to every public query.
pub async fn reject_business_submission(
    id: SubmissionId,
    pool: &PgPool,
) -> Result<BusinessSubmission, ApiError> {
    // Existence check up front so an unknown id is a 404, not a silent no-op.
    BusinessSubmission::find_by_id(id, pool)
        .await?
        .ok_or(ApiError::NotFound("business submission"))?;

    let mut tx = pool.begin().await?;

    let retracted = sqlx::query(
        r#"
        UPDATE business_listings
        SET is_published = FALSE, updated_at = NOW()
        WHERE source_submission_id = $1 AND is_published = TRUE
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let submission = set_status(id, ModerationStatus::Rejected, &mut tx).await?;

    tx.commit().await?;

    info!(
        submission_id = %id,
        retracted_listings = retracted,
        "Business submission rejected"
    );

    Ok(submission)
}

async fn set_status(
    id: SubmissionId,
    status: ModerationStatus,
    tx: &mut Transaction<'_, Postgres>,
) -> Result<BusinessSubmission, sqlx::Error> {
    sqlx::query_as::<_, BusinessSubmission>(
        r#"
        UPDATE business_submissions
        SET status = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(status.to_string())
    .fetch_one(&mut **tx)
    .await
}

/// Find the first unused slug: `base`, `base-2`, `base-3`, ...
///
/// Runs inside the approval transaction so the slug is still free when the
/// insert lands.
pub(crate) async fn next_free_slug(
    base: String,
    tx: &mut Transaction<'_, Postgres>,
) -> Result<String, sqlx::Error> {
    let mut candidate = base.clone();
    let mut suffix = 2;

    loop {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM business_listings WHERE slug = $1)
            "#,
        )
        .bind(&candidate)
        .fetch_one(&mut **tx)
        .await?;

        if !taken {
            return Ok(candidate);
        }

        candidate = format!("{}-{}", base, suffix);
        suffix += 1;
    }
}
