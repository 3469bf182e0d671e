use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;
use uuid::Uuid;

use crate::common::{ApiError, ModerationStatus, SubmissionId};
use crate::domains::directory::actions::{
    approve_business_submission, create_listing, reject_business_submission, submit_business,
    BusinessSubmissionInput, CreateListingInput,
};
use crate::domains::directory::models::{BusinessListing, BusinessSubmission};
use crate::server::app::AxumAppState;

const DEFAULT_PAGE_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub status: Option<String>,
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, DEFAULT_PAGE_LIMIT)
}

/// POST /api/business-submissions
pub async fn submit_business_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<BusinessSubmissionInput>,
) -> Result<(StatusCode, Json<BusinessSubmission>), ApiError> {
    let submission = submit_business(input, &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeInput {
    pub status: String,
}

/// Result of a moderation action; `listing` is set on approval.
#[derive(Debug, Serialize)]
pub struct ModerationOutcome {
    pub submission: BusinessSubmission,
    pub listing: Option<BusinessListing>,
}

/// POST /api/business-submissions/:id/status (admin)
pub async fn business_submission_status_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<StatusChangeInput>,
) -> Result<Json<ModerationOutcome>, ApiError> {
    let id = SubmissionId::from_uuid(id);
    let status = ModerationStatus::from_str(&input.status)
        .map_err(|_| ApiError::Validation("status".to_string()))?;

    match status {
        ModerationStatus::Approved => {
            let (submission, listing) = approve_business_submission(id, &state.db_pool).await?;
            Ok(Json(ModerationOutcome {
                submission,
                listing: Some(listing),
            }))
        }
        ModerationStatus::Rejected => {
            let submission = reject_business_submission(id, &state.db_pool).await?;
            Ok(Json(ModerationOutcome {
                submission,
                listing: None,
            }))
        }
        ModerationStatus::Pending => Err(ApiError::Validation("status".to_string())),
    }
}

/// GET /api/listings — public, published only.
///
/// Read path: a store failure degrades to an empty page rather than a 500.
pub async fn list_listings_handler(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<BusinessListing>> {
    let limit = clamp_limit(query.limit);

    match BusinessListing::find_published(limit, &state.db_pool).await {
        Ok(listings) => Json(listings),
        Err(e) => {
            warn!(error = %e, "Public listing query failed, serving empty page");
            Json(Vec::new())
        }
    }
}

/// GET /api/listings/:slug — public, published only.
pub async fn get_listing_handler(
    Extension(state): Extension<AxumAppState>,
    Path(slug): Path<String>,
) -> Result<Json<BusinessListing>, ApiError> {
    match BusinessListing::find_published_by_slug(&slug, &state.db_pool).await {
        Ok(Some(listing)) => Ok(Json(listing)),
        Ok(None) => Err(ApiError::NotFound("listing")),
        Err(e) => {
            warn!(error = %e, slug = %slug, "Listing lookup failed");
            Err(ApiError::NotFound("listing"))
        }
    }
}

/// GET /api/admin/business-submissions — the moderation queue.
pub async fn admin_list_business_submissions_handler(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<BusinessSubmission>>, ApiError> {
    let limit = clamp_limit(query.limit);
    let submissions =
        BusinessSubmission::find_by_status(query.status.as_deref(), limit, &state.db_pool).await?;
    Ok(Json(submissions))
}

/// POST /api/admin/listings — create a published listing directly.
pub async fn admin_create_listing_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<CreateListingInput>,
) -> Result<(StatusCode, Json<BusinessListing>), ApiError> {
    let listing = create_listing(input, &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}
