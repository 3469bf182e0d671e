use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::str::FromStr;

use crate::common::{ApiError, ModerationStatus};
use crate::domains::events::actions::{
    moderate_event_submission, public_calendar, submit_event, EventSubmissionInput,
};
use crate::domains::events::data::CalendarEventData;
use crate::domains::events::models::EventSubmission;
use crate::server::app::AxumAppState;

const DEFAULT_PAGE_LIMIT: i64 = 100;

/// POST /api/event-submissions
pub async fn submit_event_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<EventSubmissionInput>,
) -> Result<(StatusCode, Json<EventSubmission>), ApiError> {
    let submission = submit_event(input, &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

#[derive(Debug, Deserialize)]
pub struct EventStatusChangeInput {
    pub status: String,
    #[serde(default)]
    pub send_email: bool,
}

/// POST /api/event-submissions/:id/status (admin)
///
/// The id stays a raw string down into the action so the sentinel values a
/// broken client sends ("undefined", empty) are refused before any query.
pub async fn event_submission_status_handler(
    Extension(state): Extension<AxumAppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<EventStatusChangeInput>,
) -> Result<Json<EventSubmission>, ApiError> {
    let status = ModerationStatus::from_str(&input.status)
        .map_err(|_| ApiError::Validation("status".to_string()))?;

    let submission =
        moderate_event_submission(&raw_id, status, input.send_email, &state.deps).await?;

    Ok(Json(submission))
}

#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    pub limit: Option<i64>,
    pub status: Option<String>,
}

/// GET /api/admin/event-submissions — the moderation queue.
pub async fn admin_list_event_submissions_handler(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<Vec<EventSubmission>>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, DEFAULT_PAGE_LIMIT);
    let submissions =
        EventSubmission::find_by_status(query.status.as_deref(), limit, &state.db_pool).await?;
    Ok(Json(submissions))
}

/// GET /api/events — the public calendar (city feed + approved community
/// events). Degradation happens inside the action; this never fails.
pub async fn public_events_handler(
    Extension(state): Extension<AxumAppState>,
) -> Json<Vec<CalendarEventData>> {
    Json(public_calendar(&state.deps).await)
}
