use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::common::validation::require;
use crate::common::ApiError;
use crate::domains::analytics::actions::{compute_summary, AnalyticsSummary, SummaryRange};
use crate::domains::analytics::models::AnalyticsEvent;
use crate::server::app::AxumAppState;

#[derive(Debug, Deserialize)]
pub struct RecordEventInput {
    pub name: String,
    pub route: String,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

/// POST /api/analytics/events — append one interaction event.
pub async fn record_event_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<RecordEventInput>,
) -> Result<(StatusCode, Json<AnalyticsEvent>), ApiError> {
    require("name", &input.name)?;
    require("route", &input.route)?;

    let meta = input.meta.unwrap_or_else(|| serde_json::json!({}));
    let event = AnalyticsEvent::record(&input.name, &input.route, meta, &state.db_pool).await?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub days: Option<i64>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

const DEFAULT_SUMMARY_DAYS: i64 = 7;

/// GET /api/analytics/summary?days=N or ?start=...&end=... (admin)
pub async fn summary_handler(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<AnalyticsSummary>, ApiError> {
    let range = match (query.days, query.start, query.end) {
        (Some(days), _, _) => SummaryRange::LastDays(days),
        (None, Some(start), Some(end)) => {
            if end < start {
                return Err(ApiError::Validation("end".to_string()));
            }
            SummaryRange::Between(start, end)
        }
        (None, Some(_), None) => return Err(ApiError::Validation("end".to_string())),
        (None, None, Some(_)) => return Err(ApiError::Validation("start".to_string())),
        (None, None, None) => SummaryRange::LastDays(DEFAULT_SUMMARY_DAYS),
    };

    Ok(Json(compute_summary(range, &state.db_pool).await))
}
