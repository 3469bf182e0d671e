use axum::extract::{Extension, Query};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use std::str::FromStr;
use tracing::warn;

use crate::common::validation::require;
use crate::common::ApiError;
use crate::domains::reactions::{ReactionCounter, ReactionKind};
use crate::server::app::AxumAppState;

#[derive(Debug, Deserialize)]
pub struct ReactionsQuery {
    pub slug: String,
}

/// GET /api/reactions?slug= — counters, zeros when nobody has reacted.
///
/// Read path: a store failure also degrades to zeros.
pub async fn get_reactions_handler(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<ReactionsQuery>,
) -> Result<Json<ReactionCounter>, ApiError> {
    require("slug", &query.slug)?;

    match ReactionCounter::find_or_zero(&query.slug, &state.db_pool).await {
        Ok(counter) => Ok(Json(counter)),
        Err(e) => {
            warn!(error = %e, slug = %query.slug, "Reaction lookup failed, serving zeros");
            Ok(Json(ReactionCounter {
                slug: query.slug,
                up_count: 0,
                down_count: 0,
                share_count: 0,
                updated_at: Utc::now(),
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddReactionInput {
    pub slug: String,
    pub kind: String,
}

/// POST /api/reactions — increment one counter.
pub async fn add_reaction_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<AddReactionInput>,
) -> Result<Json<ReactionCounter>, ApiError> {
    require("slug", &input.slug)?;
    let kind = ReactionKind::from_str(&input.kind)
        .map_err(|_| ApiError::Validation("kind".to_string()))?;

    let counter = ReactionCounter::increment(&input.slug, kind, &state.db_pool).await?;
    Ok(Json(counter))
}
