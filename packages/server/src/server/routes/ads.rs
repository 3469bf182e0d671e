use std::collections::BTreeMap;

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::common::{AdId, ApiError};
use crate::domains::ads::actions::{
    create_ad, deactivate_ad, resolve_placements, update_ad, CreateAdInput, UpdateAdInput,
};
use crate::domains::ads::data::ResolvedAdData;
use crate::domains::ads::models::AffiliateAd;
use crate::server::app::AxumAppState;

#[derive(Debug, Deserialize)]
pub struct AdsQuery {
    /// Comma-separated placement keys.
    #[serde(default)]
    pub placements: String,
}

/// GET /api/ads?placements=a,b,c — active ads grouped by placement.
///
/// Read path: a store failure degrades to an empty map so a page render
/// never breaks over its ad slots.
pub async fn get_ads_handler(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<AdsQuery>,
) -> Json<BTreeMap<String, Vec<ResolvedAdData>>> {
    match resolve_placements(&query.placements, &state.deps).await {
        Ok(grouped) => Json(grouped),
        Err(e) => {
            warn!(error = %e, "Ad placement resolution failed, serving no ads");
            Json(BTreeMap::new())
        }
    }
}

/// GET /api/admin/ads
pub async fn admin_list_ads_handler(
    Extension(state): Extension<AxumAppState>,
) -> Result<Json<Vec<AffiliateAd>>, ApiError> {
    let ads = AffiliateAd::find_all(&state.db_pool).await?;
    Ok(Json(ads))
}

/// POST /api/admin/ads
pub async fn admin_create_ad_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<CreateAdInput>,
) -> Result<(StatusCode, Json<AffiliateAd>), ApiError> {
    let ad = create_ad(input, &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(ad)))
}

/// PATCH /api/admin/ads/:id
pub async fn admin_update_ad_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateAdInput>,
) -> Result<Json<AffiliateAd>, ApiError> {
    let ad = update_ad(AdId::from_uuid(id), input, &state.db_pool).await?;
    Ok(Json(ad))
}

/// DELETE /api/admin/ads/:id — deactivates rather than deletes.
pub async fn admin_delete_ad_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AffiliateAd>, ApiError> {
    let ad = deactivate_ad(AdId::from_uuid(id), &state.db_pool).await?;
    Ok(Json(ad))
}
