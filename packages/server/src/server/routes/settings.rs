use axum::extract::{Extension, Path};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::common::validation::{check_optional_url, require};
use crate::common::ApiError;
use crate::domains::settings::models::PromoCardInput;
use crate::domains::settings::{HeroImage, PromoCard, SiteVerification, StartCardImage};
use crate::server::app::AxumAppState;

/// Everything the frontend needs to render configurable chrome.
#[derive(Debug, Serialize)]
pub struct SiteSettingsData {
    pub hero_images: Vec<HeroImage>,
    pub promo_cards: Vec<PromoCard>,
    pub start_card_images: Vec<StartCardImage>,
    pub site_verifications: Vec<SiteVerification>,
}

/// GET /api/settings — all setting groups in one response.
///
/// Read path: each group degrades to empty independently.
pub async fn get_settings_handler(
    Extension(state): Extension<AxumAppState>,
) -> Json<SiteSettingsData> {
    let pool = &state.db_pool;

    let hero_images = HeroImage::list_all(pool).await.unwrap_or_else(|e| {
        warn!(error = %e, "Hero image query failed");
        Vec::new()
    });
    let promo_cards = PromoCard::list_all(pool).await.unwrap_or_else(|e| {
        warn!(error = %e, "Promo card query failed");
        Vec::new()
    });
    let start_card_images = StartCardImage::list_all(pool).await.unwrap_or_else(|e| {
        warn!(error = %e, "Start card query failed");
        Vec::new()
    });
    let site_verifications = SiteVerification::list_all(pool).await.unwrap_or_else(|e| {
        warn!(error = %e, "Site verification query failed");
        Vec::new()
    });

    Json(SiteSettingsData {
        hero_images,
        promo_cards,
        start_card_images,
        site_verifications,
    })
}

#[derive(Debug, Deserialize)]
pub struct KeyedImageInput {
    pub key: String,
    pub image_url: String,
}

/// PUT /api/admin/settings/hero-images
pub async fn put_hero_image_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<KeyedImageInput>,
) -> Result<Json<HeroImage>, ApiError> {
    require("key", &input.key)?;
    check_optional_url("image_url", Some(&input.image_url))?;
    require("image_url", &input.image_url)?;

    let image = HeroImage::upsert(&input.key, &input.image_url, &state.db_pool).await?;
    Ok(Json(image))
}

/// PUT /api/admin/settings/promo-cards/:slot
pub async fn put_promo_card_handler(
    Extension(state): Extension<AxumAppState>,
    Path(slot): Path<String>,
    Json(input): Json<PromoCardInput>,
) -> Result<Json<PromoCard>, ApiError> {
    require("title", &input.title)?;
    check_optional_url("link_url", input.link_url.as_deref())?;
    check_optional_url("image_url", input.image_url.as_deref())?;

    let card = PromoCard::upsert(&slot, &input, &state.db_pool).await?;
    Ok(Json(card))
}

/// PUT /api/admin/settings/start-cards
pub async fn put_start_card_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<KeyedImageInput>,
) -> Result<Json<StartCardImage>, ApiError> {
    require("key", &input.key)?;
    check_optional_url("image_url", Some(&input.image_url))?;
    require("image_url", &input.image_url)?;

    let image = StartCardImage::upsert(&input.key, &input.image_url, &state.db_pool).await?;
    Ok(Json(image))
}

#[derive(Debug, Deserialize)]
pub struct SiteVerificationInput {
    pub provider: String,
    pub content: String,
}

/// PUT /api/admin/settings/site-verifications
pub async fn put_site_verification_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<SiteVerificationInput>,
) -> Result<Json<SiteVerification>, ApiError> {
    require("provider", &input.provider)?;
    require("content", &input.content)?;

    let verification =
        SiteVerification::upsert(&input.provider, &input.content, &state.db_pool).await?;
    Ok(Json(verification))
}
