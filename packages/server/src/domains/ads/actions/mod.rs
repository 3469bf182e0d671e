//! Ad actions: placement resolution for public pages, CRUD for the admin.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::common::validation::{check_optional_url, require};
use crate::common::{AdId, ApiError};
use crate::domains::ads::data::ResolvedAdData;
use crate::domains::ads::models::{AffiliateAd, Placement};
use crate::kernel::ServerDeps;

/// Resolve a comma-separated placement list to active ads grouped by slot.
///
/// Unknown placement keys resolve to no ads rather than erroring; a slot
/// with no active ads is simply absent from the map.
pub async fn resolve_placements(
    raw_placements: &str,
    deps: &ServerDeps,
) -> Result<BTreeMap<String, Vec<ResolvedAdData>>, ApiError> {
    let placements: Vec<Placement> = raw_placements
        .split(',')
        .filter_map(|key| Placement::from_str(key.trim()).ok())
        .collect();

    if placements.is_empty() {
        return Ok(BTreeMap::new());
    }

    let ads =
        AffiliateAd::find_active_by_placements(&placements, &deps.schema, &deps.db_pool).await?;

    let mut grouped: BTreeMap<String, Vec<ResolvedAdData>> = BTreeMap::new();
    for ad in ads {
        grouped
            .entry(ad.placement.clone())
            .or_default()
            .push(ResolvedAdData::from(ad));
    }

    Ok(grouped)
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdInput {
    pub title: String,
    pub link: String,
    pub placement: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub partner: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Admin create. Requires the fully migrated schema (startup migrations
/// guarantee it for any instance that can serve the admin).
pub async fn create_ad(input: CreateAdInput, pool: &PgPool) -> Result<AffiliateAd, ApiError> {
    require("title", &input.title)?;
    check_optional_url("link", Some(&input.link))?;
    require("link", &input.link)?;

    let placement = Placement::from_str(&input.placement)
        .map_err(|_| ApiError::Validation("placement".to_string()))?;

    let ad = sqlx::query_as::<_, AffiliateAd>(
        r#"
        INSERT INTO affiliate_ads
            (id, title, subtitle, button_text, link, image_url, placement, partner, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(AdId::new())
    .bind(&input.title)
    .bind(&input.subtitle)
    .bind(&input.button_text)
    .bind(&input.link)
    .bind(&input.image_url)
    .bind(placement.to_string())
    .bind(&input.partner)
    .bind(input.is_active)
    .fetch_one(pool)
    .await?;

    info!(ad_id = %ad.id, placement = %ad.placement, "Ad created");

    Ok(ad)
}

/// Partial update: absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAdInput {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub button_text: Option<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub placement: Option<String>,
    pub partner: Option<String>,
    pub is_active: Option<bool>,
}

pub async fn update_ad(
    id: AdId,
    input: UpdateAdInput,
    pool: &PgPool,
) -> Result<AffiliateAd, ApiError> {
    if let Some(placement) = &input.placement {
        Placement::from_str(placement)
            .map_err(|_| ApiError::Validation("placement".to_string()))?;
    }
    if let Some(link) = &input.link {
        check_optional_url("link", Some(link))?;
    }

    let ad = sqlx::query_as::<_, AffiliateAd>(
        r#"
        UPDATE affiliate_ads
        SET title = COALESCE($2, title),
            subtitle = COALESCE($3, subtitle),
            button_text = COALESCE($4, button_text),
            link = COALESCE($5, link),
            image_url = COALESCE($6, image_url),
            placement = COALESCE($7, placement),
            partner = COALESCE($8, partner),
            is_active = COALESCE($9, is_active)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&input.title)
    .bind(&input.subtitle)
    .bind(&input.button_text)
    .bind(&input.link)
    .bind(&input.image_url)
    .bind(&input.placement)
    .bind(&input.partner)
    .bind(input.is_active)
    .fetch_optional(pool)
    .await?
    .ok_or(ApiError::NotFound("ad"))?;

    Ok(ad)
}

/// "Delete" deactivates: the row stays for bookkeeping, placement lookups
/// stop returning it.
pub async fn deactivate_ad(id: AdId, pool: &PgPool) -> Result<AffiliateAd, ApiError> {
    let ad = sqlx::query_as::<_, AffiliateAd>(
        r#"
        UPDATE affiliate_ads
        SET is_active = FALSE
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(ApiError::NotFound("ad"))?;

    info!(ad_id = %ad.id, "Ad deactivated");

    Ok(ad)
}
