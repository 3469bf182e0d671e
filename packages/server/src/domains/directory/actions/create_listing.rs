//! Admin shortcut: create a published listing directly, skipping the
//! submission workflow.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use super::moderation::next_free_slug;
use crate::common::slug::slugify_or_placeholder;
use crate::common::validation::{check_optional_url, require};
use crate::common::{ApiError, ListingId};
use crate::domains::directory::models::BusinessListing;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateListingInput {
    pub name: String,
    pub category: String,
    pub address: String,
    #[serde(default)]
    pub price_level: Option<i32>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub audience: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub async fn create_listing(
    input: CreateListingInput,
    pool: &PgPool,
) -> Result<BusinessListing, ApiError> {
    require("name", &input.name)?;
    require("category", &input.category)?;
    require("address", &input.address)?;
    check_optional_url("website_url", input.website_url.as_deref())?;

    let price_level = input.price_level.unwrap_or(1);
    if !(1..=4).contains(&price_level) {
        return Err(ApiError::Validation("price_level".to_string()));
    }

    let mut tx = pool.begin().await?;

    let slug = next_free_slug(slugify_or_placeholder(&input.name), &mut tx).await?;

    let listing = sqlx::query_as::<_, BusinessListing>(
        r#"
        INSERT INTO business_listings
            (id, slug, name, category, price_level, address, phone, website_url,
             image_url, audience, tags, is_published)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, TRUE)
        RETURNING *
        "#,
    )
    .bind(ListingId::new())
    .bind(&slug)
    .bind(&input.name)
    .bind(&input.category)
    .bind(price_level)
    .bind(&input.address)
    .bind(&input.phone)
    .bind(&input.website_url)
    .bind(&input.image_url)
    .bind(&input.audience)
    .bind(&input.tags)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(listing_id = %listing.id, slug = %listing.slug, "Listing created by admin");

    Ok(listing)
}
