use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Hero image for a public page, keyed by page.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HeroImage {
    pub page_key: String,
    pub image_url: String,
    pub updated_at: DateTime<Utc>,
}

impl HeroImage {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>> {
        let images = sqlx::query_as::<_, HeroImage>(
            r#"
            SELECT * FROM hero_images
            ORDER BY page_key ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(images)
    }

    pub async fn upsert(page_key: &str, image_url: &str, pool: &PgPool) -> Result<Self> {
        let image = sqlx::query_as::<_, HeroImage>(
            r#"
            INSERT INTO hero_images (page_key, image_url)
            VALUES ($1, $2)
            ON CONFLICT (page_key) DO UPDATE
            SET image_url = EXCLUDED.image_url, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(page_key)
        .bind(image_url)
        .fetch_one(pool)
        .await?;

        Ok(image)
    }
}

/// Configurable promo card for a named slot on the site.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PromoCard {
    pub slot: String,
    pub title: String,
    pub body: Option<String>,
    pub link_url: Option<String>,
    pub link_label: Option<String>,
    pub image_url: Option<String>,
    pub is_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload for a promo card; the slot comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct PromoCardInput {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub link_label: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl PromoCard {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>> {
        let cards = sqlx::query_as::<_, PromoCard>(
            r#"
            SELECT * FROM promo_cards
            ORDER BY slot ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(cards)
    }

    pub async fn upsert(slot: &str, input: &PromoCardInput, pool: &PgPool) -> Result<Self> {
        let card = sqlx::query_as::<_, PromoCard>(
            r#"
            INSERT INTO promo_cards
                (slot, title, body, link_url, link_label, image_url, is_enabled)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (slot) DO UPDATE
            SET title = EXCLUDED.title,
                body = EXCLUDED.body,
                link_url = EXCLUDED.link_url,
                link_label = EXCLUDED.link_label,
                image_url = EXCLUDED.image_url,
                is_enabled = EXCLUDED.is_enabled,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(slot)
        .bind(&input.title)
        .bind(&input.body)
        .bind(&input.link_url)
        .bind(&input.link_label)
        .bind(&input.image_url)
        .bind(input.is_enabled)
        .fetch_one(pool)
        .await?;

        Ok(card)
    }
}

/// Image for one card on the start page.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StartCardImage {
    pub card_key: String,
    pub image_url: String,
    pub updated_at: DateTime<Utc>,
}

impl StartCardImage {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>> {
        let images = sqlx::query_as::<_, StartCardImage>(
            r#"
            SELECT * FROM start_card_images
            ORDER BY card_key ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(images)
    }

    pub async fn upsert(card_key: &str, image_url: &str, pool: &PgPool) -> Result<Self> {
        let image = sqlx::query_as::<_, StartCardImage>(
            r#"
            INSERT INTO start_card_images (card_key, image_url)
            VALUES ($1, $2)
            ON CONFLICT (card_key) DO UPDATE
            SET image_url = EXCLUDED.image_url, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(card_key)
        .bind(image_url)
        .fetch_one(pool)
        .await?;

        Ok(image)
    }
}

/// Search-engine site-verification snippet, keyed by provider.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SiteVerification {
    pub provider: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl SiteVerification {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>> {
        let verifications = sqlx::query_as::<_, SiteVerification>(
            r#"
            SELECT * FROM site_verifications
            ORDER BY provider ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(verifications)
    }

    pub async fn upsert(provider: &str, content: &str, pool: &PgPool) -> Result<Self> {
        let verification = sqlx::query_as::<_, SiteVerification>(
            r#"
            INSERT INTO site_verifications (provider, content)
            VALUES ($1, $2)
            ON CONFLICT (provider) DO UPDATE
            SET content = EXCLUDED.content, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(provider)
        .bind(content)
        .fetch_one(pool)
        .await?;

        Ok(verification)
    }
}
