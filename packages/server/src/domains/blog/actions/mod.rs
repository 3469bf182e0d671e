//! Blog actions: the admin upsert that keeps slugs stable across edits.

use serde::Deserialize;
use sqlx::PgPool;
use std::str::FromStr;
use tracing::info;

use crate::common::slug::slugify;
use crate::common::validation::require;
use crate::common::{ApiError, BlogPostId};
use crate::domains::blog::models::{BlogPost, BlogPostStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct BlogPostInput {
    /// The slug the post should have after this write. Usually equal to the
    /// previous slug; differing means an explicit rename.
    pub slug: String,
    pub title: String,
    pub category: String,
    pub status: String,
    pub body: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub hero_image_url: Option<String>,
    #[serde(default)]
    pub ad_embed_code: Option<String>,
}

/// Upsert a post addressed by its previous slug.
///
/// The row matching `previous_slug` is updated (this is how a rename keeps
/// the same post identity). When nothing matched — a brand-new post, or an
/// admin editing under the new name already — fall back to upserting by the
/// new slug.
pub async fn upsert_post(
    previous_slug: &str,
    input: BlogPostInput,
    pool: &PgPool,
) -> Result<BlogPost, ApiError> {
    require("title", &input.title)?;
    require("category", &input.category)?;
    require("body", &input.body)?;

    let status = BlogPostStatus::from_str(&input.status)
        .map_err(|_| ApiError::Validation("status".to_string()))?;

    let slug = slugify(&input.slug);
    if slug.is_empty() {
        return Err(ApiError::Validation("slug".to_string()));
    }

    let updated = sqlx::query_as::<_, BlogPost>(
        r#"
        UPDATE blog_posts
        SET slug = $2,
            title = $3,
            category = $4,
            status = $5,
            excerpt = $6,
            body = $7,
            meta_title = $8,
            meta_description = $9,
            hero_image_url = $10,
            ad_embed_code = $11,
            published_at = CASE
                WHEN $5 = 'published' AND published_at IS NULL THEN NOW()
                ELSE published_at
            END,
            updated_at = NOW()
        WHERE slug = $1
        RETURNING *
        "#,
    )
    .bind(previous_slug)
    .bind(&slug)
    .bind(&input.title)
    .bind(&input.category)
    .bind(status.to_string())
    .bind(&input.excerpt)
    .bind(&input.body)
    .bind(&input.meta_title)
    .bind(&input.meta_description)
    .bind(&input.hero_image_url)
    .bind(&input.ad_embed_code)
    .fetch_optional(pool)
    .await?;

    if let Some(post) = updated {
        info!(post_id = %post.id, slug = %post.slug, "Blog post updated");
        return Ok(post);
    }

    let post = sqlx::query_as::<_, BlogPost>(
        r#"
        INSERT INTO blog_posts
            (id, slug, title, category, status, excerpt, body, meta_title,
             meta_description, hero_image_url, ad_embed_code, published_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                CASE WHEN $5 = 'published' THEN NOW() ELSE NULL END)
        ON CONFLICT (slug) DO UPDATE
        SET title = EXCLUDED.title,
            category = EXCLUDED.category,
            status = EXCLUDED.status,
            excerpt = EXCLUDED.excerpt,
            body = EXCLUDED.body,
            meta_title = EXCLUDED.meta_title,
            meta_description = EXCLUDED.meta_description,
            hero_image_url = EXCLUDED.hero_image_url,
            ad_embed_code = EXCLUDED.ad_embed_code,
            published_at = CASE
                WHEN EXCLUDED.status = 'published' AND blog_posts.published_at IS NULL
                    THEN NOW()
                ELSE blog_posts.published_at
            END,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(BlogPostId::new())
    .bind(&slug)
    .bind(&input.title)
    .bind(&input.category)
    .bind(status.to_string())
    .bind(&input.excerpt)
    .bind(&input.body)
    .bind(&input.meta_title)
    .bind(&input.meta_description)
    .bind(&input.hero_image_url)
    .bind(&input.ad_embed_code)
    .fetch_one(pool)
    .await?;

    info!(post_id = %post.id, slug = %post.slug, "Blog post created");

    Ok(post)
}
