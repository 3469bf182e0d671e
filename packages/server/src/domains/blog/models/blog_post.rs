use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::BlogPostId;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub slug: String,
    pub title: String,
    pub category: String,
    pub status: String, // 'draft' | 'published'
    pub excerpt: Option<String>,
    pub body: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub hero_image_url: Option<String>,
    /// Raw ad-embed snippet rendered inside the post body, if any.
    pub ad_embed_code: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlogPostStatus {
    Draft,
    Published,
}

impl std::fmt::Display for BlogPostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlogPostStatus::Draft => write!(f, "draft"),
            BlogPostStatus::Published => write!(f, "published"),
        }
    }
}

impl std::str::FromStr for BlogPostStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(BlogPostStatus::Draft),
            "published" => Ok(BlogPostStatus::Published),
            _ => Err(anyhow::anyhow!("Invalid blog post status: {}", s)),
        }
    }
}

impl BlogPost {
    /// Public read path: published posts, most recently published first.
    pub async fn find_published(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let posts = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT * FROM blog_posts
            WHERE status = 'published'
            ORDER BY published_at DESC NULLS LAST
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(posts)
    }

    pub async fn find_published_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT * FROM blog_posts
            WHERE slug = $1 AND status = 'published'
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(post)
    }

    /// Admin view: any status.
    pub async fn find_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT * FROM blog_posts
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(post)
    }
}
