use axum::extract::{Extension, Path, Query};
use axum::Json;
use serde::Deserialize;
use tracing::warn;

use crate::common::ApiError;
use crate::domains::blog::actions::{upsert_post, BlogPostInput};
use crate::domains::blog::models::BlogPost;
use crate::server::app::AxumAppState;

const DEFAULT_PAGE_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct BlogListQuery {
    pub limit: Option<i64>,
}

/// GET /api/blog — published posts, newest first.
pub async fn list_blog_handler(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<BlogListQuery>,
) -> Json<Vec<BlogPost>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, DEFAULT_PAGE_LIMIT);

    match BlogPost::find_published(limit, &state.db_pool).await {
        Ok(posts) => Json(posts),
        Err(e) => {
            warn!(error = %e, "Blog listing query failed, serving empty page");
            Json(Vec::new())
        }
    }
}

/// GET /api/blog/:slug — a single published post.
pub async fn get_blog_post_handler(
    Extension(state): Extension<AxumAppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    match BlogPost::find_published_by_slug(&slug, &state.db_pool).await {
        Ok(Some(post)) => Ok(Json(post)),
        Ok(None) => Err(ApiError::NotFound("blog post")),
        Err(e) => {
            warn!(error = %e, slug = %slug, "Blog post lookup failed");
            Err(ApiError::NotFound("blog post"))
        }
    }
}

/// PUT /api/admin/blog/:slug — upsert addressed by the post's previous slug.
pub async fn admin_upsert_blog_handler(
    Extension(state): Extension<AxumAppState>,
    Path(previous_slug): Path<String>,
    Json(input): Json<BlogPostInput>,
) -> Result<Json<BlogPost>, ApiError> {
    let post = upsert_post(&previous_slug, input, &state.db_pool).await?;
    Ok(Json(post))
}
