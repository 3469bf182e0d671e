//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::kernel::ServerDeps;
use crate::server::middleware::admin_auth_middleware;
use crate::server::routes::{
    ads, analytics, blog, directory, events, health::health_handler, reactions, settings,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
///
/// Three route groups: public reads, rate-limited public intake, and
/// token-gated admin operations (moderation, curation, the analytics
/// dashboard).
pub fn build_app(pool: PgPool, deps: Arc<ServerDeps>, config: &Config) -> Router {
    let state = AxumAppState {
        db_pool: pool,
        deps,
    };

    // CORS: explicit origins in production, any origin for development
    let allow_origin = if config.allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-admin-token"),
        ]);

    // Rate limiting for the public intake endpoints: they take anonymous
    // form posts from the open internet.
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(10)
            .use_headers() // Extract IP from X-Forwarded-For header
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );
    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    let intake_routes = Router::new()
        .route(
            "/api/business-submissions",
            post(directory::submit_business_handler),
        )
        .route("/api/event-submissions", post(events::submit_event_handler))
        .route(
            "/api/analytics/events",
            post(analytics::record_event_handler),
        )
        .layer(rate_limit_layer);

    let admin_token = Arc::new(config.admin_token.clone());
    let admin_routes = Router::new()
        .route(
            "/api/business-submissions/:id/status",
            post(directory::business_submission_status_handler),
        )
        .route(
            "/api/event-submissions/:id/status",
            post(events::event_submission_status_handler),
        )
        .route(
            "/api/admin/business-submissions",
            get(directory::admin_list_business_submissions_handler),
        )
        .route(
            "/api/admin/event-submissions",
            get(events::admin_list_event_submissions_handler),
        )
        .route(
            "/api/admin/listings",
            post(directory::admin_create_listing_handler),
        )
        .route(
            "/api/admin/ads",
            get(ads::admin_list_ads_handler).post(ads::admin_create_ad_handler),
        )
        .route(
            "/api/admin/ads/:id",
            patch(ads::admin_update_ad_handler).delete(ads::admin_delete_ad_handler),
        )
        .route("/api/admin/blog/:slug", put(blog::admin_upsert_blog_handler))
        .route(
            "/api/admin/settings/hero-images",
            put(settings::put_hero_image_handler),
        )
        .route(
            "/api/admin/settings/promo-cards/:slot",
            put(settings::put_promo_card_handler),
        )
        .route(
            "/api/admin/settings/start-cards",
            put(settings::put_start_card_handler),
        )
        .route(
            "/api/admin/settings/site-verifications",
            put(settings::put_site_verification_handler),
        )
        .route("/api/analytics/summary", get(analytics::summary_handler))
        .layer(middleware::from_fn(move |req, next| {
            admin_auth_middleware(admin_token.clone(), req, next)
        }));

    Router::new()
        .route("/api/listings", get(directory::list_listings_handler))
        .route("/api/listings/:slug", get(directory::get_listing_handler))
        .route("/api/events", get(events::public_events_handler))
        .route("/api/ads", get(ads::get_ads_handler))
        .route("/api/blog", get(blog::list_blog_handler))
        .route("/api/blog/:slug", get(blog::get_blog_post_handler))
        .route(
            "/api/reactions",
            get(reactions::get_reactions_handler).post(reactions::add_reaction_handler),
        )
        .route("/api/settings", get(settings::get_settings_handler))
        .route("/health", get(health_handler))
        .merge(intake_routes)
        .merge(admin_routes)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
