//! Integration tests for ad placement resolution and the blog slug-upsert.

mod common;

use test_context::test_context;

use crate::common::TestHarness;
use server_core::domains::ads::actions::{
    create_ad, deactivate_ad, resolve_placements, CreateAdInput,
};
use server_core::domains::ads::models::{AffiliateAd, Placement};
use server_core::domains::blog::actions::{upsert_post, BlogPostInput};
use server_core::domains::blog::models::BlogPost;
use server_core::kernel::SchemaCapabilities;

fn ad_input(title: &str, placement: Placement) -> CreateAdInput {
    CreateAdInput {
        title: title.to_string(),
        link: "https://partner.example.com".to_string(),
        placement: placement.to_string(),
        subtitle: None,
        button_text: None,
        image_url: None,
        partner: None,
        is_active: true,
    }
}

fn post_input(slug: &str, title: &str, status: &str) -> BlogPostInput {
    BlogPostInput {
        slug: slug.to_string(),
        title: title.to_string(),
        category: "Guides".to_string(),
        status: status.to_string(),
        body: "Body text.".to_string(),
        excerpt: None,
        meta_title: None,
        meta_description: None,
        hero_image_url: None,
        ad_embed_code: None,
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn placement_resolution_filters_inactive_ads(ctx: &TestHarness) {
    let deps = ctx.deps();

    let active = create_ad(
        ad_input("Lodging A", Placement::VisitLodging),
        &ctx.db_pool,
    )
    .await
    .unwrap();
    let inactive = create_ad(
        CreateAdInput {
            is_active: false,
            ..ad_input("Lodging B", Placement::VisitLodging)
        },
        &ctx.db_pool,
    )
    .await
    .unwrap();

    let grouped = resolve_placements("visit_lodging", &deps).await.unwrap();
    let resolved = &grouped["visit_lodging"];

    assert!(resolved.iter().any(|ad| ad.id == active.id.to_string()));
    assert!(!resolved.iter().any(|ad| ad.id == inactive.id.to_string()));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_placement_keys_resolve_to_nothing(ctx: &TestHarness) {
    let deps = ctx.deps();
    let grouped = resolve_placements("not_a_slot,also_wrong", &deps)
        .await
        .unwrap();
    assert!(grouped.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn resolved_ads_carry_a_button_label(ctx: &TestHarness) {
    let deps = ctx.deps();

    let ad = create_ad(
        CreateAdInput {
            partner: Some("Harborview Inn".to_string()),
            ..ad_input("Stay the night", Placement::EventsTickets)
        },
        &ctx.db_pool,
    )
    .await
    .unwrap();

    let grouped = resolve_placements("events_tickets", &deps).await.unwrap();
    let resolved = grouped["events_tickets"]
        .iter()
        .find(|a| a.id == ad.id.to_string())
        .expect("created ad should resolve");

    assert_eq!(resolved.button_text, "Open Harborview Inn");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn old_schema_capabilities_substitute_nulls(ctx: &TestHarness) {
    let ad = create_ad(
        CreateAdInput {
            subtitle: Some("Right on the water".to_string()),
            partner: Some("Gull Rock".to_string()),
            ..ad_input("Old schema probe", Placement::StartPromo)
        },
        &ctx.db_pool,
    )
    .await
    .unwrap();

    // Pretend the probe found a pre-migration store
    let old_caps = SchemaCapabilities {
        ads_has_subtitle: false,
        ads_has_partner: false,
    };
    let ads =
        AffiliateAd::find_active_by_placements(&[Placement::StartPromo], &old_caps, &ctx.db_pool)
            .await
            .unwrap();

    let found = ads
        .iter()
        .find(|a| a.id == ad.id)
        .expect("ad should still be served");
    assert_eq!(found.subtitle, None);
    assert_eq!(found.partner, None);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn deactivated_ads_stop_resolving(ctx: &TestHarness) {
    let deps = ctx.deps();
    let ad = create_ad(ad_input("Soon gone", Placement::BlogInline), &ctx.db_pool)
        .await
        .unwrap();

    deactivate_ad(ad.id, &ctx.db_pool).await.unwrap();

    let grouped = resolve_placements("blog_inline", &deps).await.unwrap();
    let still_there = grouped
        .get("blog_inline")
        .map(|ads| ads.iter().any(|a| a.id == ad.id.to_string()))
        .unwrap_or(false);
    assert!(!still_there);
}

// =============================================================================
// Blog
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn publishing_stamps_published_at_once(ctx: &TestHarness) {
    let post = upsert_post(
        "winter-harbor-walks",
        post_input("winter-harbor-walks", "Winter Harbor Walks", "published"),
        &ctx.db_pool,
    )
    .await
    .unwrap();
    let first_published_at = post.published_at.expect("publishing should stamp the time");

    // A later edit keeps the original publication time
    let edited = upsert_post(
        "winter-harbor-walks",
        post_input("winter-harbor-walks", "Winter Harbor Walks, Updated", "published"),
        &ctx.db_pool,
    )
    .await
    .unwrap();

    assert_eq!(edited.id, post.id);
    assert_eq!(edited.published_at, Some(first_published_at));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn rename_via_previous_slug_keeps_the_post_identity(ctx: &TestHarness) {
    let post = upsert_post(
        "old-lighthouse-guide",
        post_input("old-lighthouse-guide", "Lighthouse Guide", "draft"),
        &ctx.db_pool,
    )
    .await
    .unwrap();

    let renamed = upsert_post(
        "old-lighthouse-guide",
        post_input("new-lighthouse-guide", "Lighthouse Guide", "draft"),
        &ctx.db_pool,
    )
    .await
    .unwrap();

    assert_eq!(renamed.id, post.id);
    assert_eq!(renamed.slug, "new-lighthouse-guide");
    assert!(BlogPost::find_by_slug("old-lighthouse-guide", &ctx.db_pool)
        .await
        .unwrap()
        .is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unmatched_previous_slug_falls_back_to_the_new_slug(ctx: &TestHarness) {
    let existing = upsert_post(
        "smoked-fish-primer",
        post_input("smoked-fish-primer", "Smoked Fish Primer", "draft"),
        &ctx.db_pool,
    )
    .await
    .unwrap();

    // Previous slug matches nothing, but the new slug already exists: the
    // fallback upsert-by-new-slug must update that row, not error.
    let updated = upsert_post(
        "never-existed",
        post_input("smoked-fish-primer", "Smoked Fish Primer v2", "draft"),
        &ctx.db_pool,
    )
    .await
    .unwrap();

    assert_eq!(updated.id, existing.id);
    assert_eq!(updated.title, "Smoked Fish Primer v2");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn public_reads_exclude_drafts(ctx: &TestHarness) {
    let draft = upsert_post(
        "unfinished-ferry-notes",
        post_input("unfinished-ferry-notes", "Ferry Notes", "draft"),
        &ctx.db_pool,
    )
    .await
    .unwrap();

    assert!(
        BlogPost::find_published_by_slug(&draft.slug, &ctx.db_pool)
            .await
            .unwrap()
            .is_none()
    );

    let published = BlogPost::find_published(50, &ctx.db_pool).await.unwrap();
    assert!(!published.iter().any(|p| p.id == draft.id));
}
