//! Integration tests for the business directory moderation workflow:
//! intake, approve (listing derivation), reject (retraction), and the
//! idempotency guarantees around re-running transitions.

mod common;

use crate::common::{business_input, TestHarness};
use server_core::common::{ApiError, SubmissionId};
use server_core::domains::directory::actions::{
    approve_business_submission, create_listing, reject_business_submission, submit_business,
    CreateListingInput,
};
use server_core::domains::directory::models::BusinessListing;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn new_business_happy_path(ctx: &TestHarness) {
    // Submit: the created row is pending
    let submission = submit_business(business_input("Calm Corner Coffee"), &ctx.db_pool)
        .await
        .expect("intake should accept a valid submission");
    assert_eq!(submission.status, "pending");

    // Approve: a published listing is derived with the expected slug
    let (submission, listing) = approve_business_submission(submission.id, &ctx.db_pool)
        .await
        .expect("approval should succeed");
    assert_eq!(submission.status, "approved");
    assert_eq!(listing.slug, "calm-corner-coffee");
    assert!(listing.is_published);
    assert_eq!(listing.source_submission_id, Some(submission.id));

    // The public query serves it
    let published = BusinessListing::find_published(100, &ctx.db_pool)
        .await
        .unwrap();
    assert!(published.iter().any(|l| l.id == listing.id));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn reapproval_updates_the_same_listing(ctx: &TestHarness) {
    let submission = submit_business(business_input("Tidewater Books"), &ctx.db_pool)
        .await
        .unwrap();

    let (_, first) = approve_business_submission(submission.id, &ctx.db_pool)
        .await
        .unwrap();
    let (_, second) = approve_business_submission(submission.id, &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.slug, second.slug);

    // Exactly one listing row traces back to this submission
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM business_listings WHERE source_submission_id = $1",
    )
    .bind(submission.id)
    .fetch_one(&ctx.db_pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn identical_names_get_suffixed_slugs(ctx: &TestHarness) {
    let mut slugs = Vec::new();
    for _ in 0..3 {
        let submission = submit_business(business_input("Harbor Lights Gallery"), &ctx.db_pool)
            .await
            .unwrap();
        let (_, listing) = approve_business_submission(submission.id, &ctx.db_pool)
            .await
            .unwrap();
        slugs.push(listing.slug);
    }

    assert_eq!(
        slugs,
        vec![
            "harbor-lights-gallery",
            "harbor-lights-gallery-2",
            "harbor-lights-gallery-3",
        ]
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn rejection_retracts_the_published_listing(ctx: &TestHarness) {
    let submission = submit_business(business_input("Driftwood Outfitters"), &ctx.db_pool)
        .await
        .unwrap();
    let (_, listing) = approve_business_submission(submission.id, &ctx.db_pool)
        .await
        .unwrap();

    let rejected = reject_business_submission(submission.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(rejected.status, "rejected");

    // Gone from the public set, by listing and by slug
    let published = BusinessListing::find_published(100, &ctx.db_pool)
        .await
        .unwrap();
    assert!(!published.iter().any(|l| l.id == listing.id));
    assert!(
        BusinessListing::find_published_by_slug(&listing.slug, &ctx.db_pool)
            .await
            .unwrap()
            .is_none()
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn rejected_then_approved_republishes_the_same_listing(ctx: &TestHarness) {
    let submission = submit_business(business_input("North Pier Chandlery"), &ctx.db_pool)
        .await
        .unwrap();

    let (_, original) = approve_business_submission(submission.id, &ctx.db_pool)
        .await
        .unwrap();
    reject_business_submission(submission.id, &ctx.db_pool)
        .await
        .unwrap();
    let (submission, republished) = approve_business_submission(submission.id, &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(submission.status, "approved");
    assert_eq!(original.id, republished.id);
    assert!(republished.is_published);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn approved_claim_updates_the_claimed_listing(ctx: &TestHarness) {
    // An existing listing, created by an earlier approval
    let submission = submit_business(business_input("Rusty Anchor Tavern"), &ctx.db_pool)
        .await
        .unwrap();
    let (_, listing) = approve_business_submission(submission.id, &ctx.db_pool)
        .await
        .unwrap();

    // The owner claims it with corrected details
    let mut claim = business_input("Rusty Anchor Tavern");
    claim.mode = "claim".to_string();
    claim.linked_listing_id = Some(listing.id);
    claim.address = "7 Dock Street".to_string();
    let claim = submit_business(claim, &ctx.db_pool).await.unwrap();

    let (_, claimed) = approve_business_submission(claim.id, &ctx.db_pool)
        .await
        .unwrap();

    // Same listing row, updated fields, no duplicate
    assert_eq!(claimed.id, listing.id);
    assert_eq!(claimed.address, "7 Dock Street");
    assert_eq!(claimed.source_submission_id, Some(claim.id));

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM business_listings WHERE slug LIKE 'rusty-anchor-tavern%'")
            .fetch_one(&ctx.db_pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn approving_an_unknown_submission_is_not_found(ctx: &TestHarness) {
    let missing = SubmissionId::new();
    let result = approve_business_submission(missing, &ctx.db_pool).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn admin_created_listing_is_published_with_suffixed_slug(ctx: &TestHarness) {
    let input = CreateListingInput {
        name: "Gull Rock Kayaks".to_string(),
        category: "Do & See".to_string(),
        address: "14 Shore Rd".to_string(),
        price_level: Some(2),
        phone: None,
        website_url: Some("https://gullrock.example.com".to_string()),
        image_url: None,
        audience: Vec::new(),
        tags: vec!["outdoors".to_string()],
    };

    let first = create_listing(input.clone(), &ctx.db_pool).await.unwrap();
    let second = create_listing(input, &ctx.db_pool).await.unwrap();

    assert_eq!(first.slug, "gull-rock-kayaks");
    assert_eq!(second.slug, "gull-rock-kayaks-2");
    assert!(first.is_published && second.is_published);
    assert_eq!(first.price_level, 2);
    assert_eq!(first.source_submission_id, None);
}
