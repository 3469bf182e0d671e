//! Integration tests for event-submission moderation: the invalid-id guard,
//! status transitions with review stamps, and the admin token gate.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use test_context::test_context;
use tower::ServiceExt;

use crate::common::{event_input, TestHarness, TEST_ADMIN_TOKEN};
use server_core::common::{ApiError, ModerationStatus};
use server_core::domains::events::actions::{
    moderate_event_submission, parse_event_submission_id, submit_event,
};
use server_core::domains::events::models::EventSubmission;

#[test_context(TestHarness)]
#[tokio::test]
async fn sentinel_and_malformed_ids_are_refused(ctx: &TestHarness) {
    let deps = ctx.deps();

    for raw in ["", "  ", "undefined", "not-a-uuid"] {
        assert!(
            matches!(parse_event_submission_id(raw), Err(ApiError::InvalidId(_))),
            "expected InvalidId for {:?}",
            raw
        );

        let result =
            moderate_event_submission(raw, ModerationStatus::Approved, false, &deps).await;
        assert!(
            matches!(result, Err(ApiError::InvalidId(_))),
            "expected InvalidId for {:?}",
            raw
        );
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn invalid_id_performs_no_store_mutation(ctx: &TestHarness) {
    let deps = ctx.deps();
    let submission = submit_event(event_input("Fish Fry Friday"), &ctx.db_pool)
        .await
        .unwrap();

    let _ = moderate_event_submission("undefined", ModerationStatus::Approved, false, &deps).await;

    let unchanged = EventSubmission::find_by_id(submission.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.status, "pending");
    assert!(unchanged.last_reviewed_at.is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn approval_stamps_the_review_time(ctx: &TestHarness) {
    let deps = ctx.deps();
    let submission = submit_event(event_input("Harbor Days Parade"), &ctx.db_pool)
        .await
        .unwrap();
    assert!(submission.last_reviewed_at.is_none());

    let approved = moderate_event_submission(
        &submission.id.to_string(),
        ModerationStatus::Approved,
        true, // exercises the fire-and-forget notification path (no-op mailer)
        &deps,
    )
    .await
    .unwrap();

    assert_eq!(approved.status, "approved");
    assert!(approved.last_reviewed_at.is_some());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn rejection_is_a_status_flag_not_a_removal(ctx: &TestHarness) {
    let deps = ctx.deps();
    let submission = submit_event(event_input("Late Night Market"), &ctx.db_pool)
        .await
        .unwrap();

    let rejected = moderate_event_submission(
        &submission.id.to_string(),
        ModerationStatus::Rejected,
        false,
        &deps,
    )
    .await
    .unwrap();
    assert_eq!(rejected.status, "rejected");

    // The row is still there for the admin queue
    assert!(EventSubmission::find_by_id(submission.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_some());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn moderating_back_to_pending_is_refused(ctx: &TestHarness) {
    let deps = ctx.deps();
    let submission = submit_event(event_input("Trivia Night"), &ctx.db_pool)
        .await
        .unwrap();

    let result = moderate_event_submission(
        &submission.id.to_string(),
        ModerationStatus::Pending,
        false,
        &deps,
    )
    .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_id_is_not_found(ctx: &TestHarness) {
    let deps = ctx.deps();
    let result = moderate_event_submission(
        "00000000-0000-0000-0000-00000000beef",
        ModerationStatus::Approved,
        false,
        &deps,
    )
    .await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

// =============================================================================
// Router-level contract
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn status_route_refuses_the_undefined_sentinel(ctx: &TestHarness) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/event-submissions/undefined/status")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", TEST_ADMIN_TOKEN))
        .body(Body::from(
            json!({ "status": "approved", "send_email": false }).to_string(),
        ))
        .unwrap();

    let response = ctx.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn moderation_routes_require_the_admin_token(ctx: &TestHarness) {
    let submission = submit_event(event_input("Gated Event"), &ctx.db_pool)
        .await
        .unwrap();
    let uri = format!("/api/event-submissions/{}/status", submission.id);
    let payload = json!({ "status": "approved", "send_email": false }).to_string();

    // Without the token
    let request = Request::builder()
        .method("POST")
        .uri(&uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.clone()))
        .unwrap();
    let response = ctx.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // With it
    let request = Request::builder()
        .method("POST")
        .uri(&uri)
        .header("content-type", "application/json")
        .header("x-admin-token", TEST_ADMIN_TOKEN)
        .body(Body::from(payload))
        .unwrap();
    let response = ctx.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
