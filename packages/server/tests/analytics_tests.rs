//! Integration tests for the analytics aggregation: inclusive window
//! boundaries, kind bucketing, and country resolution.
//!
//! Each test pins its fixtures to a distinct year so the shared database
//! never leaks events between windows.

mod common;

use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use test_context::test_context;

use crate::common::{record_event_at, TestHarness};
use server_core::domains::analytics::actions::{compute_summary, SummaryRange};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test_context(TestHarness)]
#[tokio::test]
async fn window_boundaries_are_inclusive(ctx: &TestHarness) {
    let route = "/window-probe";
    // T1 sits exactly on the window's start, T2 exactly on its end, T3 past it
    let t1 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2025, 1, 2, 23, 59, 59).unwrap();
    let t3 = Utc.with_ymd_and_hms(2025, 1, 3, 10, 0, 0).unwrap();

    for at in [t1, t2, t3] {
        record_event_at("page_view", route, json!({}), at, &ctx.db_pool)
            .await
            .unwrap();
    }

    let summary = compute_summary(
        SummaryRange::Between(day(2025, 1, 1), day(2025, 1, 2)),
        &ctx.db_pool,
    )
    .await;

    assert_eq!(summary.total_events, 2);
    assert_eq!(
        summary
            .top_routes
            .iter()
            .find(|r| r.route == route)
            .map(|r| r.count),
        Some(2)
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_kinds_count_toward_the_total_but_are_not_bucketed(ctx: &TestHarness) {
    let route = "/kind-probe";
    let at = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

    for name in ["page_view", "page_view", "ad_click", "mystery_kind"] {
        record_event_at(name, route, json!({}), at, &ctx.db_pool)
            .await
            .unwrap();
    }

    let summary = compute_summary(
        SummaryRange::Between(day(2024, 6, 15), day(2024, 6, 15)),
        &ctx.db_pool,
    )
    .await;

    assert_eq!(summary.total_events, 4);
    assert_eq!(summary.totals_by_kind["page_view"], 2);
    assert_eq!(summary.totals_by_kind["ad_click"], 1);
    assert!(!summary.totals_by_kind.contains_key("mystery_kind"));

    // The raw top-events list still shows it
    assert!(summary.top_events.iter().any(|k| k.name == "mystery_kind"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn countries_resolve_through_the_fixed_table(ctx: &TestHarness) {
    let route = "/country-probe";
    let at = Utc.with_ymd_and_hms(2023, 3, 10, 9, 0, 0).unwrap();

    for _ in 0..3 {
        record_event_at(
            "page_view",
            route,
            json!({ "country": "US" }),
            at,
            &ctx.db_pool,
        )
        .await
        .unwrap();
    }
    for _ in 0..2 {
        record_event_at(
            "page_view",
            route,
            json!({ "country_name": "Atlantis" }),
            at,
            &ctx.db_pool,
        )
        .await
        .unwrap();
    }
    record_event_at("page_view", route, json!({}), at, &ctx.db_pool)
        .await
        .unwrap();
    // Non-page-view events never enter the country buckets
    record_event_at(
        "ad_click",
        route,
        json!({ "country": "US" }),
        at,
        &ctx.db_pool,
    )
    .await
    .unwrap();

    let summary = compute_summary(
        SummaryRange::Between(day(2023, 3, 10), day(2023, 3, 10)),
        &ctx.db_pool,
    )
    .await;

    let count_for = |country: &str| {
        summary
            .top_countries
            .iter()
            .find(|c| c.country == country)
            .map(|c| c.count)
    };

    assert_eq!(count_for("United States"), Some(3));
    assert_eq!(count_for("Atlantis"), Some(2));
    assert_eq!(count_for("Unknown"), Some(1));

    // The route/country pairs agree
    let pair = summary
        .top_route_countries
        .iter()
        .find(|p| p.route == route && p.country == "United States")
        .expect("expected a route/country pair for the probe route");
    assert_eq!(pair.count, 3);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn empty_window_is_a_zero_summary(ctx: &TestHarness) {
    let summary = compute_summary(
        SummaryRange::Between(day(2001, 1, 1), day(2001, 1, 2)),
        &ctx.db_pool,
    )
    .await;

    assert_eq!(summary.total_events, 0);
    assert!(summary.top_routes.is_empty());
    assert!(summary.top_countries.is_empty());
    // Every known kind is present and zero
    assert!(summary.totals_by_kind.values().all(|&count| count == 0));
}
