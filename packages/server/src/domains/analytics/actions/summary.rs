//! Read-side aggregation over the analytics window.
//!
//! Analytics are non-critical: a store failure here degrades to an all-zero
//! summary for the requested window instead of breaking the dashboard.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::warn;

use super::countries::resolve_country;
use crate::domains::analytics::models::EventKind;

const TOP_ROUTES: usize = 8;
const TOP_EVENTS: usize = 8;
const TOP_COUNTRIES: usize = 12;
const TOP_ROUTE_COUNTRIES: usize = 12;

/// The requested aggregation window.
#[derive(Debug, Clone, Copy)]
pub enum SummaryRange {
    /// Relative preset: the last N days up to now.
    LastDays(i64),
    /// Explicit dates, both ends inclusive (the end date covers its whole day).
    Between(NaiveDate, NaiveDate),
}

impl SummaryRange {
    pub fn resolve(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        match *self {
            SummaryRange::LastDays(days) => (now - Duration::days(days.max(0)), now),
            SummaryRange::Between(start, end) => {
                let since = Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN));
                let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
                let until = Utc.from_utc_datetime(&end.and_time(end_of_day));
                (since, until)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteCount {
    pub route: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct KindCount {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteCountryCount {
    pub route: String,
    pub country: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub total_events: i64,
    /// Counts per known event kind; unknown names are in `total_events` only.
    pub totals_by_kind: BTreeMap<String, i64>,
    pub top_routes: Vec<RouteCount>,
    pub top_events: Vec<KindCount>,
    /// Page-view counts per display country.
    pub top_countries: Vec<CountryCount>,
    pub top_route_countries: Vec<RouteCountryCount>,
}

impl AnalyticsSummary {
    fn zero(since: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        let totals_by_kind = EventKind::ALL
            .iter()
            .map(|kind| (kind.to_string(), 0))
            .collect();

        Self {
            since,
            until,
            total_events: 0,
            totals_by_kind,
            top_routes: Vec::new(),
            top_events: Vec::new(),
            top_countries: Vec::new(),
            top_route_countries: Vec::new(),
        }
    }
}

/// Compute the summary for a window. Never fails: store errors degrade to
/// the zero summary.
pub async fn compute_summary(range: SummaryRange, pool: &PgPool) -> AnalyticsSummary {
    let (since, until) = range.resolve(Utc::now());

    match try_compute(since, until, pool).await {
        Ok(summary) => summary,
        Err(e) => {
            warn!(error = %e, "Analytics aggregation failed, serving zero summary");
            AnalyticsSummary::zero(since, until)
        }
    }
}

async fn try_compute(
    since: DateTime<Utc>,
    until: DateTime<Utc>,
    pool: &PgPool,
) -> Result<AnalyticsSummary, sqlx::Error> {
    // Both window boundaries are inclusive.
    let name_counts: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT name, COUNT(*) FROM analytics_events
        WHERE occurred_at >= $1 AND occurred_at <= $2
        GROUP BY name
        ORDER BY COUNT(*) DESC, name ASC
        "#,
    )
    .bind(since)
    .bind(until)
    .fetch_all(pool)
    .await?;

    let total_events: i64 = name_counts.iter().map(|(_, count)| count).sum();

    let mut totals_by_kind: BTreeMap<String, i64> = EventKind::ALL
        .iter()
        .map(|kind| (kind.to_string(), 0))
        .collect();
    for (name, count) in &name_counts {
        if let Some(bucket) = totals_by_kind.get_mut(name) {
            *bucket = *count;
        }
    }

    let top_events = name_counts
        .iter()
        .take(TOP_EVENTS)
        .map(|(name, count)| KindCount {
            name: name.clone(),
            count: *count,
        })
        .collect();

    let route_counts: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT route, COUNT(*) FROM analytics_events
        WHERE occurred_at >= $1 AND occurred_at <= $2
        GROUP BY route
        ORDER BY COUNT(*) DESC, route ASC
        LIMIT $3
        "#,
    )
    .bind(since)
    .bind(until)
    .bind(TOP_ROUTES as i64)
    .fetch_all(pool)
    .await?;

    let top_routes = route_counts
        .into_iter()
        .map(|(route, count)| RouteCount { route, count })
        .collect();

    // One grouped scan of page views feeds both country buckets: different
    // raw metadata can resolve to the same display country, so the final
    // fold happens here rather than in SQL.
    let geo_rows: Vec<(String, Option<String>, Option<String>, i64)> = sqlx::query_as(
        r#"
        SELECT route, meta->>'country', meta->>'country_name', COUNT(*)
        FROM analytics_events
        WHERE name = 'page_view' AND occurred_at >= $1 AND occurred_at <= $2
        GROUP BY 1, 2, 3
        "#,
    )
    .bind(since)
    .bind(until)
    .fetch_all(pool)
    .await?;

    let mut by_country: BTreeMap<String, i64> = BTreeMap::new();
    let mut by_route_country: BTreeMap<(String, String), i64> = BTreeMap::new();
    for (route, code, name, count) in geo_rows {
        let country = resolve_country(code.as_deref(), name.as_deref());
        *by_country.entry(country.clone()).or_default() += count;
        *by_route_country.entry((route, country)).or_default() += count;
    }

    let mut top_countries: Vec<CountryCount> = by_country
        .into_iter()
        .map(|(country, count)| CountryCount { country, count })
        .collect();
    top_countries.sort_by(|a, b| b.count.cmp(&a.count).then(a.country.cmp(&b.country)));
    top_countries.truncate(TOP_COUNTRIES);

    let mut top_route_countries: Vec<RouteCountryCount> = by_route_country
        .into_iter()
        .map(|((route, country), count)| RouteCountryCount {
            route,
            country,
            count,
        })
        .collect();
    top_route_countries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.route.cmp(&b.route))
            .then(a.country.cmp(&b.country))
    });
    top_route_countries.truncate(TOP_ROUTE_COUNTRIES);

    Ok(AnalyticsSummary {
        since,
        until,
        total_events,
        totals_by_kind,
        top_routes,
        top_events,
        top_countries,
        top_route_countries,
    })
}
