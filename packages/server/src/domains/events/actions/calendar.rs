use chrono::Utc;
use tracing::warn;

use crate::domains::events::data::CalendarEventData;
use crate::domains::events::models::EventSubmission;
use crate::kernel::ServerDeps;

/// Build the public calendar: city feed events merged with approved
/// community submissions, soonest first.
///
/// This is a read path, so it degrades instead of failing: a feed error
/// drops the city half, a store error drops the community half, and both
/// are logged.
pub async fn public_calendar(deps: &ServerDeps) -> Vec<CalendarEventData> {
    let now = Utc::now();

    let community = match EventSubmission::find_approved_upcoming(now, &deps.db_pool).await {
        Ok(submissions) => submissions,
        Err(e) => {
            warn!(error = %e, "Community events query failed, serving city feed only");
            Vec::new()
        }
    };

    let city = match &deps.city_feed {
        Some(feed) => match feed.fetch_events().await {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "City feed fetch failed, serving community events only");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let mut entries: Vec<CalendarEventData> = city
        .into_iter()
        .map(CalendarEventData::from)
        .chain(community.into_iter().map(CalendarEventData::from))
        .collect();

    entries.sort_by_key(|entry| entry.start_at);

    entries
}
