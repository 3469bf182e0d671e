pub mod analytics_event;

pub use analytics_event::{AnalyticsEvent, EventKind};
