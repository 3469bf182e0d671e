//! Analytics actions: the write path is a bare append, the read path is the
//! windowed summary.

pub mod countries;
pub mod summary;

pub use summary::{compute_summary, AnalyticsSummary, SummaryRange};
