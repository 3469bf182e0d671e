pub mod event_submission;

pub use event_submission::{EventAudience, EventSubmission};
