//! Event actions
//!
//! Intake persists pending community events; moderation approves/rejects
//! them (optionally notifying the submitter); calendar builds the merged
//! public view.

pub mod calendar;
pub mod intake;
pub mod moderation;

pub use calendar::public_calendar;
pub use intake::{submit_event, EventSubmissionInput};
pub use moderation::{moderate_event_submission, parse_event_submission_id};
