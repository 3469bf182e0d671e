//! Directory actions
//!
//! Entry-point actions called directly from the HTTP routes. Intake persists
//! pending submissions; moderation runs the approve/reject state machine and
//! derives the published listing.

pub mod create_listing;
pub mod intake;
pub mod moderation;

pub use create_listing::{create_listing, CreateListingInput};
pub use intake::{submit_business, BusinessSubmissionInput};
pub use moderation::{approve_business_submission, reject_business_submission};
