pub mod listing;
pub mod submission;

pub use listing::BusinessListing;
pub use submission::{BusinessSubmission, SubmissionMode};
