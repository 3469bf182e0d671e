//! Community events: public submissions, moderation, and the public calendar
//! that merges approved submissions with the external city feed.

pub mod actions;
pub mod data;
pub mod models;
