//! Blog posts: admin-authored, slug-addressed, published or draft.

pub mod actions;
pub mod models;
