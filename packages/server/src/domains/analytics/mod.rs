//! Lightweight analytics: an append-only interaction log and the read-side
//! aggregation behind the admin dashboard.

pub mod actions;
pub mod models;
