//! Per-slug reaction counters (up / down / share).

pub mod models;

pub use models::{ReactionCounter, ReactionKind};
