//! Affiliate ad placements: fixed UI slots resolved to active promo cards.

pub mod actions;
pub mod data;
pub mod models;
