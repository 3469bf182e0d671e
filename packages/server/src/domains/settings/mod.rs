//! Site settings as explicit typed records.
//!
//! Each setting group gets its own table and struct instead of a serialized
//! blob in a generic key/value store, so a bad write shows up at the write,
//! not as a parse failure on some later read.

pub mod models;

pub use models::{HeroImage, PromoCard, SiteVerification, StartCardImage};
