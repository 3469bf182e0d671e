// North Harbor Guide - API Core
//
// Backend for the North Harbor visitor/resident guide: the public business
// directory and events calendar, the moderation workflow behind both, the
// blog, ad placements, site settings, and the lightweight analytics pipeline.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
