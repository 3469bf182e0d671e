pub mod affiliate_ad;

pub use affiliate_ad::{AffiliateAd, Placement};
