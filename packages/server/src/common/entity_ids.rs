//! Typed ID definitions for all domain entities.
//!
//! Type aliases over [`Id`] give each entity its own incompatible ID type.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for BusinessSubmission entities (directory intake).
pub struct BusinessSubmission;

/// Marker type for BusinessListing entities (published directory entries).
pub struct BusinessListing;

/// Marker type for EventSubmission entities (community calendar intake).
pub struct EventSubmission;

/// Marker type for AffiliateAd entities (placement-scoped promo cards).
pub struct AffiliateAd;

/// Marker type for BlogPost entities.
pub struct BlogPost;

/// Marker type for AnalyticsEvent entities (append-only interaction log).
pub struct AnalyticsEvent;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for BusinessSubmission entities.
pub type SubmissionId = Id<BusinessSubmission>;

/// Typed ID for BusinessListing entities.
pub type ListingId = Id<BusinessListing>;

/// Typed ID for EventSubmission entities.
pub type EventSubmissionId = Id<EventSubmission>;

/// Typed ID for AffiliateAd entities.
pub type AdId = Id<AffiliateAd>;

/// Typed ID for BlogPost entities.
pub type BlogPostId = Id<BlogPost>;

/// Typed ID for AnalyticsEvent entities.
pub type AnalyticsEventId = Id<AnalyticsEvent>;
