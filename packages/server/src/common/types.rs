// Common types shared across domains
//
// Both the directory and the events domain run the same moderation state
// machine, so the status enum lives here rather than in either domain.
// CityEvent is shared between the kernel feed client and the events domain
// to avoid a circular dependency.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moderation state of a submission.
///
/// Stored as a string column; transitions happen only through the moderation
/// actions. Re-applying a transition is idempotent (it re-runs the same
/// derived effect).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModerationStatus::Pending => write!(f, "pending"),
            ModerationStatus::Approved => write!(f, "approved"),
            ModerationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ModerationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(ModerationStatus::Pending),
            "approved" => Ok(ModerationStatus::Approved),
            "rejected" => Ok(ModerationStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid moderation status: {}", s)),
        }
    }
}

/// An event sourced from the external city calendar feed.
///
/// Read-only at runtime: fetched, merged into the public calendar alongside
/// approved community events, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityEvent {
    pub external_id: String,
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}
