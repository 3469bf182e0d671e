use serde::Deserialize;
use sqlx::PgPool;
use std::str::FromStr;
use tracing::info;

use crate::common::validation::{check_optional_url, require, require_email};
use crate::common::{ApiError, ListingId};
use crate::domains::directory::models::{BusinessSubmission, SubmissionMode};

/// Public form payload for a new or claimed directory entry.
///
/// No status field: intake forces 'pending' regardless of what the client
/// sends. Required fields default to empty so that a missing field fails
/// shape validation (which names the field) rather than deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessSubmissionInput {
    #[serde(default)]
    pub business_name: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub linked_listing_id: Option<ListingId>,
    #[serde(default)]
    pub audience: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_mode() -> String {
    "new".to_string()
}

impl BusinessSubmissionInput {
    fn validate(&self) -> Result<SubmissionMode, ApiError> {
        require("business_name", &self.business_name)?;
        require("category", &self.category)?;
        require("address", &self.address)?;
        require("contact_name", &self.contact_name)?;
        require_email("contact_email", &self.contact_email)?;
        check_optional_url("website_url", self.website_url.as_deref())?;
        check_optional_url("image_url", self.image_url.as_deref())?;

        let mode = SubmissionMode::from_str(&self.mode)
            .map_err(|_| ApiError::Validation("mode".to_string()))?;

        // A claim has to say which listing it claims.
        if mode == SubmissionMode::Claim && self.linked_listing_id.is_none() {
            return Err(ApiError::Validation("linked_listing_id".to_string()));
        }

        Ok(mode)
    }
}

/// Persist a public business submission as a pending record.
pub async fn submit_business(
    input: BusinessSubmissionInput,
    pool: &PgPool,
) -> Result<BusinessSubmission, ApiError> {
    let mode = input.validate()?;

    let submission = BusinessSubmission::create(
        input.business_name,
        mode,
        input.category,
        input.contact_name,
        input.contact_email,
        input.notes,
        input.linked_listing_id,
        input.address,
        input.phone,
        input.website_url,
        input.image_url,
        input.audience,
        input.tags,
        pool,
    )
    .await?;

    info!(
        submission_id = %submission.id,
        business_name = %submission.business_name,
        mode = %submission.mode,
        "Business submission received"
    );

    Ok(submission)
}
