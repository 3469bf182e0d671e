//! Shape validation for public intake forms.
//!
//! Intake only checks presence and rough shape. Anything beyond that
//! (duplicates, plausibility) is moderation's job.

use url::Url;

use super::errors::ApiError;

/// Require a non-blank field, naming the field in the error.
pub fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(field.to_string()));
    }
    Ok(())
}

/// The contract is deliberately loose: an email is anything containing '@'.
pub fn require_email(field: &str, value: &str) -> Result<(), ApiError> {
    require(field, value)?;
    if !value.contains('@') {
        return Err(ApiError::Validation(field.to_string()));
    }
    Ok(())
}

/// When present, a submitted URL must parse and carry an http(s) scheme.
pub fn check_optional_url(field: &str, value: Option<&str>) -> Result<(), ApiError> {
    if let Some(raw) = value {
        if raw.trim().is_empty() {
            return Ok(());
        }
        match Url::parse(raw) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
            _ => Err(ApiError::Validation(field.to_string())),
        }
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_field_is_rejected() {
        assert!(require("business_name", "  ").is_err());
        assert!(require("business_name", "Calm Corner Coffee").is_ok());
    }

    #[test]
    fn email_needs_an_at_sign() {
        assert!(require_email("contact_email", "bad-email").is_err());
        assert!(require_email("contact_email", "a@b.com").is_ok());
    }

    #[test]
    fn url_needs_a_scheme() {
        assert!(check_optional_url("website_url", Some("example.com")).is_err());
        assert!(check_optional_url("website_url", Some("ftp://example.com")).is_err());
        assert!(check_optional_url("website_url", Some("https://example.com")).is_ok());
        assert!(check_optional_url("website_url", None).is_ok());
    }
}
