//! Country code resolution for the analytics dashboard.
//!
//! Geolocation metadata arrives as an ISO 3166-1 alpha-2 code, sometimes
//! with a display name alongside. The fixed table below covers the codes
//! this site actually sees; anything else falls through to the name, then
//! the raw code, then "Unknown".

/// Display name for an ISO alpha-2 code, if the table knows it.
pub fn country_display_name(code: &str) -> Option<&'static str> {
    let name = match code.to_ascii_uppercase().as_str() {
        "US" => "United States",
        "CA" => "Canada",
        "MX" => "Mexico",
        "GB" => "United Kingdom",
        "IE" => "Ireland",
        "DE" => "Germany",
        "FR" => "France",
        "NL" => "Netherlands",
        "BE" => "Belgium",
        "CH" => "Switzerland",
        "AT" => "Austria",
        "ES" => "Spain",
        "PT" => "Portugal",
        "IT" => "Italy",
        "SE" => "Sweden",
        "NO" => "Norway",
        "DK" => "Denmark",
        "FI" => "Finland",
        "IS" => "Iceland",
        "PL" => "Poland",
        "CZ" => "Czechia",
        "UA" => "Ukraine",
        "AU" => "Australia",
        "NZ" => "New Zealand",
        "JP" => "Japan",
        "KR" => "South Korea",
        "CN" => "China",
        "IN" => "India",
        "SG" => "Singapore",
        "PH" => "Philippines",
        "BR" => "Brazil",
        "AR" => "Argentina",
        "CL" => "Chile",
        "CO" => "Colombia",
        "ZA" => "South Africa",
        _ => return None,
    };
    Some(name)
}

/// Resolve a country for display from whatever metadata the event carried.
pub fn resolve_country(code: Option<&str>, name: Option<&str>) -> String {
    let code = code.map(str::trim).filter(|c| !c.is_empty());
    let name = name.map(str::trim).filter(|n| !n.is_empty());

    if let Some(code) = code {
        if let Some(display) = country_display_name(code) {
            return display.to_string();
        }
        // A code the table doesn't know: prefer the name when present.
        if let Some(name) = name {
            return name.to_string();
        }
        return code.to_string();
    }

    match name {
        Some(name) => name.to_string(),
        None => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code_resolves_to_display_name() {
        assert_eq!(resolve_country(Some("us"), None), "United States");
        assert_eq!(resolve_country(Some("CA"), None), "Canada");
    }

    #[test]
    fn unknown_code_falls_back_to_name_then_code() {
        assert_eq!(resolve_country(Some("XK"), Some("Kosovo")), "Kosovo");
        assert_eq!(resolve_country(Some("XK"), None), "XK");
    }

    #[test]
    fn missing_code_uses_name() {
        assert_eq!(resolve_country(None, Some("Germany")), "Germany");
    }

    #[test]
    fn nothing_at_all_is_unknown() {
        assert_eq!(resolve_country(None, None), "Unknown");
        assert_eq!(resolve_country(Some("  "), Some("")), "Unknown");
    }
}
