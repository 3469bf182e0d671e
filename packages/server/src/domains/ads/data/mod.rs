//! API representation of resolved ads.

use serde::Serialize;

use crate::domains::ads::models::AffiliateAd;

/// An ad ready to render: button text is always present here.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedAdData {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub button_text: String,
    pub link: String,
    pub image_url: Option<String>,
    pub placement: String,
    pub partner: Option<String>,
}

impl From<AffiliateAd> for ResolvedAdData {
    fn from(ad: AffiliateAd) -> Self {
        let button_text = ad.effective_button_text();
        Self {
            id: ad.id.to_string(),
            title: ad.title,
            subtitle: ad.subtitle,
            button_text,
            link: ad.link,
            image_url: ad.image_url,
            placement: ad.placement,
            partner: ad.partner,
        }
    }
}
