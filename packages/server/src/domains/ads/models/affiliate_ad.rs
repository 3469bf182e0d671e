use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::AdId;
use crate::kernel::SchemaCapabilities;

/// A placement-scoped promotional card.
///
/// `subtitle` and `partner` were added to the table after initial
/// deployment; reads on the public path go through [`Self::select_columns`]
/// so environments still on the old schema keep rendering.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AffiliateAd {
    pub id: AdId,
    pub title: String,
    pub subtitle: Option<String>,
    pub button_text: Option<String>,
    pub link: String,
    pub image_url: Option<String>,
    pub placement: String,
    pub partner: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fixed UI slots an ad can occupy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    VisitLodging,
    EventsTickets,
    EatDrinkSidebar,
    BlogInline,
    StartPromo,
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Placement::VisitLodging => write!(f, "visit_lodging"),
            Placement::EventsTickets => write!(f, "events_tickets"),
            Placement::EatDrinkSidebar => write!(f, "eat_drink_sidebar"),
            Placement::BlogInline => write!(f, "blog_inline"),
            Placement::StartPromo => write!(f, "start_promo"),
        }
    }
}

impl std::str::FromStr for Placement {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "visit_lodging" => Ok(Placement::VisitLodging),
            "events_tickets" => Ok(Placement::EventsTickets),
            "eat_drink_sidebar" => Ok(Placement::EatDrinkSidebar),
            "blog_inline" => Ok(Placement::BlogInline),
            "start_promo" => Ok(Placement::StartPromo),
            _ => Err(anyhow::anyhow!("Unknown placement: {}", s)),
        }
    }
}

impl AffiliateAd {
    /// Column list honoring the startup schema probe: columns the store does
    /// not have are substituted with typed NULLs so the row still decodes.
    fn select_columns(caps: &SchemaCapabilities) -> String {
        let subtitle = if caps.ads_has_subtitle {
            "subtitle"
        } else {
            "NULL::text AS subtitle"
        };
        let partner = if caps.ads_has_partner {
            "partner"
        } else {
            "NULL::text AS partner"
        };

        format!(
            "id, title, {}, button_text, link, image_url, placement, {}, is_active, created_at",
            subtitle, partner
        )
    }

    /// Active ads for the given placements, newest first.
    pub async fn find_active_by_placements(
        placements: &[Placement],
        caps: &SchemaCapabilities,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let keys: Vec<String> = placements.iter().map(|p| p.to_string()).collect();

        let sql = format!(
            r#"
            SELECT {} FROM affiliate_ads
            WHERE is_active = TRUE AND placement = ANY($1)
            ORDER BY created_at DESC
            "#,
            Self::select_columns(caps)
        );

        let ads = sqlx::query_as::<_, AffiliateAd>(&sql)
            .bind(&keys)
            .fetch_all(pool)
            .await?;

        Ok(ads)
    }

    pub async fn find_by_id(id: AdId, pool: &PgPool) -> Result<Option<Self>> {
        let ad = sqlx::query_as::<_, AffiliateAd>(
            r#"
            SELECT * FROM affiliate_ads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(ad)
    }

    /// All ads for the admin screen, newest first.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let ads = sqlx::query_as::<_, AffiliateAd>(
            r#"
            SELECT * FROM affiliate_ads
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(ads)
    }

    /// The default call-to-action label when none was authored.
    pub fn effective_button_text(&self) -> String {
        match (&self.button_text, &self.partner) {
            (Some(text), _) if !text.trim().is_empty() => text.clone(),
            (_, Some(partner)) if !partner.trim().is_empty() => format!("Open {}", partner),
            _ => "Open link".to_string(),
        }
    }
}
