//! Startup schema capability probe.
//!
//! The `affiliate_ads` table gained `subtitle` and `partner` after initial
//! deployment, and some environments still run the older schema. Rather than
//! retrying failed queries per request, the set of available columns is
//! probed once at startup and the ad queries substitute NULL for columns the
//! store does not have.

use anyhow::Result;
use sqlx::PgPool;

#[derive(Debug, Clone, Copy)]
pub struct SchemaCapabilities {
    pub ads_has_subtitle: bool,
    pub ads_has_partner: bool,
}

impl SchemaCapabilities {
    /// Capabilities of a fully migrated schema. Tests and freshly migrated
    /// deployments can skip the probe.
    pub fn assume_current() -> Self {
        Self {
            ads_has_subtitle: true,
            ads_has_partner: true,
        }
    }

    /// Probe `information_schema` once for the optional ad columns.
    pub async fn probe(pool: &PgPool) -> Result<Self> {
        let columns: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT column_name FROM information_schema.columns
            WHERE table_schema = current_schema() AND table_name = 'affiliate_ads'
            "#,
        )
        .fetch_all(pool)
        .await?;

        let caps = Self {
            ads_has_subtitle: columns.iter().any(|c| c == "subtitle"),
            ads_has_partner: columns.iter().any(|c| c == "partner"),
        };

        if !caps.ads_has_subtitle || !caps.ads_has_partner {
            tracing::warn!(
                has_subtitle = caps.ads_has_subtitle,
                has_partner = caps.ads_has_partner,
                "affiliate_ads is missing newer columns; ad queries will substitute NULL"
            );
        }

        Ok(caps)
    }
}
