use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Reaction counts for one content slug.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReactionCounter {
    pub slug: String,
    pub up_count: i64,
    pub down_count: i64,
    pub share_count: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    Up,
    Down,
    Share,
}

impl ReactionKind {
    fn column(&self) -> &'static str {
        match self {
            ReactionKind::Up => "up_count",
            ReactionKind::Down => "down_count",
            ReactionKind::Share => "share_count",
        }
    }
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReactionKind::Up => write!(f, "up"),
            ReactionKind::Down => write!(f, "down"),
            ReactionKind::Share => write!(f, "share"),
        }
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "up" => Ok(ReactionKind::Up),
            "down" => Ok(ReactionKind::Down),
            "share" => Ok(ReactionKind::Share),
            _ => Err(anyhow::anyhow!("Invalid reaction kind: {}", s)),
        }
    }
}

impl ReactionCounter {
    /// Counts for a slug; all zeros when nobody has reacted yet.
    pub async fn find_or_zero(slug: &str, pool: &PgPool) -> Result<Self> {
        let counter = sqlx::query_as::<_, ReactionCounter>(
            r#"
            SELECT * FROM reaction_counters
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(counter.unwrap_or_else(|| ReactionCounter {
            slug: slug.to_string(),
            up_count: 0,
            down_count: 0,
            share_count: 0,
            updated_at: Utc::now(),
        }))
    }

    /// Increment one counter, creating the row on first reaction. The upsert
    /// increments in place, so concurrent reactions all land.
    pub async fn increment(slug: &str, kind: ReactionKind, pool: &PgPool) -> Result<Self> {
        // Column name comes from the enum, never from the caller.
        let column = kind.column();

        let sql = format!(
            r#"
            INSERT INTO reaction_counters (slug, {column})
            VALUES ($1, 1)
            ON CONFLICT (slug) DO UPDATE
            SET {column} = reaction_counters.{column} + 1,
                updated_at = NOW()
            RETURNING *
            "#,
        );

        let counter = sqlx::query_as::<_, ReactionCounter>(&sql)
            .bind(slug)
            .fetch_one(pool)
            .await?;

        Ok(counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_round_trips() {
        for kind in [ReactionKind::Up, ReactionKind::Down, ReactionKind::Share] {
            assert_eq!(ReactionKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(ReactionKind::from_str("love").is_err());
    }
}
