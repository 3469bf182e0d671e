use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use super::traits::BaseCityFeed;
use crate::common::types::CityEvent;

/// Client for the city's public events calendar feed (JSON).
pub struct HttpCityFeed {
    client: Client,
    feed_url: String,
}

/// Wire shape of a feed item. The feed predates this system, so field names
/// follow its conventions rather than ours.
#[derive(Debug, Deserialize)]
struct FeedItem {
    id: String,
    title: String,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    venue: Option<String>,
    url: Option<String>,
    summary: Option<String>,
}

impl HttpCityFeed {
    pub fn new(feed_url: String) -> Self {
        Self {
            client: Client::new(),
            feed_url,
        }
    }
}

#[async_trait]
impl BaseCityFeed for HttpCityFeed {
    async fn fetch_events(&self) -> Result<Vec<CityEvent>> {
        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .await
            .context("City feed request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("City feed returned {}", response.status()));
        }

        let items: Vec<FeedItem> = response
            .json()
            .await
            .context("City feed returned malformed JSON")?;

        Ok(items
            .into_iter()
            .map(|item| CityEvent {
                external_id: item.id,
                title: item.title,
                start_at: item.start,
                end_at: item.end,
                location: item.venue,
                url: item.url,
                description: item.summary,
            })
            .collect())
    }
}

/// Feed stub serving a fixed set of events (tests, local development).
pub struct StaticCityFeed(pub Vec<CityEvent>);

#[async_trait]
impl BaseCityFeed for StaticCityFeed {
    async fn fetch_events(&self) -> Result<Vec<CityEvent>> {
        Ok(self.0.clone())
    }
}
