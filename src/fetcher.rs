use std::time::Duration;

use chrono::{DateTime, Utc};
use feed_rs::parser;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::Error;

/// A normalized entry from one subscribed feed.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
    /// Feed-level title, used as the channel name on derived items
    pub feed_title: String,
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Tubefeed/1.0 (Subscription Aggregator)")
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetches and parses one feed into normalized entries.
    ///
    /// Entries without a link or a parseable published timestamp are skipped.
    /// Transport, HTTP, and parse failures all map to
    /// [`Error::FeedUnavailable`]; the pipeline absorbs that error so one bad
    /// subscription never takes down the rest.
    pub async fn fetch_feed(&self, url: &str) -> Result<Vec<FeedEntry>, Error> {
        debug!("Fetching feed: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::FeedUnavailable {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let bytes = response.bytes().await.map_err(|e| Error::FeedUnavailable {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let parsed = parser::parse(&bytes[..]).map_err(|e| Error::FeedUnavailable {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let feed_title = parsed
            .title
            .map(|t| t.content)
            .unwrap_or_default();

        let mut entries = Vec::new();
        for entry in parsed.entries {
            let title = entry
                .title
                .as_ref()
                .map(|t| t.content.clone())
                .unwrap_or_else(|| "Untitled".to_string());

            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default();

            if link.is_empty() {
                warn!("Skipping entry with no link: {}", title);
                continue;
            }

            let published: Option<DateTime<Utc>> =
                entry.published.or(entry.updated).map(|dt| dt.into());

            let Some(published_at) = published else {
                warn!("Skipping entry with no published date: {}", title);
                continue;
            };

            entries.push(FeedEntry {
                title,
                link,
                published_at,
                feed_title: feed_title.clone(),
            });
        }

        info!("Parsed {} entries from feed '{}'", entries.len(), feed_title);
        Ok(entries)
    }
}
