use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::Error;

const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/videos";

/// The videos API accepts at most this many IDs per request.
const BATCH_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
struct VideoResource {
    id: String,
    #[serde(default)]
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(rename = "liveBroadcastContent", default)]
    live_broadcast_content: String,
}

/// Looks up which of a batch of videos are currently live, via the YouTube
/// Data API `videos` endpoint.
pub struct LiveStatusResolver {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl LiveStatusResolver {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Tubefeed/1.0 (Subscription Aggregator)")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point the resolver at a different API base URL (useful for testing)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Resolves live status for a batch of video IDs.
    ///
    /// IDs are queried in chunks of at most 50. A video is live only when the
    /// API reports `liveBroadcastContent == "live"`; upcoming and completed
    /// broadcasts are not. IDs the API does not echo back are simply absent
    /// from the map. A failure on any chunk fails the whole call.
    pub async fn resolve(&self, video_ids: &[String]) -> Result<HashMap<String, bool>, Error> {
        let api_key = self.api_key.as_deref().ok_or(Error::ConfigurationMissing)?;

        let mut live_status = HashMap::new();
        if video_ids.is_empty() {
            return Ok(live_status);
        }

        for chunk in video_ids.chunks(BATCH_LIMIT) {
            debug!("Querying live status for {} videos", chunk.len());

            let ids = chunk.join(",");
            let response = self
                .client
                .get(&self.endpoint)
                .query(&[("part", "snippet"), ("id", ids.as_str()), ("key", api_key)])
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| Error::LiveStatusUnavailable(e.to_string()))?;

            let body = response
                .text()
                .await
                .map_err(|e| Error::LiveStatusUnavailable(e.to_string()))?;

            let parsed: VideosResponse = serde_json::from_str(&body)
                .map_err(|e| Error::LiveStatusUnavailable(e.to_string()))?;

            for item in parsed.items {
                let is_live = item
                    .snippet
                    .map(|s| s.live_broadcast_content == "live")
                    .unwrap_or(false);
                if is_live {
                    live_status.insert(item.id, true);
                }
            }
        }

        Ok(live_status)
    }
}
