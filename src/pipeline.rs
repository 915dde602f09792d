use std::collections::HashSet;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::Channel;
use crate::error::Error;
use crate::fetcher::{FeedEntry, Fetcher};
use crate::live::LiveStatusResolver;
use crate::video_id::extract_video_id;

pub const PAGE_SIZE: usize = 6;

/// One video from a subscribed channel, ready for presentation.
#[derive(Debug, Clone)]
pub struct VideoItem {
    pub video_id: String,
    pub title: String,
    pub link: String,
    /// Feed-level title of the channel that published the video
    pub channel_name: String,
    /// Published timestamp formatted as mm/dd/yy
    pub upload_date: String,
    pub published_at: DateTime<Utc>,
    pub is_live: bool,
}

impl VideoItem {
    fn from_entry(entry: FeedEntry, video_id: String) -> Self {
        let upload_date = entry.published_at.format("%m/%d/%y").to_string();
        Self {
            video_id,
            title: entry.title,
            link: entry.link,
            channel_name: entry.feed_title,
            upload_date,
            published_at: entry.published_at,
            is_live: false,
        }
    }
}

/// One page of aggregated videos.
///
/// `next_page` is set only when more items exist past this page. An empty
/// `items` with no `next_page` means the caller paged past the end, which is
/// a normal "no more content" result.
#[derive(Debug, Default)]
pub struct ResultPage {
    pub items: Vec<VideoItem>,
    pub next_page: Option<u32>,
    pub diagnostics: Diagnostics,
}

/// What went wrong (non-fatally) while building a page.
///
/// Lets callers tell "empty because nothing matched" apart from "empty
/// because every upstream failed" without aggregation ever raising.
#[derive(Debug, Default)]
pub struct Diagnostics {
    pub feed_errors: Vec<FeedError>,
    /// Entries dropped because their link yielded no video ID
    pub dropped_links: usize,
    pub live_status_error: Option<String>,
}

#[derive(Debug)]
pub struct FeedError {
    pub url: String,
    pub message: String,
}

/// Aggregates a user's subscribed feeds into sorted, filtered, paginated
/// pages of videos.
pub struct Pipeline {
    fetcher: Fetcher,
    resolver: LiveStatusResolver,
}

impl Pipeline {
    pub fn new(fetcher: Fetcher, resolver: LiveStatusResolver) -> Self {
        Self { fetcher, resolver }
    }

    /// Builds one page of videos across the selected channels.
    ///
    /// An empty `selected` set means all channels. `page` is 1-based; 0 is
    /// treated as 1. Every upstream failure (unreachable feed, missing API
    /// key, broken live-status response) degrades the result instead of
    /// failing it; see [`Diagnostics`].
    ///
    /// Pages are recomputed from a fresh fetch on every call, so pagination
    /// is not stable across calls if the underlying feeds change in between.
    pub async fn aggregate(
        &self,
        channels: &[Channel],
        selected: &HashSet<String>,
        include_shorts: bool,
        page: u32,
    ) -> ResultPage {
        let page = page.max(1);

        let feed_urls: Vec<&str> = channels
            .iter()
            .filter(|c| selected.is_empty() || selected.contains(&c.url))
            .map(|c| c.url.as_str())
            .collect();

        info!(
            "Aggregating {} of {} channels (page {})",
            feed_urls.len(),
            channels.len(),
            page
        );

        let mut diagnostics = Diagnostics::default();

        // Fetch all selected feeds concurrently. join_all yields results in
        // input order, so call timing never reaches the sort step.
        let fetches = feed_urls.iter().map(|url| self.fetcher.fetch_feed(url));
        let results = join_all(fetches).await;

        let mut items = Vec::new();
        for (url, result) in feed_urls.iter().zip(results) {
            match result {
                Ok(entries) => {
                    for entry in entries {
                        match extract_video_id(&entry.link) {
                            Ok(video_id) => items.push(VideoItem::from_entry(entry, video_id)),
                            Err(e) => {
                                debug!("Dropping entry: {}", e);
                                diagnostics.dropped_links += 1;
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!("Skipping feed {}: {}", url, e);
                    diagnostics.feed_errors.push(FeedError {
                        url: url.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        self.enrich_live_status(&mut items, &mut diagnostics).await;

        let filtered = filter_and_sort(items, include_shorts);
        let (page_items, next_page) = paginate(filtered, page);

        ResultPage {
            items: page_items,
            next_page,
            diagnostics,
        }
    }

    /// Marks items that are currently live. Resolver failures of any kind
    /// leave every `is_live` false; enrichment never aborts aggregation.
    async fn enrich_live_status(&self, items: &mut [VideoItem], diagnostics: &mut Diagnostics) {
        let video_ids: Vec<String> = items.iter().map(|i| i.video_id.clone()).collect();

        match self.resolver.resolve(&video_ids).await {
            Ok(live_status) => {
                for item in items.iter_mut() {
                    if live_status.get(&item.video_id).copied().unwrap_or(false) {
                        item.is_live = true;
                    }
                }
            }
            Err(e @ Error::ConfigurationMissing) => {
                debug!("Live status enrichment disabled: {}", e);
                diagnostics.live_status_error = Some(e.to_string());
            }
            Err(e) => {
                warn!("Live status enrichment failed: {}", e);
                diagnostics.live_status_error = Some(e.to_string());
            }
        }
    }
}

/// Drops shorts when asked to, then sorts most recent first. The sort is
/// stable: items with equal timestamps keep their fetch order.
fn filter_and_sort(items: Vec<VideoItem>, include_shorts: bool) -> Vec<VideoItem> {
    let mut filtered: Vec<VideoItem> = if include_shorts {
        items
    } else {
        items
            .into_iter()
            .filter(|item| !item.link.contains("/shorts/"))
            .collect()
    };

    filtered.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    filtered
}

/// Cuts one fixed-size page out of the filtered list. A start index past the
/// end yields an empty page with no next page.
fn paginate(items: Vec<VideoItem>, page: u32) -> (Vec<VideoItem>, Option<u32>) {
    let start = (page as usize).saturating_sub(1).saturating_mul(PAGE_SIZE);

    if start >= items.len() {
        return (Vec::new(), None);
    }

    let next_page = if start + PAGE_SIZE < items.len() {
        Some(page + 1)
    } else {
        None
    };

    let page_items = items.into_iter().skip(start).take(PAGE_SIZE).collect();
    (page_items, next_page)
}
