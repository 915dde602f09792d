mod config;
mod error;
mod fetcher;
mod live;
mod pipeline;
mod video_id;

use std::collections::HashSet;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::fetcher::Fetcher;
use crate::live::LiveStatusResolver;
use crate::pipeline::Pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tubefeed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load("channels.toml")?;
    info!("Loaded {} channels from configuration", config.channels.len());

    // Optional page number as the first argument, default 1
    let page: u32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);

    let timeout = Duration::from_secs(config.fetch_timeout);
    let fetcher = Fetcher::new(timeout);
    let resolver = LiveStatusResolver::new(config.resolve_api_key(), timeout);
    let pipeline = Pipeline::new(fetcher, resolver);

    let result = pipeline
        .aggregate(&config.channels, &HashSet::new(), false, page)
        .await;

    for item in &result.items {
        let live_marker = if item.is_live { " [LIVE]" } else { "" };
        println!(
            "{} {} - {}{}\n    {}",
            item.upload_date, item.channel_name, item.title, live_marker, item.link
        );
    }

    if result.items.is_empty() {
        println!("No videos on page {}", page);
    }
    if let Some(next) = result.next_page {
        println!("More videos on page {}", next);
    }
    for feed_error in &result.diagnostics.feed_errors {
        eprintln!("warning: {}: {}", feed_error.url, feed_error.message);
    }

    Ok(())
}
