//! Tubefeed - A YouTube Subscription Aggregator
//!
//! This crate merges the RSS/Atom feeds of a set of subscribed channels into
//! a single chronological, filtered, paginated list of videos, enriched with
//! live-broadcast status from the YouTube Data API. It is a library core:
//! persistence, authentication, and rendering belong to its callers.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod live;
pub mod pipeline;
pub mod video_id;
