use thiserror::Error;

/// Failure modes of the aggregation core.
///
/// None of these abort aggregation: the pipeline absorbs each one into a
/// degraded-but-valid result and records it in
/// [`Diagnostics`](crate::pipeline::Diagnostics). They only surface directly
/// to callers of the individual components.
#[derive(Debug, Error)]
pub enum Error {
    /// A video link matched none of the known YouTube URL forms.
    #[error("could not find video ID in URL: {0}")]
    InvalidVideoUrl(String),

    /// A single feed could not be fetched or parsed.
    #[error("feed unavailable ({url}): {reason}")]
    FeedUnavailable { url: String, reason: String },

    /// No API key is configured, so live-status enrichment is disabled.
    #[error("live status API key not configured")]
    ConfigurationMissing,

    /// The live-status API could not be reached or returned garbage.
    #[error("live status unavailable: {0}")]
    LiveStatusUnavailable(String),
}
