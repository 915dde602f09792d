use url::Url;

use crate::error::Error;

/// Extracts the canonical video ID from a YouTube URL.
///
/// Handles the three link forms that show up in channel feeds, in order:
/// short links (`youtu.be/<id>`), shorts (`/shorts/<id>`), and regular watch
/// URLs (`watch?v=<id>`). A rule only matches when it yields a non-empty ID;
/// anything else fails with [`Error::InvalidVideoUrl`].
pub fn extract_video_id(video_url: &str) -> Result<String, Error> {
    let parsed =
        Url::parse(video_url).map_err(|_| Error::InvalidVideoUrl(video_url.to_string()))?;

    if parsed.host_str() == Some("youtu.be") {
        let id = parsed.path().trim_start_matches('/');
        if !id.is_empty() {
            return Ok(id.to_string());
        }
    }

    if parsed.path().split('/').any(|segment| segment == "shorts") {
        if let Some(id) = parsed.path().split('/').next_back() {
            if !id.is_empty() {
                return Ok(id.to_string());
            }
        }
    }

    if let Some((_, id)) = parsed.query_pairs().find(|(key, _)| key == "v") {
        if !id.is_empty() {
            return Ok(id.into_owned());
        }
    }

    Err(Error::InvalidVideoUrl(video_url.to_string()))
}
