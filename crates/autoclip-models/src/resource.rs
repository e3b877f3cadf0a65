//! Video resource reference helpers.
//!
//! The acquisition pipeline's alternate-URL strategy rewrites short-form
//! YouTube links into the canonical watch URL; the helpers here parse and
//! validate the video id that rewrite depends on.

use thiserror::Error;
use url::Url;

/// Errors that can occur during video id extraction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VideoIdError {
    #[error("URL is not a valid video URL")]
    InvalidUrl,
    #[error("video id not found in URL")]
    IdNotFound,
    #[error("video id has invalid format")]
    InvalidId,
}

/// Result type for video id extraction.
pub type VideoIdResult<T> = Result<T, VideoIdError>;

/// Extract a YouTube video id from a URL.
///
/// Supported forms:
/// - `https://youtube.com/watch?v=VIDEO_ID`
/// - `https://youtu.be/VIDEO_ID`
/// - `https://youtube.com/embed/VIDEO_ID`
/// - `https://youtube.com/shorts/VIDEO_ID`
pub fn extract_video_id(raw: &str) -> VideoIdResult<String> {
    let url = Url::parse(raw.trim()).map_err(|_| VideoIdError::InvalidUrl)?;

    let host = url.host_str().ok_or(VideoIdError::InvalidUrl)?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    let candidate = match host {
        "youtu.be" => url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        "youtube.com" | "m.youtube.com" | "music.youtube.com" => {
            if url.path() == "/watch" {
                url.query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned())
            } else {
                let mut segments = url.path_segments().ok_or(VideoIdError::InvalidUrl)?;
                match (segments.next(), segments.next()) {
                    (Some("embed"), Some(id))
                    | (Some("v"), Some(id))
                    | (Some("shorts"), Some(id))
                        if !id.is_empty() =>
                    {
                        Some(id.to_string())
                    }
                    _ => None,
                }
            }
        }
        _ => return Err(VideoIdError::InvalidUrl),
    };

    let id = candidate.ok_or(VideoIdError::IdNotFound)?;
    validate_video_id(&id)?;
    Ok(id)
}

/// Rewrite a resource reference into the canonical watch-URL form.
///
/// Returns `None` when the reference is not a recognized YouTube URL; the
/// alternate-URL strategy self-skips in that case.
pub fn alternate_watch_url(raw: &str) -> Option<String> {
    let id = extract_video_id(raw).ok()?;
    let canonical = format!("https://www.youtube.com/watch?v={}", id);
    // Only useful as an alternate if it differs from what we started with
    if raw.trim() == canonical {
        None
    } else {
        Some(canonical)
    }
}

/// Video ids are exactly 11 characters of `[A-Za-z0-9_-]`.
fn validate_video_id(id: &str) -> VideoIdResult<()> {
    if id.len() != 11 {
        return Err(VideoIdError::InvalidId);
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(VideoIdError::InvalidId);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_watch_url() {
        assert_eq!(
            extract_video_id("https://youtube.com/watch?v=Tvz8an1znIo"),
            Ok("Tvz8an1znIo".to_string())
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=Tvz8an1znIo&list=xyz"),
            Ok("Tvz8an1znIo".to_string())
        );
    }

    #[test]
    fn test_extract_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/Tvz8an1znIo"),
            Ok("Tvz8an1znIo".to_string())
        );
    }

    #[test]
    fn test_extract_embed_and_shorts() {
        assert_eq!(
            extract_video_id("https://youtube.com/embed/Tvz8an1znIo"),
            Ok("Tvz8an1znIo".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtube.com/shorts/Tvz8an1znIo"),
            Ok("Tvz8an1znIo".to_string())
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            extract_video_id("https://example.com/video"),
            Err(VideoIdError::InvalidUrl)
        );
        assert_eq!(
            extract_video_id("https://youtube.com/watch"),
            Err(VideoIdError::IdNotFound)
        );
        assert_eq!(
            extract_video_id("https://youtu.be/short"),
            Err(VideoIdError::InvalidId)
        );
        assert_eq!(
            extract_video_id("https://youtube.com/watch?v=bad!chars!!"),
            Err(VideoIdError::InvalidId)
        );
    }

    #[test]
    fn test_alternate_watch_url() {
        assert_eq!(
            alternate_watch_url("https://youtu.be/Tvz8an1znIo"),
            Some("https://www.youtube.com/watch?v=Tvz8an1znIo".to_string())
        );
        // Already canonical: no alternate form to try
        assert_eq!(
            alternate_watch_url("https://www.youtube.com/watch?v=Tvz8an1znIo"),
            None
        );
        assert_eq!(alternate_watch_url("https://example.com/clip.mp4"), None);
    }
}
