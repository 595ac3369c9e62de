//! URL helpers and shared validators.

use std::borrow::Cow;

use thiserror::Error;
use url::Url;
use validator::ValidationError;

const WATCH_URL_BASE: &str = "https://www.youtube.com/watch";

/// Errors from URL derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Video ID is empty")]
    EmptyVideoId,
    #[error("Invalid URL: {0}")]
    Invalid(String),
}

/// Canonical watch URL for a video identifier.
///
/// The identifier is used as-is apart from trimming; no format checks are
/// applied so that any id a search backend returns can be resolved.
pub fn youtube_watch_url(video_id: &str) -> Result<String, UrlError> {
    let video_id = video_id.trim();
    if video_id.is_empty() {
        return Err(UrlError::EmptyVideoId);
    }

    let url = Url::parse_with_params(WATCH_URL_BASE, &[("v", video_id)])
        .map_err(|e| UrlError::Invalid(e.to_string()))?;
    Ok(url.to_string())
}

/// Rewrite a leading `http:` scheme to `https:`.
///
/// Any other input, including URLs already on `https`, is returned unchanged.
pub fn force_https(url: &str) -> Cow<'_, str> {
    match url.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("http:") => {
            Cow::Owned(format!("https:{}", &url[5..]))
        }
        _ => Cow::Borrowed(url),
    }
}

/// True for absolute `http` or `https` URLs with a host.
pub fn is_web_url(value: &str) -> bool {
    Url::parse(value.trim())
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

/// Reject strings that are empty after trimming.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
