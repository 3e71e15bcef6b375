//! Watch/embed URL helpers.

use std::sync::LazyLock;

use regex::Regex;

static QUERY_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]v=([A-Za-z0-9_-]+)").unwrap());

static SHORT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtu\.be/([A-Za-z0-9_-]+)").unwrap());

/// Canonical watch URL for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!(
        "https://youtube.com/watch?v={}",
        urlencoding::encode(video_id)
    )
}

pub fn embed_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{}",
        urlencoding::encode(video_id)
    )
}

/// Extract the video id from a `watch?v=` or `youtu.be/` URL.
pub fn extract_video_id(url: &str) -> Option<&str> {
    QUERY_ID_REGEX
        .captures(url)
        .or_else(|| SHORT_ID_REGEX.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_watch_url() {
        assert_eq!(
            extract_video_id("https://youtube.com/watch?v=abc123"),
            Some("abc123")
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=a-b_C9&t=3"),
            Some("a-b_C9")
        );
    }

    #[test]
    fn extracts_from_short_url() {
        assert_eq!(extract_video_id("https://youtu.be/xyz789"), Some("xyz789"));
    }

    #[test]
    fn rejects_unknown_shapes() {
        assert_eq!(extract_video_id("https://example.com/no-id"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn watch_url_encodes_id() {
        assert_eq!(watch_url("abc123"), "https://youtube.com/watch?v=abc123");
        assert_eq!(watch_url("a b&c"), "https://youtube.com/watch?v=a%20b%26c");
    }
}
