//! Player and subscribe-widget markup.

use youtube_data::{embed_url, extract_video_id};

use crate::service::PageRender;

use super::config::{SubscribeButton, YouTubeConfig};

const SUBSCRIBE_SCRIPT: &str = r#"<script src="https://apis.google.com/js/platform.js" async defer></script>"#;

/// Render the embed for `config.video_url`, or an empty string when no video id can be found.
pub fn render(config: &YouTubeConfig, page: &mut PageRender) -> String {
    if config.video_url.is_empty() {
        return String::new();
    }
    let Some(video_id) = extract_video_id(&config.video_url) else {
        return String::new();
    };

    let mut html = format!(
        concat!(
            r#"<div class="cp-live-embed cp-live-embed--youtube">"#,
            r#"<iframe width="560" height="315" src="{src}" title="YouTube video player" frameborder="0" "#,
            r#"allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" "#,
            r#"allowfullscreen></iframe></div>"#
        ),
        src = embed_url(video_id)
    );

    if config.subscribe_button == SubscribeButton::Show && !config.channel_id.is_empty() {
        html.push_str(&format!(
            r#"<div class="g-ytsubscribe" data-channelid="{}" data-layout="default" data-count="default"></div>"#,
            urlencoding::encode(&config.channel_id)
        ));
        if page.claim_subscribe_script() {
            html.push_str(SUBSCRIBE_SCRIPT);
        }
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> YouTubeConfig {
        YouTubeConfig {
            channel_id: "UC1".to_string(),
            api_key: "key".to_string(),
            video_url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn renders_player_from_watch_url() {
        let html = render(&config("https://youtube.com/watch?v=abc123"), &mut PageRender::new());
        assert!(html.contains(r#"src="https://www.youtube.com/embed/abc123""#));
        assert!(html.contains("g-ytsubscribe"));
        assert!(html.contains("platform.js"));
    }

    #[test]
    fn renders_player_from_short_url() {
        let html = render(&config("https://youtu.be/xyz789"), &mut PageRender::new());
        assert!(html.contains("/embed/xyz789"));
    }

    #[test]
    fn unknown_url_renders_nothing() {
        assert_eq!(render(&config("https://example.com/no-id"), &mut PageRender::new()), "");
        assert_eq!(render(&config(""), &mut PageRender::new()), "");
    }

    #[test]
    fn subscribe_script_only_once_per_page() {
        let mut page = PageRender::new();
        let first = render(&config("https://youtu.be/a1"), &mut page);
        let second = render(&config("https://youtu.be/b2"), &mut page);
        assert!(first.contains("platform.js"));
        assert!(second.contains("g-ytsubscribe"));
        assert!(!second.contains("platform.js"));
    }

    #[test]
    fn hidden_subscribe_button() {
        let mut cfg = config("https://youtu.be/a1");
        cfg.subscribe_button = SubscribeButton::Hide;
        let mut page = PageRender::new();
        let html = render(&cfg, &mut page);
        assert!(!html.contains("g-ytsubscribe"));
        // Script was never claimed.
        assert!(page.claim_subscribe_script());
    }
}
