//! Request builders for the `search` and `videos` endpoints.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ApiError;

pub const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
pub const VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";

/// Broadcast type passed as `eventType` to `search.list`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EventType {
    /// Broadcasts that are currently live.
    #[default]
    Live,
    /// Broadcasts that are scheduled but not started yet.
    Upcoming,
}

/// `search.list` request for a channel's broadcasts of one event type.
#[derive(Debug, Clone)]
pub struct SearchRequest<'a> {
    pub channel_id: &'a str,
    pub api_key: &'a str,
    pub event_type: EventType,
}

impl<'a> SearchRequest<'a> {
    pub fn new(channel_id: &'a str, api_key: &'a str, event_type: EventType) -> Self {
        Self {
            channel_id,
            api_key,
            event_type,
        }
    }

    /// Build the full request URL.
    pub fn url(&self) -> Result<Url, ApiError> {
        if self.channel_id.is_empty() {
            return Err(ApiError::MissingParameter("channelId"));
        }
        if self.api_key.is_empty() {
            return Err(ApiError::MissingParameter("key"));
        }

        let url = Url::parse_with_params(
            SEARCH_URL,
            &[
                ("part", "snippet"),
                ("type", "video"),
                ("eventType", self.event_type.as_ref()),
                ("channelId", self.channel_id),
                ("key", self.api_key),
            ],
        )?;
        Ok(url)
    }
}

/// Batched `videos.list` request for live streaming details.
#[derive(Debug, Clone)]
pub struct VideosRequest<'a> {
    pub ids: &'a [&'a str],
    pub api_key: &'a str,
}

impl<'a> VideosRequest<'a> {
    pub fn new(ids: &'a [&'a str], api_key: &'a str) -> Self {
        Self { ids, api_key }
    }

    pub fn url(&self) -> Result<Url, ApiError> {
        if self.ids.is_empty() {
            return Err(ApiError::MissingParameter("id"));
        }
        if self.api_key.is_empty() {
            return Err(ApiError::MissingParameter("key"));
        }

        let ids = self.ids.join(",");
        let url = Url::parse_with_params(
            VIDEOS_URL,
            &[
                ("part", "liveStreamingDetails"),
                ("type", "video"),
                ("id", ids.as_str()),
                ("key", self.api_key),
            ],
        )?;
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn query(url: &Url) -> HashMap<String, String> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn search_url_carries_all_parameters() {
        let url = SearchRequest::new("UC123", "secret", EventType::Upcoming)
            .url()
            .unwrap();
        assert!(url.as_str().starts_with(SEARCH_URL));

        let params = query(&url);
        assert_eq!(params["part"], "snippet");
        assert_eq!(params["type"], "video");
        assert_eq!(params["eventType"], "upcoming");
        assert_eq!(params["channelId"], "UC123");
        assert_eq!(params["key"], "secret");
    }

    #[test]
    fn search_url_requires_credentials() {
        assert!(matches!(
            SearchRequest::new("", "secret", EventType::Live).url(),
            Err(ApiError::MissingParameter("channelId"))
        ));
        assert!(matches!(
            SearchRequest::new("UC123", "", EventType::Live).url(),
            Err(ApiError::MissingParameter("key"))
        ));
    }

    #[test]
    fn videos_url_joins_ids() {
        let ids = ["a", "b", "c"];
        let url = VideosRequest::new(&ids, "secret").url().unwrap();
        let params = query(&url);
        assert_eq!(params["part"], "liveStreamingDetails");
        assert_eq!(params["id"], "a,b,c");
        assert_eq!(params["key"], "secret");
    }

    #[test]
    fn event_type_parses_case_insensitively() {
        assert_eq!("live".parse::<EventType>().unwrap(), EventType::Live);
        assert_eq!("Upcoming".parse::<EventType>().unwrap(), EventType::Upcoming);
        assert!("completed".parse::<EventType>().is_err());
        assert_eq!(EventType::default().to_string(), "live");
    }
}
