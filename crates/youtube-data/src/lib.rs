//! YouTube Data API v3 contract used by the live-status poller.
//!
//! Only the two endpoints needed to detect a live broadcast are modelled:
//! `search.list` (filtered by `eventType`) and `videos.list` with the
//! `liveStreamingDetails` part.

pub mod error;
pub mod models;
pub mod request;
pub mod urls;

pub use error::ApiError;
pub use models::{LiveStreamingDetails, SearchListResponse, SearchResult, VideoListResponse, VideoResource};
pub use request::{EventType, SearchRequest, VideosRequest};
pub use urls::{embed_url, extract_video_id, watch_url};
