//! Concrete live services.

pub mod youtube;

pub use youtube::YouTubeService;
