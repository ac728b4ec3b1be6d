//! YouTube Data API v3 client implementing `VideoProvider`.

pub mod client;
pub mod errors;
pub mod types;

pub use client::{YouTubeClient, YouTubeClientConfig, API_KEY_PLACEHOLDER};
pub use errors::YouTubeApiError;
pub use types::{SearchListResponse, VideoListResponse};
