use serde::{Deserialize, Serialize};

/// Canonical song entry returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub genre: String,
    /// Provider video id used for embedding
    pub source_id: String,
    pub thumbnail_url: String,
    /// ISO 8601 duration, e.g. `PT3M45S`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_iso: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_title: Option<String>,
}

/// A search hit as reported by the video provider, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderVideo {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail_url: String,
}
