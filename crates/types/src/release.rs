//! Display-side models: the authenticated identity and one release row.

use serde::{Deserialize, Serialize};

/// The user the OAuth token belongs to, as returned by `/oauth/identity`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub resource_url: String,
    #[serde(default)]
    pub consumer_name: String,
}

/// A flattened release ready to be rendered as a card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseModel {
    pub title: String,
    pub rating: u8,
    pub year: u32,
    pub artist: String,
    pub label: String,
    pub genre: String,
    pub style: String,
    pub media_condition: String,
    pub sleeve_condition: String,
    pub note: String,
    pub thumb_url: String,
    pub format: String,
}
