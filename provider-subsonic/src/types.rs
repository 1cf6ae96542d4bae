//! Subsonic API response types
//!
//! See: http://www.subsonic.org/pages/api.jsp#search3

use serde::Deserialize;

/// Outer wrapper every JSON response is nested in
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "subsonic-response")]
    pub subsonic_response: SubsonicResponse,
}

#[derive(Debug, Deserialize)]
pub struct SubsonicResponse {
    /// `"ok"` or `"failed"`
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub error: Option<ApiError>,

    #[serde(rename = "searchResult3", default)]
    pub search_result3: Option<SearchResult3>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResult3 {
    #[serde(default)]
    pub album: Vec<AlbumEntry>,
}

/// Servers send `null` for unknown names as well as omitting them
#[derive(Debug, Deserialize)]
pub struct AlbumEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
}
