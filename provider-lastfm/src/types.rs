//! Last.fm API response types
//!
//! See: https://www.last.fm/api/show/user.getTopAlbums

use serde::Deserialize;

/// `user.gettopalbums` response
#[derive(Debug, Deserialize)]
pub struct TopAlbumsResponse {
    pub topalbums: TopAlbums,
}

#[derive(Debug, Deserialize)]
pub struct TopAlbums {
    /// Absent when the user has no history in the period
    #[serde(default)]
    pub album: Vec<TopAlbum>,
}

#[derive(Debug, Deserialize)]
pub struct TopAlbum {
    pub name: String,
    pub artist: ArtistRef,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

/// Error envelope returned in place of a result
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: i64,
    #[serde(default)]
    pub message: String,
}
