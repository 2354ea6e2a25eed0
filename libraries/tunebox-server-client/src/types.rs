//! Types for Tunebox server API requests and responses.

use serde::{Deserialize, Serialize};
use tunebox_core::{Collection, Role, Track, User};

/// Configuration for connecting to a Tunebox server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "https://music.example.com")
    pub url: String,
    /// Bearer token sent with every request (if configured)
    pub access_token: Option<String>,
}

impl ServerConfig {
    /// Create a new server config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
        }
    }

    /// Create a config with an existing access token.
    pub fn with_token(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: Some(access_token.into()),
        }
    }
}

// =============================================================================
// Catalog Types
// =============================================================================

/// Hosted file reference (`{ "url": ... }`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MediaRef {
    pub url: String,
}

/// A song as returned by the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSong {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub singer: String,
    #[serde(default)]
    pub album: Option<String>,
    pub audio: MediaRef,
    #[serde(default)]
    pub thumbnail: Option<MediaRef>,
}

impl From<ServerSong> for Track {
    fn from(song: ServerSong) -> Self {
        Self {
            id: song.id.into(),
            title: song.title,
            artist_name: song.singer,
            description: song.description,
            media_uri: song.audio.url,
            thumbnail_uri: song.thumbnail.map(|t| t.url),
            collection_id: song.album.filter(|a| !a.is_empty()).map(Into::into),
        }
    }
}

/// An album as returned by the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerAlbum {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub thumbnail: MediaRef,
    /// Song ids, in album order
    #[serde(default)]
    pub songs: Vec<String>,
}

impl From<ServerAlbum> for Collection {
    fn from(album: ServerAlbum) -> Self {
        let mut collection = Collection::new(
            album.id,
            album.title,
            album.description,
            album.thumbnail.url,
        );
        collection.track_ids = album.songs.into_iter().map(Into::into).collect();
        collection
    }
}

/// The signed-in user.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl From<ServerUser> for User {
    fn from(user: ServerUser) -> Self {
        let mut converted = User::new(user.id, user.name, user.role);
        converted.email = user.email;
        converted
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// API error response from server.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
}
