//! Catalog operations for a Tunebox server.

use crate::client::{json_or_error, send_error};
use crate::error::{Result, ServerClientError};
use crate::types::{ServerAlbum, ServerSong};
use reqwest::{Client, RequestBuilder};
use tracing::debug;
use url::Url;

/// Read-only catalog client.
pub struct CatalogClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: Option<&'a str>,
}

impl<'a> CatalogClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.http.get(url);
        match self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Get every song.
    pub async fn list_songs(&self) -> Result<Vec<ServerSong>> {
        let url = endpoint(self.base_url, &["api", "songs"])?;
        debug!(url = %url, "Fetching songs");

        let response = self.get(&url).send().await.map_err(send_error)?;
        let songs: Vec<ServerSong> = json_or_error(response, "songs").await?;

        debug!(songs = songs.len(), "Fetched songs");
        Ok(songs)
    }

    /// Get every album.
    pub async fn list_albums(&self) -> Result<Vec<ServerAlbum>> {
        let url = endpoint(self.base_url, &["api", "albums"])?;
        debug!(url = %url, "Fetching albums");

        let response = self.get(&url).send().await.map_err(send_error)?;
        let albums: Vec<ServerAlbum> = json_or_error(response, "albums").await?;

        debug!(albums = albums.len(), "Fetched albums");
        Ok(albums)
    }

    /// Get a single song by ID.
    pub async fn get_song(&self, song_id: &str) -> Result<ServerSong> {
        let url = endpoint(self.base_url, &["api", "songs", song_id])?;
        debug!(url = %url, song_id = %song_id, "Fetching song");

        let response = self.get(&url).send().await.map_err(send_error)?;
        json_or_error(response, "song").await
    }
}

/// Append path segments to the server base URL.
///
/// Each segment is percent-encoded as a single path segment, so an id
/// containing `/`, `?` or spaces cannot change the route.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<String> {
    let mut url =
        Url::parse(base_url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| ServerClientError::InvalidUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}
