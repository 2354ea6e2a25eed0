//! Admin content operations (album/song creation, thumbnails, deletion).

use crate::catalog::endpoint;
use crate::client::{error_for_response, json_or_error, send_error};
use crate::error::{Result, ServerClientError};
use crate::types::{ServerAlbum, ServerSong};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use tunebox_core::{FileUpload, NewCollection, NewTrack};

/// Content client for a Tunebox server.
pub struct ContentClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> ContentClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Create an album with its cover image.
    pub async fn create_album(&self, album: NewCollection) -> Result<ServerAlbum> {
        let url = endpoint(self.base_url, &["api", "albums"])?;
        let file_name = album.thumbnail.file_name.clone();

        let form = Form::new()
            .text("title", album.title)
            .text("description", album.description)
            .part("file", file_part(album.thumbnail)?);

        debug!(url = %url, file = %file_name, "Creating album");

        let response = self.post_form(&url, form).await?;
        let created: ServerAlbum = json_or_error(response, "album").await?;

        info!(album_id = %created.id, title = %created.title, "Album created");
        Ok(created)
    }

    /// Upload a song.
    pub async fn create_song(&self, song: NewTrack) -> Result<ServerSong> {
        let url = endpoint(self.base_url, &["api", "songs"])?;
        let file_name = song.media.file_name.clone();
        let size = song.media.len();

        let album = song
            .collection_id
            .map(|id| id.as_str().to_string())
            .unwrap_or_default();

        let form = Form::new()
            .text("title", song.title)
            .text("description", song.description)
            .text("singer", song.artist_name)
            .text("album", album)
            .part("file", file_part(song.media)?);

        debug!(url = %url, file = %file_name, size, "Uploading song");

        let response = self.post_form(&url, form).await?;
        let created: ServerSong = json_or_error(response, "song").await?;

        info!(
            song_id = %created.id,
            file = %file_name,
            size,
            "Song uploaded"
        );
        Ok(created)
    }

    /// Attach a thumbnail to an existing song.
    pub async fn upload_thumbnail(&self, song_id: &str, thumbnail: FileUpload) -> Result<ServerSong> {
        let url = endpoint(self.base_url, &["api", "songs", song_id, "thumbnail"])?;
        let form = Form::new().part("file", file_part(thumbnail)?);

        debug!(url = %url, song_id = %song_id, "Uploading thumbnail");

        let response = self.post_form(&url, form).await?;
        let updated: ServerSong = json_or_error(response, "song").await?;

        info!(song_id = %updated.id, "Thumbnail attached");
        Ok(updated)
    }

    /// Delete a song.
    pub async fn delete_song(&self, song_id: &str) -> Result<()> {
        let url = endpoint(self.base_url, &["api", "songs", song_id])?;
        self.delete(&url, song_id).await
    }

    /// Delete an album.
    pub async fn delete_album(&self, album_id: &str) -> Result<()> {
        let url = endpoint(self.base_url, &["api", "albums", album_id])?;
        self.delete(&url, album_id).await
    }

    async fn post_form(&self, url: &str, form: Form) -> Result<reqwest::Response> {
        self.http
            .post(url)
            .bearer_auth(self.access_token)
            .multipart(form)
            .send()
            .await
            .map_err(send_error)
    }

    async fn delete(&self, url: &str, id: &str) -> Result<()> {
        debug!(url = %url, id = %id, "Deleting");

        let response = self
            .http
            .delete(url)
            .bearer_auth(self.access_token)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();

        if status.is_success() {
            info!(id = %id, "Deleted");
            Ok(())
        } else {
            Err(error_for_response(response).await)
        }
    }
}

fn file_part(upload: FileUpload) -> Result<Part> {
    let mime = upload.mime_type();
    let part = Part::bytes(upload.bytes)
        .file_name(upload.file_name)
        .mime_str(mime)?;
    Ok(part)
}

/// Read a file from disk into an upload payload.
pub async fn read_upload(path: &Path) -> Result<FileUpload> {
    if !path.exists() {
        return Err(ServerClientError::FileNotFound(path.display().to_string()));
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();

    let mut file = File::open(path).await?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents).await?;

    debug!(file = %path.display(), size = contents.len(), "Read upload");
    Ok(FileUpload::new(file_name, contents))
}
