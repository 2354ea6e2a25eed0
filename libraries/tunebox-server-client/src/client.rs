//! Main Tunebox server client.

use crate::catalog::CatalogClient;
use crate::content::ContentClient;
use crate::error::{Result, ServerClientError};
use crate::identity::IdentityClient;
use crate::types::{ApiError, ServerConfig};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use tunebox_core::{
    Catalog, Collection, CollectionId, ContentManager, FileUpload, Identity, NewCollection,
    NewTrack, Track, TrackId, TuneboxError, User,
};

/// Main client for a Tunebox server.
///
/// Implements [`Catalog`], [`Identity`] and [`ContentManager`], so it can be
/// injected anywhere the core expects those collaborators.
///
/// # Example
///
/// ```ignore
/// use tunebox_server_client::{ServerConfig, TuneboxServerClient};
/// use tunebox_core::Catalog;
///
/// let client = TuneboxServerClient::new(ServerConfig::new("https://music.example.com"))?;
/// let songs = client.list_tracks().await?;
/// println!("Found {} songs", songs.len());
/// ```
pub struct TuneboxServerClient {
    http: Client,
    config: Arc<RwLock<ServerConfig>>,
}

impl TuneboxServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;

        let normalized_config = ServerConfig {
            url,
            access_token: config.access_token.filter(|t| !t.is_empty()),
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Tunebox/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(normalized_config)),
        })
    }

    /// Get the server URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Set the access token (e.g., from stored credentials).
    pub async fn set_token(&self, access_token: impl Into<String>) {
        let mut config = self.config.write().await;
        config.access_token = Some(access_token.into());
    }

    /// Clear the stored token.
    pub async fn clear_token(&self) {
        let mut config = self.config.write().await;
        config.access_token = None;
        info!("Cleared access token");
    }

    /// Get a catalog client. Works with or without a token.
    pub async fn catalog(&self) -> CatalogClientHandle {
        let config = self.config.read().await;
        CatalogClientHandle {
            http: self.http.clone(),
            url: config.url.clone(),
            access_token: config.access_token.clone(),
        }
    }

    /// Get an identity client. Works with or without a token.
    pub async fn identity(&self) -> IdentityClientHandle {
        let config = self.config.read().await;
        IdentityClientHandle {
            http: self.http.clone(),
            url: config.url.clone(),
            access_token: config.access_token.clone(),
        }
    }

    /// Get a content client for admin operations.
    ///
    /// Returns an error if not authenticated.
    pub async fn content(&self) -> Result<ContentClientHandle> {
        let config = self.config.read().await;
        let access_token = config
            .access_token
            .clone()
            .ok_or(ServerClientError::AuthRequired)?;

        Ok(ContentClientHandle {
            http: self.http.clone(),
            url: config.url.clone(),
            access_token,
        })
    }
}

/// Handle for catalog operations.
pub struct CatalogClientHandle {
    http: Client,
    url: String,
    access_token: Option<String>,
}

impl CatalogClientHandle {
    /// Get the catalog client.
    pub fn client(&self) -> CatalogClient<'_> {
        CatalogClient::new(&self.http, &self.url, self.access_token.as_deref())
    }
}

/// Handle for identity operations.
pub struct IdentityClientHandle {
    http: Client,
    url: String,
    access_token: Option<String>,
}

impl IdentityClientHandle {
    /// Get the identity client.
    pub fn client(&self) -> IdentityClient<'_> {
        IdentityClient::new(&self.http, &self.url, self.access_token.as_deref())
    }
}

/// Handle for content operations.
pub struct ContentClientHandle {
    http: Client,
    url: String,
    access_token: String,
}

impl ContentClientHandle {
    /// Get the content client.
    pub fn client(&self) -> ContentClient<'_> {
        ContentClient::new(&self.http, &self.url, &self.access_token)
    }
}

// =============================================================================
// Collaborator trait implementations
// =============================================================================

#[async_trait]
impl Catalog for TuneboxServerClient {
    async fn list_tracks(&self) -> tunebox_core::Result<Vec<Track>> {
        let handle = self.catalog().await;
        let songs = handle.client().list_songs().await?;
        Ok(songs.into_iter().map(Track::from).collect())
    }

    async fn list_collections(&self) -> tunebox_core::Result<Vec<Collection>> {
        let handle = self.catalog().await;
        let albums = handle.client().list_albums().await?;
        Ok(albums.into_iter().map(Collection::from).collect())
    }

    async fn fetch_track(&self, id: &TrackId) -> tunebox_core::Result<Track> {
        let handle = self.catalog().await;
        match handle.client().get_song(id.as_str()).await {
            Ok(song) => Ok(song.into()),
            Err(e) if e.is_not_found() => Err(TuneboxError::TrackNotFound(id.clone())),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl Identity for TuneboxServerClient {
    async fn current_user(&self) -> tunebox_core::Result<Option<User>> {
        let handle = self.identity().await;
        let user = handle.client().me().await?;
        Ok(user.map(User::from))
    }
}

#[async_trait]
impl ContentManager for TuneboxServerClient {
    async fn create_collection(&self, collection: NewCollection) -> tunebox_core::Result<Collection> {
        let handle = self.content().await?;
        let album = handle.client().create_album(collection).await?;
        Ok(album.into())
    }

    async fn create_track(&self, track: NewTrack) -> tunebox_core::Result<Track> {
        let handle = self.content().await?;
        let song = handle.client().create_song(track).await?;
        Ok(song.into())
    }

    async fn attach_thumbnail(
        &self,
        id: &TrackId,
        thumbnail: FileUpload,
    ) -> tunebox_core::Result<Track> {
        let handle = self.content().await?;
        match handle.client().upload_thumbnail(id.as_str(), thumbnail).await {
            Ok(song) => Ok(song.into()),
            Err(e) if e.is_not_found() => Err(TuneboxError::TrackNotFound(id.clone())),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_track(&self, id: &TrackId) -> tunebox_core::Result<()> {
        let handle = self.content().await?;
        match handle.client().delete_song(id.as_str()).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => Err(TuneboxError::TrackNotFound(id.clone())),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_collection(&self, id: &CollectionId) -> tunebox_core::Result<()> {
        let handle = self.content().await?;
        match handle.client().delete_album(id.as_str()).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => Err(TuneboxError::CollectionNotFound(id.clone())),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Response handling shared by the sub-clients
// =============================================================================

/// Map a transport failure, telling "server down" apart from other errors.
pub(crate) fn send_error(e: reqwest::Error) -> ServerClientError {
    if e.is_connect() || e.is_timeout() {
        ServerClientError::ServerUnreachable(e.to_string())
    } else {
        ServerClientError::Request(e)
    }
}

/// Turn a non-success response into an error.
pub(crate) async fn error_for_response(response: Response) -> ServerClientError {
    let status = response.status();

    match status {
        StatusCode::UNAUTHORIZED => ServerClientError::AuthRequired,
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);

            ServerClientError::RateLimited {
                retry_after_secs: retry_after,
            }
        }
        _ => {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&error_text)
                .map(|e| e.message)
                .unwrap_or(error_text);

            if status == StatusCode::FORBIDDEN {
                ServerClientError::Forbidden(message)
            } else {
                ServerClientError::ServerError {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}

/// Parse a JSON body, or turn a non-success response into an error.
pub(crate) async fn json_or_error<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    if !response.status().is_success() {
        return Err(error_for_response(response).await);
    }

    response.json().await.map_err(|e| {
        debug!(error = %e, what, "Unparseable response body");
        ServerClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
    })
}
