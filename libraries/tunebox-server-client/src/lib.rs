//! Tunebox Server Client
//!
//! HTTP client library for the Tunebox catalog and content API.
//!
//! # Features
//!
//! - **Catalog**: list songs and albums, fetch a single song
//! - **Identity**: look up the signed-in user and their role
//! - **Content management**: create albums and songs (multipart upload),
//!   attach thumbnails, delete songs and albums
//!
//! [`TuneboxServerClient`] implements the `Catalog`, `Identity` and
//! `ContentManager` traits from `tunebox-core`.
//!
//! # Example
//!
//! ```ignore
//! use tunebox_core::{Catalog, Identity};
//! use tunebox_server_client::{ServerConfig, TuneboxServerClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::with_token("https://music.example.com", "secret");
//!     let client = TuneboxServerClient::new(config)?;
//!
//!     if let Some(user) = client.current_user().await? {
//!         println!("Signed in as {}", user.name);
//!     }
//!
//!     let songs = client.list_tracks().await?;
//!     println!("Found {} songs", songs.len());
//!
//!     Ok(())
//! }
//! ```

mod catalog;
mod client;
mod content;
mod error;
mod identity;
mod types;

// Re-export main types
pub use client::{
    CatalogClientHandle, ContentClientHandle, IdentityClientHandle, TuneboxServerClient,
};
pub use error::{Result, ServerClientError};
pub use types::{MediaRef, ServerAlbum, ServerConfig, ServerSong, ServerUser};

// Re-export sub-clients for direct use if needed
pub use catalog::CatalogClient;
pub use content::{read_upload, ContentClient};
pub use identity::IdentityClient;
