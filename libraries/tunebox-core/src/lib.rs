//! Tunebox Core
//!
//! Platform-agnostic domain types, collaborator traits and catalog search for Tunebox.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Collection`, `User`, upload payloads
//! - **Collaborator Traits**: `Catalog`, `Identity`, `ContentManager`, `PlaylistCursor`
//! - **Search**: `CatalogFilter`, a case-insensitive substring filter
//! - **Admin**: `ContentDesk`, the admin-gated content management workflow
//! - **Error Handling**: Unified `TuneboxError` and `Result` types
//!
//! Network access lives in `tunebox-server-client`; playback in `tunebox-playback`.
//!
//! # Example
//!
//! ```rust
//! use tunebox_core::filter::filter;
//! use tunebox_core::types::{Collection, Track};
//!
//! let tracks = vec![
//!     Track::new("1", "Let It Be", "Beatles", "https://cdn.example.com/1.mp3"),
//!     Track::new("2", "Yesterday", "Beatles", "https://cdn.example.com/2.mp3"),
//! ];
//! let albums: Vec<Collection> = Vec::new();
//!
//! let result = filter(&tracks, &albums, "let");
//! assert_eq!(result.tracks.len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod admin;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use admin::{CollectionForm, ContentDesk, Notice, NoticeLevel, Submission, TrackForm};
pub use catalog::MemoryCatalog;
pub use error::{ContentAction, Result, TuneboxError};
pub use filter::{filter, CatalogFilter, FilterResult};
pub use traits::{Catalog, ContentManager, Identity, PlaylistCursor};

pub use types::{
    Collection, CollectionId, FileUpload, NewCollection, NewTrack, Role, Track, TrackId, User,
    UserId,
};
