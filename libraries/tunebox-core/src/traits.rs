/// Collaborator traits for Tunebox
///
/// The player and the admin desk never talk to the network directly. They are
/// handed implementations of these traits (HTTP client, in-memory catalog, test fakes).
use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    Collection, CollectionId, FileUpload, NewCollection, NewTrack, Track, TrackId, User,
};

/// Source of truth for tracks and collections
#[async_trait]
pub trait Catalog: Send + Sync {
    /// All tracks, in catalog order
    async fn list_tracks(&self) -> Result<Vec<Track>>;

    /// All collections, in catalog order
    async fn list_collections(&self) -> Result<Vec<Collection>>;

    /// A single track by ID
    ///
    /// # Errors
    /// `TrackNotFound` if the catalog has no such track
    async fn fetch_track(&self, id: &TrackId) -> Result<Track>;
}

/// Who is using the client
#[async_trait]
pub trait Identity: Send + Sync {
    /// The signed-in user, or `None` for anonymous use
    async fn current_user(&self) -> Result<Option<User>>;
}

/// Admin-only content mutations
#[async_trait]
pub trait ContentManager: Send + Sync {
    /// Create an album
    async fn create_collection(&self, collection: NewCollection) -> Result<Collection>;

    /// Create a song, optionally inside an album
    async fn create_track(&self, track: NewTrack) -> Result<Track>;

    /// Attach artwork to an existing song
    async fn attach_thumbnail(&self, id: &TrackId, thumbnail: FileUpload) -> Result<Track>;

    /// Delete a song
    ///
    /// Fails with `TrackNotFound` when no song has this id.
    async fn delete_track(&self, id: &TrackId) -> Result<()>;

    /// Delete an album; its songs are kept
    ///
    /// Fails with `CollectionNotFound` when no album has this id.
    async fn delete_collection(&self, id: &CollectionId) -> Result<()>;
}

/// Ordered playlist position, owned outside the transport controller
pub trait PlaylistCursor: Send {
    /// Advance and return the new track, or `None` at the end
    fn next(&mut self) -> Option<Track>;

    /// Step back and return the new track, or `None` at the start
    fn previous(&mut self) -> Option<Track>;

    /// Track under the cursor
    fn current(&self) -> Option<&Track>;

    /// Move the cursor onto `id`
    ///
    /// Returns false when the playlist does not contain the track.
    fn jump_to(&mut self, id: &TrackId) -> bool {
        let _ = id;
        false
    }
}
