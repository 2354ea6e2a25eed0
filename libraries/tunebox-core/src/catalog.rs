//! In-memory catalog
//!
//! Implements [`Catalog`] and [`ContentManager`] over plain vectors. Used for tests
//! and offline tooling; ordering is insertion order, like the server's listing.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, TuneboxError};
use crate::traits::{Catalog, ContentManager};
use crate::types::{
    Collection, CollectionId, FileUpload, NewCollection, NewTrack, Track, TrackId,
};

#[derive(Debug, Default)]
struct Contents {
    tracks: Vec<Track>,
    collections: Vec<Collection>,
    next_id: u64,
}

impl Contents {
    fn allocate_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// Catalog held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    contents: RwLock<Contents>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing tracks and collections
    pub fn with_contents(tracks: Vec<Track>, collections: Vec<Collection>) -> Self {
        Self {
            contents: RwLock::new(Contents {
                tracks,
                collections,
                next_id: 0,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Contents>> {
        self.contents
            .read()
            .map_err(|_| TuneboxError::Other("catalog lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Contents>> {
        self.contents
            .write()
            .map_err(|_| TuneboxError::Other("catalog lock poisoned".to_string()))
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn list_tracks(&self) -> Result<Vec<Track>> {
        Ok(self.read()?.tracks.clone())
    }

    async fn list_collections(&self) -> Result<Vec<Collection>> {
        Ok(self.read()?.collections.clone())
    }

    async fn fetch_track(&self, id: &TrackId) -> Result<Track> {
        self.read()?
            .tracks
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| TuneboxError::TrackNotFound(id.clone()))
    }
}

#[async_trait]
impl ContentManager for MemoryCatalog {
    async fn create_collection(&self, new: NewCollection) -> Result<Collection> {
        let mut contents = self.write()?;
        let id = contents.allocate_id("album");
        let collection = Collection::new(
            id,
            new.title,
            new.description,
            format!("memory://thumbnails/{}", new.thumbnail.file_name),
        );
        contents.collections.push(collection.clone());

        debug!(collection_id = %collection.id, "Album created");
        Ok(collection)
    }

    async fn create_track(&self, new: NewTrack) -> Result<Track> {
        let mut contents = self.write()?;

        if let Some(ref collection_id) = new.collection_id {
            if !contents.collections.iter().any(|c| &c.id == collection_id) {
                return Err(TuneboxError::CollectionNotFound(collection_id.clone()));
            }
        }

        let id = contents.allocate_id("song");
        let mut track = Track::new(
            id,
            new.title,
            new.artist_name,
            format!("memory://media/{}", new.media.file_name),
        )
        .with_description(new.description);
        track.collection_id = new.collection_id;

        if let Some(ref collection_id) = track.collection_id {
            if let Some(collection) = contents
                .collections
                .iter_mut()
                .find(|c| &c.id == collection_id)
            {
                collection.track_ids.push(track.id.clone());
            }
        }

        contents.tracks.push(track.clone());
        debug!(track_id = %track.id, "Song created");
        Ok(track)
    }

    async fn attach_thumbnail(&self, id: &TrackId, thumbnail: FileUpload) -> Result<Track> {
        let mut contents = self.write()?;
        let track = contents
            .tracks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| TuneboxError::TrackNotFound(id.clone()))?;

        track.thumbnail_uri = Some(format!("memory://thumbnails/{}", thumbnail.file_name));
        Ok(track.clone())
    }

    async fn delete_track(&self, id: &TrackId) -> Result<()> {
        let mut contents = self.write()?;
        let before = contents.tracks.len();
        contents.tracks.retain(|t| &t.id != id);
        if contents.tracks.len() == before {
            return Err(TuneboxError::TrackNotFound(id.clone()));
        }

        for collection in &mut contents.collections {
            collection.track_ids.retain(|t| t != id);
        }
        Ok(())
    }

    async fn delete_collection(&self, id: &CollectionId) -> Result<()> {
        let mut contents = self.write()?;
        let before = contents.collections.len();
        contents.collections.retain(|c| &c.id != id);
        if contents.collections.len() == before {
            return Err(TuneboxError::CollectionNotFound(id.clone()));
        }

        // Songs outlive their album
        for track in &mut contents.tracks {
            if track.collection_id.as_ref() == Some(id) {
                track.collection_id = None;
            }
        }
        Ok(())
    }
}
