//! Collection (album) types

use serde::{Deserialize, Serialize};

use super::{CollectionId, Track, TrackId};

/// A named, ordered group of tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub title: String,
    pub description: String,
    pub thumbnail_uri: String,
    /// Playback order
    #[serde(default)]
    pub track_ids: Vec<TrackId>,
}

impl Collection {
    pub fn new(
        id: impl Into<CollectionId>,
        title: impl Into<String>,
        description: impl Into<String>,
        thumbnail_uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            thumbnail_uri: thumbnail_uri.into(),
            track_ids: Vec::new(),
        }
    }

    /// Resolve `track_ids` against `tracks`, in collection order
    ///
    /// Ids with no matching track are skipped.
    pub fn tracks_in<'a>(&self, tracks: &'a [Track]) -> Vec<&'a Track> {
        self.track_ids
            .iter()
            .filter_map(|id| tracks.iter().find(|t| &t.id == id))
            .collect()
    }
}
