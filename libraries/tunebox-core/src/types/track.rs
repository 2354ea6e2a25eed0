/// Track domain type
use serde::{Deserialize, Serialize};

use super::{CollectionId, TrackId};

/// Thumbnail shown for tracks that have no artwork yet
pub const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/50";

/// A playable audio item
///
/// Owned by the catalog; the player and the UI only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Performing artist
    pub artist_name: String,

    /// Free-form description
    pub description: String,

    /// Where the audio bytes are fetched from
    pub media_uri: String,

    /// Artwork, if one has been attached
    pub thumbnail_uri: Option<String>,

    /// Album this track belongs to
    pub collection_id: Option<CollectionId>,
}

impl Track {
    /// Create a track with the fields every track has
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist_name: impl Into<String>,
        media_uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist_name: artist_name.into(),
            description: String::new(),
            media_uri: media_uri.into(),
            thumbnail_uri: None,
            collection_id: None,
        }
    }

    /// Builder-style setter for the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style setter for the thumbnail
    #[must_use]
    pub fn with_thumbnail(mut self, uri: impl Into<String>) -> Self {
        self.thumbnail_uri = Some(uri.into());
        self
    }

    /// Builder-style setter for the owning album
    #[must_use]
    pub fn in_collection(mut self, collection_id: impl Into<CollectionId>) -> Self {
        self.collection_id = Some(collection_id.into());
        self
    }

    /// Thumbnail URI, or the placeholder image when none is attached
    pub fn thumbnail_or_placeholder(&self) -> &str {
        self.thumbnail_uri.as_deref().unwrap_or(PLACEHOLDER_THUMBNAIL)
    }

    /// First `max_chars` characters of the description followed by `...`
    ///
    /// Counts characters, not bytes, so multi-byte text is never split.
    pub fn description_preview(&self, max_chars: usize) -> String {
        let mut preview: String = self.description.chars().take(max_chars).collect();
        preview.push_str("...");
        preview
    }
}
