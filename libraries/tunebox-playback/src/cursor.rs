//! Ordered playlist cursor
//!
//! Index-based navigation over a fixed track list. Moving past either end is
//! refused rather than wrapped:
//!
//! ```text
//!  previous() = None                          next() = None
//!        ◀──┤ Track A │ Track B │ Track C ├──▶
//!                          ▲
//!                        index
//! ```

use tunebox_core::{Collection, PlaylistCursor, Track, TrackId};

/// Playlist cursor over an owned track list
#[derive(Debug, Clone, Default)]
pub struct QueueCursor {
    tracks: Vec<Track>,

    /// Position of the current track; `None` until something is selected
    index: Option<usize>,
}

impl QueueCursor {
    /// Cursor over `tracks`, positioned before the first one
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            index: None,
        }
    }

    /// Cursor over an album's tracks, in album order
    pub fn from_collection(collection: &Collection, tracks: &[Track]) -> Self {
        Self::new(collection.tracks_in(tracks).into_iter().cloned().collect())
    }

    /// Replace the playlist; the cursor keeps pointing at the same track if it is still present
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        let current_id = self.current().map(|t| t.id.clone());
        self.tracks = tracks;
        self.index = current_id.and_then(|id| self.position_of(&id));
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Check if there is a track after the current one
    pub fn has_next(&self) -> bool {
        match self.index {
            Some(i) => i + 1 < self.tracks.len(),
            None => !self.tracks.is_empty(),
        }
    }

    /// Check if there is a track before the current one
    pub fn has_previous(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }
}

impl PlaylistCursor for QueueCursor {
    fn next(&mut self) -> Option<Track> {
        if !self.has_next() {
            return None;
        }
        let next = self.index.map_or(0, |i| i + 1);
        self.index = Some(next);
        self.tracks.get(next).cloned()
    }

    fn previous(&mut self) -> Option<Track> {
        if !self.has_previous() {
            return None;
        }
        let prev = self.index.map_or(0, |i| i - 1);
        self.index = Some(prev);
        self.tracks.get(prev).cloned()
    }

    fn current(&self) -> Option<&Track> {
        self.index.and_then(|i| self.tracks.get(i))
    }

    fn jump_to(&mut self, id: &TrackId) -> bool {
        match self.position_of(id) {
            Some(i) => {
                self.index = Some(i);
                true
            }
            None => false,
        }
    }
}
