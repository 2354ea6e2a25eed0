//! Catalog search
//!
//! Case-insensitive substring filter over the in-memory track and album lists.
//! Inclusion only: no ranking, and the input order is kept.

use crate::types::{Collection, Track};

/// Tracks and collections that matched a query, borrowed from the inputs
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult<'a> {
    pub tracks: Vec<&'a Track>,
    pub collections: Vec<&'a Collection>,
}

impl FilterResult<'_> {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.collections.is_empty()
    }
}

/// A prepared search query
///
/// The needle is lower-cased once here instead of once per comparison.
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    needle: String,
}

impl CatalogFilter {
    /// Prepare a query. Surrounding whitespace is ignored.
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.trim().to_lowercase(),
        }
    }

    /// An empty query matches everything
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Title or artist contains the query
    pub fn matches_track(&self, track: &Track) -> bool {
        self.contains(&track.title) || self.contains(&track.artist_name)
    }

    /// Title contains the query
    pub fn matches_collection(&self, collection: &Collection) -> bool {
        self.contains(&collection.title)
    }

    pub fn apply<'a>(
        &self,
        tracks: &'a [Track],
        collections: &'a [Collection],
    ) -> FilterResult<'a> {
        if self.is_empty() {
            return FilterResult {
                tracks: tracks.iter().collect(),
                collections: collections.iter().collect(),
            };
        }

        FilterResult {
            tracks: tracks.iter().filter(|t| self.matches_track(t)).collect(),
            collections: collections
                .iter()
                .filter(|c| self.matches_collection(c))
                .collect(),
        }
    }

    fn contains(&self, haystack: &str) -> bool {
        self.needle.is_empty() || haystack.to_lowercase().contains(&self.needle)
    }
}

/// Filter both lists by `query`
pub fn filter<'a>(
    tracks: &'a [Track],
    collections: &'a [Collection],
    query: &str,
) -> FilterResult<'a> {
    CatalogFilter::new(query).apply(tracks, collections)
}
