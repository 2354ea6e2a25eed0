//! Error types for media transport control

use thiserror::Error;
use tunebox_core::{TrackId, TuneboxError};

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Transport command with nothing loaded
    ///
    /// Recovered locally by the caller; never shown to the user.
    #[error("No track loaded")]
    NoActiveTrack,

    /// The media resource could not fetch or decode the track
    #[error("Failed to load track {track_id}: {reason}")]
    MediaLoadFailure { track_id: TrackId, reason: String },

    /// The media resource rejected a command
    #[error("Media resource error: {0}")]
    Resource(String),

    /// Catalog lookup failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] TuneboxError),
}

impl PlaybackError {
    /// Create a resource error
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
