//! Playback Events
//!
//! Event-based communication for UI synchronization during playback.
//! The controller queues events as its state changes; the presentation layer
//! drains them whenever it redraws.

use serde::{Deserialize, Serialize};
use tunebox_core::TrackId;

use crate::types::TransportState;

/// Identifies one `load_track` call
///
/// Resource callbacks carry the token of the load they belong to. Once a newer
/// load has been issued, callbacks with an older token are stale and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoadToken(u64);

impl LoadToken {
    pub(crate) fn first() -> Self {
        Self(1)
    }

    #[must_use]
    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LoadToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// Events emitted by the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new state
        state: TransportState,
    },

    /// A different track was bound to the resource
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// The resource reported the track length
    DurationKnown {
        duration_seconds: f64,
    },

    /// Position update, coalesced to the configured granularity
    PositionUpdate {
        elapsed_seconds: f64,
        duration_seconds: f64,
    },

    /// Track played to its end
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume in [0, 1]
        volume: f32,
    },

    /// Non-fatal error to show as a notification
    Error {
        /// Error message
        message: String,
    },
}
