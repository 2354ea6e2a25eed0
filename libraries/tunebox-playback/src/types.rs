//! Core types for media transport control

use serde::{Deserialize, Serialize};
use tunebox_core::TrackId;

/// Transport state machine
///
/// ```text
/// Idle ──load──▶ Loading ──metadata──▶ Ready ──play──▶ Playing ⇄ Paused
///   ▲               │
///   └──load failure─┘        (any state ──load──▶ Loading)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// No track loaded
    Idle,

    /// Media source bound, waiting for metadata
    Loading,

    /// Metadata known, not started yet
    Ready,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// What the presentation layer reads to draw the player bar
///
/// Reset whenever `current_track_id` changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub current_track_id: Option<TrackId>,
    pub is_playing: bool,
    /// Linear volume in [0, 1]
    pub volume: f32,
    /// Always within [0, `duration_seconds`]
    pub elapsed_seconds: f64,
    /// 0 until the resource reports metadata
    pub duration_seconds: f64,
}

impl PlaybackState {
    pub(crate) fn new(volume: f32) -> Self {
        Self {
            current_track_id: None,
            is_playing: false,
            volume,
            elapsed_seconds: 0.0,
            duration_seconds: 0.0,
        }
    }

    /// Whether the resource has reported a duration
    pub fn duration_known(&self) -> bool {
        self.duration_seconds > 0.0
    }

    /// Elapsed / duration, for the seek bar
    ///
    /// 0.0 while the duration is unknown.
    pub fn progress_fraction(&self) -> f64 {
        if self.duration_known() {
            (self.elapsed_seconds / self.duration_seconds).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Configuration for the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Volume before the user touches the slider (default: 1.0)
    pub initial_volume: f32,

    /// Keep playing across track changes (default: true)
    pub autoplay_on_load: bool,

    /// Move to the next track when one ends (default: true)
    pub advance_on_end: bool,

    /// Minimum position change, in seconds, between two position events (default: 0.25)
    pub position_event_granularity: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            autoplay_on_load: true,
            advance_on_end: true,
            position_event_granularity: 0.25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.initial_volume, 1.0);
        assert!(config.autoplay_on_load);
        assert!(config.advance_on_end);
        assert_eq!(config.position_event_granularity, 0.25);
    }

    #[test]
    fn progress_is_zero_until_duration_known() {
        let mut state = PlaybackState::new(1.0);
        state.elapsed_seconds = 0.0;
        assert_eq!(state.progress_fraction(), 0.0);

        state.duration_seconds = 200.0;
        state.elapsed_seconds = 50.0;
        assert_eq!(state.progress_fraction(), 0.25);
    }

    #[test]
    fn config_fills_missing_fields() {
        let config: PlaybackConfig = serde_json::from_str(r#"{"initial_volume":0.5}"#).unwrap();
        assert_eq!(config.initial_volume, 0.5);
        assert!(config.autoplay_on_load);
    }
}
