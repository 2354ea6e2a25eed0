//! Tunebox - Media Transport Control
//!
//! Platform-agnostic playback control for Tunebox.
//!
//! This crate provides:
//! - A transport state machine (`Idle -> Loading -> Ready -> Playing <-> Paused`)
//! - Play/pause, fractional seek and linear volume (clamped to [0, 1])
//! - Skip next/previous through an injected playlist cursor (clamped, no wrap-around)
//! - Stale-callback rejection via per-load tokens
//! - A queued event stream for UI synchronization
//!
//! # Architecture
//!
//! `tunebox-playback` never touches audio itself. The host platform implements
//! [`MediaResource`] (an HTML audio element, a native decoder, a remote
//! renderer) and forwards the resource's callbacks to the controller together
//! with the [`LoadToken`] it was handed in [`MediaResource::load`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tunebox_core::{MemoryCatalog, Track};
//! use tunebox_playback::{
//!     LoadToken, MediaResource, MediaTransportController, PlaybackConfig, QueueCursor, Result,
//!     TransportState,
//! };
//!
//! struct Silent;
//!
//! impl MediaResource for Silent {
//!     fn load(&mut self, _uri: &str, _token: LoadToken) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn set_current_time(&mut self, _seconds: f64) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, _volume: f32) -> Result<()> { Ok(()) }
//!     fn release(&mut self) {}
//! }
//!
//! let tracks = vec![
//!     Track::new("1", "Let It Be", "Beatles", "https://cdn.example.com/1.mp3"),
//!     Track::new("2", "Yesterday", "Beatles", "https://cdn.example.com/2.mp3"),
//! ];
//!
//! let mut controller = MediaTransportController::new(
//!     PlaybackConfig::default(),
//!     Silent,
//!     Box::new(QueueCursor::new(tracks.clone())),
//!     Arc::new(MemoryCatalog::with_contents(tracks, Vec::new())),
//! );
//!
//! let token = controller.load_track(Track::new("1", "Let It Be", "Beatles", "https://cdn.example.com/1.mp3"))?;
//! controller.on_metadata_ready(token, 243.0);
//! controller.toggle_play_pause()?;
//! assert_eq!(controller.transport_state(), TransportState::Playing);
//!
//! controller.seek_to_fraction(0.5)?;
//! assert_eq!(controller.state().elapsed_seconds, 121.5);
//! # Ok::<(), tunebox_playback::PlaybackError>(())
//! ```

#![forbid(unsafe_code)]

pub mod controller;
pub mod cursor;
pub mod error;
pub mod events;
pub mod resource;
pub mod types;
pub mod volume;

pub use controller::MediaTransportController;
pub use cursor::QueueCursor;
pub use error::{PlaybackError, Result};
pub use events::{LoadToken, PlaybackEvent};
pub use resource::MediaResource;
pub use types::{PlaybackConfig, PlaybackState, TransportState};
pub use volume::Volume;
