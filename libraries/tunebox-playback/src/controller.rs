//! Media transport controller - core orchestration
//!
//! Mediates between user intent (play, pause, seek, volume, skip) and a single
//! [`MediaResource`], keeping [`PlaybackState`] consistent with the resource's
//! push callbacks.

use std::sync::Arc;

use tracing::{debug, info, warn};
use tunebox_core::{Catalog, PlaylistCursor, Track, TrackId};

use crate::{
    error::{PlaybackError, Result},
    events::{LoadToken, PlaybackEvent},
    resource::MediaResource,
    types::{PlaybackConfig, PlaybackState, TransportState},
    volume::Volume,
};

/// Media transport controller
///
/// All methods take `&mut self`: commands and callbacks are applied one at a
/// time, in the order the host delivers them. Every callback carries the
/// [`LoadToken`] of the load it belongs to; callbacks from a superseded load
/// are dropped and leave the state untouched.
pub struct MediaTransportController<R: MediaResource> {
    config: PlaybackConfig,
    resource: R,
    cursor: Box<dyn PlaylistCursor>,
    catalog: Arc<dyn Catalog>,

    transport: TransportState,
    state: PlaybackState,
    current_track: Option<Track>,
    volume: Volume,

    // Token of the load callbacks are accepted for
    active_token: Option<LoadToken>,
    last_issued: Option<LoadToken>,

    // Position of the last queued PositionUpdate
    last_reported_position: f64,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,

    released: bool,
}

impl<R: MediaResource> MediaTransportController<R> {
    /// Create a controller with nothing loaded
    pub fn new(
        config: PlaybackConfig,
        resource: R,
        cursor: Box<dyn PlaylistCursor>,
        catalog: Arc<dyn Catalog>,
    ) -> Self {
        let volume = Volume::new(config.initial_volume);

        Self {
            config,
            resource,
            cursor,
            catalog,
            transport: TransportState::Idle,
            state: PlaybackState::new(volume.level()),
            current_track: None,
            volume,
            active_token: None,
            last_issued: None,
            last_reported_position: 0.0,
            pending_events: Vec::new(),
            released: false,
        }
    }

    // ===== Loading =====

    /// Bind a new media source
    ///
    /// Supersedes any load in progress. Elapsed time and duration reset to 0
    /// until the resource reports metadata. If playback was playing (or a play
    /// was requested) and `autoplay_on_load` is set, playback resumes once the
    /// new track is ready.
    ///
    /// A source the resource rejects outright returns `MediaLoadFailure`; the
    /// controller is then `Idle` and an `Error` event is queued.
    ///
    /// The playlist cursor is moved onto the track unless it is already there.
    pub fn load_track(&mut self, track: Track) -> Result<LoadToken> {
        let on_cursor = self.cursor.current().is_some_and(|t| t.id == track.id);
        if !on_cursor {
            self.cursor.jump_to(&track.id);
        }
        self.bind(track, self.carried_play_intent())
    }

    fn carried_play_intent(&self) -> bool {
        self.config.autoplay_on_load && self.state.is_playing
    }

    /// Fetch a track from the catalog and load it
    ///
    /// The playlist cursor is moved onto the track so skipping continues from it.
    pub async fn select_track(&mut self, id: &TrackId) -> Result<LoadToken> {
        let track = self.catalog.fetch_track(id).await?;
        debug!(track_id = %track.id, title = %track.title, "Selected track");
        self.load_track(track)
    }

    fn bind(&mut self, track: Track, play_intent: bool) -> Result<LoadToken> {
        if self.released {
            return Err(PlaybackError::resource("transport has been torn down"));
        }

        let token = self.last_issued.map_or_else(LoadToken::first, LoadToken::next);
        self.last_issued = Some(token);
        self.active_token = Some(token);

        let previous_track_id = self.state.current_track_id.take();
        let track_id = track.id.clone();

        self.state = PlaybackState::new(self.volume.level());
        self.state.current_track_id = Some(track_id.clone());
        self.state.is_playing = play_intent;
        self.last_reported_position = 0.0;
        self.transport = TransportState::Loading;

        info!(
            track_id = %track_id,
            %token,
            autoplay = play_intent,
            "Loading track"
        );

        if previous_track_id.as_ref() != Some(&track_id) {
            self.emit_track_changed(track_id.clone(), previous_track_id);
        }
        self.emit_state_changed(TransportState::Loading);

        let uri = track.media_uri.clone();
        self.current_track = Some(track);

        let level = self.volume.level();
        let bound = self
            .resource
            .set_volume(level)
            .and_then(|()| self.resource.load(&uri, token));

        match bound {
            Ok(()) => Ok(token),
            Err(e) => Err(self.fail_load(track_id, e.to_string())),
        }
    }

    fn fail_load(&mut self, track_id: TrackId, reason: String) -> PlaybackError {
        warn!(track_id = %track_id, reason = %reason, "Media load failed");

        let error = PlaybackError::MediaLoadFailure { track_id, reason };

        self.active_token = None;
        self.current_track = None;
        self.state = PlaybackState::new(self.volume.level());
        self.last_reported_position = 0.0;
        self.transport = TransportState::Idle;

        self.emit_state_changed(TransportState::Idle);
        self.emit_error(error.to_string());
        error
    }

    // ===== Playback Control =====

    /// Play if paused or ready, pause if playing
    ///
    /// While the track is still loading, only the intent is recorded; the play
    /// command is issued when metadata arrives.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.current_track.is_none() {
            return Err(PlaybackError::NoActiveTrack);
        }

        match self.transport {
            TransportState::Playing => {
                self.resource.pause()?;
                self.state.is_playing = false;
                self.transport = TransportState::Paused;
                self.emit_state_changed(TransportState::Paused);
            }
            TransportState::Ready | TransportState::Paused => {
                self.resource.play()?;
                self.state.is_playing = true;
                self.transport = TransportState::Playing;
                self.emit_state_changed(TransportState::Playing);
            }
            TransportState::Loading => {
                self.state.is_playing = !self.state.is_playing;
                debug!(play_pending = self.state.is_playing, "Play intent changed while loading");
            }
            TransportState::Idle => return Err(PlaybackError::NoActiveTrack),
        }

        Ok(())
    }

    // ===== Seek =====

    /// Seek to a fraction of the track
    ///
    /// `fraction` is clamped to [0, 1]. No-op while the duration is unknown, or
    /// when `fraction` is NaN.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<()> {
        if fraction.is_nan() || !self.state.duration_known() {
            return Ok(());
        }

        let elapsed = fraction.clamp(0.0, 1.0) * self.state.duration_seconds;
        self.resource.set_current_time(elapsed)?;
        self.state.elapsed_seconds = elapsed;
        self.emit_position_update();

        Ok(())
    }

    // ===== Volume =====

    /// Set volume, clamped to [0, 1] and applied immediately
    ///
    /// NaN is ignored.
    pub fn set_volume(&mut self, level: f32) -> Result<()> {
        let mut volume = self.volume;
        if !volume.set_level(level) {
            debug!("Ignoring NaN volume");
            return Ok(());
        }

        self.resource.set_volume(volume.level())?;
        self.volume = volume;
        self.state.volume = volume.level();
        self.emit_volume_changed();

        Ok(())
    }

    // ===== Resource Callbacks =====

    /// The resource knows the track length
    ///
    /// Returns false if the callback belongs to a superseded load.
    pub fn on_metadata_ready(&mut self, token: LoadToken, duration_seconds: f64) -> bool {
        if !self.accepts(token, "metadata") {
            return false;
        }

        let duration = if duration_seconds.is_finite() && duration_seconds > 0.0 {
            duration_seconds
        } else {
            0.0
        };
        self.state.duration_seconds = duration;
        self.state.elapsed_seconds = self.state.elapsed_seconds.min(duration);
        self.pending_events.push(PlaybackEvent::DurationKnown {
            duration_seconds: duration,
        });

        if self.transport == TransportState::Loading {
            if self.state.is_playing {
                match self.resource.play() {
                    Ok(()) => self.transport = TransportState::Playing,
                    Err(e) => {
                        warn!(error = %e, "Resource refused to start playback");
                        self.state.is_playing = false;
                        self.transport = TransportState::Ready;
                        self.emit_error(e.to_string());
                    }
                }
            } else {
                self.transport = TransportState::Ready;
            }
            self.emit_state_changed(self.transport);
        }

        true
    }

    /// Position update from the resource
    ///
    /// May fire many times per second. The stored position always follows the
    /// resource; a `PositionUpdate` event is only queued once the position has
    /// moved by `position_event_granularity`.
    ///
    /// Returns false if the callback belongs to a superseded load.
    pub fn on_time_update(&mut self, token: LoadToken, elapsed_seconds: f64) -> bool {
        if !self.accepts(token, "time update") {
            return false;
        }
        if elapsed_seconds.is_nan() {
            return true;
        }

        self.state.elapsed_seconds = elapsed_seconds.clamp(0.0, self.state.duration_seconds);

        let moved = (self.state.elapsed_seconds - self.last_reported_position).abs();
        if moved >= self.config.position_event_granularity {
            self.emit_position_update();
        }

        true
    }

    /// The resource failed to fetch or decode the track
    ///
    /// Returns false if the callback belongs to a superseded load.
    pub fn on_load_failed(&mut self, token: LoadToken, reason: impl Into<String>) -> bool {
        if !self.accepts(token, "load failure") {
            return false;
        }

        let track_id = self
            .state
            .current_track_id
            .clone()
            .unwrap_or_else(|| TrackId::new("unknown"));
        self.fail_load(track_id, reason.into());
        true
    }

    /// The track played to its end
    ///
    /// Advances to the next track when `advance_on_end` is set and the playlist
    /// has one; otherwise pauses at the end.
    ///
    /// Returns false if the callback belongs to a superseded load.
    pub fn on_ended(&mut self, token: LoadToken) -> bool {
        if !self.accepts(token, "end") {
            return false;
        }

        if let Some(track_id) = self.state.current_track_id.clone() {
            self.emit_track_finished(track_id);
        }
        self.state.elapsed_seconds = self.state.duration_seconds;

        if self.config.advance_on_end {
            if let Some(next) = self.cursor.next() {
                if let Err(e) = self.bind(next, self.config.autoplay_on_load) {
                    debug!(error = %e, "Advancing to the next track failed");
                }
                return true;
            }
            debug!("End of playlist reached");
        }

        self.state.is_playing = false;
        self.transport = TransportState::Paused;
        self.emit_state_changed(TransportState::Paused);
        true
    }

    fn accepts(&self, token: LoadToken, callback: &str) -> bool {
        let current = !self.released && self.active_token == Some(token);
        if !current {
            debug!(
                %token,
                active = ?self.active_token.map(LoadToken::value),
                callback,
                "Dropping stale resource callback"
            );
        }
        current
    }

    // ===== Navigation =====

    /// Load the next track in the playlist
    ///
    /// Returns `Ok(false)` and changes nothing at the end of the playlist.
    /// If the resource rejects the next source, the cursor steps back so the
    /// playlist position is unchanged.
    pub fn skip_next(&mut self) -> Result<bool> {
        let Some(track) = self.cursor.next() else {
            debug!("Already at the last track");
            return Ok(false);
        };

        if let Err(e) = self.bind(track, self.carried_play_intent()) {
            self.cursor.previous();
            return Err(e);
        }
        Ok(true)
    }

    /// Load the previous track in the playlist
    ///
    /// Returns `Ok(false)` and changes nothing at the start of the playlist.
    /// If the resource rejects the previous source, the cursor steps forward
    /// again so the playlist position is unchanged.
    pub fn skip_previous(&mut self) -> Result<bool> {
        let Some(track) = self.cursor.previous() else {
            debug!("Already at the first track");
            return Ok(false);
        };

        if let Err(e) = self.bind(track, self.carried_play_intent()) {
            self.cursor.next();
            return Err(e);
        }
        Ok(true)
    }

    // ===== Teardown =====

    /// Release the media resource
    ///
    /// Callbacks delivered afterwards are stale. Called automatically on drop.
    pub fn teardown(&mut self) {
        if self.released {
            return;
        }

        self.resource.release();
        self.released = true;
        self.active_token = None;
        self.current_track = None;
        self.state = PlaybackState::new(self.volume.level());
        self.transport = TransportState::Idle;
        info!("Media transport torn down");
    }

    // ===== State Queries =====

    /// Snapshot for the presentation layer
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn transport_state(&self) -> TransportState {
        self.transport
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Token of the load whose callbacks are currently accepted
    pub fn current_token(&self) -> Option<LoadToken> {
        self.active_token
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn is_torn_down(&self) -> bool {
        self.released
    }

    // ===== Event Queue =====

    /// Drain pending events
    ///
    /// Returns all events queued since the last drain. The UI calls this
    /// whenever it redraws.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit_state_changed(&mut self, state: TransportState) {
        self.pending_events
            .push(PlaybackEvent::StateChanged { state });
    }

    fn emit_track_changed(&mut self, track_id: TrackId, previous_track_id: Option<TrackId>) {
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });
    }

    fn emit_position_update(&mut self) {
        self.last_reported_position = self.state.elapsed_seconds;
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            elapsed_seconds: self.state.elapsed_seconds,
            duration_seconds: self.state.duration_seconds,
        });
    }

    fn emit_track_finished(&mut self, track_id: TrackId) {
        self.pending_events
            .push(PlaybackEvent::TrackFinished { track_id });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            volume: self.volume.level(),
        });
    }

    fn emit_error(&mut self, message: String) {
        self.pending_events.push(PlaybackEvent::Error { message });
    }
}

impl<R: MediaResource> Drop for MediaTransportController<R> {
    fn drop(&mut self) {
        if !self.released {
            debug!("Releasing media resource on drop");
            self.teardown();
        }
    }
}
