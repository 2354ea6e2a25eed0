//! Property-based tests for the media transport controller
//!
//! Uses proptest to verify invariants across many random inputs.

use proptest::prelude::*;
use std::sync::Arc;
use tunebox_core::{MemoryCatalog, Track};
use tunebox_playback::{
    LoadToken, MediaResource, MediaTransportController, PlaybackConfig, QueueCursor, Result,
    TransportState,
};

// ===== Helpers =====

/// Resource that accepts every command
struct NullResource;

impl MediaResource for NullResource {
    fn load(&mut self, _uri: &str, _token: LoadToken) -> Result<()> {
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_current_time(&mut self, _seconds: f64) -> Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) -> Result<()> {
        Ok(())
    }

    fn release(&mut self) {}
}

fn arbitrary_track() -> impl Strategy<Value = Track> {
    ("[a-z0-9]{1,10}", "[A-Za-z ]{1,30}", "[A-Za-z ]{1,20}").prop_map(|(id, title, artist)| {
        let uri = format!("https://cdn.example.com/{}.mp3", id);
        Track::new(id, title, artist, uri)
    })
}

/// Playlist with unique ids, as the catalog guarantees
fn arbitrary_playlist() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(arbitrary_track(), 1..20).prop_map(|tracks| {
        tracks
            .into_iter()
            .enumerate()
            .map(|(i, mut track)| {
                track.id = format!("t{}", i).into();
                track
            })
            .collect()
    })
}

fn controller(tracks: Vec<Track>) -> MediaTransportController<NullResource> {
    MediaTransportController::new(
        PlaybackConfig::default(),
        NullResource,
        Box::new(QueueCursor::new(tracks.clone())),
        Arc::new(MemoryCatalog::with_contents(tracks, Vec::new())),
    )
}

/// Controller with `track` loaded and its duration reported
fn loaded(track: Track, duration: f64) -> (MediaTransportController<NullResource>, LoadToken) {
    let mut ctrl = controller(vec![track.clone()]);
    let token = ctrl.load_track(track).unwrap();
    ctrl.on_metadata_ready(token, duration);
    (ctrl, token)
}

// ===== Property Tests =====

proptest! {
    /// Property: stored volume is always clamp(v, 0, 1)
    #[test]
    fn volume_clamped_to_range(level in any::<f32>().prop_filter("not NaN", |v| !v.is_nan())) {
        let mut ctrl = controller(Vec::new());
        ctrl.set_volume(level).unwrap();

        prop_assert_eq!(ctrl.state().volume, level.clamp(0.0, 1.0));
    }

    /// Property: seeking sets elapsed to exactly fraction * duration
    #[test]
    fn seek_is_exact_fraction_of_duration(
        track in arbitrary_track(),
        duration in 0.1f64..36_000.0,
        fraction in 0.0f64..=1.0,
    ) {
        let (mut ctrl, _) = loaded(track, duration);
        ctrl.seek_to_fraction(fraction).unwrap();

        prop_assert_eq!(ctrl.state().elapsed_seconds, fraction * duration);
        prop_assert!(ctrl.state().elapsed_seconds <= ctrl.state().duration_seconds);
    }

    /// Property: seeking before metadata never moves the position
    #[test]
    fn seek_without_duration_is_noop(track in arbitrary_track(), fraction in any::<f64>()) {
        let mut ctrl = controller(vec![track.clone()]);
        ctrl.load_track(track).unwrap();
        ctrl.seek_to_fraction(fraction).unwrap();

        prop_assert_eq!(ctrl.state().elapsed_seconds, 0.0);
    }

    /// Property: two toggles restore is_playing
    #[test]
    fn double_toggle_restores_play_state(
        track in arbitrary_track(),
        start_playing in any::<bool>(),
        before_metadata in any::<bool>(),
    ) {
        let mut ctrl = controller(vec![track.clone()]);
        let token = ctrl.load_track(track).unwrap();
        if !before_metadata {
            ctrl.on_metadata_ready(token, 100.0);
        }
        if start_playing {
            ctrl.toggle_play_pause().unwrap();
        }

        let before = ctrl.state().is_playing;
        ctrl.toggle_play_pause().unwrap();
        prop_assert_ne!(ctrl.state().is_playing, before);
        ctrl.toggle_play_pause().unwrap();
        prop_assert_eq!(ctrl.state().is_playing, before);
    }

    /// Property: callbacks for a superseded load never touch the new track's state
    #[test]
    fn stale_updates_never_mutate_new_track(
        first in arbitrary_track(),
        second in arbitrary_track(),
        updates in prop::collection::vec(-100.0f64..10_000.0, 1..50),
    ) {
        let (mut ctrl, stale) = loaded(first, 600.0);
        let fresh = ctrl.load_track(second).unwrap();
        prop_assert_ne!(stale, fresh);

        let snapshot = ctrl.state().clone();
        for elapsed in updates {
            prop_assert!(!ctrl.on_time_update(stale, elapsed));
        }
        prop_assert!(!ctrl.on_metadata_ready(stale, 600.0));

        prop_assert_eq!(ctrl.state(), &snapshot);
        prop_assert_eq!(ctrl.transport_state(), TransportState::Loading);
    }

    /// Property: elapsed stays within [0, duration] whatever the resource reports
    #[test]
    fn elapsed_stays_within_duration(
        track in arbitrary_track(),
        duration in 0.0f64..1_000.0,
        updates in prop::collection::vec(any::<f64>(), 1..50),
    ) {
        let (mut ctrl, token) = loaded(track, duration);
        for elapsed in updates {
            ctrl.on_time_update(token, elapsed);
            let state = ctrl.state();
            prop_assert!(state.elapsed_seconds >= 0.0);
            prop_assert!(state.elapsed_seconds <= state.duration_seconds);
        }
    }

    /// Property: skipping never moves past either end of the playlist
    #[test]
    fn skips_stay_inside_playlist(
        tracks in arbitrary_playlist(),
        moves in prop::collection::vec(any::<bool>(), 0..60),
    ) {
        let mut ctrl = controller(tracks.clone());
        let mut index: Option<usize> = None;

        for forward in moves {
            let moved = if forward { ctrl.skip_next().unwrap() } else { ctrl.skip_previous().unwrap() };
            let expected = match (index, forward) {
                (None, true) => Some(0),
                (Some(i), true) if i + 1 < tracks.len() => Some(i + 1),
                (Some(i), false) if i > 0 => Some(i - 1),
                _ => index,
            };
            prop_assert_eq!(moved, expected != index);
            index = expected;
        }

        match index {
            Some(i) => prop_assert_eq!(&ctrl.current_track().unwrap().id, &tracks[i].id),
            None => prop_assert!(ctrl.current_track().is_none()),
        }
    }
}
