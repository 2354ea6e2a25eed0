//! Platform-agnostic media resource trait
//!
//! Abstracts the element that actually fetches and plays audio (an HTML audio
//! element, a native decoder + output, a remote renderer).

use crate::error::Result;
use crate::events::LoadToken;

/// A single playable media resource
///
/// Commands flow from the controller into the resource through this trait.
/// Results flow back as push callbacks: the platform calls
/// `on_metadata_ready`, `on_time_update`, `on_ended` and `on_load_failed` on the
/// controller, passing the [`LoadToken`] it received in [`MediaResource::load`].
pub trait MediaResource: Send {
    /// Bind a new source and start fetching it
    ///
    /// Supersedes any load in progress. Fetching is asynchronous; an `Err` here
    /// means the source was rejected outright (bad URI, unsupported format).
    fn load(&mut self, uri: &str, token: LoadToken) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Jump to a position, in seconds from the start
    fn set_current_time(&mut self, seconds: f64) -> Result<()>;

    /// Set the linear volume (0.0 = silent, 1.0 = full volume)
    fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Stop delivering callbacks and free the underlying handle
    fn release(&mut self);
}

/// Resource that records every command, for unit tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingResource {
    pub commands: Vec<Command>,
    pub fail_next_load: bool,
    pub released: bool,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Load(String, LoadToken),
    Play,
    Pause,
    Seek(f64),
    Volume(f32),
}

#[cfg(test)]
impl MediaResource for RecordingResource {
    fn load(&mut self, uri: &str, token: LoadToken) -> Result<()> {
        if self.fail_next_load {
            self.fail_next_load = false;
            return Err(crate::error::PlaybackError::resource("unsupported format"));
        }
        self.commands.push(Command::Load(uri.to_string(), token));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.commands.push(Command::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.commands.push(Command::Pause);
        Ok(())
    }

    fn set_current_time(&mut self, seconds: f64) -> Result<()> {
        self.commands.push(Command::Seek(seconds));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.commands.push(Command::Volume(volume));
        Ok(())
    }

    fn release(&mut self) {
        self.released = true;
    }
}
