//! Headless media resource
//!
//! The terminal cannot render audio itself, so every bound source is written
//! out as one line (an M3U-style playlist that can be piped into a player).
//! Transport commands are only logged.

use std::io::{self, Write};
use tunebox_playback::{LoadToken, MediaResource, PlaybackError, Result};

pub struct ConsoleResource<W: Write + Send = io::Stdout> {
    out: W,
    released: bool,
}

impl Default for ConsoleResource {
    fn default() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleResource<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            released: false,
        }
    }
}

#[cfg(test)]
impl ConsoleResource<Vec<u8>> {
    fn output(&self) -> &str {
        std::str::from_utf8(&self.out).unwrap_or_default()
    }
}

impl<W: Write + Send> MediaResource for ConsoleResource<W> {
    fn load(&mut self, uri: &str, token: LoadToken) -> Result<()> {
        if self.released {
            return Err(PlaybackError::resource("console output released"));
        }
        if uri.trim().is_empty() {
            return Err(PlaybackError::resource("song has no media URL"));
        }

        tracing::debug!(%token, uri, "Binding source");
        writeln!(self.out, "{}", uri)
            .and_then(|_| self.out.flush())
            .map_err(|e| PlaybackError::resource(e.to_string()))
    }

    fn play(&mut self) -> Result<()> {
        tracing::debug!("play");
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        tracing::debug!("pause");
        Ok(())
    }

    fn set_current_time(&mut self, seconds: f64) -> Result<()> {
        tracing::debug!(seconds, "seek");
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        tracing::trace!(volume, "volume");
        Ok(())
    }

    fn release(&mut self) {
        self.released = true;
    }
}
