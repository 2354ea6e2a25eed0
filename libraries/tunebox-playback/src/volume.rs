//! Volume control
//!
//! Linear volume in [0, 1], matching the player's volume slider.

/// Volume level, always within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    level: f32,
}

impl Volume {
    /// Create new volume controller
    ///
    /// Out-of-range levels are clamped; NaN becomes full volume.
    pub fn new(level: f32) -> Self {
        let mut volume = Self { level: 1.0 };
        volume.set_level(level);
        volume
    }

    /// Set volume level, clamped to [0, 1]
    ///
    /// Returns false and keeps the old level when `level` is NaN.
    pub fn set_level(&mut self, level: f32) -> bool {
        if level.is_nan() {
            return false;
        }
        self.level = level.clamp(0.0, 1.0);
        true
    }

    /// Get current volume level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Whether the output is silent
    pub fn is_silent(&self) -> bool {
        self.level == 0.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
