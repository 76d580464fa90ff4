//! Game settings
//!
//! Defaults come from [`crate::consts`]. A JSON settings file may override
//! them; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How directional key presses are latched into the pending direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputMode {
    /// At most one buffered turn per discrete step
    #[default]
    Buffered,
    /// Every qualifying key press replaces the pending direction
    Immediate,
}

/// What happens to the time accumulator once it passes the step interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StepPolicy {
    /// Reset to zero, dropping any excess (one step per frame at most)
    #[default]
    ResetToZero,
    /// Subtract the interval, stepping repeatedly up to `MAX_STEPS_PER_FRAME`
    CarryOver,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grid width and height in cells
    pub grid_size: i32,
    /// Cell size in pixels
    pub square_size: i32,
    /// Segments at the start of a game (score is length minus this)
    pub starting_length: usize,
    /// Seconds per discrete step
    pub step_interval: f32,
    pub input_mode: InputMode,
    pub step_policy: StepPolicy,
    /// Score log location
    pub score_path: String,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            square_size: SQUARE_SIZE,
            starting_length: PLAYER_STARTING_LENGTH,
            step_interval: STEP_INTERVAL,
            input_mode: InputMode::Buffered,
            step_policy: StepPolicy::ResetToZero,
            score_path: HIGH_SCORE_PATH.to_string(),
            show_fps: true,
        }
    }
}

impl Settings {
    /// Number of cells on the grid (0 for a negative size)
    pub fn grid_capacity(&self) -> usize {
        let n = usize::try_from(self.grid_size).unwrap_or(0);
        n.saturating_mul(n)
    }

    /// Clamp values into a playable range
    pub fn sanitized(mut self) -> Self {
        self.grid_size = self.grid_size.clamp(2, GRID_SIZE_MAX);
        self.square_size = self.square_size.clamp(1, SQUARE_SIZE_MAX);
        self.starting_length = self
            .starting_length
            .clamp(PLAYER_STARTING_LENGTH, self.grid_size as usize);
        if !(self.step_interval.is_finite() && self.step_interval > 0.0) {
            self.step_interval = STEP_INTERVAL;
        }
        self
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings file at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
