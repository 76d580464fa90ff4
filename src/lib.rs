//! Grid Snake - a snake game on a fixed square grid
//!
//! Core modules:
//! - `sim`: Simulation (movement, growth, collisions, render frames)
//! - `renderer`: Renderer abstraction and frame drawing
//! - `platform`: Input source abstraction and frame timing
//! - `persistence`: High score log storage
//! - `highscores`: Top 10 leaderboard
//! - `settings`: Game settings

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{InputMode, Settings, StepPolicy};

/// Game configuration constants
pub mod consts {
    /// Grid width and height in cells
    pub const GRID_SIZE: i32 = 24;
    /// Largest grid a settings file may ask for
    pub const GRID_SIZE_MAX: i32 = 256;
    /// Size of one grid cell in pixels
    pub const SQUARE_SIZE: i32 = 30;
    /// Largest cell a settings file may ask for, in pixels
    pub const SQUARE_SIZE_MAX: i32 = 256;
    /// Number of segments the player starts with
    pub const PLAYER_STARTING_LENGTH: usize = 2;
    /// Seconds between discrete grid steps
    pub const STEP_INTERVAL: f32 = 0.15;
    /// Upper bound on steps taken in one frame when carrying over excess time
    pub const MAX_STEPS_PER_FRAME: u32 = 8;
    /// Target frame rate of the host loop
    pub const TARGET_FPS: u32 = 60;

    /// HUD text
    pub const FONT_SIZE: i32 = 20;
    pub const FPS_POS: (i32, i32) = (30, 30);
    pub const SCORE_POS: (i32, i32) = (30, 60);

    /// Persisted files
    pub const HIGH_SCORE_PATH: &str = "highscore.txt";
    pub const SETTINGS_PATH: &str = "snake_settings.json";
}
