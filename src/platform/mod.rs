//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (key edges)
//! - Frame time
//! - FPS measurement

use crate::sim::TickInput;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Space
    Restart,
}

/// Host input and timing, polled once per frame
pub trait InputSource {
    /// Whether `key` went down since the previous frame
    fn key_pressed(&mut self, key: Key) -> bool;
    /// Seconds since the previous frame
    fn frame_time(&self) -> f32;
}

impl TickInput {
    /// Collect this frame's key edges
    pub fn poll(source: &mut dyn InputSource) -> Self {
        Self {
            up: source.key_pressed(Key::Up),
            down: source.key_pressed(Key::Down),
            left: source.key_pressed(Key::Left),
            right: source.key_pressed(Key::Right),
            restart: source.key_pressed(Key::Restart),
        }
    }
}

/// Number of frame timestamps averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Frames per second over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `time` seconds
    pub fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the one we overwrite next
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
