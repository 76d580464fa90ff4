//! Render frames produced by the simulation
//!
//! Positions are in cell units; the renderer maps them to pixels.

use glam::Vec2;

use super::grid::{Direction, GridPos};
use super::state::{GameResult, GameState, Player};
use crate::HighScores;

/// What to draw for one frame
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Only the empty grid (game just reset or just ended)
    Blank,
    /// Game in progress
    Playing(PlayFrame),
    /// Result message and leaderboard
    EndScreen(EndScreen),
}

/// Snapshot of a game in progress.
///
/// Segment positions are not copied out; the renderer reads them from the
/// player with [`PlayFrame::segments`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayFrame {
    pub apple: GridPos,
    pub score: i32,
    /// Fraction of the current step already shown, in [0, 1]
    pub interpolation: f32,
}

impl PlayFrame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            apple: state.apple,
            score: state.score(),
            interpolation: interpolation_factor(state.time_accumulator, state.settings.step_interval),
        }
    }

    /// Interpolated segment positions, head first
    pub fn segments(self, player: &Player) -> impl Iterator<Item = Vec2> + '_ {
        interpolated_segments(player, self.interpolation)
    }
}

/// End-of-game display
#[derive(Debug, Clone, PartialEq)]
pub struct EndScreen {
    pub outcome: GameResult,
    pub high_scores: HighScores,
}

impl EndScreen {
    pub fn message(&self) -> &'static str {
        match self.outcome {
            GameResult::Win => "You win! Press space to play again.",
            _ => "You lose! Press space to play again.",
        }
    }
}

/// Fraction of the step interval that has elapsed, clamped to [0, 1]
#[inline]
pub fn interpolation_factor(time_accumulator: f32, step_interval: f32) -> f32 {
    (time_accumulator / step_interval).clamp(0.0, 1.0)
}

/// Where each visible segment should be drawn.
///
/// A moving segment slides from the cell of the segment behind it (where it
/// came from) towards its own cell. The tail uses the lookahead slot.
pub fn interpolated_segments(player: &Player, t: f32) -> impl Iterator<Item = Vec2> + '_ {
    let cells = player.segments.as_slice();
    let moving = player.direction != Direction::Stationary;
    cells[..player.length]
        .iter()
        .zip(&cells[1..=player.length])
        .map(move |(current, behind)| {
            if moving {
                behind.as_vec2().lerp(current.as_vec2(), t)
            } else {
                current.as_vec2()
            }
        })
}
