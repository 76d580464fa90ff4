//! Game state and core simulation types

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::random_free_cell;
use super::grid::{Direction, GridPos};
use crate::HighScores;
use crate::consts::MAX_STEPS_PER_FRAME;
use crate::settings::{Settings, StepPolicy};

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Reset pending; performed on the next tick
    NewGame,
    /// Active gameplay
    InProgress,
    /// Grid filled
    Win,
    /// Hit a wall or itself
    Lose,
}

impl GameResult {
    /// Whether the game has ended and is showing the end screen
    pub fn is_over(self) -> bool {
        matches!(self, GameResult::Win | GameResult::Lose)
    }
}

/// Fixed-capacity segment positions.
///
/// Allocated once at `grid capacity + 2` so a step never reallocates. Index 0
/// is the head. The slot just past the tail keeps the tail's previous cell,
/// which is where the tail is drawn coming from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentBuffer {
    cells: Box<[GridPos]>,
}

impl SegmentBuffer {
    pub fn new(grid_capacity: usize, fill: GridPos) -> Self {
        Self {
            cells: vec![fill; grid_capacity + 2].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[GridPos] {
        &self.cells
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [GridPos] {
        &mut self.cells
    }
}

impl std::ops::Index<usize> for SegmentBuffer {
    type Output = GridPos;

    fn index(&self, i: usize) -> &GridPos {
        &self.cells[i]
    }
}

impl std::ops::IndexMut<usize> for SegmentBuffer {
    fn index_mut(&mut self, i: usize) -> &mut GridPos {
        &mut self.cells[i]
    }
}

/// The player-controlled snake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub segments: SegmentBuffer,
    pub length: usize,
    /// Committed direction, applied at each discrete step
    pub direction: Direction,
}

impl Player {
    /// A stationary snake lying in a straight line to the left of `head`
    pub fn spawn(head: GridPos, length: usize, grid_capacity: usize) -> Self {
        let tail = GridPos::new(head.x - (length as i32 - 1), head.y);
        let mut segments = SegmentBuffer::new(grid_capacity, tail);
        for i in 0..length {
            segments[i] = GridPos::new(head.x - i as i32, head.y);
        }
        Self {
            segments,
            length,
            direction: Direction::Stationary,
        }
    }

    #[inline]
    pub fn head(&self) -> GridPos {
        self.segments[0]
    }

    /// The visible segments, head first
    #[inline]
    pub fn body(&self) -> &[GridPos] {
        &self.segments.as_slice()[..self.length]
    }

    /// Whether any visible segment is on `pos`
    pub fn occupies(&self, pos: GridPos) -> bool {
        self.body().contains(&pos)
    }

    /// Move one cell in the committed direction.
    ///
    /// Every segment takes its predecessor's cell, the lookahead slot keeps
    /// the old tail cell, then the head moves.
    pub fn advance(&mut self) {
        if self.direction == Direction::Stationary {
            return;
        }
        let len = self.length;
        let cells = self.segments.as_mut_slice();
        cells.copy_within(0..len, 1);
        cells[len + 1] = cells[len];
        cells[0] = cells[0].step(self.direction);
    }

    /// Extend by one segment. The new tail starts on the lookahead slot.
    pub fn grow(&mut self) {
        self.length += 1;
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub player: Player,
    pub apple: GridPos,
    /// Latched next direction, committed at the next step
    pub pending_direction: Direction,
    pub result: GameResult,
    /// Seconds since the last discrete step
    pub time_accumulator: f32,
    /// Leaderboard, refreshed when a game ends
    pub high_scores: HighScores,
    rng: Pcg32,
}

impl GameState {
    /// Create a game in progress with a random layout
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let placeholder = GridPos::default();
        let mut state = Self {
            player: Player::spawn(placeholder, 1, settings.grid_capacity()),
            settings,
            apple: placeholder,
            pending_direction: Direction::Stationary,
            result: GameResult::NewGame,
            time_accumulator: 0.0,
            high_scores: HighScores::new(),
            rng: Pcg32::seed_from_u64(seed),
        };

        state.reset();

        state
    }

    /// Start a fresh game: new head and apple positions, stationary snake
    pub fn reset(&mut self) {
        let n = self.settings.grid_size;
        let length = self.settings.starting_length;

        // Leave room for the body to the left of the head
        let head = GridPos::new(
            self.rng.random_range((length as i32 - 1)..n),
            self.rng.random_range(0..n),
        );
        self.player = Player::spawn(head, length, self.settings.grid_capacity());
        self.pending_direction = Direction::Stationary;
        self.time_accumulator = 0.0;
        self.place_apple();
        self.result = GameResult::InProgress;

        log::info!("New game: head at ({}, {})", head.x, head.y);
    }

    /// Move the apple to a random free cell
    pub fn place_apple(&mut self) {
        self.apple = random_free_cell(&mut self.rng, self.settings.grid_size, &self.player);
        log::debug!("Apple placed at ({}, {})", self.apple.x, self.apple.y);
    }

    /// Apples eaten this game
    pub fn score(&self) -> i32 {
        (self.player.length - self.settings.starting_length) as i32
    }

    /// Whether the snake fills the grid
    pub fn is_full(&self) -> bool {
        self.player.length >= self.settings.grid_capacity()
    }

    /// Add frame time to the accumulator and return how many discrete
    /// steps are due
    pub fn consume_time(&mut self, dt: f32) -> u32 {
        let interval = self.settings.step_interval;
        self.time_accumulator += dt;

        match self.settings.step_policy {
            StepPolicy::ResetToZero => {
                if self.time_accumulator > interval {
                    self.time_accumulator = 0.0;
                    1
                } else {
                    0
                }
            }
            StepPolicy::CarryOver => {
                let mut steps = 0;
                while self.time_accumulator > interval && steps < MAX_STEPS_PER_FRAME {
                    self.time_accumulator -= interval;
                    steps += 1;
                }
                // Drop a backlog we could not catch up on
                self.time_accumulator = self.time_accumulator.min(interval);
                steps
            }
        }
    }

    /// One discrete step: commit the pending direction and move
    pub fn step(&mut self) {
        self.player.direction = self.pending_direction;
        self.player.advance();
    }
}
