//! Grid coordinates and movement directions

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A cell on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `dir` (itself when stationary)
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Whether the cell lies within an `n × n` grid
    #[inline]
    pub fn in_bounds(self, n: i32) -> bool {
        (0..n).contains(&self.x) && (0..n).contains(&self.y)
    }

    /// Cell position as a vector in cell units
    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    pub fn manhattan(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Movement direction. Screen coordinates: `Up` is towards smaller `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Stationary,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The four moving directions
    pub const MOVING: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Cell offset for one step
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Stationary => (0, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The direct reverse (Stationary has none)
    pub fn opposite(self) -> Option<Direction> {
        match self {
            Direction::Stationary => None,
            Direction::Up => Some(Direction::Down),
            Direction::Down => Some(Direction::Up),
            Direction::Left => Some(Direction::Right),
            Direction::Right => Some(Direction::Left),
        }
    }

    /// Whether turning from `self` to `next` would reverse onto the body
    pub fn is_reverse_of(self, next: Direction) -> bool {
        next.opposite() == Some(self)
    }
}
