//! Snake simulation module
//!
//! All gameplay logic lives here:
//! - Time-accumulator driven discrete steps
//! - Seeded RNG for apple and spawn placement
//! - No rendering or platform dependencies

pub mod collision;
pub mod frame;
pub mod grid;
pub mod state;
pub mod tick;

pub use collision::{Collision, head_collision, random_free_cell};
pub use frame::{EndScreen, Frame, PlayFrame, interpolated_segments, interpolation_factor};
pub use grid::{Direction, GridPos};
pub use state::{GameResult, GameState, Player, SegmentBuffer};
pub use tick::{TickInput, autopilot, tick};
