//! Collision tests and free-cell sampling
//!
//! Walls and the snake's own body are the only obstacles. Both are checked
//! against the head only.

use rand::Rng;

use super::grid::GridPos;
use super::state::Player;

/// What the head ran into, if anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Head left the grid
    Wall,
    /// Head is on one of its own segments
    Body,
}

/// Check the head against the grid bounds and the rest of the body
pub fn head_collision(player: &Player, grid_size: i32) -> Option<Collision> {
    let head = player.head();
    if !head.in_bounds(grid_size) {
        return Some(Collision::Wall);
    }
    if player.body()[1..].contains(&head) {
        return Some(Collision::Body);
    }
    None
}

/// Sample cells uniformly until one is not covered by the snake.
///
/// The caller guarantees a free cell exists (the game is won before the grid
/// fills up).
pub fn random_free_cell<R: Rng>(rng: &mut R, grid_size: i32, player: &Player) -> GridPos {
    debug_assert!(player.length < (grid_size * grid_size) as usize);
    loop {
        let candidate = GridPos::new(rng.random_range(0..grid_size), rng.random_range(0..grid_size));
        if !player.occupies(candidate) {
            return candidate;
        }
    }
}
