//! Per-frame simulation tick
//!
//! Advances the game by one rendered frame: latches input, takes any due
//! discrete steps, resolves collisions and apples, and produces a frame.

use super::collision::head_collision;
use super::frame::{EndScreen, Frame, PlayFrame};
use super::grid::Direction;
use super::state::{GameResult, GameState};
use crate::persistence::ScoreStore;
use crate::settings::InputMode;

/// Key edges for a single frame (each press is seen once)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Start a new game from the end screen (space)
    pub restart: bool,
}

impl TickInput {
    /// Input pressing a single direction key
    pub fn from_direction(dir: Direction) -> Self {
        let mut input = Self::default();
        match dir {
            Direction::Up => input.up = true,
            Direction::Down => input.down = true,
            Direction::Left => input.left = true,
            Direction::Right => input.right = true,
            Direction::Stationary => {}
        }
        input
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Default::default()
        }
    }
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    store: &mut dyn ScoreStore,
) -> Frame {
    match state.result {
        GameResult::NewGame => {
            state.reset();
            Frame::Blank
        }
        GameResult::InProgress => update(state, input, dt, store),
        GameResult::Win | GameResult::Lose => {
            let screen = EndScreen {
                outcome: state.result,
                high_scores: state.high_scores,
            };
            if input.restart {
                state.result = GameResult::NewGame;
            }
            Frame::EndScreen(screen)
        }
    }
}

fn update(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    store: &mut dyn ScoreStore,
) -> Frame {
    latch_direction(state, input);

    // Collisions are resolved every frame, and after each step when several
    // steps are due at once
    let steps = state.consume_time(dt);
    for n in 0..steps.max(1) {
        if n < steps {
            state.step();
        }
        if let Some(outcome) = resolve(state) {
            end_game(state, outcome, store);
            return Frame::Blank;
        }
    }

    Frame::Playing(PlayFrame::capture(state))
}

/// Accept direction keys into the pending direction, never reversing
fn latch_direction(state: &mut GameState, input: &TickInput) {
    if state.settings.input_mode == InputMode::Buffered
        && state.pending_direction != state.player.direction
    {
        // A turn is already queued for this step
        return;
    }

    let committed = state.player.direction;
    let presses = [
        (input.up, Direction::Up),
        (input.left, Direction::Left),
        (input.down, Direction::Down),
        (input.right, Direction::Right),
    ];
    for (pressed, dir) in presses {
        if pressed && !committed.is_reverse_of(dir) {
            state.pending_direction = dir;
        }
    }
}

/// Check the head against walls, body and apple.
/// Returns the final result if the game is over.
fn resolve(state: &mut GameState) -> Option<GameResult> {
    if let Some(hit) = head_collision(&state.player, state.settings.grid_size) {
        log::debug!("Collision: {:?} at {:?}", hit, state.player.head());
        return Some(GameResult::Lose);
    }

    if state.player.head() == state.apple {
        state.player.grow();
        if state.is_full() {
            return Some(GameResult::Win);
        }
        state.place_apple();
    }

    None
}

/// Record the score, rebuild the leaderboard from the log and enter the
/// end screen. Storage failures are logged and play continues.
fn end_game(state: &mut GameState, outcome: GameResult, store: &mut dyn ScoreStore) {
    let score = state.score();
    log::info!("Game over ({:?}), score {}", outcome, score);

    if let Err(e) = store.append(score) {
        log::warn!("Could not save score: {}", e);
    }

    match store.load_all() {
        Ok(scores) => state.high_scores.rebuild(scores),
        Err(e) => {
            log::warn!("Could not read high scores: {}", e);
            state.high_scores.rebuild([score]);
        }
    }

    state.result = outcome;
}

/// Pick input for an unattended game: head towards the apple without
/// reversing, leaving the grid or running into the body. Restarts as soon
/// as a game ends.
pub fn autopilot(state: &GameState) -> TickInput {
    match state.result {
        GameResult::Win | GameResult::Lose => return TickInput::restart(),
        GameResult::NewGame => return TickInput::default(),
        GameResult::InProgress => {}
    }

    let player = &state.player;
    let head = player.head();
    let committed = player.direction;
    // The tail moves out of the way on the next step
    let obstacles = &player.body()[..player.length - 1];

    let best = Direction::MOVING
        .into_iter()
        .filter(|&dir| !committed.is_reverse_of(dir))
        .filter(|&dir| {
            let next = head.step(dir);
            next.in_bounds(state.settings.grid_size) && !obstacles.contains(&next)
        })
        .min_by_key(|&dir| head.step(dir).manhattan(state.apple));

    best.map(TickInput::from_direction).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryScoreStore;
    use crate::settings::Settings;
    use crate::sim::grid::GridPos;
    use crate::sim::state::Player;

    const FRAME: f32 = 1.0 / 60.0;

    /// Snake of length 2 with head at `head`, already moving `dir`
    fn moving_state(settings: Settings, head: GridPos, dir: Direction) -> GameState {
        let mut state = GameState::new(settings, 42);
        state.player = Player::spawn(head, 2, state.settings.grid_capacity());
        state.player.direction = dir;
        state.pending_direction = dir;
        state.apple = GridPos::new(0, 23);
        state
    }

    /// One long frame, enough for exactly one step
    fn run_one_step(state: &mut GameState, store: &mut MemoryScoreStore) -> Frame {
        tick(state, &TickInput::default(), 0.16, store)
    }

    #[test]
    fn test_step_moves_head_right() {
        let mut store = MemoryScoreStore::default();
        let mut state = moving_state(Settings::default(), GridPos::new(5, 5), Direction::Right);

        // Below the interval: no movement
        tick(&mut state, &TickInput::default(), 0.1, &mut store);
        assert_eq!(state.player.head(), GridPos::new(5, 5));

        tick(&mut state, &TickInput::default(), 0.1, &mut store);
        assert_eq!(state.player.head(), GridPos::new(6, 5));
        assert_eq!(state.player.body()[1], GridPos::new(5, 5));
        assert_eq!(state.player.length, 2);
        assert_eq!(state.time_accumulator, 0.0);
    }

    #[test]
    fn test_stationary_until_first_key() {
        let mut store = MemoryScoreStore::default();
        let mut state = GameState::new(Settings::default(), 5);
        let head = state.player.head();
        for _ in 0..30 {
            let frame = tick(&mut state, &TickInput::default(), FRAME, &mut store);
            assert!(matches!(frame, Frame::Playing(_)));
        }
        assert_eq!(state.player.head(), head);
        assert_eq!(state.result, GameResult::InProgress);
    }

    #[test]
    fn test_reverse_is_rejected() {
        let mut store = MemoryScoreStore::default();
        let mut state = moving_state(Settings::default(), GridPos::new(5, 5), Direction::Right);
        tick(&mut state, &TickInput::from_direction(Direction::Left), FRAME, &mut store);
        assert_eq!(state.pending_direction, Direction::Right);

        run_one_step(&mut state, &mut store);
        assert_eq!(state.player.direction, Direction::Right);
        assert_eq!(state.player.head(), GridPos::new(6, 5));
    }

    #[test]
    fn test_buffered_input_allows_one_turn_per_step() {
        let mut store = MemoryScoreStore::default();
        let mut state = moving_state(Settings::default(), GridPos::new(5, 5), Direction::Right);

        tick(&mut state, &TickInput::from_direction(Direction::Up), FRAME, &mut store);
        assert_eq!(state.pending_direction, Direction::Up);
        // Second press within the same step is dropped
        tick(&mut state, &TickInput::from_direction(Direction::Down), FRAME, &mut store);
        assert_eq!(state.pending_direction, Direction::Up);

        run_one_step(&mut state, &mut store);
        assert_eq!(state.player.direction, Direction::Up);
        assert_eq!(state.player.head(), GridPos::new(5, 4));

        // After the step, a new turn is accepted again
        tick(&mut state, &TickInput::from_direction(Direction::Left), FRAME, &mut store);
        assert_eq!(state.pending_direction, Direction::Left);
    }

    #[test]
    fn test_immediate_input_takes_latest_press() {
        let settings = Settings {
            input_mode: InputMode::Immediate,
            ..Default::default()
        };
        let mut store = MemoryScoreStore::default();
        let mut state = moving_state(settings, GridPos::new(5, 5), Direction::Right);

        tick(&mut state, &TickInput::from_direction(Direction::Up), FRAME, &mut store);
        tick(&mut state, &TickInput::from_direction(Direction::Down), FRAME, &mut store);
        assert_eq!(state.pending_direction, Direction::Down);
        // Still measured against the committed direction
        tick(&mut state, &TickInput::from_direction(Direction::Left), FRAME, &mut store);
        assert_eq!(state.pending_direction, Direction::Down);
    }

    #[test]
    fn test_same_frame_presses_last_in_order_wins() {
        let mut store = MemoryScoreStore::default();
        let mut state = moving_state(Settings::default(), GridPos::new(5, 5), Direction::Right);
        let input = TickInput {
            up: true,
            down: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME, &mut store);
        assert_eq!(state.pending_direction, Direction::Down);
    }

    #[test]
    fn test_wall_collision_loses() {
        let mut store = MemoryScoreStore::default();
        let mut state = moving_state(Settings::default(), GridPos::new(23, 5), Direction::Right);

        let frame = run_one_step(&mut state, &mut store);
        assert_eq!(frame, Frame::Blank);
        assert_eq!(state.player.head(), GridPos::new(24, 5));
        assert_eq!(state.result, GameResult::Lose);
        assert_eq!(store.scores, vec![0]);
    }

    #[test]
    fn test_self_collision_loses() {
        let mut store = MemoryScoreStore::default();
        let mut state = GameState::new(Settings::default(), 42);
        state.player = Player::spawn(GridPos::new(5, 5), 5, state.settings.grid_capacity());
        state.apple = GridPos::new(0, 23);
        state.pending_direction = Direction::Down;

        for dir in [Direction::Down, Direction::Left, Direction::Up] {
            tick(&mut state, &TickInput::from_direction(dir), 0.0, &mut store);
            run_one_step(&mut state, &mut store);
        }
        assert_eq!(state.result, GameResult::Lose);
        assert_eq!(store.scores, vec![3]);
    }

    #[test]
    fn test_eating_apple_grows_and_moves_apple() {
        let mut store = MemoryScoreStore::default();
        let mut state = moving_state(Settings::default(), GridPos::new(5, 5), Direction::Right);
        state.apple = GridPos::new(6, 5);

        let frame = run_one_step(&mut state, &mut store);
        assert_eq!(state.player.length, 3);
        assert_eq!(state.score(), 1);
        assert!(!state.player.occupies(state.apple));
        assert_eq!(state.result, GameResult::InProgress);
        match frame {
            Frame::Playing(play) => {
                assert_eq!(play.score, 1);
                assert_eq!(play.segments(&state.player).count(), 3);
                assert_eq!(play.apple, state.apple);
            }
            other => panic!("expected a playing frame, got {:?}", other),
        }
    }

    #[test]
    fn test_filling_grid_wins() {
        let settings = Settings {
            grid_size: 2,
            ..Default::default()
        };
        let mut store = MemoryScoreStore::default();
        let mut state = GameState::new(settings, 42);
        // Length 3 snake along (0,0) (1,0) (1,1), moving down the left column
        state.player = Player::spawn(GridPos::new(1, 0), 2, 4);
        state.player.segments[0] = GridPos::new(0, 0);
        state.player.segments[1] = GridPos::new(1, 0);
        state.player.segments[2] = GridPos::new(1, 1);
        state.player.length = 3;
        state.player.direction = Direction::Down;
        state.pending_direction = Direction::Down;
        state.apple = GridPos::new(0, 1);

        run_one_step(&mut state, &mut store);
        assert_eq!(state.player.length, 4);
        assert_eq!(state.result, GameResult::Win);
        assert_eq!(store.scores, vec![2]);
        assert_eq!(state.high_scores.top_score(), 2);
    }

    #[test]
    fn test_end_screen_then_restart() {
        let mut store = MemoryScoreStore {
            scores: vec![4, 9],
        };
        let mut state = moving_state(Settings::default(), GridPos::new(23, 5), Direction::Right);
        run_one_step(&mut state, &mut store);
        assert_eq!(state.high_scores.entries()[..3], [9, 4, 0]);

        // End screen holds until restart
        let frame = tick(&mut state, &TickInput::from_direction(Direction::Up), FRAME, &mut store);
        assert!(matches!(&frame, Frame::EndScreen(s) if s.outcome == GameResult::Lose));
        assert_eq!(state.result, GameResult::Lose);

        let frame = tick(&mut state, &TickInput::restart(), FRAME, &mut store);
        assert!(matches!(frame, Frame::EndScreen(_)));
        assert_eq!(state.result, GameResult::NewGame);

        let frame = tick(&mut state, &TickInput::default(), FRAME, &mut store);
        assert_eq!(frame, Frame::Blank);
        assert_eq!(state.result, GameResult::InProgress);
        assert_eq!(state.player.length, 2);
        assert_eq!(state.player.direction, Direction::Stationary);
        // Log is only written once per game
        assert_eq!(store.scores, vec![4, 9, 0]);
    }

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn append(&mut self, _score: i32) -> std::io::Result<()> {
            Err(std::io::Error::other("disk unavailable"))
        }

        fn load_all(&self) -> std::io::Result<Vec<i32>> {
            Err(std::io::Error::other("disk unavailable"))
        }
    }

    #[test]
    fn test_storage_failure_is_not_fatal() {
        let mut state = moving_state(Settings::default(), GridPos::new(5, 5), Direction::Right);
        state.apple = GridPos::new(6, 5);
        tick(&mut state, &TickInput::default(), 0.16, &mut BrokenStore);
        state.pending_direction = Direction::Up;
        state.player.segments[0] = GridPos::new(6, 0);
        tick(&mut state, &TickInput::default(), 0.16, &mut BrokenStore);

        assert_eq!(state.result, GameResult::Lose);
        assert_eq!(state.high_scores.entries()[..2], [1, 0]);
    }

    #[test]
    fn test_carry_over_checks_each_step() {
        let settings = Settings {
            step_policy: crate::settings::StepPolicy::CarryOver,
            ..Default::default()
        };
        let mut store = MemoryScoreStore::default();
        let mut state = moving_state(settings, GridPos::new(21, 5), Direction::Right);
        // 4 steps due, the wall is hit on the third
        tick(&mut state, &TickInput::default(), 0.61, &mut store);
        assert_eq!(state.result, GameResult::Lose);
        assert_eq!(state.player.head(), GridPos::new(24, 5));
    }

    #[test]
    fn test_autopilot_heads_for_apple() {
        let mut state = moving_state(Settings::default(), GridPos::new(5, 5), Direction::Right);
        state.apple = GridPos::new(5, 10);
        assert_eq!(autopilot(&state), TickInput::from_direction(Direction::Down));

        state.apple = GridPos::new(1, 5);
        // Left would reverse; go around instead
        let input = autopilot(&state);
        assert!(!input.left);
        assert!(input.up || input.down);
    }

    #[test]
    fn test_autopilot_avoids_wall() {
        let mut state = moving_state(Settings::default(), GridPos::new(23, 0), Direction::Right);
        state.apple = GridPos::new(23, 10);
        let input = autopilot(&state);
        assert_eq!(input, TickInput::from_direction(Direction::Down));
    }

    #[test]
    fn test_autopilot_restarts_after_game_over() {
        let mut state = GameState::new(Settings::default(), 1);
        state.result = GameResult::Lose;
        assert_eq!(autopilot(&state), TickInput::restart());
    }
}
