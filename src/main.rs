//! Grid Snake entry point
//!
//! Window and input toolkits are supplied by the host. This binary runs the
//! simulation headless at a fixed frame rate with the autopilot at the keys,
//! recording draw calls, and appends finished games to the score log.

use grid_snake::Settings;
use grid_snake::consts::{SETTINGS_PATH, TARGET_FPS};
use grid_snake::persistence::FileScoreStore;
use grid_snake::platform::FpsCounter;
use grid_snake::renderer::{CommandRecorder, draw_frame};
use grid_snake::sim::{Frame, GameResult, GameState, autopilot, tick};

/// Games to play before exiting
const DEMO_GAMES: u32 = 3;
/// Frame budget per game, in case the autopilot circles forever
const MAX_FRAMES_PER_GAME: u32 = 60 * 60 * 5;

fn main() {
    env_logger::init();
    log::info!("Grid Snake (headless) starting...");

    let settings = Settings::load(SETTINGS_PATH);
    let mut store = FileScoreStore::new(settings.score_path.clone());
    let mut state = GameState::new(settings, rand::random());
    let grid_px = state.settings.grid_size * state.settings.square_size;
    let mut renderer = CommandRecorder::new(grid_px, grid_px);
    let mut fps = FpsCounter::new();

    let dt = 1.0 / TARGET_FPS as f32;
    let mut time = 0.0_f64;
    let mut games = 0;
    let mut frames_this_game = 0;

    while games < DEMO_GAMES {
        let input = autopilot(&state);
        let frame = tick(&mut state, &input, dt, &mut store);

        time += f64::from(dt);
        fps.record(time);
        renderer.clear();
        let shown_fps = state.settings.show_fps.then(|| fps.fps());
        draw_frame(&mut renderer, &frame, &state, shown_fps);

        if let Frame::EndScreen(screen) = &frame {
            // Counted on the frame the restart is consumed
            if state.result == GameResult::NewGame {
                log::info!("{}", screen.message());
                log::info!("High scores: {:?}", screen.high_scores.entries());
                games += 1;
                frames_this_game = 0;
            }
            continue;
        }

        frames_this_game += 1;
        if frames_this_game >= MAX_FRAMES_PER_GAME {
            log::warn!("Game took too long, starting over");
            state.result = GameResult::NewGame;
            frames_this_game = 0;
            games += 1;
        }
    }

    log::info!("Played {} games, top score {}", games, state.high_scores.top_score());
}
