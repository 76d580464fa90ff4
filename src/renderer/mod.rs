//! Rendering module
//!
//! The host toolkit implements [`Renderer`]; [`draw_frame`] turns a
//! simulation [`Frame`] into rectangles and text.

pub mod layout;

pub use layout::GridLayout;

use glam::Vec2;

use crate::consts::{FONT_SIZE, FPS_POS, SCORE_POS};
use crate::sim::{EndScreen, Frame, GameState, PlayFrame, Player};

/// RGBA color, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const BACKGROUND: Color = Color([245, 245, 245, 255]);
    pub const GRID: Color = Color([130, 130, 130, 255]);
    pub const APPLE: Color = Color([0, 228, 48, 255]);
    pub const SNAKE: Color = Color([230, 41, 55, 255]);
    pub const TEXT: Color = Color([0, 0, 0, 255]);
    pub const FPS: Color = Color([0, 158, 47, 255]);
}

/// Drawing primitives provided by the host
pub trait Renderer {
    /// Viewport width and height in pixels
    fn viewport(&self) -> (i32, i32);
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: i32, color: Color);
    /// Width in pixels of `text` at `font_size`
    fn measure_text(&self, text: &str, font_size: i32) -> i32;
}

/// Draw one frame: background, grid, then the frame contents and HUD
pub fn draw_frame(renderer: &mut dyn Renderer, frame: &Frame, state: &GameState, fps: Option<u32>) {
    let settings = &state.settings;
    let (width, height) = renderer.viewport();
    let layout = GridLayout::centered(width, height, settings.grid_size, settings.square_size);

    renderer.fill_rect(
        Vec2::ZERO,
        Vec2::new(width as f32, height as f32),
        Color::BACKGROUND,
    );
    renderer.fill_rect(layout.origin, layout.extent(), Color::GRID);

    match frame {
        Frame::Blank => {}
        Frame::Playing(play) => draw_play(renderer, *play, &state.player, &layout),
        Frame::EndScreen(screen) => draw_end_screen(renderer, screen),
    }

    if let Some(fps) = fps {
        renderer.draw_text(&format!("{} FPS", fps), FPS_POS.0, FPS_POS.1, FONT_SIZE, Color::FPS);
    }
}

fn draw_play(renderer: &mut dyn Renderer, play: PlayFrame, player: &Player, layout: &GridLayout) {
    renderer.fill_rect(
        layout.to_screen(play.apple.as_vec2()),
        layout.cell_size(),
        Color::APPLE,
    );

    for segment in play.segments(player) {
        renderer.fill_rect(layout.to_screen(segment), layout.cell_size(), Color::SNAKE);
    }

    renderer.draw_text(
        &format!("Score: {}", play.score),
        SCORE_POS.0,
        SCORE_POS.1,
        FONT_SIZE,
        Color::TEXT,
    );
}

fn draw_end_screen(renderer: &mut dyn Renderer, screen: &EndScreen) {
    let (_, height) = renderer.viewport();
    let font_size = FONT_SIZE;

    draw_centered(renderer, screen.message(), height / 4 - font_size / 2, font_size);
    draw_centered(renderer, "High scores:", height / 3, font_size);
    for (i, score) in screen.high_scores.entries().iter().enumerate() {
        let y = height / 3 + (font_size + 2) * (i as i32 + 1);
        draw_centered(renderer, &score.to_string(), y, font_size);
    }
}

/// Draw text horizontally centered in the viewport
fn draw_centered(renderer: &mut dyn Renderer, text: &str, y: i32, font_size: i32) {
    let (width, _) = renderer.viewport();
    let text_width = renderer.measure_text(text, font_size);
    renderer.draw_text(text, width / 2 - text_width / 2, y, font_size, Color::TEXT);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { pos: Vec2, size: Vec2, color: Color },
    Text { text: String, x: i32, y: i32, font_size: i32, color: Color },
}

/// Renderer that records draw calls instead of drawing.
///
/// Text is measured as fixed-width glyphs of half the font size.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    pub width: i32,
    pub height: i32,
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Recorded text, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Rect { .. } => None,
        })
    }

    /// Recorded rectangles of one color
    pub fn rects(&self, color: Color) -> Vec<Vec2> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { pos, color: rect_color, .. } if *rect_color == color => Some(*pos),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Renderer for CommandRecorder {
    fn viewport(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect { pos, size, color });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: i32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font_size,
            color,
        });
    }

    fn measure_text(&self, text: &str, font_size: i32) -> i32 {
        text.chars().count() as i32 * font_size / 2
    }
}
