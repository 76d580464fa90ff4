//! Grid placement on screen

use glam::Vec2;

/// Pixel placement of the grid, centered in the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Top-left corner of the grid in pixels
    pub origin: Vec2,
    /// Cell size in pixels
    pub square_size: f32,
    /// Cells per side
    pub grid_size: i32,
}

impl GridLayout {
    /// Center an `grid_size × grid_size` grid in a `width × height` viewport
    pub fn centered(width: i32, height: i32, grid_size: i32, square_size: i32) -> Self {
        let grid_px = grid_size * square_size;
        Self {
            origin: Vec2::new(
                (width / 2 - grid_px / 2) as f32,
                (height / 2 - grid_px / 2) as f32,
            ),
            square_size: square_size as f32,
            grid_size,
        }
    }

    /// Grid width and height in pixels
    pub fn extent(&self) -> Vec2 {
        Vec2::splat(self.grid_size as f32 * self.square_size)
    }

    /// Size of one cell in pixels
    pub fn cell_size(&self) -> Vec2 {
        Vec2::splat(self.square_size)
    }

    /// Top-left pixel of a position given in cell units
    #[inline]
    pub fn to_screen(&self, cell: Vec2) -> Vec2 {
        self.origin + cell * self.square_size
    }
}
