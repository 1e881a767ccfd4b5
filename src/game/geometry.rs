use serde::{Deserialize, Serialize};

use super::state::Position;

/// Board dimensions in cells plus the pixel size of one cell.
///
/// Game logic works in cell units only; pixel coordinates are used by the
/// renderer and converted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
}

impl Grid {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn pixel_width(&self) -> u32 {
        self.width * self.cell_size
    }

    pub fn pixel_height(&self) -> u32 {
        self.height * self.cell_size
    }

    /// Check if a cell is inside [0, width) x [0, height)
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    /// The cell at the middle of the board, rounding towards the origin
    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Top-left pixel of a cell
    pub fn cell_to_pixel(&self, pos: Position) -> (i32, i32) {
        let size = self.cell_size as i32;
        (pos.x * size, pos.y * size)
    }

    /// Pixel coordinates of the middle of a cell
    pub fn cell_center(&self, pos: Position) -> (f64, f64) {
        let (x, y) = self.cell_to_pixel(pos);
        let half = f64::from(self.cell_size) / 2.0;
        (f64::from(x) + half, f64::from(y) + half)
    }

    /// The cell containing a pixel. Pixels left of or above the board map to
    /// negative cells.
    pub fn pixel_to_cell(&self, px: i32, py: i32) -> Position {
        let size = self.cell_size as i32;
        Position::new(px.div_euclid(size), py.div_euclid(size))
    }

    /// Every cell on the board, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_conversion() {
        let grid = Grid::new(20, 20, 20);
        assert_eq!(grid.cell_to_pixel(Position::new(3, 4)), (60, 80));
        assert_eq!(grid.pixel_to_cell(60, 80), Position::new(3, 4));
        assert_eq!(grid.pixel_to_cell(79, 99), Position::new(3, 4));
        assert_eq!(grid.pixel_to_cell(-1, 0), Position::new(-1, 0));
        assert_eq!(grid.cell_center(Position::new(0, 0)), (10.0, 10.0));
    }

    #[test]
    fn test_dimensions() {
        let grid = Grid::new(30, 15, 10);
        assert_eq!(grid.pixel_width(), 300);
        assert_eq!(grid.pixel_height(), 150);
        assert_eq!(grid.cell_count(), 450);
        assert_eq!(grid.cells().count(), 450);
        assert_eq!(grid.center(), Position::new(15, 7));
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 20, 20);
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(19, 19)));
        assert!(!grid.contains(Position::new(-1, 0)));
        assert!(!grid.contains(Position::new(20, 0)));
        assert!(!grid.contains(Position::new(0, 20)));
    }
}
