use rand::Rng;
use rand::seq::SliceRandom;

use super::geometry::Grid;
use super::state::Position;

/// Rejection-sampling attempts per board cell before falling back to
/// picking from the list of free cells.
const ATTEMPTS_PER_CELL: usize = 4;

/// Pick a uniformly random cell not covered by the snake.
///
/// Returns `None` only when the snake fills the whole board.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    snake: &[Position],
    grid: &Grid,
) -> Option<Position> {
    let cells = grid.cell_count();
    if cells == 0 || is_board_full(snake, grid) {
        return None;
    }

    for _ in 0..cells * ATTEMPTS_PER_CELL {
        let x = rng.gen_range(0..grid.width) as i32;
        let y = rng.gen_range(0..grid.height) as i32;
        let pos = Position::new(x, y);

        if !snake.contains(&pos) {
            return Some(pos);
        }
    }

    // Crowded board: choose among what is left
    let free: Vec<Position> = grid.cells().filter(|pos| !snake.contains(pos)).collect();
    free.choose(rng).copied()
}

/// True when every cell on the board holds a snake segment
pub fn is_board_full(snake: &[Position], grid: &Grid) -> bool {
    let covered = snake.iter().filter(|pos| grid.contains(**pos)).count();
    covered >= grid.cell_count()
}
