//! Board drawing: background, snake and food, in board pixels.

use ratatui::style::Color;
use std::f64::consts::{FRAC_PI_4, PI, TAU};

use super::surface::Surface;
use crate::game::{GameState, Grid, Position};

const BACKGROUND: Color = Color::Rgb(17, 17, 17);
const HEAD: Color = Color::Rgb(84, 199, 251);
const BODY: Color = Color::Rgb(41, 166, 228);
const EYE: Color = Color::White;
const PUPIL: Color = Color::Black;
const APPLE: Color = Color::Rgb(211, 47, 47);
const LEAF: Color = Color::Rgb(56, 142, 60);
const STEM: Color = Color::Rgb(109, 76, 65);

/// Draw the whole board onto `surface`
pub fn draw_board<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let grid = state.grid;
    surface.fill_rect(
        0.0,
        0.0,
        f64::from(grid.pixel_width()),
        f64::from(grid.pixel_height()),
        BACKGROUND,
    );

    for (i, segment) in state.snake.body.iter().enumerate() {
        // A head that crashed through the wall stays off the board
        if !state.is_in_bounds(*segment) {
            continue;
        }
        draw_segment(surface, &grid, *segment, i == 0);
    }

    // Hidden under the head once the last free cell has been eaten
    if !state.is_occupied_by_snake(state.food) {
        draw_apple(surface, &grid, state.food);
    }
}

fn draw_segment<S: Surface + ?Sized>(surface: &mut S, grid: &Grid, pos: Position, is_head: bool) {
    let (cx, cy) = grid.cell_center(pos);
    let radius = (f64::from(grid.cell_size) / 2.0 - 1.0).max(1.0);

    surface.fill_circle(cx, cy, radius, if is_head { HEAD } else { BODY });
    if is_head {
        draw_face(surface, cx, cy, radius);
    }
}

fn draw_face<S: Surface + ?Sized>(surface: &mut S, cx: f64, cy: f64, r: f64) {
    for side in [-1.0, 1.0] {
        let ex = cx + side * r * 0.4;
        let ey = cy - r * 0.2;
        surface.fill_circle(ex, ey, r * 0.2, EYE);
        surface.fill_circle(ex, ey, r * 0.08, PUPIL);
    }

    // Lower half circle
    surface.stroke_arc(cx, cy + r * 0.1, r * 0.4, 0.0, PI, PUPIL);
}

fn draw_apple<S: Surface + ?Sized>(surface: &mut S, grid: &Grid, pos: Position) {
    let (cx, cy) = grid.cell_center(pos);
    let cell = f64::from(grid.cell_size);
    let r = (cell / 2.0 - 2.0).max(1.0);

    surface.fill_arc(cx, cy, r, 0.0, TAU, APPLE);
    surface.fill_ellipse(cx + r * 0.4, cy - r * 0.7, r * 0.4, r * 0.2, -FRAC_PI_4, LEAF);

    let stem = cell * 0.3;
    surface.line(cx, cy - r, cx, cy - r - stem, STEM);
}
