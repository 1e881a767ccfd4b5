use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, canvas::Canvas},
};
use rand::Rng;

use super::canvas::CanvasSurface;
use super::scene;
use super::shapes::Raster;
use crate::game::{GameState, Grid};
use crate::metrics::GameMetrics;
use crate::schedule::{GameLoop, LoopState, Scheduler};

/// Everything the renderer reads for one frame
pub struct GameView<'a> {
    pub state: &'a GameState,
    pub loop_state: LoopState,
    pub score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub won: bool,
    pub metrics: &'a GameMetrics,
}

impl<'a> GameView<'a> {
    pub fn new<S, R>(game_loop: &'a GameLoop<S, R>, metrics: &'a GameMetrics) -> Self
    where
        S: Scheduler,
        R: Rng,
    {
        Self {
            state: game_loop.state(),
            loop_state: game_loop.loop_state(),
            score: game_loop.score(),
            high_score: game_loop.high_score(),
            new_high_score: game_loop.is_new_high_score(),
            won: game_loop.is_won(),
            metrics,
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &GameView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        let board_area = board_rect(chunks[1], &view.state.grid);
        self.render_board(frame, board_area, view.state);

        match view.loop_state {
            LoopState::Running => {}
            LoopState::Paused => self.render_overlay(frame, board_area, self.paused_text()),
            LoopState::GameOver => {
                self.render_overlay(frame, board_area, self.game_over_text(view))
            }
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_board(&self, frame: &mut Frame, area: Rect, state: &GameState) {
        let grid = state.grid;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ");
        let raster = raster_for(block.inner(area), &grid);

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::HalfBlock)
            .x_bounds([0.0, f64::from(grid.pixel_width())])
            .y_bounds([0.0, f64::from(grid.pixel_height())])
            .paint(move |ctx| {
                let mut surface = CanvasSurface::new(ctx, raster);
                scene::draw_board(&mut surface, state);
            });

        frame.render_widget(canvas, area);
    }

    fn render_stats(&self, view: &GameView) -> Paragraph<'_> {
        let mut high = vec![
            Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.high_score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if view.new_high_score {
            high.push(Span::styled(
                " NEW!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
        }

        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
        ];
        spans.extend(high);
        spans.extend([
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.metrics.games_played.to_string(),
                Style::default().fg(Color::White),
            ),
        ]);

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn paused_text(&self) -> (Vec<Line<'static>>, Color) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press P or focus the window to resume",
                Style::default().fg(Color::Gray),
            )),
        ];
        (lines, Color::Yellow)
    }

    fn game_over_text(&self, view: &GameView) -> (Vec<Line<'static>>, Color) {
        let (title, color) = if view.won {
            ("YOU WIN", Color::Green)
        } else {
            ("GAME OVER", Color::Red)
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        if view.new_high_score {
            lines.push(Line::from(Span::styled(
                "New high score!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
        }
        lines.extend([
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ]);

        (lines, color)
    }

    fn render_overlay(
        &self,
        frame: &mut Frame,
        board: Rect,
        (lines, color): (Vec<Line<'static>>, Color),
    ) {
        let height = lines.len() as u16 + 2;
        let area = centered(board, 44, height);

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
            area,
        );
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" to pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Largest board rectangle that fits `area` with square-looking cells.
/// Each board cell takes `2k` columns by `k` rows, plus a border.
fn board_rect(area: Rect, grid: &Grid) -> Rect {
    let avail_cols = u32::from(area.width.saturating_sub(2));
    let avail_rows = u32::from(area.height.saturating_sub(2));
    let scale = (avail_cols / (2 * grid.width.max(1)))
        .min(avail_rows / grid.height.max(1))
        .max(1);

    let width = (2 * scale * grid.width + 2).min(u32::from(area.width)) as u16;
    let height = (scale * grid.height + 2).min(u32::from(area.height)) as u16;
    centered(area, width, height)
}

/// Sampling step so that every half-block dot gets at least one sample
fn raster_for(inner: Rect, grid: &Grid) -> Raster {
    let px_w = f64::from(grid.pixel_width());
    let px_h = f64::from(grid.pixel_height());
    let per_dot_x = px_w / f64::from(inner.width.max(1));
    let per_dot_y = px_h / (f64::from(inner.height.max(1)) * 2.0);
    Raster::new(px_h, per_dot_x.min(per_dot_y) / 2.0)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
