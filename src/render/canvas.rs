use ratatui::style::Color;
use ratatui::widgets::canvas::{Context, Line};

use super::shapes::{Arc, FilledEllipse, FilledRect, Raster, Sector};
use super::surface::Surface;

/// [`Surface`] backed by a ratatui canvas context
pub struct CanvasSurface<'a, 'b> {
    ctx: &'a mut Context<'b>,
    raster: Raster,
}

impl<'a, 'b> CanvasSurface<'a, 'b> {
    pub fn new(ctx: &'a mut Context<'b>, raster: Raster) -> Self {
        Self { ctx, raster }
    }
}

impl Surface for CanvasSurface<'_, '_> {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.ctx.draw(&FilledRect {
            x,
            y,
            width,
            height,
            color,
            raster: self.raster,
        });
    }

    fn fill_arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: Color) {
        self.ctx.draw(&Sector {
            cx,
            cy,
            radius,
            start,
            end,
            color,
            raster: self.raster,
        });
    }

    fn stroke_arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: Color) {
        self.ctx.draw(&Arc {
            cx,
            cy,
            radius,
            start,
            end,
            color,
            raster: self.raster,
        });
    }

    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, rotation: f64, color: Color) {
        self.ctx.draw(&FilledEllipse {
            cx,
            cy,
            rx,
            ry,
            rotation,
            color,
            raster: self.raster,
        });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        self.ctx.draw(&Line {
            x1,
            y1: self.raster.flip(y1),
            x2,
            y2: self.raster.flip(y2),
            color,
        });
    }
}
