//! Canvas shapes that ratatui does not ship: filled rectangles, sectors,
//! arcs and rotated ellipses.
//!
//! All coordinates are board pixels with `y` pointing down. Shapes are
//! rasterised by sampling the region at `Raster::step` and letting the
//! painter snap each sample to its nearest canvas dot.

use ratatui::style::Color;
use ratatui::widgets::canvas::{Painter, Shape};
use std::f64::consts::TAU;

/// How board pixels map onto the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raster {
    /// Board height in pixels; canvas `y` runs bottom-up
    pub height: f64,
    /// Sampling distance in board pixels
    pub step: f64,
}

impl Raster {
    const MIN_STEP: f64 = 0.1;

    pub fn new(height: f64, step: f64) -> Self {
        Self {
            height,
            step: step.max(Self::MIN_STEP),
        }
    }

    /// Canvas `y` for a board `y`
    pub fn flip(&self, y: f64) -> f64 {
        self.height - y
    }

    fn paint(&self, painter: &mut Painter, x: f64, y: f64, color: Color) {
        if let Some((col, row)) = painter.get_point(x, self.flip(y)) {
            painter.paint(col, row, color);
        }
    }

    /// Sample the box `[x0, x1] x [y0, y1]`, painting points where `inside`
    fn fill_where<F>(
        &self,
        painter: &mut Painter,
        bounds: (f64, f64, f64, f64),
        color: Color,
        inside: F,
    ) where
        F: Fn(f64, f64) -> bool,
    {
        let (x0, y0, x1, y1) = bounds;
        let mut y = y0;
        while y <= y1 {
            let mut x = x0;
            while x <= x1 {
                if inside(x, y) {
                    self.paint(painter, x, y, color);
                }
                x += self.step;
            }
            y += self.step;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilledRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
    pub raster: Raster,
}

impl Shape for FilledRect {
    fn draw(&self, painter: &mut Painter) {
        let bounds = (self.x, self.y, self.x + self.width, self.y + self.height);
        self.raster.fill_where(painter, bounds, self.color, |_, _| true);
    }
}

/// Filled pie slice; a full turn gives a disc
#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub start: f64,
    pub end: f64,
    pub color: Color,
    pub raster: Raster,
}

impl Sector {
    fn contains_angle(&self, angle: f64) -> bool {
        let sweep = self.end - self.start;
        if sweep >= TAU {
            return true;
        }
        (angle - self.start).rem_euclid(TAU) <= sweep
    }
}

impl Shape for Sector {
    fn draw(&self, painter: &mut Painter) {
        let r = self.radius;
        let bounds = (self.cx - r, self.cy - r, self.cx + r, self.cy + r);
        self.raster.fill_where(painter, bounds, self.color, |x, y| {
            let (dx, dy) = (x - self.cx, y - self.cy);
            dx * dx + dy * dy <= r * r && self.contains_angle(dy.atan2(dx))
        });
    }
}

/// Circle outline between two angles
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub start: f64,
    pub end: f64,
    pub color: Color,
    pub raster: Raster,
}

impl Shape for Arc {
    fn draw(&self, painter: &mut Painter) {
        let sweep = self.end - self.start;
        let samples = (sweep.abs() * self.radius / self.raster.step).ceil().max(1.0) as usize;

        for i in 0..=samples {
            let angle = self.start + sweep * i as f64 / samples as f64;
            let x = self.cx + self.radius * angle.cos();
            let y = self.cy + self.radius * angle.sin();
            self.raster.paint(painter, x, y, self.color);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilledEllipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub rotation: f64,
    pub color: Color,
    pub raster: Raster,
}

impl Shape for FilledEllipse {
    fn draw(&self, painter: &mut Painter) {
        if self.rx <= 0.0 || self.ry <= 0.0 {
            return;
        }

        let r = self.rx.max(self.ry);
        let (sin, cos) = self.rotation.sin_cos();
        let bounds = (self.cx - r, self.cy - r, self.cx + r, self.cy + r);

        self.raster.fill_where(painter, bounds, self.color, |x, y| {
            let (dx, dy) = (x - self.cx, y - self.cy);
            // Undo the rotation, then test against the axis-aligned ellipse
            let u = dx * cos + dy * sin;
            let v = -dx * sin + dy * cos;
            (u / self.rx).powi(2) + (v / self.ry).powi(2) <= 1.0
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_flip() {
        let raster = Raster::new(400.0, 1.0);
        assert_eq!(raster.flip(0.0), 400.0);
        assert_eq!(raster.flip(400.0), 0.0);
        assert_eq!(Raster::new(10.0, 0.0).step, Raster::MIN_STEP);
    }

    #[test]
    fn test_sector_angles() {
        let half = Sector {
            cx: 0.0,
            cy: 0.0,
            radius: 1.0,
            start: 0.0,
            end: PI,
            color: Color::White,
            raster: Raster::new(10.0, 1.0),
        };
        // Lower half in board space (y down)
        assert!(half.contains_angle(PI / 2.0));
        assert!(!half.contains_angle(-PI / 2.0));

        let full = Sector { end: TAU, ..half };
        assert!(full.contains_angle(-PI / 2.0));
    }
}
