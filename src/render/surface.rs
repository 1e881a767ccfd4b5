use ratatui::style::Color;

/// A 2D drawing target addressed in board pixels.
///
/// The origin is the top-left corner of the board and `y` grows downwards,
/// the same space [`crate::game::Grid`] converts cells into. Angles are in
/// radians, measured from the positive x axis towards positive y.
pub trait Surface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    /// Filled circle sector from `start` to `end`
    fn fill_arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: Color);

    /// Circle outline from `start` to `end`
    fn stroke_arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: Color);

    /// Filled ellipse rotated by `rotation` around its centre
    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, rotation: f64, color: Color);

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color);

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.fill_arc(cx, cy, radius, 0.0, std::f64::consts::TAU, color);
    }
}
