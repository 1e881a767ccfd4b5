//! Terminal rendering
//!
//! [`scene`] draws the board against the abstract [`Surface`]; [`canvas`]
//! implements that surface on a ratatui canvas and [`renderer`] lays out the
//! board with the score header, controls footer and overlays.

pub mod canvas;
pub mod renderer;
pub mod scene;
pub mod shapes;
pub mod surface;

pub use canvas::CanvasSurface;
pub use renderer::{GameView, Renderer};
pub use scene::draw_board;
pub use surface::Surface;
