/// wirefig core library - wireframe figures through a conic-perspective camera
///
/// This library holds the stateless rendering pipeline: the figure data model
/// and its validation, color resolution, the perspective projection and the
/// draw pipeline that paints a figure onto a raster surface.

pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod projection;
pub mod renderer;

// Re-export commonly used types
pub use canvas::{Canvas, Surface};
pub use color::Rgb;
pub use config::{RenderConfig, RenderSettings};
pub use error::{ColorError, ConfigError, FigureError, LoadError, RenderError};
pub use geometry::{Edge, Figure, Point3D};
pub use projection::{Camera, Point2D};
pub use renderer::{draw_figure, draw_grid, render, render_figure};
