/// Draw pipeline: project a figure and paint it onto a surface
use tracing::{debug, trace};

use crate::canvas::{Canvas, Surface};
use crate::color::Rgb;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::geometry::Figure;
use crate::projection::{Camera, Point2D};

/// Radius of vertex markers, in pixels
pub const VERTEX_RADIUS: f64 = 2.0;
/// Offset from a vertex to the start of its label
pub const LABEL_OFFSET: (f64, f64) = (5.0, -5.0);
/// Distance between reference grid lines, in pixels
pub const GRID_SPACING: u32 = 50;

const GRID_COLOR: Rgb = Rgb::new(0.9, 0.9, 0.9);
const GRID_LINE_WIDTH: f64 = 0.5;

/// Render `figure` as seen through `camera` onto a fresh `width` x `height` canvas
pub fn render(
    figure: &Figure,
    camera: &Camera,
    config: &RenderConfig,
    width: u32,
    height: u32,
) -> Result<Canvas, RenderError> {
    let mut canvas = Canvas::new(width, height);
    draw_figure(&mut canvas, figure, camera, config)?;
    Ok(canvas)
}

/// Render `figure` through its own camera
pub fn render_figure(
    figure: &Figure,
    config: &RenderConfig,
    width: u32,
    height: u32,
) -> Result<Canvas, RenderError> {
    render(figure, &figure.camera, config, width, height)
}

/// Paint `figure` onto `surface`, replacing whatever the surface held.
///
/// Layers are drawn in order: background, edges, then vertex markers and
/// labels. Edges whose endpoints fall outside the point list are skipped.
/// The surface is left untouched when the figure has no points.
pub fn draw_figure<S: Surface + ?Sized>(
    surface: &mut S,
    figure: &Figure,
    camera: &Camera,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    if figure.points.is_empty() {
        return Err(RenderError::EmptyFigure);
    }

    let (width, height) = (surface.width(), surface.height());
    debug!(
        figure = %figure.name,
        points = figure.points.len(),
        edges = figure.edges.len(),
        width,
        height,
        "rendering figure"
    );

    surface.set_color(config.background);
    surface.clear();

    let projected: Vec<Point2D> = figure
        .points
        .iter()
        .map(|point| camera.project(point, width, height))
        .collect();

    surface.set_color(config.line_color);
    surface.set_line_width(config.line_width);
    for (i, edge) in figure.edges.iter().enumerate() {
        let Some((p1, p2)) = edge.endpoints(projected.len()) else {
            trace!(edge = i, p1 = edge.p1, p2 = edge.p2, "skipping edge with missing endpoint");
            continue;
        };
        surface.move_to(projected[p1].x, projected[p1].y);
        surface.line_to(projected[p2].x, projected[p2].y);
        surface.stroke();
    }

    if config.show_vertices {
        surface.set_color(config.vertex_color);
        for (point, screen) in figure.points.iter().zip(&projected) {
            surface.fill_circle(screen.x, screen.y, VERTEX_RADIUS);

            if let Some(label) = point.label().filter(|_| config.show_labels) {
                surface.set_color(config.line_color);
                draw_label(surface, label, screen);
                surface.set_color(config.vertex_color);
            }
        }
    } else if config.show_labels {
        surface.set_color(config.line_color);
        for (point, screen) in figure.points.iter().zip(&projected) {
            if let Some(label) = point.label() {
                draw_label(surface, label, screen);
            }
        }
    }

    surface.set_color(config.line_color);
    Ok(())
}

fn draw_label<S: Surface + ?Sized>(surface: &mut S, label: &str, at: &Point2D) {
    surface.draw_text(label, at.x + LABEL_OFFSET.0, at.y + LABEL_OFFSET.1);
}

/// Overlay light gray reference lines every [`GRID_SPACING`] pixels.
///
/// The surface's color and line width are restored afterwards.
pub fn draw_grid<S: Surface + ?Sized>(surface: &mut S) {
    let (width, height) = (surface.width(), surface.height());
    let saved_color = surface.color();
    let saved_width = surface.line_width();

    surface.set_color(GRID_COLOR);
    surface.set_line_width(GRID_LINE_WIDTH);

    for x in (0..width).step_by(GRID_SPACING as usize) {
        surface.move_to(f64::from(x), 0.0);
        surface.line_to(f64::from(x), f64::from(height));
        surface.stroke();
    }
    for y in (0..height).step_by(GRID_SPACING as usize) {
        surface.move_to(0.0, f64::from(y));
        surface.line_to(f64::from(width), f64::from(y));
        surface.stroke();
    }

    surface.set_color(saved_color);
    surface.set_line_width(saved_width);
}
