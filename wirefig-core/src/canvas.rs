//! Raster drawing surfaces.
//!
//! [`Surface`] is the small set of drawing primitives the figure renderer
//! needs. [`Canvas`] implements it over an in-memory RGBA8 buffer; exporters
//! read the finished buffer and write it to a file, a terminal or a browser.
//!
//! # Coordinate System
//!
//! - Origin at the top-left corner
//! - X increases rightward, Y increases downward
//! - Pixel `(i, j)` covers `[i, i + 1) x [j, j + 1)`

use vector_text::{render_text, HersheyFont, VectorFont};

use crate::color::Rgb;
use crate::projection::Point2D;

/// Drawing primitives used by the figure renderer.
///
/// Path commands accumulate until [`Surface::stroke`] draws and clears them.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Current drawing color.
    fn color(&self) -> Rgb;

    /// Set the color used by every following draw.
    fn set_color(&mut self, color: Rgb);

    /// Current stroke width in pixels.
    fn line_width(&self) -> f64;

    /// Set the stroke width in pixels.
    fn set_line_width(&mut self, width: f64);

    /// Fill the whole surface with the current color.
    fn clear(&mut self);

    /// Start a new subpath at (x, y).
    fn move_to(&mut self, x: f64, y: f64);

    /// Extend the current subpath with a straight segment to (x, y).
    fn line_to(&mut self, x: f64, y: f64);

    /// Draw the accumulated path with the current color and width, then clear it.
    fn stroke(&mut self);

    /// Fill a disc centred on (cx, cy) with the current color.
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64);

    /// Draw `text` with its baseline starting at (x, y) in the current color.
    fn draw_text(&mut self, text: &str, x: f64, y: f64);
}

/// Hershey glyph units between the top of a capital and the baseline
const GLYPH_BASELINE: f64 = 9.0;
/// Pixels per Hershey glyph unit; gives labels roughly 10 px tall
const GLYPH_SCALE: f64 = 0.5;
/// Longest text drawn; the glyph renderer's pen position is an `i16`
const MAX_TEXT_CHARS: usize = 256;

/// An in-memory RGBA8 raster
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    color: Rgb,
    line_width: f64,
    path: Vec<Vec<Point2D>>,
}

impl Canvas {
    /// A blank (transparent black) canvas drawing in black, 1 px wide
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            color: Rgb::BLACK,
            line_width: 1.0,
            path: Vec::new(),
        }
    }

    /// RGBA of the pixel at (x, y), or `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(rgba)
    }

    /// Row-major RGBA8 bytes
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.pixels
    }

    /// Number of pixels that currently hold `color`
    pub fn count_color(&self, color: Rgb) -> usize {
        let rgba = color.to_rgba8();
        self.pixels.chunks_exact(4).filter(|px| *px == rgba).count()
    }

    fn put(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }

    fn fill_disc(&mut self, cx: f64, cy: f64, radius: f64, rgba: [u8; 4]) {
        let min_x = (cx - radius).floor().max(0.0) as i64;
        let max_x = (cx + radius).ceil().min(f64::from(self.width)) as i64;
        let min_y = (cy - radius).floor().max(0.0) as i64;
        let max_y = (cy + radius).ceil().min(f64::from(self.height)) as i64;
        let r2 = radius * radius;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.put(x, y, rgba);
                }
            }
        }
    }

    fn draw_segment(&mut self, from: Point2D, to: Point2D, rgba: [u8; 4]) {
        let half = self.line_width / 2.0;
        let Some((from, to)) = clip_segment(from, to, self.width, self.height, half.max(1.0))
        else {
            return;
        };

        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let (x, y) = (
                from.x + dx * i as f64 / steps as f64,
                from.y + dy * i as f64 / steps as f64,
            );
            if half <= 0.5 {
                self.put(x.floor() as i64, y.floor() as i64, rgba);
            } else {
                self.fill_disc(x, y, half, rgba);
            }
        }
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color(&self) -> Rgb {
        self.color
    }

    fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn line_width(&self) -> f64 {
        self.line_width
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn clear(&mut self) {
        let rgba = self.color.to_rgba8();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(vec![Point2D::new(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        match self.path.last_mut() {
            Some(subpath) => subpath.push(Point2D::new(x, y)),
            None => self.move_to(x, y),
        }
    }

    fn stroke(&mut self) {
        let rgba = self.color.to_rgba8();
        for subpath in std::mem::take(&mut self.path) {
            for pair in subpath.windows(2) {
                self.draw_segment(pair[0], pair[1], rgba);
            }
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        let rgba = self.color.to_rgba8();
        self.fill_disc(cx, cy, radius, rgba);
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64) {
        let text = match text.char_indices().nth(MAX_TEXT_CHARS) {
            Some((end, _)) => &text[..end],
            None => text,
        };
        let points = render_text(text, VectorFont::HersheyFont(HersheyFont::Romans));
        let pending = std::mem::take(&mut self.path);
        let saved_width = self.line_width;
        self.line_width = 1.0;

        for point in points {
            let px = x + f64::from(point.x) * GLYPH_SCALE;
            let py = y + (f64::from(point.y) - GLYPH_BASELINE) * GLYPH_SCALE;
            if point.pen {
                self.line_to(px, py);
            } else {
                self.move_to(px, py);
            }
        }
        self.stroke();

        self.line_width = saved_width;
        self.path = pending;
    }
}

/// Clip a segment to the canvas grown by `pad` pixels on each side (Liang-Barsky)
fn clip_segment(
    from: Point2D,
    to: Point2D,
    width: u32,
    height: u32,
    pad: f64,
) -> Option<(Point2D, Point2D)> {
    let (x_min, x_max) = (-pad, f64::from(width) + pad);
    let (y_min, y_max) = (-pad, f64::from(height) + pad);
    let (dx, dy) = (to.x - from.x, to.y - from.y);

    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    for (p, q) in [
        (-dx, from.x - x_min),
        (dx, x_max - from.x),
        (-dy, from.y - y_min),
        (dy, y_max - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }

    if t0 > t1 || !t0.is_finite() || !t1.is_finite() {
        return None;
    }

    Some((
        Point2D::new(from.x + t0 * dx, from.y + t0 * dy),
        Point2D::new(from.x + t1 * dx, from.y + t1 * dy),
    ))
}
