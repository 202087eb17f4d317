/// Half-block rasterizer that shows a canvas in the terminal
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wirefig_core::Canvas;

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '▀';

/// Two vertically stacked pixels shown by one character cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cell {
    top: [u8; 3],
    bottom: [u8; 3],
}

/// Terminal renderer that maps each character cell to two canvas pixels
pub struct TerminalRenderer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TerminalRenderer {
    /// A renderer covering `width` x `height` character cells
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    /// Canvas size, in pixels, that fills the cell grid
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32 * 2)
    }

    /// Copy a canvas into the cell grid. Missing pixels read as black.
    pub fn load(&mut self, canvas: &Canvas) {
        let rgb = |x: usize, y: usize| {
            canvas
                .pixel(x as u32, y as u32)
                .map(|[r, g, b, _]| [r, g, b])
                .unwrap_or([0; 3])
        };

        for row in 0..self.height {
            for col in 0..self.width {
                self.cells[row * self.width + col] = Cell {
                    top: rgb(col, row * 2),
                    bottom: rgb(col, row * 2 + 1),
                };
            }
        }
    }

    /// Write the cell grid starting at the top-left corner of the screen
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Cell> = None;

        for row in 0..self.height {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.width {
                let cell = self.cells[row * self.width + col];

                // Only emit color changes
                if current.map(|c| c.top) != Some(cell.top) {
                    writer.queue(SetForegroundColor(rgb_color(cell.top)))?;
                }
                if current.map(|c| c.bottom) != Some(cell.bottom) {
                    writer.queue(SetBackgroundColor(rgb_color(cell.bottom)))?;
                }
                current = Some(cell);

                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn rgb_color([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirefig_core::{Rgb, Surface};

    #[test]
    fn test_pixel_size() {
        let renderer = TerminalRenderer::new(80, 23);
        assert_eq!(renderer.pixel_size(), (80, 46));
    }

    #[test]
    fn test_load_pairs_rows() {
        let mut canvas = Canvas::new(2, 4);
        canvas.set_color(Rgb::WHITE);
        canvas.clear();
        canvas.set_color(Rgb::new(1.0, 0.0, 0.0));
        canvas.move_to(0.0, 1.0);
        canvas.line_to(1.0, 1.0);
        canvas.stroke();

        let mut renderer = TerminalRenderer::new(2, 2);
        renderer.load(&canvas);

        assert_eq!(renderer.cells[0].top, [255, 255, 255]);
        assert_eq!(renderer.cells[0].bottom, [255, 0, 0]);
        assert_eq!(renderer.cells[2].top, [255, 255, 255]);
        assert_eq!(renderer.cells[3].bottom, [255, 255, 255]);
    }

    #[test]
    fn test_load_smaller_canvas() {
        let canvas = Canvas::new(1, 1);
        let mut renderer = TerminalRenderer::new(3, 3);
        renderer.load(&canvas);
        assert!(renderer.cells.iter().all(|c| c.bottom == [0; 3]));
    }

    #[test]
    fn test_draw_writes_one_block_per_cell() {
        let mut renderer = TerminalRenderer::new(4, 3);
        let mut canvas = Canvas::new(4, 6);
        canvas.set_color(Rgb::WHITE);
        canvas.clear();
        renderer.load(&canvas);

        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 12);
    }
}
