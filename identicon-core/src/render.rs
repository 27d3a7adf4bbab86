//! Rasterization
//!
//! The sprite is drawn on a `(dim + 1)`-cell canvas, leaving half a cell of
//! margin on each side. Rectangles falling outside the image are clipped.

use std::io::Cursor;

use image::{ImageOutputFormat, RgbImage};

use crate::color::Rgb;
use crate::generator::IdenticonError;
use crate::grid::PixelGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cell_size: u32,
    pub margin: u32,
}

impl Layout {
    pub fn new(size: u32, dim: u32) -> Self {
        let cell_size = size / dim.saturating_add(1);
        Self { cell_size, margin: cell_size / 2 }
    }

    /// Half-open pixel span `[start, end)` of a cell along one axis.
    fn span(&self, index: usize) -> (u64, u64) {
        let start = index as u64 * self.cell_size as u64 + self.margin as u64;
        (start, start + self.cell_size as u64)
    }
}

/// Draw `grid` onto a fresh `size x size` image.
pub fn rasterize(grid: &PixelGrid, foreground: Rgb, background: Rgb, size: u32) -> RgbImage {
    let layout = Layout::new(size, grid.dim() as u32);
    log::debug!(
        "rasterizing {0}x{0} grid at {1}px: cell {2}px, margin {3}px",
        grid.dim(),
        size,
        layout.cell_size,
        layout.margin
    );

    let mut img = RgbImage::from_pixel(size, size, background.into());
    for (row, col) in grid.painted_cells() {
        let (x0, x1) = layout.span(col);
        let (y0, y1) = layout.span(row);
        fill_rect(&mut img, (x0, y0), (x1, y1), foreground);
    }
    img
}

fn fill_rect(img: &mut RgbImage, from: (u64, u64), to: (u64, u64), color: Rgb) {
    let x_end = to.0.min(img.width() as u64);
    let y_end = to.1.min(img.height() as u64);
    let pixel = image::Rgb::from(color);
    for y in from.1..y_end {
        for x in from.0..x_end {
            img.put_pixel(x as u32, y as u32, pixel);
        }
    }
}

pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, IdenticonError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
    Ok(bytes)
}

/// Render the grid as 24-bit ANSI color blocks, margin included.
pub fn ansi_preview(grid: &PixelGrid, foreground: Rgb, background: Rgb) -> String {
    let paint = |color: Rgb| format!("\x1b[48;2;{};{};{}m  ", color.r(), color.g(), color.b());
    let blank_row = paint(background).repeat(grid.dim() + 2);

    let mut out = String::new();
    out.push_str(&blank_row);
    out.push_str("\x1b[0m\n");
    for row in grid.rows() {
        out.push_str(&paint(background));
        for &painted in row {
            out.push_str(&paint(if painted { foreground } else { background }));
        }
        out.push_str(&paint(background));
        out.push_str("\x1b[0m\n");
    }
    out.push_str(&blank_row);
    out.push_str("\x1b[0m\n");
    out
}
