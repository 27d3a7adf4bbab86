//! Pixel grid derivation
//!
//! A nibble paints its cell when it is even. Only the left half of the grid
//! (including the middle column for odd sizes) consumes data; each value is
//! written to its cell and to the mirrored cell.

use crate::nibbles::NibbleArray;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    dim: usize,
    cells: Vec<bool>,
}

impl PixelGrid {
    /// Derive a `dim x dim` grid from the head of `nibbles`.
    ///
    /// Columns are filled from the center outwards: column `half - 1` takes
    /// nibbles `0..dim`, column `half - 2` takes `dim..2*dim`, and so on.
    ///
    /// `None` if `nibbles` holds fewer than `ceil(dim / 2) * dim` values.
    pub fn derive(nibbles: &NibbleArray, dim: usize) -> Option<Self> {
        let half = dim.div_ceil(2);
        let source = nibbles.head(half.checked_mul(dim)?)?;

        let mut cells = vec![false; dim * dim];
        for col in (0..half).rev() {
            let mirror_col = dim - 1 - col;
            let offset = (half - 1 - col) * dim;
            for row in 0..dim {
                let paint = source[offset + row] % 2 == 0;
                cells[row * dim + col] = paint;
                cells[row * dim + mirror_col] = paint;
            }
        }

        Some(Self { dim, cells })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.dim && col < self.dim && self.cells[row * self.dim + col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        // chunks panics on zero
        self.cells.chunks(self.dim.max(1))
    }

    /// Painted cells as `(row, col)`, row-major.
    pub fn painted_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let dim = self.dim;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, painted)| **painted)
            .map(move |(ix, _)| (ix / dim, ix % dim))
    }

    pub fn is_mirror_symmetric(&self) -> bool {
        self.rows().all(|row| row.iter().eq(row.iter().rev()))
    }

    /// Rows rendered as `#` (painted) and `.` (empty).
    pub fn to_strings(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|&painted| if painted { '#' } else { '.' }).collect())
            .collect()
    }
}
