#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The `Buffer` is a 2D grid of [`Cell`]s representing the terminal display.
//!
//! # Layout
//!
//! Cells are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. A wide glyph is written whole or not at all; its tail cells are
//!    [`Cell::CONTINUATION`]

use tourkit_core::geometry::Rect;
use unicode_width::UnicodeWidthChar;

use crate::cell::{Cell, CellContent, PackedRgba};

/// A 2D grid of terminal cells.
///
/// A zero-sized buffer is valid and ignores every write, which keeps a
/// collapsed terminal from taking the render path down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the buffer has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding rect of the entire buffer.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Cell at (x, y), or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Mutable cell at (x, y), or `None` when out of bounds.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Set the cell at (x, y).
    ///
    /// - Out-of-bounds writes are dropped.
    /// - The new background is composited over the existing one.
    /// - Wide glyphs write continuation cells to their right and are dropped
    ///   entirely when the tail would fall off the edge.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let width = cell_width(&cell);
        let Some(idx) = self.index(x, y) else {
            return;
        };
        if width > 1 && (x as usize + width) > self.width as usize {
            return;
        }

        let existing_bg = self.cells[idx].bg;
        for i in 0..width.max(1) {
            self.cleanup_overlap(x + i as u16, y);
        }

        self.cells[idx] = Cell {
            bg: cell.bg.over(existing_bg),
            ..cell
        };
        for i in 1..width {
            if let Some(tail) = self.index(x + i as u16, y) {
                self.cells[tail] = Cell::CONTINUATION;
            }
        }
    }

    /// Release any wide glyph overlapping (x, y) before it is overwritten.
    fn cleanup_overlap(&mut self, x: u16, y: u16) {
        let Some(idx) = self.index(x, y) else { return };
        let width = cell_width(&self.cells[idx]);
        if width > 1 {
            self.clear_tails(x, y, width);
        } else {
            self.clear_wide_owner(x, y);
        }
    }

    /// If (x, y) is the tail of a wide glyph, blank the glyph's head and tails.
    fn clear_wide_owner(&mut self, x: u16, y: u16) {
        let Some(idx) = self.index(x, y) else { return };
        if !self.cells[idx].content.is_continuation() {
            return;
        }
        let mut head_x = x;
        while head_x > 0 {
            head_x -= 1;
            let Some(h) = self.index(head_x, y) else { return };
            if self.cells[h].content.is_continuation() {
                continue;
            }
            let width = cell_width(&self.cells[h]);
            if head_x as usize + width > x as usize {
                self.cells[h] = Cell::default().with_bg(self.cells[h].bg);
                self.clear_tails(head_x, y, width);
            }
            return;
        }
    }

    fn clear_tails(&mut self, head_x: u16, y: u16, width: usize) {
        for i in 1..width {
            if let Some(t) = self.index(head_x.saturating_add(i as u16), y)
                && self.cells[t].content.is_continuation()
            {
                self.cells[t] = Cell::default();
            }
        }
    }

    /// Fill a rectangular region with the given cell, clipped to the buffer.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clipped = self.bounds().intersection(&rect);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Composite `color` over the background of every cell in `rect`,
    /// leaving glyphs and foregrounds untouched.
    pub fn tint_bg(&mut self, rect: Rect, color: PackedRgba) {
        let clipped = self.bounds().intersection(&rect);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.bg = color.over(cell.bg);
                }
            }
        }
    }

    /// Clear all cells to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Raw access to the cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells; empty when `y` is out of range.
    pub fn row_cells(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// The visible text of row `y`, continuation cells skipped.
    pub fn row_text(&self, y: u16) -> String {
        self.row_cells(y).iter().filter_map(Cell::glyph).collect()
    }

    /// Every row joined with newlines; handy for snapshot-style assertions.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn cell_width(cell: &Cell) -> usize {
    match cell.content {
        CellContent::Char(c) => c.width().unwrap_or(0).max(1),
        CellContent::Empty => 1,
        CellContent::Continuation => 0,
    }
}
