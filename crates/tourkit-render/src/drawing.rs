#![forbid(unsafe_code)]

//! Drawing primitives for the buffer.
//!
//! Borders, boxes, and text on top of [`Buffer::set`], so widgets do not
//! repeat low-level cell loops. Every operation clips at the buffer edge.

use tourkit_core::geometry::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::buffer::Buffer;
use crate::cell::{Cell, CellContent};

/// Characters used to draw a border around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderChars {
    /// Simple box-drawing characters (U+250x).
    pub const SQUARE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };

    /// Rounded corners.
    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        horizontal: '─',
        vertical: '│',
    };

    /// ASCII-only border.
    pub const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
    };
}

/// Extension trait for drawing on a [`Buffer`].
pub trait Draw {
    /// Print text starting at (x, y), stopping before `max_x` (exclusive).
    ///
    /// Glyphs take their content from `text` and their colors and flags from
    /// `base`. A wide glyph that would straddle `max_x` is not started.
    /// Returns the x position after the last glyph written.
    fn print_text_clipped(&mut self, x: u16, y: u16, text: &str, base: Cell, max_x: u16) -> u16;

    /// Draw a border inside `rect` (edges and corners).
    fn draw_border(&mut self, rect: Rect, chars: BorderChars, base: Cell);

    /// Draw a border and fill the interior with `fill`.
    fn draw_box(&mut self, rect: Rect, chars: BorderChars, border: Cell, fill: Cell);
}

impl Draw for Buffer {
    fn print_text_clipped(&mut self, x: u16, y: u16, text: &str, base: Cell, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width());
        let mut cx = x;
        for grapheme in text.graphemes(true) {
            let width = grapheme.width();
            if width == 0 {
                continue;
            }
            if cx as usize + width > max_x as usize {
                break;
            }
            let Some(c) = grapheme.chars().next() else {
                continue;
            };
            self.set(
                cx,
                y,
                Cell {
                    content: CellContent::from_char(c),
                    ..base
                },
            );
            cx = cx.saturating_add(width as u16);
        }
        cx
    }

    fn draw_border(&mut self, rect: Rect, chars: BorderChars, base: Cell) {
        if rect.is_empty() {
            return;
        }
        let glyph = |c: char| Cell {
            content: CellContent::from_char(c),
            ..base
        };
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);

        for x in rect.left()..rect.right() {
            self.set(x, rect.top(), glyph(chars.horizontal));
            self.set(x, bottom, glyph(chars.horizontal));
        }
        for y in rect.top()..rect.bottom() {
            self.set(rect.left(), y, glyph(chars.vertical));
            self.set(right, y, glyph(chars.vertical));
        }

        if rect.width > 1 && rect.height > 1 {
            self.set(rect.left(), rect.top(), glyph(chars.top_left));
            self.set(right, rect.top(), glyph(chars.top_right));
            self.set(rect.left(), bottom, glyph(chars.bottom_left));
            self.set(right, bottom, glyph(chars.bottom_right));
        }
    }

    fn draw_box(&mut self, rect: Rect, chars: BorderChars, border: Cell, fill: Cell) {
        if rect.width > 2 && rect.height > 2 {
            self.fill(
                Rect::new(rect.x + 1, rect.y + 1, rect.width - 2, rect.height - 2),
                fill,
            );
        }
        self.draw_border(rect, chars, border);
    }
}
