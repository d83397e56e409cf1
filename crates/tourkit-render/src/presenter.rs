#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! The presenter keeps the last buffer it put on screen and, for each new
//! frame, writes only the cells that changed. Style and cursor state are
//! tracked so SGR and cursor-move sequences are emitted only when needed.
//! All output is queued through crossterm commands into a [`BufWriter`] and
//! flushed once per frame.

use std::io::{self, BufWriter, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba, StyleFlags};

/// Size of the internal write buffer (64KB).
const BUFFER_CAPACITY: usize = 64 * 1024;

/// Cached style state for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    flags: StyleFlags,
}

impl CellStyle {
    fn from_cell(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            flags: cell.flags,
        }
    }
}

/// Map a straight-alpha color to a terminal color.
///
/// Fully transparent means "terminal default". Partial alpha has no
/// terminal equivalent, so it is flattened onto black.
fn to_color(color: PackedRgba) -> Color {
    match color.a() {
        0 => Color::Reset,
        255 => Color::Rgb {
            r: color.r(),
            g: color.g(),
            b: color.b(),
        },
        _ => to_color(color.over(PackedRgba::BLACK)),
    }
}

/// State-tracked ANSI presenter.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    /// Last presented frame (None = screen contents unknown).
    previous: Option<Buffer>,
    /// Current style state (None = unknown/reset).
    current_style: Option<CellStyle>,
    /// Current cursor position. None = unknown.
    cursor: Option<(u16, u16)>,
}

impl<W: Write> Presenter<W> {
    /// Create a new presenter writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            previous: None,
            current_style: None,
            cursor: None,
        }
    }

    /// Present a frame.
    ///
    /// The first frame, and any frame whose size differs from the last one,
    /// clears the screen and repaints every cell. Later frames emit only the
    /// changed cells. Returns the number of cells written.
    pub fn present(&mut self, buffer: &Buffer) -> io::Result<usize> {
        let full = self
            .previous
            .as_ref()
            .is_none_or(|prev| prev.width() != buffer.width() || prev.height() != buffer.height());
        if full {
            queue!(self.writer, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
            self.current_style = None;
            self.cursor = None;
        }

        let mut written = 0;
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                let unchanged = !full
                    && self
                        .previous
                        .as_ref()
                        .and_then(|prev| prev.get(x, y))
                        .is_some_and(|old| old == cell);
                if unchanged {
                    continue;
                }
                if self.emit_cell(x, y, cell)? {
                    written += 1;
                }
            }
        }

        if written > 0 {
            queue!(self.writer, SetAttribute(Attribute::Reset))?;
            self.current_style = None;
        }
        self.writer.flush()?;

        match self.previous.as_mut() {
            Some(prev) if !full => prev.clone_from(buffer),
            _ => self.previous = Some(buffer.clone()),
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(written, full, "present");

        Ok(written)
    }

    fn emit_cell(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<bool> {
        let Some(glyph) = cell.glyph() else {
            return Ok(false);
        };
        if self.cursor != Some((x, y)) {
            queue!(self.writer, MoveTo(x, y))?;
        }
        self.emit_style_changes(cell)?;
        queue!(self.writer, Print(glyph))?;
        let advance = unicode_width::UnicodeWidthChar::width(glyph).unwrap_or(1).max(1);
        self.cursor = Some((x.saturating_add(advance as u16), y));
        Ok(true)
    }

    fn emit_style_changes(&mut self, cell: &Cell) -> io::Result<()> {
        let style = CellStyle::from_cell(cell);
        let previous = self.current_style;
        if previous == Some(style) {
            return Ok(());
        }

        // Attributes can only be reset wholesale, which also clears colors.
        let flags_changed = previous.is_none_or(|p| p.flags != style.flags);
        if flags_changed {
            queue!(self.writer, SetAttribute(Attribute::Reset))?;
            for (flag, attr) in [
                (StyleFlags::BOLD, Attribute::Bold),
                (StyleFlags::DIM, Attribute::Dim),
                (StyleFlags::ITALIC, Attribute::Italic),
                (StyleFlags::UNDERLINE, Attribute::Underlined),
                (StyleFlags::REVERSE, Attribute::Reverse),
            ] {
                if style.flags.contains(flag) {
                    queue!(self.writer, SetAttribute(attr))?;
                }
            }
        }
        if flags_changed || previous.is_some_and(|p| p.fg != style.fg) {
            queue!(self.writer, SetForegroundColor(to_color(style.fg)))?;
        }
        if flags_changed || previous.is_some_and(|p| p.bg != style.bg) {
            queue!(self.writer, SetBackgroundColor(to_color(style.bg)))?;
        }

        self.current_style = Some(style);
        Ok(())
    }

    /// Forget what is on screen so the next frame repaints fully.
    pub fn invalidate(&mut self) {
        self.previous = None;
        self.current_style = None;
        self.cursor = None;
    }

    /// Hide the terminal cursor.
    pub fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.writer, Hide)?;
        self.writer.flush()
    }

    /// Show the terminal cursor.
    pub fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.writer, Show)?;
        self.writer.flush()
    }

    /// Unwrap the inner writer, flushing buffered output.
    pub fn into_inner(self) -> Result<W, io::Error> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}
