#![forbid(unsafe_code)]

//! Widgets for tourkit.
//!
//! The centerpiece is [`tour`], a guided-tour spotlight overlay. The rest of
//! the crate is the small widget vocabulary it is drawn with.

pub mod style;
pub mod text;
pub mod tour;

use tourkit_core::geometry::Rect;
use tourkit_render::cell::Cell;
use tourkit_render::frame::Frame;

pub use style::Style;

/// A `Widget` is a renderable component.
///
/// Widgets draw into the frame's buffer within `area` and may register hit
/// regions on the frame's hit grid.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// Apply a style to a cell, keeping whatever the style does not set.
pub(crate) fn apply_style(cell: &mut Cell, style: Style) {
    if let Some(fg) = style.fg {
        cell.fg = fg;
    }
    if let Some(bg) = style.bg {
        cell.bg = bg;
    }
    if let Some(attrs) = style.attrs {
        cell.flags |= attrs;
    }
}
