#![forbid(unsafe_code)]

//! Spotlight overlay: a dimming mask with a rounded cut-out.
//!
//! # Invariants
//!
//! 1. Without a cut-out nothing is drawn; an unresolved target leaves the
//!    host's frame untouched.
//! 2. Every cell of the area outside the cut-out is dimmed exactly once.
//! 3. Cells inside the cut-out are never modified.
//! 4. Output depends only on the cut-out rect, the config, and the frame's
//!    prior contents.

use tourkit_core::geometry::{Rect, Sides};
use tourkit_render::cell::PackedRgba;
use tourkit_render::frame::Frame;

use crate::Widget;

/// Spotlight configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotlightConfig {
    /// Mask color, composited over everything outside the cut-out.
    pub overlay_color: PackedRgba,
    /// Breathing room added around the target on every side, in cells.
    pub target_padding: u16,
    /// Corner radius of the cut-out, in cells. Zero gives square corners.
    pub corner_radius: u16,
    /// Dim glyph colors as well as backgrounds.
    pub dim_text: bool,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            overlay_color: PackedRgba::rgba(0, 0, 0, 180),
            target_padding: 1,
            corner_radius: 1,
            dim_text: true,
        }
    }
}

impl SpotlightConfig {
    /// Set overlay color.
    #[must_use]
    pub fn overlay_color(mut self, color: PackedRgba) -> Self {
        self.overlay_color = color;
        self
    }

    /// Set target padding.
    #[must_use]
    pub fn target_padding(mut self, padding: u16) -> Self {
        self.target_padding = padding;
        self
    }

    /// Set corner radius.
    #[must_use]
    pub fn corner_radius(mut self, radius: u16) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set whether glyph colors are dimmed too.
    #[must_use]
    pub fn dim_text(mut self, dim: bool) -> Self {
        self.dim_text = dim;
        self
    }

    /// The cut-out for a target: its box grown by the padding.
    pub fn cutout(&self, target: Rect) -> Rect {
        target.outer(Sides::all(self.target_padding))
    }
}

/// Columns trimmed from each side of a rounded rect on the row `row` cells
/// away from its nearest horizontal edge.
///
/// Follows a quarter circle of radius `radius`: the edge row loses
/// `radius` columns, rows further in lose fewer, and rows at least `radius`
/// in lose none.
pub fn corner_inset(radius: u16, row: u16) -> u16 {
    if row >= radius {
        return 0;
    }
    let r = f64::from(radius);
    let dy = r - f64::from(row);
    (r - (r * r - dy * dy).max(0.0).sqrt()).ceil() as u16
}

/// Whether (x, y) lies inside `cutout` with its corners rounded.
pub fn in_rounded_rect(cutout: Rect, radius: u16, x: u16, y: u16) -> bool {
    if !cutout.contains(x, y) {
        return false;
    }
    let radius = radius.min(cutout.width / 2).min(cutout.height / 2);
    if radius == 0 {
        return true;
    }
    let row = (y - cutout.y).min(cutout.bottom() - 1 - y);
    let inset = corner_inset(radius, row);
    x >= cutout.x + inset && x < cutout.right() - inset
}

/// Full-area dimming mask with a cut-out.
#[derive(Debug, Clone, Copy)]
pub struct Spotlight {
    cutout: Option<Rect>,
    config: SpotlightConfig,
}

impl Spotlight {
    /// A spotlight whose cut-out is already padded (see
    /// [`SpotlightConfig::cutout`]). `None` renders nothing.
    pub fn new(cutout: Option<Rect>) -> Self {
        Self {
            cutout,
            config: SpotlightConfig::default(),
        }
    }

    /// Set configuration.
    #[must_use]
    pub fn config(mut self, config: SpotlightConfig) -> Self {
        self.config = config;
        self
    }

    /// The cut-out this spotlight leaves undimmed.
    pub fn cutout(&self) -> Option<Rect> {
        self.cutout
    }
}

impl Widget for Spotlight {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let Some(cutout) = self.cutout else {
            return;
        };
        let overlay = self.config.overlay_color;
        if overlay.a() == 0 {
            return;
        }
        let area = area.intersection(&frame.bounds());

        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if in_rounded_rect(cutout, self.config.corner_radius, x, y) {
                    continue;
                }
                if let Some(cell) = frame.buffer.get_mut(x, y) {
                    cell.bg = overlay.over(cell.bg);
                    if self.config.dim_text && cell.fg.a() > 0 {
                        cell.fg = overlay.over(cell.fg);
                    }
                }
            }
        }
    }
}
