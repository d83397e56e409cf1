#![forbid(unsafe_code)]

//! Tooltip panel: placement, layout, and drawing.
//!
//! The panel hangs below its anchor (the animated, padded cut-out),
//! centered on the anchor's midpoint. Placement is deliberately naive: the
//! panel is never flipped above the anchor or pushed back inside the
//! viewport, and whatever falls off screen is clipped by the buffer.
//!
//! ```text
//! ╭──────────────────────────── × ╮
//! │ Orders                        │
//! │ Every order from every shop   │
//! │ lands here, newest first.     │
//! │                               │
//! │ Step 2 of 4  ○ ● ○ ○          │
//! │            [ Back ] [ Next ]  │
//! ╰───────────────────────────────╯
//! ```
//!
//! [`TooltipLayout`] is computed once per step and then only moved, so the
//! rect a button is drawn at is the rect its clicks are tested against.

use tourkit_core::geometry::{Rect, Size};
use tourkit_render::cell::{Cell, PackedRgba};
use tourkit_render::drawing::BorderChars;
use tourkit_render::frame::{Frame, HitData, HitId, HitRegion};

use super::step::TourStep;
use crate::Widget;
use crate::style::Style;
use crate::text::{display_width, draw_span_at, wrap};

/// Top-left corner of a panel of `size` placed under `anchor`.
///
/// The top edge sits `gap` rows below the anchor's bottom edge; the panel's
/// horizontal midpoint lines up with the anchor's. The result is signed and
/// unclamped: it may lie left of the screen or below it.
pub fn tooltip_origin(anchor: Rect, size: Size, gap: u16) -> (i32, i32) {
    let mid = i32::from(anchor.x) + i32::from(anchor.width) / 2;
    let x = mid - i32::from(size.width) / 2;
    let y = i32::from(anchor.y) + i32::from(anchor.height) + i32::from(gap);
    (x, y)
}

/// A rectangle whose origin may be off screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl PanelRect {
    /// Create a panel rect.
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the screen cell (x, y) falls inside.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let (x, y) = (i32::from(x), i32::from(y));
        x >= self.x
            && y >= self.y
            && x < self.x + i32::from(self.width)
            && y < self.y + i32::from(self.height)
    }

    /// The on-screen part, clipped to `bounds`.
    pub fn clip(&self, bounds: Rect) -> Option<Rect> {
        let left = self.x.max(i32::from(bounds.x));
        let top = self.y.max(i32::from(bounds.y));
        let right = (self.x + i32::from(self.width)).min(i32::from(bounds.right()));
        let bottom = (self.y + i32::from(self.height)).min(i32::from(bounds.bottom()));
        if left >= right || top >= bottom {
            return None;
        }
        // Bounded by `bounds`, so every value fits in u16.
        Some(Rect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }

    fn translate(rel: Rect, origin: (i32, i32)) -> Self {
        Self::new(
            origin.0 + i32::from(rel.x),
            origin.1 + i32::from(rel.y),
            rel.width,
            rel.height,
        )
    }
}

/// A clickable part of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TooltipHit {
    /// Previous step.
    Back,
    /// Next step, or finish on the last one.
    Next,
    /// Dismiss the tour.
    Close,
    /// Progress dot for a step.
    Dot(usize),
}

const DOT_BASE: HitData = 0x100;

impl TooltipHit {
    /// Encode for a hit grid.
    pub fn to_data(self) -> HitData {
        match self {
            Self::Back => 1,
            Self::Next => 2,
            Self::Close => 3,
            Self::Dot(i) => DOT_BASE + i as HitData,
        }
    }

    /// Decode from a hit grid.
    pub fn from_data(data: HitData) -> Option<Self> {
        match data {
            1 => Some(Self::Back),
            2 => Some(Self::Next),
            3 => Some(Self::Close),
            d if d >= DOT_BASE => usize::try_from(d - DOT_BASE).ok().map(Self::Dot),
            _ => None,
        }
    }
}

/// Tooltip configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipConfig {
    /// Widest the panel may get, border included.
    pub max_width: u16,
    /// Rows between the anchor and the panel.
    pub gap: u16,
    pub panel_bg: PackedRgba,
    pub panel_fg: PackedRgba,
    pub border: BorderChars,
    pub border_style: Style,
    pub title_style: Style,
    pub content_style: Style,
    pub counter_style: Style,
    pub button_style: Style,
    /// Style of the Next/Finish button.
    pub primary_style: Style,
    pub dot_style: Style,
    pub active_dot_style: Style,
    pub back_label: String,
    pub next_label: String,
    pub finish_label: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        let accent = PackedRgba::rgb(97, 175, 239);
        let panel_bg = PackedRgba::rgb(40, 44, 52);
        Self {
            max_width: 44,
            gap: 1,
            panel_bg,
            panel_fg: PackedRgba::rgb(220, 220, 220),
            border: BorderChars::ROUNDED,
            border_style: Style::new().fg(accent),
            title_style: Style::new().fg(accent).bold(),
            content_style: Style::new().fg(PackedRgba::rgb(200, 200, 200)),
            counter_style: Style::new().fg(PackedRgba::rgb(140, 140, 140)),
            button_style: Style::new()
                .fg(PackedRgba::rgb(220, 220, 220))
                .bg(PackedRgba::rgb(62, 68, 81)),
            primary_style: Style::new().fg(panel_bg).bg(accent).bold(),
            dot_style: Style::new().fg(PackedRgba::rgb(110, 110, 110)),
            active_dot_style: Style::new().fg(accent),
            back_label: "Back".into(),
            next_label: "Next".into(),
            finish_label: "Finish".into(),
        }
    }
}

impl TooltipConfig {
    /// Set the maximum panel width.
    #[must_use]
    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = width;
        self
    }

    /// Set the gap under the anchor.
    #[must_use]
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Set the panel colors.
    #[must_use]
    pub fn panel_colors(mut self, fg: PackedRgba, bg: PackedRgba) -> Self {
        self.panel_fg = fg;
        self.panel_bg = bg;
        self
    }

    /// Set the border characters.
    #[must_use]
    pub fn border(mut self, border: BorderChars) -> Self {
        self.border = border;
        self
    }

    /// Set the button labels.
    #[must_use]
    pub fn labels(
        mut self,
        back: impl Into<String>,
        next: impl Into<String>,
        finish: impl Into<String>,
    ) -> Self {
        self.back_label = back.into();
        self.next_label = next.into();
        self.finish_label = finish.into();
        self
    }
}

const ACTIVE_DOT: &str = "●";
const INACTIVE_DOT: &str = "○";
const CLOSE: &str = " × ";
// Border plus one column of padding on each side.
const CHROME_WIDTH: u16 = 4;
// Top border, blank row, counter row, button row, bottom border.
const CHROME_HEIGHT: u16 = 5;

fn button_text(label: &str) -> String {
    format!("[ {label} ]")
}

/// Panel geometry and text for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipLayout {
    origin: (i32, i32),
    size: Size,
    title: Vec<String>,
    content: Vec<String>,
    counter: String,
    active: usize,
    dots: Vec<Rect>,
    back: Option<(Rect, String)>,
    next: (Rect, String),
    close: Rect,
}

impl TooltipLayout {
    /// Lay out the panel for step `index` of `count`, at origin (0, 0).
    pub fn compute(step: &TourStep, index: usize, count: usize, config: &TooltipConfig) -> Self {
        let wrap_width = config.max_width.saturating_sub(CHROME_WIDTH).max(1);
        let title = wrap(&step.title, wrap_width as usize);
        let content = wrap(&step.content, wrap_width as usize);

        let counter = format!("Step {} of {}", index + 1, count);
        let counter_width = display_width(&counter);
        let dots_width = count.saturating_mul(2).saturating_sub(1);

        let is_last = index + 1 >= count;
        let back_label = (index > 0).then(|| button_text(&config.back_label));
        let next_label = button_text(if is_last {
            &config.finish_label
        } else {
            &config.next_label
        });
        let buttons_width = display_width(&next_label)
            + back_label.as_deref().map_or(0, |b| display_width(b) + 1);

        let text_width = title
            .iter()
            .chain(&content)
            .map(|line| display_width(line))
            .max()
            .unwrap_or(0);
        let inner = text_width
            .max(counter_width + 2 + dots_width)
            .max(buttons_width)
            .max(display_width(CLOSE))
            .min(wrap_width as usize) as u16;

        let width = inner + CHROME_WIDTH;
        let body_rows = (title.len() + content.len()) as u16;
        let height = body_rows.saturating_add(CHROME_HEIGHT);
        let left = 2u16;

        let counter_row = 1 + body_rows + 1;
        let dots = if counter_width + 2 + dots_width <= inner as usize {
            let start = left + counter_width as u16 + 2;
            (0..count)
                .map(|i| Rect::new(start + 2 * i as u16, counter_row, 1, 1))
                .collect()
        } else {
            Vec::new()
        };

        let button_row = counter_row + 1;
        let next_width = display_width(&next_label) as u16;
        let next_x = (left + inner).saturating_sub(next_width).max(left);
        let next = (Rect::new(next_x, button_row, next_width, 1), next_label);
        let back = back_label.map(|label| {
            let w = display_width(&label) as u16;
            let x = next_x.saturating_sub(w + 1).max(left);
            (Rect::new(x, button_row, w, 1), label)
        });

        let close_width = display_width(CLOSE) as u16;
        let close = Rect::new(width.saturating_sub(close_width + 1), 0, close_width, 1);

        Self {
            origin: (0, 0),
            size: Size::new(width, height),
            title,
            content,
            counter,
            active: index,
            dots,
            back,
            next,
            close,
        }
    }

    /// Move the panel under `anchor`.
    pub fn place(&mut self, anchor: Rect, gap: u16) {
        self.origin = tooltip_origin(anchor, self.size, gap);
    }

    /// Builder form of [`TooltipLayout::place`].
    #[must_use]
    pub fn placed(mut self, anchor: Rect, gap: u16) -> Self {
        self.place(anchor, gap);
        self
    }

    /// Signed top-left corner.
    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Panel size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Panel rect on screen.
    pub fn panel(&self) -> PanelRect {
        PanelRect::new(self.origin.0, self.origin.1, self.size.width, self.size.height)
    }

    /// Wrapped title lines.
    pub fn title_lines(&self) -> &[String] {
        &self.title
    }

    /// Wrapped content lines.
    pub fn content_lines(&self) -> &[String] {
        &self.content
    }

    /// The "Step i of n" text.
    pub fn counter(&self) -> &str {
        &self.counter
    }

    /// Label on the forward button ("Next" or "Finish", bracketed).
    pub fn next_label(&self) -> &str {
        &self.next.1
    }

    /// Whether the Back button is shown.
    pub fn has_back(&self) -> bool {
        self.back.is_some()
    }

    /// Every clickable part with its on-screen rect. Later entries sit on
    /// top of earlier ones.
    pub fn hits(&self) -> Vec<(TooltipHit, PanelRect)> {
        let mut hits = Vec::with_capacity(self.dots.len() + 3);
        hits.extend(
            self.dots
                .iter()
                .enumerate()
                .map(|(i, r)| (TooltipHit::Dot(i), PanelRect::translate(*r, self.origin))),
        );
        if let Some((rect, _)) = &self.back {
            hits.push((TooltipHit::Back, PanelRect::translate(*rect, self.origin)));
        }
        hits.push((TooltipHit::Next, PanelRect::translate(self.next.0, self.origin)));
        hits.push((TooltipHit::Close, PanelRect::translate(self.close, self.origin)));
        hits
    }

    /// What a click at screen cell (x, y) would press.
    pub fn hit_at(&self, x: u16, y: u16) -> Option<TooltipHit> {
        self.hits()
            .into_iter()
            .rev()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(hit, _)| hit)
    }
}

/// Draws a placed [`TooltipLayout`] and registers its buttons.
#[derive(Debug, Clone, Copy)]
pub struct Tooltip<'a> {
    layout: &'a TooltipLayout,
    config: &'a TooltipConfig,
    hit_id: HitId,
}

impl<'a> Tooltip<'a> {
    /// A tooltip widget over a layout.
    pub fn new(layout: &'a TooltipLayout, config: &'a TooltipConfig) -> Self {
        Self {
            layout,
            config,
            hit_id: HitId::default(),
        }
    }

    /// Id used when registering button hit regions.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = id;
        self
    }

    fn put(frame: &mut Frame, clip: Rect, x: i32, y: i32, cell: Cell) {
        if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y))
            && clip.contains(x, y)
        {
            frame.buffer.set(x, y, cell);
        }
    }

    fn span(&self, frame: &mut Frame, clip: Rect, rel: Rect, text: &str, style: Style) {
        let (ox, oy) = self.layout.origin;
        draw_span_at(
            &mut frame.buffer,
            clip,
            ox + i32::from(rel.x),
            oy + i32::from(rel.y),
            text,
            style,
            rel.width as usize,
        );
    }

    fn draw_frame(&self, frame: &mut Frame, clip: Rect) {
        let panel = self.layout.panel();
        let base = Cell::from_char(' ')
            .with_fg(self.config.panel_fg)
            .with_bg(self.config.panel_bg);
        let border_fg = self.config.border_style.fg.unwrap_or(self.config.panel_fg);
        let chars = self.config.border;
        let (w, h) = (i32::from(panel.width), i32::from(panel.height));

        for dy in 0..h {
            for dx in 0..w {
                let top = dy == 0;
                let bottom = dy == h - 1;
                let left = dx == 0;
                let right = dx == w - 1;
                let glyph = match (top, bottom, left, right) {
                    (true, _, true, _) => chars.top_left,
                    (true, _, _, true) => chars.top_right,
                    (_, true, true, _) => chars.bottom_left,
                    (_, true, _, true) => chars.bottom_right,
                    (true, ..) | (_, true, ..) => chars.horizontal,
                    (_, _, true, _) | (_, _, _, true) => chars.vertical,
                    _ => ' ',
                };
                let cell = if glyph == ' ' {
                    base
                } else {
                    Cell::from_char(glyph)
                        .with_fg(border_fg)
                        .with_bg(self.config.panel_bg)
                };
                Self::put(frame, clip, panel.x + dx, panel.y + dy, cell);
            }
        }
    }
}

impl Widget for Tooltip<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let layout = self.layout;
        let bounds = area.intersection(&frame.bounds());
        if bounds.is_empty() || layout.size.width < CHROME_WIDTH {
            return;
        }
        let config = self.config;
        self.draw_frame(frame, bounds);

        let inner = layout.size.width - CHROME_WIDTH;
        let mut row = 1u16;
        for line in &layout.title {
            self.span(frame, bounds, Rect::new(2, row, inner, 1), line, config.title_style);
            row += 1;
        }
        for line in &layout.content {
            self.span(frame, bounds, Rect::new(2, row, inner, 1), line, config.content_style);
            row += 1;
        }
        row += 1;
        self.span(
            frame,
            bounds,
            Rect::new(2, row, inner, 1),
            &layout.counter,
            config.counter_style,
        );
        for (i, dot) in layout.dots.iter().enumerate() {
            let (glyph, style) = if i == layout.active {
                (ACTIVE_DOT, config.active_dot_style)
            } else {
                (INACTIVE_DOT, config.dot_style)
            };
            self.span(frame, bounds, *dot, glyph, style);
        }
        if let Some((rect, label)) = &layout.back {
            self.span(frame, bounds, *rect, label, config.button_style);
        }
        self.span(frame, bounds, layout.next.0, &layout.next.1, config.primary_style);
        self.span(frame, bounds, layout.close, CLOSE, config.border_style);

        for (hit, rect) in layout.hits() {
            if let Some(rect) = rect.clip(bounds) {
                frame.register_hit(rect, self.hit_id, HitRegion::Button, hit.to_data());
            }
        }
    }
}
