#![forbid(unsafe_code)]

//! Frame = Buffer + hit grid for a render pass.
//!
//! Widgets draw into [`Frame::buffer`] and may register clickable regions.
//! The host later maps mouse positions back to those regions with
//! [`Frame::hit_test`].

use tourkit_core::geometry::Rect;

use crate::buffer::Buffer;

/// Identifier for a clickable region in the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a new hit ID from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque user data for hit callbacks.
pub type HitData = u64;

/// Regions within a widget for mouse interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    /// No interactive region.
    #[default]
    None,
    /// Main content area.
    Content,
    /// Clickable button.
    Button,
    /// Custom region tag.
    Custom(u8),
}

/// A single hit cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitCell {
    /// Widget that registered this cell, if any.
    pub widget_id: Option<HitId>,
    /// Region tag for the hit area.
    pub region: HitRegion,
    /// Extra data attached to this hit cell.
    pub data: HitData,
}

impl HitCell {
    /// Create a populated hit cell.
    #[inline]
    pub const fn new(widget_id: HitId, region: HitRegion, data: HitData) -> Self {
        Self {
            widget_id: Some(widget_id),
            region,
            data,
        }
    }
}

/// Maps screen positions to the widget regions registered there.
///
/// Later registrations win over earlier ones, so an overlay drawn last also
/// owns the clicks on top of it.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    /// Create an empty hit grid.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![HitCell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Register a clickable region, clipped to the grid.
    pub fn register(&mut self, rect: Rect, widget_id: HitId, region: HitRegion, data: HitData) {
        let clipped = Rect::from_size(self.width, self.height).intersection(&rect);
        if clipped.is_empty() {
            return;
        }
        let hit = HitCell::new(widget_id, region, data);
        for y in clipped.y..clipped.bottom() {
            let row = y as usize * self.width as usize;
            self.cells[row + clipped.x as usize..row + clipped.right() as usize].fill(hit);
        }
    }

    /// Hit test at the given position.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        let cell = self.cells.get(self.index(x, y)?)?;
        cell.widget_id.map(|id| (id, cell.region, cell.data))
    }

    /// Clear all hit regions.
    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }
}

/// The render target for one pass.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Cell grid widgets draw into.
    pub buffer: Buffer,
    /// Present only when the host asked for mouse hit testing.
    pub hit_grid: Option<HitGrid>,
}

impl Frame {
    /// A frame without hit testing.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: None,
        }
    }

    /// A frame that records hit regions.
    pub fn with_hit_grid(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: Some(HitGrid::new(width, height)),
        }
    }

    /// Frame width in cells.
    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height in cells.
    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// The whole frame as a rect.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Reset cells and hit regions for the next pass.
    pub fn clear(&mut self) {
        self.buffer.clear();
        if let Some(grid) = self.hit_grid.as_mut() {
            grid.clear();
        }
    }

    /// Register a hit region. Returns `false` when hit testing is off.
    pub fn register_hit(&mut self, rect: Rect, id: HitId, region: HitRegion, data: HitData) -> bool {
        match self.hit_grid.as_mut() {
            Some(grid) => {
                grid.register(rect, id, region, data);
                true
            }
            None => false,
        }
    }

    /// Hit test at the given position (if hit grid is enabled).
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.hit_grid.as_ref().and_then(|grid| grid.hit_test(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_without_grid_ignores_hits() {
        let mut frame = Frame::new(5, 5);
        assert!(!frame.register_hit(Rect::new(0, 0, 2, 2), HitId::new(1), HitRegion::Button, 0));
        assert_eq!(frame.hit_test(0, 0), None);
    }

    #[test]
    fn registered_region_is_hit() {
        let mut frame = Frame::with_hit_grid(10, 4);
        assert!(frame.register_hit(Rect::new(2, 1, 3, 1), HitId::new(7), HitRegion::Button, 42));
        assert_eq!(frame.hit_test(3, 1), Some((HitId::new(7), HitRegion::Button, 42)));
        assert_eq!(frame.hit_test(5, 1), None);
        assert_eq!(frame.hit_test(3, 0), None);
    }

    #[test]
    fn later_registration_wins() {
        let mut grid = HitGrid::new(4, 4);
        grid.register(Rect::new(0, 0, 4, 4), HitId::new(1), HitRegion::Content, 0);
        grid.register(Rect::new(1, 1, 1, 1), HitId::new(2), HitRegion::Custom(3), 9);
        assert_eq!(grid.hit_test(1, 1), Some((HitId::new(2), HitRegion::Custom(3), 9)));
        assert_eq!(grid.hit_test(0, 0).map(|h| h.0), Some(HitId::new(1)));
    }

    #[test]
    fn registration_clips_to_grid() {
        let mut grid = HitGrid::new(3, 3);
        grid.register(Rect::new(2, 2, 50, 50), HitId::new(1), HitRegion::Button, 0);
        assert!(grid.hit_test(2, 2).is_some());
        assert_eq!(grid.hit_test(3, 3), None);
    }

    #[test]
    fn clear_resets_hits() {
        let mut frame = Frame::with_hit_grid(3, 3);
        frame.register_hit(Rect::new(0, 0, 3, 3), HitId::new(1), HitRegion::Content, 0);
        frame.clear();
        assert_eq!(frame.hit_test(1, 1), None);
    }
}
