#![forbid(unsafe_code)]

//! Target geometry: where the host drew each element, and the memoized
//! projection of the active step onto a bounding box.

use std::collections::HashMap;

use tourkit_core::geometry::Rect;

use super::step::{TargetId, TourState};

/// Resolves a target handle to its on-screen rectangle.
pub trait Locate {
    /// Current geometry of `target`, or `None` when it is not on screen.
    fn locate(&self, target: TargetId) -> Option<Rect>;

    /// Layout generation; changes whenever any geometry may have changed.
    ///
    /// Locators that cannot tell return a constant, which keeps memoized
    /// bounds pinned until the step changes.
    fn generation(&self) -> u64 {
        0
    }
}

impl<F> Locate for F
where
    F: Fn(TargetId) -> Option<Rect>,
{
    fn locate(&self, target: TargetId) -> Option<Rect> {
        self(target)
    }
}

/// Host-side table of element geometry.
///
/// The host registers each element's rect as it lays out its page and
/// removes it when the element goes away.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    rects: HashMap<TargetId, Rect>,
    generation: u64,
}

impl TargetRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where `target` is. The generation moves only when the rect
    /// actually changed.
    pub fn register(&mut self, target: TargetId, rect: Rect) {
        if self.rects.insert(target, rect) != Some(rect) {
            self.generation += 1;
        }
    }

    /// Forget `target`. Returns its last rect.
    pub fn remove(&mut self, target: TargetId) -> Option<Rect> {
        let removed = self.rects.remove(&target);
        if removed.is_some() {
            self.generation += 1;
        }
        removed
    }

    /// Forget every target.
    pub fn clear(&mut self) {
        if !self.rects.is_empty() {
            self.rects.clear();
            self.generation += 1;
        }
    }

    /// Registered rect for `target`, zero-sized ones included.
    pub fn get(&self, target: TargetId) -> Option<Rect> {
        self.rects.get(&target).copied()
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl Locate for TargetRegistry {
    fn locate(&self, target: TargetId) -> Option<Rect> {
        self.get(target)
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MemoKey {
    index: usize,
    target: TargetId,
    generation: Option<u64>,
}

/// Memoized bounding box of the active step's target.
///
/// The box is a function of (active index, target handle). It is computed
/// on the first projection with a running tour and again only when either
/// input changes. With layout tracking on, a locator generation change also
/// counts. A missing or zero-area target is cached as `None`.
#[derive(Debug, Clone, Default)]
pub struct BoundsMemo {
    key: Option<MemoKey>,
    bounds: Option<Rect>,
    recomputes: u64,
}

impl BoundsMemo {
    /// An empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounding box for the active step.
    ///
    /// With no tour running the memo is cleared and `None` is returned
    /// without calling the locator.
    pub fn project(
        &mut self,
        state: &TourState<'_>,
        locator: &impl Locate,
        track_layout: bool,
    ) -> Option<Rect> {
        let Some((index, step)) = state.active_step() else {
            self.key = None;
            self.bounds = None;
            return None;
        };

        let key = MemoKey {
            index,
            target: step.target,
            generation: track_layout.then(|| locator.generation()),
        };
        if self.key != Some(key) {
            self.bounds = locator.locate(step.target).filter(|r| !r.is_empty());
            self.key = Some(key);
            self.recomputes += 1;
            tourkit_core::trace!(
                target: "tourkit::tour",
                index,
                target_id = %step.target,
                bounds = ?self.bounds,
                "tour bounds recomputed"
            );
        }
        self.bounds
    }

    /// Last projected box, without recomputing.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// How many times the locator has been consulted.
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }

    /// Drop the cached box so the next projection recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.bounds = None;
    }
}
