#![forbid(unsafe_code)]

//! Tour steps and the caller-owned tour state.

use std::fmt;

/// Opaque handle to a host element a step points at.
///
/// The tour never interprets the value; it only asks a
/// [`Locate`](super::locator::Locate) implementation for the element's
/// current geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

impl TargetId {
    /// Create a handle from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

/// One stop on the tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourStep {
    /// Element this step highlights.
    pub target: TargetId,
    /// Short label.
    pub title: String,
    /// Descriptive body.
    pub content: String,
}

impl TourStep {
    /// Create a step.
    pub fn new(target: TargetId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            target,
            title: title.into(),
            content: content.into(),
        }
    }
}

/// The active step index, or none when no tour is running.
///
/// Hosts that keep the index as a signed integer with `-1` for "off" can
/// convert with [`ActiveIndex::from_raw`] and [`ActiveIndex::to_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActiveIndex(Option<usize>);

impl ActiveIndex {
    /// No tour running.
    pub const NONE: Self = Self(None);

    /// Tour running at `index`.
    #[inline]
    pub const fn at(index: usize) -> Self {
        Self(Some(index))
    }

    /// From the signed convention: any negative value means no tour.
    pub fn from_raw(raw: i64) -> Self {
        Self(usize::try_from(raw).ok())
    }

    /// To the signed convention, `-1` for none.
    pub fn to_raw(self) -> i64 {
        self.0
            .and_then(|i| i64::try_from(i).ok())
            .unwrap_or(-1)
    }

    /// The index, if set.
    #[inline]
    pub const fn get(self) -> Option<usize> {
        self.0
    }

    /// Whether an index is set (it may still be out of range).
    #[inline]
    pub const fn is_set(self) -> bool {
        self.0.is_some()
    }
}

impl From<Option<usize>> for ActiveIndex {
    fn from(index: Option<usize>) -> Self {
        Self(index)
    }
}

impl From<usize> for ActiveIndex {
    fn from(index: usize) -> Self {
        Self::at(index)
    }
}

/// A borrowed view of the host's tour state.
///
/// The caller owns both the steps and the index. The index may be stale or
/// out of range; [`TourState::resolved`] is the only way the tour reads it.
#[derive(Debug, Clone, Copy)]
pub struct TourState<'a> {
    /// Steps in navigation order.
    pub steps: &'a [TourStep],
    /// Active index as the host holds it.
    pub active: ActiveIndex,
}

impl<'a> TourState<'a> {
    /// Build a view over `steps` with the given active index.
    pub fn new(steps: &'a [TourStep], active: impl Into<ActiveIndex>) -> Self {
        Self {
            steps,
            active: active.into(),
        }
    }

    /// A view with no tour running.
    pub fn idle(steps: &'a [TourStep]) -> Self {
        Self::new(steps, ActiveIndex::NONE)
    }

    /// The active index if it points at a step, otherwise `None`.
    pub fn resolved(&self) -> Option<usize> {
        self.active.get().filter(|&i| i < self.steps.len())
    }

    /// Whether a tour is running.
    pub fn is_running(&self) -> bool {
        self.resolved().is_some()
    }

    /// The active step and its index.
    pub fn active_step(&self) -> Option<(usize, &'a TourStep)> {
        let index = self.resolved()?;
        self.steps.get(index).map(|step| (index, step))
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether there are no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(n: u32) -> Vec<TourStep> {
        (0..n)
            .map(|i| TourStep::new(TargetId::new(i), format!("S{i}"), "body"))
            .collect()
    }

    #[test]
    fn raw_index_conversion() {
        assert_eq!(ActiveIndex::from_raw(-1), ActiveIndex::NONE);
        assert_eq!(ActiveIndex::from_raw(-42), ActiveIndex::NONE);
        assert_eq!(ActiveIndex::from_raw(3), ActiveIndex::at(3));
        assert_eq!(ActiveIndex::NONE.to_raw(), -1);
        assert_eq!(ActiveIndex::at(2).to_raw(), 2);
    }

    #[test]
    fn resolved_guards_range() {
        let steps = steps(3);
        assert_eq!(TourState::new(&steps, 0).resolved(), Some(0));
        assert_eq!(TourState::new(&steps, 2).resolved(), Some(2));
        assert_eq!(TourState::new(&steps, 3).resolved(), None);
        assert_eq!(TourState::idle(&steps).resolved(), None);
    }

    #[test]
    fn empty_steps_never_run() {
        let state = TourState::new(&[], 0);
        assert!(!state.is_running());
        assert!(state.active_step().is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn active_step_returns_step() {
        let steps = steps(2);
        let state = TourState::new(&steps, 1);
        let (index, step) = state.active_step().unwrap();
        assert_eq!(index, 1);
        assert_eq!(step.title, "S1");
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn target_display() {
        assert_eq!(TargetId::new(7).to_string(), "target#7");
    }
}
