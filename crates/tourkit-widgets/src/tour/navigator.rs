#![forbid(unsafe_code)]

//! Step navigation.
//!
//! The navigator decides what a request means for the host's index and then
//! tells the host. It never stores an index of its own: the host owns the
//! tour state and the navigator is rebuilt from it on every use.
//!
//! # Invariants
//!
//! 1. Every operation yields exactly one [`Transition`].
//! 2. `Goto(i)` always satisfies `i < step_count`.
//! 3. With no steps or no valid active index, every operation is `Stay` and
//!    the host is not called.
//! 4. `Finish` calls [`TourHost::on_finish`] once and never changes the
//!    index; resetting it is up to the host.

use super::step::{ActiveIndex, TourState};

/// What the host should do in response to a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Set the active index.
    Goto(usize),
    /// The tour is done; the host decides what that means.
    Finish,
    /// Nothing changes.
    Stay,
}

/// A navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Advance, or finish on the last step.
    Next,
    /// Step back; stays on the first step.
    Back,
    /// Go straight to a step, clamped to the valid range.
    JumpTo(usize),
    /// End the tour from any step.
    Finish,
}

/// The host side of a tour: owner of the active index.
pub trait TourHost {
    /// Move the tour to `index`.
    fn set_active_index(&mut self, index: usize);

    /// The user completed or dismissed the tour.
    fn on_finish(&mut self);
}

/// Adapts a pair of closures to [`TourHost`].
pub struct HostCallbacks<S, F>
where
    S: FnMut(usize),
    F: FnMut(),
{
    set_active_index: S,
    on_finish: F,
}

impl<S, F> HostCallbacks<S, F>
where
    S: FnMut(usize),
    F: FnMut(),
{
    /// Wrap an index setter and a finish callback.
    pub fn new(set_active_index: S, on_finish: F) -> Self {
        Self {
            set_active_index,
            on_finish,
        }
    }
}

impl<S, F> TourHost for HostCallbacks<S, F>
where
    S: FnMut(usize),
    F: FnMut(),
{
    fn set_active_index(&mut self, index: usize) {
        (self.set_active_index)(index);
    }

    fn on_finish(&mut self) {
        (self.on_finish)();
    }
}

/// Transition rules over a step count and the host's current index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    len: usize,
    current: Option<usize>,
}

impl Navigator {
    /// Build from a step count and the host's index. An out-of-range index
    /// leaves the navigator inert.
    pub fn new(step_count: usize, active: ActiveIndex) -> Self {
        Self {
            len: step_count,
            current: active.get().filter(|&i| i < step_count),
        }
    }

    /// Build from a state view.
    pub fn from_state(state: &TourState<'_>) -> Self {
        Self::new(state.len(), state.active)
    }

    /// Current valid index, if a tour is running.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Whether any transition is possible.
    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the current step is the last one.
    pub fn is_last(&self) -> bool {
        self.current.is_some_and(|i| i + 1 == self.len)
    }

    /// Whether the current step is the first one.
    pub fn is_first(&self) -> bool {
        self.current == Some(0)
    }

    /// Decide the transition for `action` without touching any host.
    pub fn plan(&self, action: NavAction) -> Transition {
        let Some(index) = self.current else {
            return Transition::Stay;
        };
        let last = self.len - 1;
        match action {
            NavAction::Next if index < last => Transition::Goto(index + 1),
            NavAction::Next => Transition::Finish,
            NavAction::Back if index > 0 => Transition::Goto(index - 1),
            NavAction::Back => Transition::Stay,
            NavAction::JumpTo(target) => {
                let target = target.min(last);
                if target == index {
                    Transition::Stay
                } else {
                    Transition::Goto(target)
                }
            }
            NavAction::Finish => Transition::Finish,
        }
    }

    /// Plan `action` and deliver the result to `host`.
    pub fn apply(&self, action: NavAction, host: &mut impl TourHost) -> Transition {
        let transition = self.plan(action);
        match transition {
            Transition::Goto(index) => host.set_active_index(index),
            Transition::Finish => host.on_finish(),
            Transition::Stay => {}
        }
        tourkit_core::debug!(
            target: "tourkit::tour",
            ?action,
            from = ?self.current,
            ?transition,
            "tour navigation"
        );
        transition
    }

    /// Advance, or finish on the last step.
    pub fn next(&self, host: &mut impl TourHost) -> Transition {
        self.apply(NavAction::Next, host)
    }

    /// Step back; no-op on the first step.
    pub fn back(&self, host: &mut impl TourHost) -> Transition {
        self.apply(NavAction::Back, host)
    }

    /// Go directly to `index`, clamped to `[0, len - 1]`.
    pub fn jump_to(&self, index: usize, host: &mut impl TourHost) -> Transition {
        self.apply(NavAction::JumpTo(index), host)
    }

    /// End the tour.
    pub fn finish(&self, host: &mut impl TourHost) -> Transition {
        self.apply(NavAction::Finish, host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        index: Option<usize>,
        finished: usize,
    }

    impl TourHost for Recorder {
        fn set_active_index(&mut self, index: usize) {
            self.index = Some(index);
        }

        fn on_finish(&mut self) {
            self.finished += 1;
        }
    }

    fn nav(len: usize, at: usize) -> Navigator {
        Navigator::new(len, ActiveIndex::at(at))
    }

    // ── next ────────────────────────────────────────────────────────────

    #[test]
    fn next_advances() {
        let mut host = Recorder::default();
        assert_eq!(nav(3, 0).next(&mut host), Transition::Goto(1));
        assert_eq!(host.index, Some(1));
        assert_eq!(host.finished, 0);
    }

    #[test]
    fn next_on_last_finishes_without_moving() {
        let mut host = Recorder::default();
        assert_eq!(nav(3, 2).next(&mut host), Transition::Finish);
        assert_eq!(host.index, None);
        assert_eq!(host.finished, 1);
    }

    // ── back ────────────────────────────────────────────────────────────

    #[test]
    fn back_steps_back() {
        let mut host = Recorder::default();
        assert_eq!(nav(3, 2).back(&mut host), Transition::Goto(1));
        assert_eq!(host.index, Some(1));
    }

    #[test]
    fn back_on_first_is_silent() {
        let mut host = Recorder::default();
        assert_eq!(nav(3, 0).back(&mut host), Transition::Stay);
        assert_eq!(host.index, None);
        assert_eq!(host.finished, 0);
    }

    // ── jump_to ─────────────────────────────────────────────────────────

    #[test]
    fn jump_to_sets_directly() {
        let mut host = Recorder::default();
        assert_eq!(nav(5, 0).jump_to(3, &mut host), Transition::Goto(3));
        assert_eq!(host.index, Some(3));
    }

    #[test]
    fn jump_to_clamps() {
        assert_eq!(nav(4, 0).plan(NavAction::JumpTo(99)), Transition::Goto(3));
        assert_eq!(nav(4, 3).plan(NavAction::JumpTo(usize::MAX)), Transition::Stay);
    }

    #[test]
    fn jump_to_current_is_stay() {
        let mut host = Recorder::default();
        assert_eq!(nav(4, 2).jump_to(2, &mut host), Transition::Stay);
        assert_eq!(host.index, None);
    }

    // ── finish ──────────────────────────────────────────────────────────

    #[test]
    fn finish_from_any_step() {
        for at in 0..3 {
            let mut host = Recorder::default();
            assert_eq!(nav(3, at).finish(&mut host), Transition::Finish);
            assert_eq!(host.finished, 1);
            assert_eq!(host.index, None);
        }
    }

    // ── guard ───────────────────────────────────────────────────────────

    #[test]
    fn inert_without_steps_or_index() {
        let cases = [
            Navigator::new(0, ActiveIndex::at(0)),
            Navigator::new(3, ActiveIndex::NONE),
            Navigator::new(3, ActiveIndex::at(3)),
        ];
        for navigator in cases {
            let mut host = Recorder::default();
            assert!(!navigator.is_running());
            for action in [
                NavAction::Next,
                NavAction::Back,
                NavAction::JumpTo(1),
                NavAction::Finish,
            ] {
                assert_eq!(navigator.apply(action, &mut host), Transition::Stay);
            }
            assert_eq!(host.index, None);
            assert_eq!(host.finished, 0);
        }
    }

    #[test]
    fn single_step_tour() {
        let navigator = nav(1, 0);
        assert!(navigator.is_first());
        assert!(navigator.is_last());
        assert_eq!(navigator.plan(NavAction::Next), Transition::Finish);
        assert_eq!(navigator.plan(NavAction::Back), Transition::Stay);
    }

    #[test]
    fn host_callbacks_forward() {
        let mut set = Vec::new();
        let mut finished = 0;
        {
            let mut host = HostCallbacks::new(|i| set.push(i), || finished += 1);
            nav(3, 1).next(&mut host);
            nav(3, 2).next(&mut host);
        }
        assert_eq!(set, vec![2]);
        assert_eq!(finished, 1);
    }
}
