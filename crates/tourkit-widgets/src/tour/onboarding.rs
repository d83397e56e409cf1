#![forbid(unsafe_code)]

//! The assembled tour: spotlight, tooltip, navigation, and key binding.
//!
//! The host keeps the steps and the active index. Each frame it calls
//! [`OnboardingTour::sync`] with a view of that state, [`OnboardingTour::tick`]
//! with the elapsed time, and then renders the tour over its page. Events go
//! through [`OnboardingTour::handle_event`] first; navigation is reported back
//! through [`TourHost`].
//!
//! ```ignore
//! tour.sync(&TourState::new(&steps, active), &registry, &hub);
//! tour.tick(dt);
//! page.render(area, &mut frame);
//! tour.render(area, &mut frame);
//! ```

use std::cell::Cell;
use std::time::Duration;

use tourkit_core::event::Event;
use tourkit_core::geometry::Rect;
use tourkit_render::frame::{Frame, HitId};

use super::input::{InputBinder, KeyboardHub};
use super::locator::{BoundsMemo, Locate};
use super::motion::{Motion, RectMotion};
use super::navigator::{NavAction, Navigator, TourHost, Transition};
use super::spotlight::{Spotlight, SpotlightConfig};
use super::step::TourState;
use super::tooltip::{Tooltip, TooltipConfig, TooltipHit, TooltipLayout};
use crate::Widget;

/// Name the tour claims the keyboard under.
pub const TOUR_KEY_OWNER: &str = "onboarding-tour";

/// Tour configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TourConfig {
    pub spotlight: SpotlightConfig,
    pub tooltip: TooltipConfig,
    /// How the cut-out travels between steps.
    pub motion: Motion,
    /// Re-locate the target whenever the locator's layout generation moves,
    /// not only when the step changes.
    pub track_layout: bool,
    /// Accept clicks on the tooltip buttons.
    pub mouse: bool,
    /// Id under which tooltip buttons are registered in the hit grid.
    pub hit_id: HitId,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            spotlight: SpotlightConfig::default(),
            tooltip: TooltipConfig::default(),
            motion: Motion::default(),
            track_layout: false,
            mouse: true,
            hit_id: HitId::new(0x70_u32),
        }
    }
}

impl TourConfig {
    /// Set the spotlight configuration.
    #[must_use]
    pub fn spotlight(mut self, spotlight: SpotlightConfig) -> Self {
        self.spotlight = spotlight;
        self
    }

    /// Set the tooltip configuration.
    #[must_use]
    pub fn tooltip(mut self, tooltip: TooltipConfig) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Set the transition motion.
    #[must_use]
    pub fn motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    /// Set layout tracking.
    #[must_use]
    pub fn track_layout(mut self, track: bool) -> Self {
        self.track_layout = track;
        self
    }

    /// Set mouse support.
    #[must_use]
    pub fn mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    /// Set the hit-grid id.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = id;
        self
    }
}

/// The navigation request a tooltip click stands for.
pub fn action_for_hit(hit: TooltipHit) -> NavAction {
    match hit {
        TooltipHit::Back => NavAction::Back,
        TooltipHit::Next => NavAction::Next,
        TooltipHit::Close => NavAction::Finish,
        TooltipHit::Dot(index) => NavAction::JumpTo(index),
    }
}

/// A guided tour over a host's page.
#[derive(Debug)]
pub struct OnboardingTour {
    config: TourConfig,
    memo: BoundsMemo,
    motion: RectMotion,
    binder: InputBinder,
    layout: Option<TooltipLayout>,
    running: bool,
    /// Area of the last render, clipped to its frame.
    drawn: Cell<Option<Rect>>,
}

impl Default for OnboardingTour {
    fn default() -> Self {
        Self::new(TourConfig::default())
    }
}

impl OnboardingTour {
    /// A tour with nothing shown yet.
    pub fn new(config: TourConfig) -> Self {
        Self {
            motion: RectMotion::new(config.motion),
            memo: BoundsMemo::new(),
            binder: InputBinder::new(TOUR_KEY_OWNER),
            layout: None,
            running: false,
            drawn: Cell::new(None),
            config,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    /// Bring the tour in line with the host's state.
    ///
    /// Re-locates the active target if the step changed, points the cut-out
    /// at it, attaches or detaches the keys, and lays out the tooltip. With
    /// no tour running this hides everything and releases the keyboard.
    pub fn sync(&mut self, state: &TourState<'_>, locator: &impl Locate, hub: &KeyboardHub) {
        let _span = tourkit_core::debug_span!("tour.sync", active = ?state.active.get()).entered();

        let running = state.is_running();
        if running != self.running {
            if running {
                tourkit_core::info!(target: "tourkit::tour", steps = state.len(), "tour started");
            } else {
                tourkit_core::info!(target: "tourkit::tour", "tour ended");
            }
            self.running = running;
        }

        let bounds = self.memo.project(state, locator, self.config.track_layout);
        let cutout = bounds.map(|b| self.config.spotlight.cutout(b));
        self.motion.retarget(cutout);
        self.binder.sync(running, hub);

        self.layout = match (state.active_step(), cutout) {
            (Some((index, step)), Some(_)) => Some(TooltipLayout::compute(
                step,
                index,
                state.len(),
                &self.config.tooltip,
            )),
            _ => None,
        };
        self.place_tooltip();
    }

    /// Advance the cut-out animation by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if self.motion.is_settled() {
            return;
        }
        self.motion.tick(dt);
        self.place_tooltip();
    }

    /// Finish any transition in progress.
    pub fn settle(&mut self) {
        self.motion.settle();
        self.place_tooltip();
    }

    fn place_tooltip(&mut self) {
        if let (Some(layout), Some(anchor)) = (self.layout.as_mut(), self.motion.current()) {
            layout.place(anchor, self.config.tooltip.gap);
        }
    }

    /// Offer an event to the tour. Returns whether it was consumed.
    ///
    /// Mapped keys are consumed while the keyboard is attached. Left clicks
    /// on the tooltip press its buttons; any other click on the panel is
    /// swallowed so it does not reach the page underneath. Only the part of
    /// the panel inside the last rendered area takes clicks; before the
    /// first render the whole panel does.
    pub fn handle_event(
        &self,
        state: &TourState<'_>,
        event: &Event,
        host: &mut impl TourHost,
    ) -> bool {
        let navigator = Navigator::from_state(state);
        if !navigator.is_running() {
            return false;
        }

        if let Some(action) = self.binder.handle(event) {
            navigator.apply(action, host);
            return true;
        }

        let Event::Mouse(mouse) = event else {
            return false;
        };
        if !self.config.mouse {
            return false;
        }
        let Some(layout) = &self.layout else {
            return false;
        };
        let visible = self
            .drawn
            .get()
            .is_none_or(|area| area.contains(mouse.x, mouse.y));
        if !visible || !layout.panel().contains(mouse.x, mouse.y) {
            return false;
        }
        if mouse.is_left_click()
            && let Some(hit) = layout.hit_at(mouse.x, mouse.y)
        {
            navigator.apply(action_for_hit(hit), host);
        }
        true
    }

    /// Apply a navigation request directly, as a custom control would.
    pub fn navigate(
        &self,
        state: &TourState<'_>,
        action: NavAction,
        host: &mut impl TourHost,
    ) -> Transition {
        Navigator::from_state(state).apply(action, host)
    }

    /// Box of the active target, before padding. `None` when nothing is
    /// highlighted.
    pub fn bounds(&self) -> Option<Rect> {
        self.memo.bounds()
    }

    /// Cut-out as displayed this frame.
    pub fn cutout(&self) -> Option<Rect> {
        self.motion.current()
    }

    /// Whether the cut-out is still travelling.
    pub fn is_animating(&self) -> bool {
        !self.motion.is_settled()
    }

    /// Tooltip layout for this frame.
    pub fn tooltip(&self) -> Option<&TooltipLayout> {
        self.layout.as_ref()
    }

    /// Whether the tour holds the keyboard.
    pub fn is_attached(&self) -> bool {
        self.binder.is_attached()
    }

    /// How many times the active target has been located.
    pub fn locate_count(&self) -> u64 {
        self.memo.recomputes()
    }
}

impl Widget for OnboardingTour {
    fn render(&self, area: Rect, frame: &mut Frame) {
        self.drawn.set(Some(area.intersection(&frame.bounds())));
        let Some(cutout) = self.motion.current() else {
            return;
        };
        Spotlight::new(Some(cutout))
            .config(self.config.spotlight)
            .render(area, frame);
        if let Some(layout) = &self.layout {
            Tooltip::new(layout, &self.config.tooltip)
                .hit_id(self.config.hit_id)
                .render(area, frame);
        }
    }
}
