#![forbid(unsafe_code)]

//! Guided product tour.
//!
//! A tour walks the user through a fixed list of [`TourStep`]s. Each step
//! points at an element of the host's page; the tour dims everything except
//! that element and shows a tooltip beneath it with the step's text and
//! navigation buttons.
//!
//! The host owns the step list and the active index ([`TourState`]) and
//! learns about navigation through [`TourHost`]. [`OnboardingTour`] holds
//! only derived state: the located target, the animated cut-out, the
//! tooltip layout, and the keyboard claim.
//!
//! # Invariants
//!
//! 1. With no steps, no active index, or an index past the end, nothing is
//!    drawn and the keyboard is not claimed.
//! 2. The host's index only ever moves to a valid step.
//! 3. The keyboard is claimed exactly while a tour is running.
//! 4. For a given state and target geometry, rendering is deterministic.

pub mod input;
pub mod locator;
pub mod motion;
pub mod navigator;
pub mod onboarding;
pub mod spotlight;
pub mod step;
pub mod tooltip;

pub use input::{ClaimError, InputBinder, KeyClaim, KeyboardHub};
pub use locator::{BoundsMemo, Locate, TargetRegistry};
pub use motion::{Motion, RectMotion};
pub use navigator::{HostCallbacks, NavAction, Navigator, TourHost, Transition};
pub use onboarding::{OnboardingTour, TourConfig};
pub use spotlight::{Spotlight, SpotlightConfig};
pub use step::{ActiveIndex, TargetId, TourState, TourStep};
pub use tooltip::{Tooltip, TooltipConfig, TooltipHit, TooltipLayout};
