#![forbid(unsafe_code)]

//! Animated rectangle for the spotlight cut-out and the tooltip anchor.
//!
//! When the target box changes between steps the displayed rect travels to
//! the new one instead of jumping. Time only moves through
//! [`RectMotion::tick`], so the displayed rect is a deterministic function of
//! the retarget/tick sequence.

use std::time::Duration;

use tourkit_core::animation::{Animation, EasingFn, Spring, Tween, ease_out_cubic, lerp_u16};
use tourkit_core::geometry::Rect;

/// How the cut-out moves between steps.
#[derive(Debug, Clone, Copy)]
pub enum Motion {
    /// Jump straight to the new box.
    Instant,
    /// Interpolate over a fixed duration.
    Tween {
        /// Length of the transition.
        duration: Duration,
        /// Easing applied to linear progress.
        easing: EasingFn,
    },
    /// Per-edge damped springs.
    Spring {
        /// Spring stiffness.
        stiffness: f64,
        /// Spring damping.
        damping: f64,
    },
}

impl Motion {
    /// The default spring: stiffness 170, damping 26 (just under critical).
    pub const SPRING: Self = Self::Spring {
        stiffness: 170.0,
        damping: 26.0,
    };

    /// A 250ms cubic ease-out tween.
    pub const TWEEN: Self = Self::Tween {
        duration: Duration::from_millis(250),
        easing: ease_out_cubic,
    };
}

impl Default for Motion {
    fn default() -> Self {
        Self::SPRING
    }
}

impl PartialEq for Motion {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Instant, Self::Instant) => true,
            (
                Self::Tween {
                    duration: d1,
                    easing: e1,
                },
                Self::Tween {
                    duration: d2,
                    easing: e2,
                },
            ) => d1 == d2 && std::ptr::fn_addr_eq(*e1, *e2),
            (
                Self::Spring {
                    stiffness: s1,
                    damping: c1,
                },
                Self::Spring {
                    stiffness: s2,
                    damping: c2,
                },
            ) => s1 == s2 && c1 == c2,
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
enum Driver {
    Settled,
    Tween { from: Rect, tween: Tween },
    Springs([Spring; 4]),
}

/// The displayed rect and the animation carrying it to its target.
#[derive(Debug, Clone)]
pub struct RectMotion {
    motion: Motion,
    target: Option<Rect>,
    current: Option<Rect>,
    driver: Driver,
}

impl Default for RectMotion {
    fn default() -> Self {
        Self::new(Motion::default())
    }
}

fn edges(rect: Rect) -> [f64; 4] {
    [
        f64::from(rect.x),
        f64::from(rect.y),
        f64::from(rect.width),
        f64::from(rect.height),
    ]
}

fn to_cell(value: f64) -> u16 {
    value.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

impl RectMotion {
    /// A motion with nothing displayed.
    pub fn new(motion: Motion) -> Self {
        Self {
            motion,
            target: None,
            current: None,
            driver: Driver::Settled,
        }
    }

    /// Configured motion.
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Rect currently displayed.
    pub fn current(&self) -> Option<Rect> {
        self.current
    }

    /// Rect being travelled to.
    pub fn target(&self) -> Option<Rect> {
        self.target
    }

    /// Whether the displayed rect has reached the target.
    pub fn is_settled(&self) -> bool {
        matches!(self.driver, Driver::Settled)
    }

    /// Head for `target`.
    ///
    /// - `None` hides immediately; there is nothing to animate from or to.
    /// - The first box after being hidden appears in place.
    /// - A new box while one is shown starts a transition from wherever the
    ///   displayed rect is right now.
    pub fn retarget(&mut self, target: Option<Rect>) {
        if target == self.target {
            return;
        }
        self.target = target;

        let (Some(to), Some(from)) = (target, self.current) else {
            self.current = target;
            self.driver = Driver::Settled;
            return;
        };

        self.driver = match self.motion {
            Motion::Instant => {
                self.current = Some(to);
                Driver::Settled
            }
            Motion::Tween { duration, easing } => Driver::Tween {
                from,
                tween: Tween::new(duration).easing(easing),
            },
            Motion::Spring { stiffness, damping } => {
                let start = match &self.driver {
                    Driver::Springs(springs) => springs.each_ref().map(Spring::position),
                    _ => edges(from),
                };
                let end = edges(to);
                Driver::Springs(std::array::from_fn(|i| {
                    let mut spring = Spring::at(start[i])
                        .with_stiffness(stiffness)
                        .with_damping(damping);
                    spring.set_target(end[i]);
                    spring
                }))
            }
        };
    }

    /// Advance the transition by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let Some(to) = self.target else {
            return;
        };
        match &mut self.driver {
            Driver::Settled => {}
            Driver::Tween { from, tween } => {
                tween.tick(dt);
                let t = tween.value();
                let from = *from;
                self.current = Some(Rect::new(
                    lerp_u16(from.x, to.x, t),
                    lerp_u16(from.y, to.y, t),
                    lerp_u16(from.width, to.width, t),
                    lerp_u16(from.height, to.height, t),
                ));
                if tween.is_complete() {
                    self.current = Some(to);
                    self.driver = Driver::Settled;
                }
            }
            Driver::Springs(springs) => {
                for spring in springs.iter_mut() {
                    spring.tick(dt);
                }
                let [x, y, w, h] = springs.each_ref().map(Spring::position);
                self.current = Some(Rect::new(to_cell(x), to_cell(y), to_cell(w), to_cell(h)));
                if springs.iter().all(Spring::is_at_rest) {
                    self.current = Some(to);
                    self.driver = Driver::Settled;
                }
            }
        }
    }

    /// Jump to the target and stop animating.
    pub fn settle(&mut self) {
        self.current = self.target;
        self.driver = Driver::Settled;
    }
}
