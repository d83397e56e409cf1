#![forbid(unsafe_code)]

//! Property tests for tour navigation and overlay geometry.

use proptest::prelude::*;
use tourkit_core::geometry::Rect;
use tourkit_render::frame::Frame;
use tourkit_widgets::Widget;
use tourkit_widgets::tour::spotlight::in_rounded_rect;
use tourkit_widgets::tour::{
    ActiveIndex, KeyboardHub, Motion, NavAction, Navigator, OnboardingTour, SpotlightConfig,
    TargetId, TargetRegistry, TourConfig, TourHost, TourState, TourStep, Transition,
};

#[derive(Debug, Default)]
struct Recorder {
    index: usize,
    finished: usize,
}

impl TourHost for Recorder {
    fn set_active_index(&mut self, index: usize) {
        self.index = index;
    }

    fn on_finish(&mut self) {
        self.finished += 1;
    }
}

fn action() -> impl Strategy<Value = NavAction> {
    prop_oneof![
        3 => Just(NavAction::Next),
        3 => Just(NavAction::Back),
        1 => (0usize..20).prop_map(NavAction::JumpTo),
    ]
}

fn tour_start() -> impl Strategy<Value = (usize, usize)> {
    (1usize..10).prop_flat_map(|len| (Just(len), 0..len))
}

proptest! {
    #[test]
    fn index_never_leaves_range(
        (len, start) in tour_start(),
        actions in proptest::collection::vec(action(), 0..64),
    ) {
        let mut host = Recorder { index: start, finished: 0 };
        for action in actions {
            let before = host.index;
            let finished = host.finished;
            let navigator = Navigator::new(len, ActiveIndex::at(before));
            let transition = navigator.apply(action, &mut host);

            prop_assert!(host.index < len);
            match (action, transition) {
                (NavAction::Back, _) if before == 0 => {
                    prop_assert_eq!(transition, Transition::Stay);
                    prop_assert_eq!(host.index, 0);
                }
                (NavAction::Next, _) if before == len - 1 => {
                    prop_assert_eq!(transition, Transition::Finish);
                    prop_assert_eq!(host.index, before);
                    prop_assert_eq!(host.finished, finished + 1);
                }
                (_, Transition::Goto(i)) => {
                    prop_assert_eq!(host.index, i);
                }
                _ => {
                    prop_assert_eq!(host.index, before);
                }
            }
        }
    }

    #[test]
    fn stale_index_is_inert(len in 0usize..6, past in 0usize..6, action in action()) {
        let mut host = Recorder { index: usize::MAX, finished: 0 };
        let navigator = Navigator::new(len, ActiveIndex::at(len + past));
        prop_assert_eq!(navigator.apply(action, &mut host), Transition::Stay);
        prop_assert_eq!(host.index, usize::MAX);
        prop_assert_eq!(host.finished, 0);
    }

    #[test]
    fn overlay_dims_exactly_outside_the_cutout(
        x in 0u16..70,
        y in 0u16..20,
        w in 1u16..20,
        h in 1u16..6,
        padding in 0u16..3,
        radius in 0u16..3,
    ) {
        let target = TargetId::new(1);
        let steps = vec![TourStep::new(target, "Target", "Body")];
        let mut registry = TargetRegistry::new();
        registry.register(target, Rect::new(x, y, w, h));
        let spotlight = SpotlightConfig::default()
            .target_padding(padding)
            .corner_radius(radius);
        let mut tour = OnboardingTour::new(
            TourConfig::default()
                .motion(Motion::Instant)
                .spotlight(spotlight),
        );
        tour.sync(&TourState::new(&steps, 0), &registry, &KeyboardHub::new());

        let cutout = tour.cutout().unwrap();
        prop_assert_eq!(cutout, spotlight.cutout(Rect::new(x, y, w, h)));

        let mut frame = Frame::new(80, 24);
        tour.render(frame.bounds(), &mut frame);
        let panel = tour.tooltip().unwrap().panel();
        for cy in 0..24u16 {
            for cx in 0..80u16 {
                if panel.contains(cx, cy) {
                    continue;
                }
                let dimmed = frame.buffer.get(cx, cy).unwrap().bg.a() > 0;
                prop_assert_eq!(dimmed, !in_rounded_rect(cutout, radius, cx, cy));
            }
        }
    }

    #[test]
    fn settled_motion_lands_on_target(
        a in (0u16..60, 0u16..20, 1u16..20, 1u16..4),
        b in (0u16..60, 0u16..20, 1u16..20, 1u16..4),
        spring in any::<bool>(),
    ) {
        let motion = if spring { Motion::SPRING } else { Motion::TWEEN };
        let steps = vec![
            TourStep::new(TargetId::new(1), "A", ""),
            TourStep::new(TargetId::new(2), "B", ""),
        ];
        let mut registry = TargetRegistry::new();
        registry.register(TargetId::new(1), Rect::new(a.0, a.1, a.2, a.3));
        registry.register(TargetId::new(2), Rect::new(b.0, b.1, b.2, b.3));
        let hub = KeyboardHub::new();
        let mut tour = OnboardingTour::new(TourConfig::default().motion(motion));

        tour.sync(&TourState::new(&steps, 0), &registry, &hub);
        tour.sync(&TourState::new(&steps, 1), &registry, &hub);
        for _ in 0..600 {
            tour.tick(std::time::Duration::from_millis(16));
        }
        let expected = tour.config().spotlight.cutout(Rect::new(b.0, b.1, b.2, b.3));
        prop_assert_eq!(tour.cutout(), Some(expected));
        prop_assert!(!tour.is_animating());
    }
}
