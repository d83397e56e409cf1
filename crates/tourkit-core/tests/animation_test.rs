//! Integration tests for the animation module.

use std::time::Duration;

use proptest::prelude::*;
use tourkit_core::animation::*;

#[test]
fn tween_many_small_ticks_complete() {
    let mut tween = Tween::new(Duration::from_secs(1));
    for _ in 0..1000 {
        tween.tick(Duration::from_millis(1));
    }
    assert!(tween.is_complete(), "1000x1ms should complete a 1s tween");
}

#[test]
fn spring_driven_coordinate_converges_to_cell() {
    let mut spring = Spring::new(4.0, 31.0);
    for _ in 0..300 {
        spring.tick(Duration::from_millis(16));
    }
    assert_eq!(spring.position().round() as u16, 31);
}

proptest! {
    #[test]
    fn tween_value_is_monotonic(steps in proptest::collection::vec(1u64..50, 1..40)) {
        let mut tween = Tween::new(Duration::from_millis(500)).easing(ease_in_out_cubic);
        let mut last = tween.value();
        for ms in steps {
            tween.tick(Duration::from_millis(ms));
            let v = tween.value();
            prop_assert!(v + 1e-6 >= last, "tween went backwards: {} -> {}", last, v);
            last = v;
        }
    }

    #[test]
    fn lerp_stays_between_endpoints(a in any::<u16>(), b in any::<u16>(), t in 0.0f32..=1.0) {
        let v = lerp_u16(a, b, t);
        prop_assert!(v >= a.min(b) && v <= a.max(b));
    }
}
