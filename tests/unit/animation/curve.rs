use super::*;
use crate::foundation::core::Vec2;

#[test]
fn tween_hits_both_endpoints() {
    let from = Pose::hidden().with_scale(0.5, 0.5);
    let to = Pose::rest();
    let c = MotionCurve::tween(from, to, 0.3, Ease::OutCubic);
    assert_eq!(c.start(), from);
    assert!(c.end().approx_eq(&to, 1e-12));
    assert!((c.duration() - 0.3).abs() < 1e-12);
    assert_eq!(c.sample(-1.0), from);
    assert!(c.sample(10.0).approx_eq(&to, 1e-12));
}

#[test]
fn zero_duration_tween_holds_target() {
    let to = Pose::rest().with_translate(Vec2::new(4.0, 0.0));
    let c = MotionCurve::tween(Pose::hidden(), to, 0.0, Ease::Linear);
    assert_eq!(c.keys().len(), 1);
    assert_eq!(c.duration(), 0.0);
    assert_eq!(c.sample(0.0), to);
}

#[test]
fn sampling_interpolates_between_keys() {
    let from = Pose::rest().with_translate(Vec2::new(0.0, 0.0));
    let to = Pose::rest().with_translate(Vec2::new(100.0, 0.0));
    let c = MotionCurve::tween(from, to, 1.0, Ease::Linear);
    let mid = c.sample(0.505);
    assert!((mid.transform.translate.x - 50.5).abs() < 1e-9);
}

#[test]
fn keys_are_increasing_and_end_on_duration() {
    let c = MotionCurve::from_fn(0.37, |_| Pose::rest());
    let keys = c.keys();
    assert_eq!(keys[0].t, 0.0);
    assert!(keys.windows(2).all(|w| w[0].t < w[1].t));
    assert_eq!(c.duration(), 0.37);
}

#[test]
fn huge_durations_bake_a_bounded_number_of_keys() {
    for duration in [1e4, 1e300, f64::MAX] {
        let c = MotionCurve::tween(Pose::hidden(), Pose::rest(), duration, Ease::Linear);
        assert_eq!(c.keys().len(), MAX_STEPS + 1, "{duration}");
        assert_eq!(c.duration(), duration);
        assert!(c.keys().windows(2).all(|w| w[0].t < w[1].t), "{duration}");
        assert!(c.end().approx_eq(&Pose::rest(), 1e-12));
    }
}

#[test]
fn snap_end_replaces_last_key_only() {
    let c = MotionCurve::tween(Pose::hidden(), Pose::hidden(), 0.1, Ease::Linear)
        .snap_end(Pose::rest());
    assert_eq!(c.end(), Pose::rest());
    assert_eq!(c.start(), Pose::hidden());
}
