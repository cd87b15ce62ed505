use super::*;
use crate::{config::MAX_DURATION, foundation::core::Rect};

fn presenter() -> (Presenter<HeadlessCompositor>, ContentHandle) {
    let mut c = HeadlessCompositor::new(Rect::new(0.0, 0.0, 400.0, 800.0));
    let content = c.create_content(Rect::new(50.0, 300.0, 350.0, 500.0));
    (Presenter::new(c), content)
}

#[test]
fn show_creates_presenting_session_with_mask_and_content_pending() {
    let (mut p, content) = presenter();
    p.show(content, true);

    let s = p.session().unwrap();
    assert_eq!(s.serial(), 1);
    assert_eq!(s.state(), PresentationState::Presenting);
    assert_eq!(s.style(), AnimationStyle::Scale);
    assert_eq!(s.start_timestamp(), 0.0);
    assert!(!s.requested_dismiss_while_presenting());

    let targets: Vec<TrackTarget> = s.pending_animations().map(|(_, t)| t).collect();
    assert_eq!(targets, vec![TrackTarget::Mask, TrackTarget::Content]);

    let scene = p.compositor().scene();
    assert_eq!(scene.len(), 2);
    assert_eq!(scene[1], content.surface);
}

#[test]
fn entrance_completes_only_after_every_track() {
    let (mut p, content) = presenter();
    p.set_entrance_stagger(0.1);
    p.show_content(content, true, AnimationStyle::Door);

    p.advance(0.35);
    assert_eq!(p.state(), PresentationState::Presenting);
    assert_eq!(p.session().unwrap().pending_animations().count(), 2);

    p.advance(0.1);
    assert_eq!(p.state(), PresentationState::Presented);
}

#[test]
fn run_until_settled_returns_on_degenerate_steps() {
    let (mut p, content) = presenter();
    p.show_content(content, true, AnimationStyle::Door);
    for dt in [0.0, -0.1, f64::NAN, f64::INFINITY] {
        p.run_until_settled(dt, 1.0);
        assert_eq!(p.state(), PresentationState::Presenting, "{dt}");
        assert_eq!(p.compositor().now(), 0.0, "{dt}");
    }

    p.run_until_settled(1.0 / 60.0, 5.0);
    assert_eq!(p.state(), PresentationState::Presented);
}

#[test]
fn weak_gravity_entrance_settles_promptly() {
    let (mut p, content) = presenter();
    p.set_physics_gravity_magnitude(1e-8);
    p.show_content(content, true, AnimationStyle::Gravity);
    p.run_until_settled(1.0 / 60.0, 5.0);
    assert_eq!(p.state(), PresentationState::Presented);

    p.dismiss(true);
    p.run_until_settled(1.0 / 60.0, 5.0);
    assert_eq!(p.state(), PresentationState::Idle);
}

#[test]
fn oversized_durations_are_capped_before_planning() {
    let (mut p, content) = presenter();
    p.config_mut().set_entrance_duration(1e300);
    p.show_content(content, true, AnimationStyle::Scale);
    let s = p.session().unwrap();
    assert_eq!(s.snapshot().entrance_duration, MAX_DURATION);
    assert!((s.plan().entrance().total_duration() - MAX_DURATION).abs() < 1e-9);

    p.run_until_settled(1.0 / 60.0, MAX_DURATION + 1.0);
    assert_eq!(p.state(), PresentationState::Presented);
}

#[test]
fn stale_finish_events_are_ignored() {
    let (mut p, content) = presenter();
    p.handle(OverlayEvent::AnimationFinished(AnimationId(77)));
    assert_eq!(p.state(), PresentationState::Idle);

    p.show(content, true);
    p.handle(OverlayEvent::AnimationFinished(AnimationId(77)));
    assert_eq!(p.state(), PresentationState::Presenting);
    assert_eq!(p.session().unwrap().pending_animations().count(), 2);
}

#[test]
fn fragmented_entrance_hides_content_until_presented() {
    let (mut p, content) = presenter();
    p.show_content(content, true, AnimationStyle::Explode);
    assert_eq!(p.compositor().fragments_in_scene(), 9);
    assert_eq!(p.compositor().pose(content.surface).unwrap().opacity, 0.0);

    p.run_until_settled(1.0 / 60.0, 5.0);
    assert_eq!(p.state(), PresentationState::Presented);
    assert_eq!(p.compositor().fragments_in_scene(), 0);
    let pose = p.compositor().pose(content.surface).unwrap();
    assert_eq!(pose.opacity, 1.0);
    assert_eq!(pose.transform.scale.x, 1.0);
}

#[test]
fn dismiss_from_presented_respawns_fragments() {
    let (mut p, content) = presenter();
    p.show_content(content, false, AnimationStyle::Door);
    assert_eq!(p.state(), PresentationState::Presented);
    assert_eq!(p.compositor().fragments_in_scene(), 0);

    p.dismiss(true);
    assert_eq!(p.state(), PresentationState::Dismissing);
    assert_eq!(p.compositor().fragments_in_scene(), 2);
    assert_eq!(p.compositor().pose(content.surface).unwrap().opacity, 0.0);
}

#[test]
fn mid_entrance_dismiss_starts_exit_from_captured_pose() {
    let (mut p, content) = presenter();
    p.show(content, true);
    p.advance(0.1);
    let before = p.compositor().pose(content.surface).unwrap();
    let mask = p.session().unwrap().mask.surface();
    let mask_before = p.compositor().pose(mask).unwrap();
    assert!(before.transform.scale.x > 0.5 && before.transform.scale.x < 1.0);

    p.dismiss(true);
    let s = p.session().unwrap();
    assert_eq!(s.state(), PresentationState::Dismissing);
    assert!(s.requested_dismiss_while_presenting());

    let after = p.compositor().pose(content.surface).unwrap();
    assert!(after.approx_eq(&before, 1e-9));
    assert!(p.compositor().pose(mask).unwrap().approx_eq(&mask_before, 1e-9));
}

#[test]
fn snapshot_is_frozen_per_session() {
    let (mut p, content) = presenter();
    p.show(content, true);
    p.set_mask_color(Rgba8::new(255, 0, 0, 255));
    p.set_physics_elasticity(0.9);

    let s = p.session().unwrap();
    assert_eq!(s.snapshot().mask_color, Rgba8::dim());
    assert_eq!(s.snapshot().elasticity, 0.5);
    assert_eq!(s.mask_fill(), MaskFill::Color(Rgba8::dim()));
    assert_eq!(p.config().mask_color(), Some(Rgba8::new(255, 0, 0, 255)));
}

#[test]
fn confetti_sessions_get_distinct_scatter() {
    let (mut p, content) = presenter();
    p.show_content(content, false, AnimationStyle::Confetti);
    let first: Vec<_> = p.session().unwrap().fragments().iter().map(|f| f.launch).collect();
    p.dismiss(false);

    p.show_content(content, false, AnimationStyle::Confetti);
    let s = p.session().unwrap();
    assert_eq!(s.serial(), 2);
    let second: Vec<_> = s.fragments().iter().map(|f| f.launch).collect();
    assert_eq!(first.len(), 16);
    assert_ne!(first, second);
}

#[test]
fn teardown_returns_content_at_rest_and_releases_surfaces() {
    let (mut p, content) = presenter();
    p.show_content(content, true, AnimationStyle::Sesame);
    p.advance(0.1);
    p.dismiss(false);

    assert_eq!(p.state(), PresentationState::Idle);
    let c = p.compositor();
    assert!(!c.is_in_scene(content.surface));
    assert_eq!(c.live_surfaces(), 1);
    assert_eq!(c.running_animations(), 0);
    assert_eq!(c.pose(content.surface), Some(Pose::rest()));
}
