use super::*;
use crate::{config::OverlayConfig, direction::resolve_direction};

fn panel() -> Size {
    Size::new(300.0, 200.0)
}

fn snap_with(entrance_stagger: f64, exit_stagger: f64) -> ConfigSnapshot {
    let mut cfg = OverlayConfig::default();
    cfg.set_entrance_stagger(entrance_stagger);
    cfg.set_exit_stagger(exit_stagger);
    cfg.snapshot()
}

fn plan(style: AnimationStyle, snap: &ConfigSnapshot) -> FragmentPlan {
    let dir = resolve_direction(style, snap.direction);
    plan_fragments(style, dir, panel(), snap, 11)
}

#[test]
fn non_fragmented_styles_produce_no_fragments() {
    let snap = snap_with(0.05, 0.05);
    for style in AnimationStyle::ALL {
        let p = plan(style, &snap);
        assert_eq!(p.len(), style.fragment_count(), "{style}");
        assert_eq!(p.is_empty(), !style.is_fragmented(), "{style}");
    }
    assert_eq!(plan(AnimationStyle::Scale, &snap).entrance_total(), 0.0);
}

#[test]
fn door_auto_with_stagger_has_reversed_exit_delays() {
    let snap = snap_with(0.05, 0.05);
    let p = plan(AnimationStyle::Door, &snap);
    let entrance: Vec<f64> = p.fragments.iter().map(|f| f.stagger_delay).collect();
    let exit: Vec<f64> = p.fragments.iter().map(|f| f.exit_delay).collect();
    assert_eq!(entrance, vec![0.0, 0.05]);
    assert_eq!(exit, vec![0.05, 0.0]);

    // Left half first, right half second.
    assert_eq!(p.fragments[0].source_region, Rect::new(0.0, 0.0, 150.0, 200.0));
    assert_eq!(p.fragments[1].source_region, Rect::new(150.0, 0.0, 300.0, 200.0));
    assert!(p.fragments[0].entrance.from.transform.translate.x < 0.0);
    assert!(p.fragments[1].entrance.from.transform.translate.x > 0.0);
}

#[test]
fn door_vertical_split_moves_along_y() {
    let snap = snap_with(0.0, 0.0);
    let p = plan_fragments(
        AnimationStyle::Door,
        ResolvedDirection::SplitVertical,
        panel(),
        &snap,
        0,
    );
    assert_eq!(p.fragments[0].source_region, Rect::new(0.0, 0.0, 300.0, 100.0));
    let t = p.fragments[1].entrance.from.transform.translate;
    assert_eq!(t.x, 0.0);
    assert!(t.y > 0.0);
}

#[test]
fn sesame_leaves_are_hinged_on_outer_edges_by_default() {
    let snap = snap_with(0.0, 0.0);
    let p = plan(AnimationStyle::Sesame, &snap);
    let left = p.fragments[0].entrance.from.transform;
    let right = p.fragments[1].entrance.from.transform;
    assert_eq!(left.scale.x, 0.0);
    assert_eq!(left.anchor.x, 0.0);
    assert_eq!(right.anchor.x, 150.0);
    // Resting pose keeps the pivot so the fold swings around the hinge.
    assert_eq!(p.fragments[0].entrance.to.transform.anchor, left.anchor);
}

#[test]
fn sesame_explicit_edge_shares_one_hinge() {
    let snap = snap_with(0.0, 0.0);
    let p = plan_fragments(
        AnimationStyle::Sesame,
        ResolvedDirection::Hinge(Edge::Top),
        panel(),
        &snap,
        0,
    );
    for f in &p.fragments {
        assert_eq!(f.entrance.from.transform.anchor.y, 0.0);
        assert_eq!(f.entrance.from.transform.scale.y, 0.0);
    }
}

#[test]
fn explode_pieces_move_outward_from_center() {
    let snap = snap_with(0.02, 0.0);
    let p = plan(AnimationStyle::Explode, &snap);
    assert_eq!(p.len(), 9);
    let center = Vec2::new(150.0, 100.0);
    for f in &p.fragments {
        let dir = f.source_region.center().to_vec2() - center;
        let travel = f.entrance.from.transform.translate;
        if dir.hypot() < 1e-9 {
            assert_eq!(travel, Vec2::ZERO);
            assert!(f.entrance.from.transform.scale.x < 1.0);
        } else {
            assert!(dir.dot(travel) > 0.0);
        }
    }
    // Entrance total = piece + (N-1) * stagger.
    let expected = snap.entrance_duration + 8.0 * 0.02;
    assert!((p.entrance_total() - expected).abs() < 1e-12);
}

#[test]
fn confetti_jitter_is_seeded_per_session() {
    let snap = snap_with(0.0, 0.0);
    let dir = ResolvedDirection::Radial;
    let a = plan_fragments(AnimationStyle::Confetti, dir, panel(), &snap, 1);
    let b = plan_fragments(AnimationStyle::Confetti, dir, panel(), &snap, 1);
    let c = plan_fragments(AnimationStyle::Confetti, dir, panel(), &snap, 2);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.len(), 16);
    assert!(a.fragments.iter().all(|f| f.launch.is_some()));
    assert!(a.exit_total() >= snap.exit_duration);
}

#[test]
fn exit_delays_reverse_entrance_order() {
    let snap = snap_with(0.03, 0.04);
    let p = plan(AnimationStyle::Explode, &snap);
    let n = p.len();
    for f in &p.fragments {
        assert!((f.stagger_delay - f.index as f64 * 0.03).abs() < 1e-12);
        assert!((f.exit_delay - (n - 1 - f.index) as f64 * 0.04).abs() < 1e-12);
    }
    let last = p.fragments.last().unwrap();
    assert_eq!(last.exit_delay, 0.0);
}
