use super::*;

#[test]
fn defaults_match_documented_values() {
    let cfg = OverlayConfig::default();
    assert_eq!(cfg.default_animation_direction(), Direction::Auto);
    assert_eq!(cfg.physics_gravity_magnitude(), DEFAULT_GRAVITY);
    assert_eq!(cfg.physics_elasticity(), 0.5);
    assert_eq!(cfg.entrance_stagger(), 0.0);
    assert_eq!(cfg.exit_stagger(), 0.0);
    assert_eq!(cfg.mask_style(), MaskStyle::Default);
    assert_eq!(cfg.mask_color(), None);
    assert!(cfg.mask_tap_to_dismiss());

    let snap = cfg.snapshot();
    assert_eq!(snap.mask_color, Rgba8::dim());
}

#[test]
fn elasticity_is_clamped_not_rejected() {
    let mut cfg = OverlayConfig::default();
    cfg.set_physics_elasticity(-5.0);
    assert_eq!(cfg.physics_elasticity(), 0.0);
    cfg.set_physics_elasticity(5.0);
    assert_eq!(cfg.physics_elasticity(), 1.0);
    cfg.set_physics_elasticity(0.25);
    assert_eq!(cfg.physics_elasticity(), 0.25);
    cfg.set_physics_elasticity(f64::NAN);
    assert_eq!(cfg.physics_elasticity(), 0.0);
}

#[test]
fn gravity_and_staggers_clamp_negative_to_zero() {
    let mut cfg = OverlayConfig::default();
    cfg.set_physics_gravity_magnitude(-2.0);
    assert_eq!(cfg.physics_gravity_magnitude(), 0.0);
    cfg.set_physics_gravity_magnitude(3.5);
    assert_eq!(cfg.physics_gravity_magnitude(), 3.5);

    cfg.set_entrance_stagger(-0.1);
    cfg.set_exit_stagger(f64::INFINITY);
    assert_eq!(cfg.entrance_stagger(), 0.0);
    assert_eq!(cfg.exit_stagger(), 0.0);
}

#[test]
fn durations_are_capped() {
    let mut cfg = OverlayConfig::default();
    cfg.set_entrance_duration(1e300);
    cfg.set_exit_duration(MAX_DURATION + 0.5);
    assert_eq!(cfg.entrance_duration(), MAX_DURATION);
    assert_eq!(cfg.exit_duration(), MAX_DURATION);

    cfg.set_entrance_duration(-1.0);
    cfg.set_exit_duration(f64::NAN);
    assert_eq!(cfg.entrance_duration(), 0.0);
    assert_eq!(cfg.exit_duration(), 0.0);

    cfg.set_entrance_duration(2.5);
    assert_eq!(cfg.entrance_duration(), 2.5);
}

#[test]
fn json_durations_go_through_the_cap() {
    let cfg = OverlayConfig::from_json_str(r#"{ "entrance_duration": 1e300 }"#).unwrap();
    assert_eq!(cfg.entrance_duration(), MAX_DURATION);
}

#[test]
fn setters_are_idempotent() {
    let mut a = OverlayConfig::default();
    a.set_exit_stagger(0.05);
    let once = a.clone();
    a.set_exit_stagger(0.05);
    assert_eq!(a, once);
}

#[test]
fn mask_color_is_ignored_under_blur() {
    let mut cfg = OverlayConfig::default();
    cfg.set_mask_style(MaskStyle::Blur);
    cfg.set_mask_color(Rgba8::new(255, 0, 0, 255));
    assert_eq!(cfg.mask_color(), None);

    cfg.set_mask_style(MaskStyle::Default);
    cfg.set_mask_color(Rgba8::new(255, 0, 0, 255));
    assert_eq!(cfg.snapshot().mask_color, Rgba8::new(255, 0, 0, 255));
}

#[test]
fn snapshot_is_detached_from_later_writes() {
    let mut cfg = OverlayConfig::default();
    let snap = cfg.snapshot();
    cfg.set_physics_elasticity(1.0);
    cfg.set_default_animation_direction(Direction::Top);
    assert_eq!(snap.elasticity, 0.5);
    assert_eq!(snap.direction, Direction::Auto);
}

#[test]
fn json_document_is_partial_and_normalized() {
    let cfg = OverlayConfig::from_json_str(
        r#"{ "direction": "top", "elasticity": 3.0, "exit_stagger": 0.05, "mask_style": "blur" }"#,
    )
    .unwrap();
    assert_eq!(cfg.default_animation_direction(), Direction::Top);
    assert_eq!(cfg.physics_elasticity(), 1.0);
    assert_eq!(cfg.exit_stagger(), 0.05);
    assert_eq!(cfg.mask_style(), MaskStyle::Blur);
    assert_eq!(cfg.physics_gravity_magnitude(), DEFAULT_GRAVITY);
}

#[test]
fn json_document_rejects_unknown_fields() {
    let err = OverlayConfig::from_json_str(r#"{ "gravty": 1.0 }"#).unwrap_err();
    assert!(matches!(err, AlertError::Serde(_)));
}

#[test]
fn json_color_survives_style_in_same_document() {
    let cfg = OverlayConfig::from_json_str(
        r#"{ "mask_style": "default", "mask_color": { "r": 10, "g": 20, "b": 30, "a": 40 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.mask_color(), Some(Rgba8::new(10, 20, 30, 40)));
}

#[test]
fn direction_and_mask_style_parse_aliases() {
    assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Top);
    assert_eq!(" back ".parse::<Direction>().unwrap(), Direction::Back);
    assert!("sideways".parse::<Direction>().is_err());
    assert_eq!("clear".parse::<MaskStyle>().unwrap(), MaskStyle::Transparent);
    assert!("fog".parse::<MaskStyle>().is_err());
}
