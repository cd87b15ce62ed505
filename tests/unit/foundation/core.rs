use super::*;

#[test]
fn transform_to_affine_identity_and_translation() {
    let t = Transform2D::default();
    assert_eq!(t.to_affine(), kurbo::Affine::IDENTITY);

    let t = Transform2D {
        translate: Vec2::new(10.0, -2.5),
        ..Transform2D::default()
    };
    assert_eq!(
        t.to_affine(),
        kurbo::Affine::translate(Vec2::new(10.0, -2.5))
    );
}

#[test]
fn anchored_scale_keeps_pivot_fixed() {
    let t = Transform2D {
        scale: Vec2::new(0.0, 1.0),
        anchor: Vec2::new(40.0, 0.0),
        ..Transform2D::default()
    };
    let pivot = t.to_affine() * Point::new(40.0, 12.0);
    assert!((pivot.x - 40.0).abs() < 1e-9);
    assert!((pivot.y - 12.0).abs() < 1e-9);
}

#[test]
fn pose_lerp_extrapolates_transform_but_clamps_opacity() {
    let a = Pose::hidden().with_scale(0.0, 0.0);
    let b = Pose::rest();
    let over = Pose::lerp(a, b, 1.2);
    assert!((over.transform.scale.x - 1.2).abs() < 1e-9);
    assert_eq!(over.opacity, 1.0);

    let mid = Pose::lerp(a, b, 0.5);
    assert!((mid.opacity - 0.5).abs() < 1e-9);
}

#[test]
fn pose_distance_reports_largest_component() {
    let a = Pose::rest();
    let b = Pose::rest()
        .with_translate(Vec2::new(3.0, -1.0))
        .with_opacity(0.5);
    assert!((a.distance(&b) - 3.0).abs() < 1e-12);
    assert!(a.approx_eq(&a, 0.0));
}

#[test]
fn dim_color_is_forty_percent_black() {
    let c = Rgba8::dim();
    assert_eq!((c.r, c.g, c.b, c.a), (0, 0, 0, 102));
}
