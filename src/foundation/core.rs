pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Opaque handle to a surface owned by the compositor.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SurfaceId(pub u64);

/// Opaque handle to a running compositor animation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct AnimationId(pub u64);

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Black at 40% alpha, the stock dimming color.
    pub const fn dim() -> Self {
        Self::new(0, 0, 0, 102)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    pub translate: Vec2,
    pub rotation_rad: f64,
    pub scale: Vec2,  // default (1,1)
    pub anchor: Vec2, // pivot in local space
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
            anchor: Vec2::ZERO,
        }
    }
}

impl Transform2D {
    pub fn to_affine(self) -> kurbo::Affine {
        let t_translate = kurbo::Affine::translate(self.translate);
        let t_anchor = kurbo::Affine::translate(self.anchor);
        let t_unanchor = kurbo::Affine::translate(-self.anchor);
        let t_rotate = kurbo::Affine::rotate(self.rotation_rad);
        let t_scale = kurbo::Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }

    /// Component-wise interpolation. `t` is not clamped so overshooting curves extrapolate.
    /// The anchor is taken from `b` when it differs, since pivots do not animate.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self {
            translate: a.translate.lerp(b.translate, t),
            rotation_rad: a.rotation_rad + (b.rotation_rad - a.rotation_rad) * t,
            scale: a.scale.lerp(b.scale, t),
            anchor: b.anchor,
        }
    }
}

/// The full set of animatable properties of one surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    pub transform: Transform2D,
    pub opacity: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self::rest()
    }
}

impl Pose {
    /// Identity transform, fully opaque.
    pub fn rest() -> Self {
        Self {
            transform: Transform2D::default(),
            opacity: 1.0,
        }
    }

    /// Identity transform, fully transparent.
    pub fn hidden() -> Self {
        Self {
            transform: Transform2D::default(),
            opacity: 0.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_translate(mut self, translate: Vec2) -> Self {
        self.transform.translate = translate;
        self
    }

    pub fn with_scale(mut self, sx: f64, sy: f64) -> Self {
        self.transform.scale = Vec2::new(sx, sy);
        self
    }

    pub fn with_rotation(mut self, rotation_rad: f64) -> Self {
        self.transform.rotation_rad = rotation_rad;
        self
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.transform.anchor = anchor;
        self
    }

    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self {
            transform: Transform2D::lerp(a.transform, b.transform, t),
            opacity: (a.opacity + (b.opacity - a.opacity) * t).clamp(0.0, 1.0),
        }
    }

    /// Largest absolute component difference against `other`.
    pub fn distance(&self, other: &Self) -> f64 {
        let a = &self.transform;
        let b = &other.transform;
        [
            (a.translate.x - b.translate.x).abs(),
            (a.translate.y - b.translate.y).abs(),
            (a.rotation_rad - b.rotation_rad).abs(),
            (a.scale.x - b.scale.x).abs(),
            (a.scale.y - b.scale.y).abs(),
            (self.opacity - other.opacity).abs(),
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }

    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.distance(other) <= eps
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
