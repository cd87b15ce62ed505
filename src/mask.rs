use crate::{
    animation::{curve::MotionCurve, ease::Ease},
    compositor::{AnimationSpec, Compositor, SurfaceSpec},
    config::{ConfigSnapshot, MaskStyle},
    foundation::core::{AnimationId, Pose, Rgba8, SurfaceId},
    presenter::PresentationState,
};

/// What the compositor should paint behind the content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskFill {
    /// Solid color fill.
    Color(Rgba8),
    /// Nothing visible, input still captured.
    Clear,
    /// Blurred backdrop.
    Blur,
}

impl MaskFill {
    pub fn for_snapshot(snap: &ConfigSnapshot) -> Self {
        match snap.mask_style {
            MaskStyle::Default => Self::Color(snap.mask_color),
            MaskStyle::Transparent => Self::Clear,
            MaskStyle::Blur => Self::Blur,
        }
    }
}

/// Owns the background surface of one session.
#[derive(Debug)]
pub struct MaskController {
    surface: SurfaceId,
    fill: MaskFill,
    tap_to_dismiss: bool,
}

impl MaskController {
    /// Create the mask surface and put it in the scene, fully transparent.
    pub fn materialize<C: Compositor + ?Sized>(snap: &ConfigSnapshot, compositor: &mut C) -> Self {
        let fill = MaskFill::for_snapshot(snap);
        let surface = compositor.create_surface(SurfaceSpec::Mask(fill));
        compositor.set_pose(surface, Pose::hidden());
        compositor.insert(surface);
        tracing::debug!(?fill, "mask materialized");
        Self {
            surface,
            fill,
            tap_to_dismiss: snap.mask_tap_to_dismiss,
        }
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn fill(&self) -> MaskFill {
        self.fill
    }

    /// Fade in over `duration`, matching the content entrance.
    pub fn fade_in<C: Compositor + ?Sized>(
        &self,
        compositor: &mut C,
        duration: f64,
    ) -> AnimationId {
        let curve = MotionCurve::tween(Pose::hidden(), Pose::rest(), duration, Ease::Linear);
        compositor.animate(self.surface, AnimationSpec { delay: 0.0, curve })
    }

    /// Fade out from `from` over `duration`, matching the content exit.
    pub fn fade_out<C: Compositor + ?Sized>(
        &self,
        compositor: &mut C,
        from: Pose,
        duration: f64,
    ) -> AnimationId {
        let curve = MotionCurve::tween(from, Pose::hidden(), duration, Ease::Linear);
        compositor.animate(self.surface, AnimationSpec { delay: 0.0, curve })
    }

    pub fn show_immediately<C: Compositor + ?Sized>(&self, compositor: &mut C) {
        compositor.set_pose(self.surface, Pose::rest());
    }

    /// Taps only dismiss a fully presented overlay, and only when enabled.
    pub fn accepts_tap(&self, state: PresentationState) -> bool {
        self.tap_to_dismiss && state == PresentationState::Presented
    }

    pub fn destroy<C: Compositor + ?Sized>(self, compositor: &mut C) {
        compositor.destroy_surface(self.surface);
        tracing::debug!("mask destroyed");
    }
}

#[cfg(test)]
#[path = "../tests/unit/mask.rs"]
mod tests;
