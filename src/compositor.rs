//! Contract between the presentation engine and the system that actually draws.
//!
//! The engine never interpolates on its own clock: it hands baked [`MotionCurve`]s to a
//! [`Compositor`], is told when they finish through
//! [`OverlayEvent::AnimationFinished`](crate::OverlayEvent::AnimationFinished), and samples them on
//! demand when it has to interrupt one.

use crate::{
    animation::curve::MotionCurve,
    foundation::core::{AnimationId, Pose, Rect, SurfaceId},
    mask::MaskFill,
};

pub(crate) mod headless;

/// Caller-provided content surface plus its resting frame in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ContentHandle {
    pub surface: SurfaceId,
    pub frame: Rect,
}

/// Surfaces the engine asks the compositor to create on its behalf.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum SurfaceSpec {
    /// Full-viewport background.
    Mask(MaskFill),
    /// A region of `content`, placed at the same spot on screen.
    Fragment {
        content: SurfaceId,
        region: Rect,
        index: usize,
    },
}

/// A delayed pose animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimationSpec {
    /// Seconds before the curve starts; the surface holds the curve's first pose meanwhile.
    pub delay: f64,
    pub curve: MotionCurve,
}

impl AnimationSpec {
    pub fn total(&self) -> f64 {
        self.delay + self.curve.duration()
    }
}

pub trait Compositor {
    /// Bounds of the visible scene.
    fn viewport(&self) -> Rect;

    /// Current frame timestamp in seconds.
    fn now(&self) -> f64;

    fn create_surface(&mut self, spec: SurfaceSpec) -> SurfaceId;

    /// Release a surface created by [`Compositor::create_surface`], removing it from the scene.
    fn destroy_surface(&mut self, surface: SurfaceId);

    /// Insert into the visible scene above everything already there.
    fn insert(&mut self, surface: SurfaceId);

    fn remove(&mut self, surface: SurfaceId);

    fn set_pose(&mut self, surface: SurfaceId, pose: Pose);

    /// Start animating `surface`. Completion is reported back through the host's event loop.
    /// Starting a new animation on a surface replaces any animation already running on it.
    fn animate(&mut self, surface: SurfaceId, spec: AnimationSpec) -> AnimationId;

    /// Current interpolated pose of a running animation, `None` once it finished or was
    /// cancelled.
    fn sample(&self, animation: AnimationId) -> Option<Pose>;

    /// Halt a running animation, leaving its surface at the current interpolated pose. No
    /// completion is reported for a cancelled animation.
    fn cancel(&mut self, animation: AnimationId);
}
