//! alertfx presents one modal overlay at a time, with physics-flavored entrance and exit
//! choreography.
//!
//! The engine plans motion and drives a small state machine; drawing is delegated:
//!
//! - Describe the scene through a [`Compositor`] (or use the in-memory [`HeadlessCompositor`])
//! - Configure defaults on an [`OverlayConfig`]
//! - Drive a [`Presenter`] with `show`/`dismiss` and forward [`OverlayEvent`]s back to it
//!
//! Every session plans its fragments and curves up front from a frozen [`ConfigSnapshot`], so the
//! same inputs always produce the same choreography.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
/// Collaborator contract and the headless reference compositor.
pub mod compositor;
pub(crate) mod config;
pub(crate) mod direction;
pub(crate) mod fragment;
pub(crate) mod mask;
/// Closed-form motion models.
pub mod physics;
pub(crate) mod presenter;
pub(crate) mod style;
/// Per-session choreography.
pub mod timeline;

pub use crate::foundation::core::{
    Affine, AnimationId, Point, Pose, Rect, Rgba8, Size, SurfaceId, Transform2D, Vec2,
};
pub use crate::foundation::error::{AlertError, AlertResult};

pub use crate::animation::curve::{CurveKey, MAX_STEPS, MotionCurve, SAMPLE_HZ};
pub use crate::animation::ease::Ease;
pub use crate::compositor::headless::{HeadlessCompositor, SurfaceKind};
pub use crate::compositor::{AnimationSpec, Compositor, ContentHandle, SurfaceSpec};
pub use crate::config::{ConfigSnapshot, Direction, MAX_DURATION, MaskStyle, OverlayConfig};
pub use crate::direction::{Depth, Edge, ResolvedDirection, resolve_direction};
pub use crate::fragment::{Fragment, FragmentPlan, Launch, PoseSpan, plan_fragments};
pub use crate::mask::{MaskController, MaskFill};
pub use crate::physics::{DropProfile, PhysicsParams};
pub use crate::presenter::{OverlayEvent, PresentationSession, PresentationState, Presenter};
pub use crate::style::{AnimationStyle, AxisSet, FragmentLayout, Motion, StyleProfile};
pub use crate::timeline::{PlannedTrack, Stage, StylePlan, Timeline, TrackTarget};
