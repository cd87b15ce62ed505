//! Entrance and exit planning for every style.
//!
//! [`StylePlan`] is the single place where a style's motion family turns into concrete curves: it
//! resolves the direction, partitions the content, and then builds [`Timeline`]s on request. The
//! presenter never branches on the style itself.

use crate::{
    animation::{curve::MotionCurve, ease::Ease},
    config::ConfigSnapshot,
    direction::{Depth, ResolvedDirection, resolve_direction},
    fragment::{FragmentPlan, plan_fragments},
    foundation::{
        core::{Pose, Rect, Vec2},
        math::session_seed,
    },
    physics::{
        PhysicsParams, ballistic_curve, elastic_curve, fall_curve, gravity_curve, spring_curve,
    },
    style::{AnimationStyle, Motion},
};

/// Where the content sits on screen.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Stage {
    pub viewport: Rect,
    /// Resting content frame in viewport coordinates.
    pub frame: Rect,
}

/// Which surface a track drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackTarget {
    Content,
    Fragment(usize),
    Mask,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlannedTrack {
    pub target: TrackTarget,
    pub delay: f64,
    pub curve: MotionCurve,
}

impl PlannedTrack {
    pub fn end(&self) -> f64 {
        self.delay + self.curve.duration()
    }
}

/// Tracks started together in one scheduling tick.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Timeline {
    pub tracks: Vec<PlannedTrack>,
    total: f64,
}

impl Timeline {
    fn single(track: PlannedTrack) -> Self {
        Self {
            total: track.end(),
            tracks: vec![track],
        }
    }

    /// Fragment tracks finishing by `total`, the schedule computed by the fragment plan.
    fn scheduled(tracks: Vec<PlannedTrack>, total: f64) -> Self {
        debug_assert!(
            tracks.iter().all(|t| t.end() <= total + 1e-9),
            "track outlives the planned total {total}"
        );
        Self { tracks, total }
    }

    /// Time at which the session should consider every track finished. The mask fade is
    /// stretched over this span, so its completion is the last one the session sees.
    pub fn total_duration(&self) -> f64 {
        self.total
    }

    pub fn track(&self, target: TrackTarget) -> Option<&PlannedTrack> {
        self.tracks.iter().find(|t| t.target == target)
    }
}

const DEPTH_FRONT_SCALE: f64 = 0.5;
const DEPTH_BACK_SCALE: f64 = 1.5;
const SPRING_FRONT_SCALE: f64 = 0.0;
const ELASTIC_FRONT_SCALE: f64 = 0.3;

/// Everything a session needs to animate one style.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StylePlan {
    pub style: AnimationStyle,
    pub direction: ResolvedDirection,
    pub stage: Stage,
    pub physics: PhysicsParams,
    pub fragments: FragmentPlan,
    entrance_duration: f64,
    exit_duration: f64,
}

impl StylePlan {
    pub fn new(style: AnimationStyle, stage: Stage, snap: &ConfigSnapshot, seed: u64) -> Self {
        let direction = resolve_direction(style, snap.direction);
        let fragments = plan_fragments(style, direction, stage.frame.size(), snap, seed);
        Self {
            style,
            direction,
            stage,
            physics: PhysicsParams::from_snapshot(snap),
            fragments,
            entrance_duration: snap.entrance_duration,
            exit_duration: snap.exit_duration,
        }
    }

    /// Plan for the `serial`-th session of a presenter, seeding fragment jitter the way the
    /// presenter does.
    pub fn for_session(
        style: AnimationStyle,
        stage: Stage,
        snap: &ConfigSnapshot,
        serial: u64,
    ) -> Self {
        Self::new(style, stage, snap, session_seed(snap.seed, serial))
    }

    pub fn is_fragmented(&self) -> bool {
        !self.fragments.is_empty()
    }

    fn content_anchor(&self) -> Vec2 {
        let size = self.stage.frame.size();
        Vec2::new(size.width / 2.0, size.height / 2.0)
    }

    /// Resting pose of the whole content surface.
    pub fn content_rest(&self) -> Pose {
        Pose::rest().with_anchor(self.content_anchor())
    }

    /// Off-stage pose the content enters from and leaves to.
    pub fn content_displaced(&self) -> Pose {
        let anchor = self.content_anchor();
        let motion = self.style.profile().motion;
        match self.direction {
            ResolvedDirection::Fall => {
                // Just above the top of the viewport.
                let lift = self.stage.frame.y1 - self.stage.viewport.y0;
                self.content_rest().with_translate(Vec2::new(0.0, -lift.max(0.0)))
            }
            ResolvedDirection::Depth(Depth::Back) => Pose::hidden()
                .with_scale(DEPTH_BACK_SCALE, DEPTH_BACK_SCALE)
                .with_anchor(anchor),
            _ => {
                let s = match motion {
                    Motion::Spring => SPRING_FRONT_SCALE,
                    Motion::Elastic => ELASTIC_FRONT_SCALE,
                    _ => DEPTH_FRONT_SCALE,
                };
                Pose::hidden().with_scale(s, s).with_anchor(anchor)
            }
        }
    }

    /// Entrance tracks for content or fragments. The mask is added by the caller.
    pub fn entrance(&self) -> Timeline {
        if self.is_fragmented() {
            let tracks = self
                .fragments
                .fragments
                .iter()
                .map(|f| PlannedTrack {
                    target: TrackTarget::Fragment(f.index),
                    delay: f.stagger_delay,
                    curve: MotionCurve::tween(
                        f.entrance.from,
                        f.entrance.to,
                        self.fragments.piece_entrance,
                        Ease::OutCubic,
                    ),
                })
                .collect();
            return Timeline::scheduled(tracks, self.fragments.entrance_total());
        }

        let from = self.content_displaced();
        let to = self.content_rest();
        let d = self.entrance_duration;
        let curve = match self.style.profile().motion {
            Motion::Spring => spring_curve(from, to, self.physics, d),
            Motion::Elastic => elastic_curve(from, to, self.physics, d),
            Motion::Gravity => gravity_curve(from, to, self.physics, d),
            _ => MotionCurve::tween(from, to, d, Ease::OutCubic),
        };
        Timeline::single(PlannedTrack {
            target: TrackTarget::Content,
            delay: 0.0,
            curve,
        })
    }

    /// Exit tracks. `captured` supplies the pose each target currently shows (after an interrupted
    /// entrance); targets without one start from their resting pose.
    pub fn exit(&self, captured: impl Fn(TrackTarget) -> Option<Pose>) -> Timeline {
        if self.is_fragmented() {
            let tracks = self
                .fragments
                .fragments
                .iter()
                .map(|f| {
                    let target = TrackTarget::Fragment(f.index);
                    let from = captured(target).unwrap_or(f.exit.from);
                    let curve = match f.launch {
                        Some(l) => {
                            ballistic_curve(from, l.velocity, l.spin, l.flight, self.physics)
                        }
                        None => MotionCurve::tween(
                            from,
                            f.exit.to,
                            self.fragments.piece_exit,
                            Ease::InCubic,
                        ),
                    };
                    PlannedTrack {
                        target,
                        delay: f.exit_delay,
                        curve,
                    }
                })
                .collect();
            return Timeline::scheduled(tracks, self.fragments.exit_total());
        }

        let from = captured(TrackTarget::Content).unwrap_or_else(|| self.content_rest());
        let d = self.exit_duration;
        let curve = match self.style.profile().motion {
            Motion::Gravity => {
                let top = self.stage.frame.y0 + from.transform.translate.y;
                let distance = self.stage.viewport.y1 - top;
                fall_curve(from, distance, self.physics, d)
            }
            _ => MotionCurve::tween(from, self.content_displaced(), d, Ease::InCubic),
        };
        Timeline::single(PlannedTrack {
            target: TrackTarget::Content,
            delay: 0.0,
            curve,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/timeline.rs"]
mod tests;
