//! Time-parameterized motion for the physics-driven styles.
//!
//! Every function here is pure: the same `(elapsed, params, from, to)` always yields the same pose.
//! Curves are baked into [`MotionCurve`]s and land exactly on their target pose.

use crate::{
    animation::{curve::MotionCurve, ease::Ease},
    config::ConfigSnapshot,
    foundation::core::{Pose, Transform2D, Vec2},
};

/// Points per second squared for one g unit of configured gravity.
pub const GRAVITY_UNIT: f64 = 1000.0;

const SPRING_OMEGA: f64 = 14.0;
const ELASTIC_OMEGA: f64 = std::f64::consts::TAU * 3.0;
const ELASTIC_DECAY: f64 = 2.5;
const MIN_ELASTICITY: f64 = 0.05;
/// Envelope amplitude at which an oscillation counts as settled.
const SETTLE_EPS: f64 = 0.01;
const MAX_SETTLE: f64 = 2.0;
/// Longest a drop or fall may take. Slower ones are played back faster along the same path.
const MAX_DROP: f64 = 4.0;
const MAX_BOUNCES: usize = 4;
/// Bounces slower than this (pt/s) are dropped.
const MIN_BOUNCE_SPEED: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PhysicsParams {
    /// Gravity magnitude in g units.
    pub gravity: f64,
    /// Elasticity in `[0, 1]`.
    pub elasticity: f64,
}

impl PhysicsParams {
    pub fn new(gravity: f64, elasticity: f64) -> Self {
        Self {
            gravity: gravity.max(0.0),
            elasticity: elasticity.clamp(0.0, 1.0),
        }
    }

    pub fn from_snapshot(snap: &ConfigSnapshot) -> Self {
        Self::new(snap.gravity, snap.elasticity)
    }

    /// Acceleration in pt/s².
    pub fn acceleration(&self) -> f64 {
        self.gravity * GRAVITY_UNIT
    }
}

/// Pose at `progress` along `from -> to`, with opacity following its own clamped ramp so that
/// overshoot never makes the surface flicker.
fn physics_pose(from: Pose, to: Pose, progress: f64, fade: f64) -> Pose {
    let mut pose = Pose::lerp(from, to, progress);
    pose.opacity = Pose::lerp(from, to, fade.clamp(0.0, 1.0)).opacity;
    pose
}

fn settle_time(decay_rate: f64, floor: f64) -> f64 {
    if decay_rate <= 0.0 {
        return MAX_SETTLE.max(floor);
    }
    ((1.0 / SETTLE_EPS).ln() / decay_rate).clamp(floor, MAX_SETTLE.max(floor))
}

/// Damping ratio used for a given elasticity. Always below 1 for elasticity > 0.
pub fn spring_damping_ratio(elasticity: f64) -> f64 {
    1.0 - 0.85 * elasticity.clamp(0.0, 1.0)
}

/// Normalized spring displacement (0 at rest start, 1 at target). Overshoots above 1 when
/// underdamped.
pub fn spring_progress(t: f64, params: PhysicsParams, base_duration: f64) -> f64 {
    if params.elasticity <= 0.0 {
        if base_duration <= 0.0 {
            return 1.0;
        }
        return Ease::OutCubic.apply(t / base_duration);
    }
    let zeta = spring_damping_ratio(params.elasticity);
    let omega_d = SPRING_OMEGA * (1.0 - zeta * zeta).sqrt();
    let envelope = (-zeta * SPRING_OMEGA * t).exp();
    1.0 - envelope * ((omega_d * t).cos() + (zeta * SPRING_OMEGA / omega_d) * (omega_d * t).sin())
}

pub fn spring_duration(params: PhysicsParams, base_duration: f64) -> f64 {
    if params.elasticity <= 0.0 {
        return base_duration.max(0.0);
    }
    let zeta = spring_damping_ratio(params.elasticity);
    settle_time(zeta * SPRING_OMEGA, base_duration.max(0.0))
}

pub fn spring_curve(
    from: Pose,
    to: Pose,
    params: PhysicsParams,
    base_duration: f64,
) -> MotionCurve {
    let duration = spring_duration(params, base_duration);
    let fade_len = base_duration.max(1e-6) * 0.5;
    MotionCurve::from_fn(duration, |t| {
        physics_pose(
            from,
            to,
            spring_progress(t, params, base_duration),
            t / fade_len,
        )
    })
    .snap_end(to)
}

/// Envelope decay rate, inversely proportional to elasticity.
pub fn elastic_decay_rate(elasticity: f64) -> f64 {
    ELASTIC_DECAY / elasticity.max(MIN_ELASTICITY)
}

/// Normalized elastic displacement: overshoots the target and rings down.
pub fn elastic_progress(t: f64, params: PhysicsParams) -> f64 {
    let lambda = elastic_decay_rate(params.elasticity);
    1.0 - (-lambda * t).exp() * (ELASTIC_OMEGA * t).cos()
}

pub fn elastic_duration(params: PhysicsParams, base_duration: f64) -> f64 {
    settle_time(
        elastic_decay_rate(params.elasticity),
        base_duration.max(0.0),
    )
}

pub fn elastic_curve(
    from: Pose,
    to: Pose,
    params: PhysicsParams,
    base_duration: f64,
) -> MotionCurve {
    let duration = elastic_duration(params, base_duration);
    let fade_len = base_duration.max(1e-6) * 0.3;
    MotionCurve::from_fn(duration, |t| {
        physics_pose(from, to, elastic_progress(t, params), t / fade_len)
    })
    .snap_end(to)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Bounce {
    start: f64,
    speed: f64,
}

/// Height-above-floor profile of a body dropped from rest and bouncing with restitution equal to
/// the configured elasticity.
///
/// Profiles whose natural length exceeds four seconds are time-compressed to fit, so a weak gravity
/// still lands promptly.
#[derive(Clone, Debug, PartialEq)]
pub struct DropProfile {
    accel: f64,
    drop: f64,
    impact: f64,
    bounces: Vec<Bounce>,
    /// Natural seconds per played-back second, at least 1.
    time_scale: f64,
    duration: f64,
}

impl DropProfile {
    /// `None` when gravity is zero (the body would never land).
    pub fn new(drop: f64, params: PhysicsParams) -> Option<Self> {
        let accel = params.acceleration();
        if accel <= 0.0 {
            return None;
        }
        let drop = drop.max(0.0);
        let impact_speed = (2.0 * accel * drop).sqrt();
        let impact = impact_speed / accel;

        let mut bounces = Vec::new();
        let mut start = impact;
        let mut speed = impact_speed * params.elasticity;
        while speed >= MIN_BOUNCE_SPEED && bounces.len() < MAX_BOUNCES {
            bounces.push(Bounce { start, speed });
            start += 2.0 * speed / accel;
            speed *= params.elasticity;
        }

        let time_scale = if start > MAX_DROP {
            start / MAX_DROP
        } else {
            1.0
        };
        Some(Self {
            accel,
            drop,
            impact,
            bounces,
            time_scale,
            duration: start / time_scale,
        })
    }

    /// Played-back length, never above four seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Height above the resting position at `t` played-back seconds.
    pub fn height(&self, t: f64) -> f64 {
        let t = t * self.time_scale;
        if t <= 0.0 {
            return self.drop;
        }
        if t < self.impact {
            return (self.drop - 0.5 * self.accel * t * t).max(0.0);
        }
        for b in &self.bounces {
            let local = t - b.start;
            let arc = 2.0 * b.speed / self.accel;
            if (0.0..arc).contains(&local) {
                return (b.speed * local - 0.5 * self.accel * local * local).max(0.0);
            }
        }
        0.0
    }
}

/// Drop `from -> to` under gravity. The vertical distance between the poses is the drop height.
pub fn gravity_curve(
    from: Pose,
    to: Pose,
    params: PhysicsParams,
    base_duration: f64,
) -> MotionCurve {
    let drop = (to.transform.translate.y - from.transform.translate.y).abs();
    let profile = match DropProfile::new(drop, params) {
        Some(profile) if drop > 0.0 => profile,
        _ => return MotionCurve::tween(from, to, base_duration, Ease::OutQuad),
    };
    let fade_len = base_duration.max(1e-6) * 0.5;
    MotionCurve::from_fn(profile.duration(), |t| {
        physics_pose(from, to, 1.0 - profile.height(t) / drop, t / fade_len)
    })
    .snap_end(to)
}

/// Free fall by `distance` points starting at rest from `from`. Only the vertical translation
/// changes. Zero gravity falls back to an eased fall over `base_duration`; a fall that would take
/// longer than four seconds is accelerated to land in four.
pub fn fall_curve(
    from: Pose,
    distance: f64,
    params: PhysicsParams,
    base_duration: f64,
) -> MotionCurve {
    let distance = distance.max(0.0);
    let target = from.with_translate(from.transform.translate + Vec2::new(0.0, distance));
    let accel = params.acceleration();
    if accel <= 0.0 {
        return MotionCurve::tween(from, target, base_duration, Ease::InQuad);
    }
    let natural = (2.0 * distance / accel).sqrt();
    let (duration, accel) = if natural > MAX_DROP {
        (MAX_DROP, 2.0 * distance / (MAX_DROP * MAX_DROP))
    } else {
        (natural, accel)
    };
    MotionCurve::from_fn(duration, |t| {
        from.with_translate(from.transform.translate + Vec2::new(0.0, 0.5 * accel * t * t))
    })
    .snap_end(target)
}

/// Projectile motion with constant spin, fading out linearly over `duration`.
pub fn ballistic_curve(
    from: Pose,
    velocity: Vec2,
    spin: f64,
    duration: f64,
    params: PhysicsParams,
) -> MotionCurve {
    let accel = params.acceleration();
    let duration = duration.max(0.0);
    MotionCurve::from_fn(duration, |t| {
        let drift = velocity * t + Vec2::new(0.0, 0.5 * accel * t * t);
        let fade = if duration > 0.0 { 1.0 - t / duration } else { 0.0 };
        Pose {
            transform: Transform2D {
                translate: from.transform.translate + drift,
                rotation_rad: from.transform.rotation_rad + spin * t,
                ..from.transform
            },
            opacity: (from.opacity * fade).clamp(0.0, 1.0),
        }
    })
}

#[cfg(test)]
#[path = "../tests/unit/physics.rs"]
mod tests;
