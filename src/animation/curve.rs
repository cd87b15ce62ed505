use crate::{animation::ease::Ease, foundation::core::Pose};

/// Rate at which procedural curves are baked into keys.
pub const SAMPLE_HZ: f64 = 60.0;

/// Upper bound on the number of sampling steps in one curve. Longer curves are baked more
/// coarsely than [`SAMPLE_HZ`].
pub const MAX_STEPS: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveKey {
    /// Seconds from the start of the curve.
    pub t: f64,
    pub pose: Pose,
}

/// A baked, time-parameterized pose track.
///
/// Keys are strictly increasing in `t` and the first key is at `t = 0`. Sampling between keys is
/// linear; sampling outside the key range holds the nearest endpoint.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MotionCurve {
    keys: Vec<CurveKey>,
}

impl MotionCurve {
    /// Zero-length curve that holds `pose`.
    pub fn hold(pose: Pose) -> Self {
        Self {
            keys: vec![CurveKey { t: 0.0, pose }],
        }
    }

    /// Bake `f(t)` for `t` in `[0, duration]` at [`SAMPLE_HZ`], or with [`MAX_STEPS`] evenly
    /// spaced steps when that rate would need more. The last key lands exactly on `duration`.
    pub fn from_fn(duration: f64, mut f: impl FnMut(f64) -> Pose) -> Self {
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        if duration == 0.0 {
            return Self::hold(f(0.0));
        }

        let steps = ((duration * SAMPLE_HZ).ceil() as usize).clamp(1, MAX_STEPS);
        let keys = (0..=steps)
            .map(|i| {
                let t = if i == steps {
                    duration
                } else {
                    duration * ((i as f64) / (steps as f64))
                };
                CurveKey { t, pose: f(t) }
            })
            .collect();
        Self { keys }
    }

    /// Interpolate `from -> to` with an unclamped progress function of elapsed seconds.
    pub fn from_progress(
        from: Pose,
        to: Pose,
        duration: f64,
        progress: impl Fn(f64) -> f64,
    ) -> Self {
        Self::from_fn(duration, |t| Pose::lerp(from, to, progress(t)))
    }

    /// Eased tween. A zero duration jumps straight to `to`.
    pub fn tween(from: Pose, to: Pose, duration: f64, ease: Ease) -> Self {
        if duration.is_nan() || duration <= 0.0 {
            return Self::hold(to);
        }
        Self::from_progress(from, to, duration, |t| ease.apply(t / duration))
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn duration(&self) -> f64 {
        self.keys.last().map(|k| k.t).unwrap_or(0.0)
    }

    pub fn start(&self) -> Pose {
        self.keys.first().map(|k| k.pose).unwrap_or_default()
    }

    pub fn end(&self) -> Pose {
        self.keys.last().map(|k| k.pose).unwrap_or_default()
    }

    /// Overwrite the final key, used to land truncated physics curves exactly on target.
    pub(crate) fn snap_end(mut self, pose: Pose) -> Self {
        if let Some(last) = self.keys.last_mut() {
            last.pose = pose;
        }
        self
    }

    pub fn sample(&self, t: f64) -> Pose {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return Pose::default();
        };
        if t.is_nan() || t <= first.t {
            return first.pose;
        }
        if t >= last.t {
            return last.pose;
        }

        let idx = self.keys.partition_point(|k| k.t <= t);
        let a = self.keys[idx - 1];
        let b = self.keys[idx];
        let span = b.t - a.t;
        if span <= 0.0 {
            return b.pose;
        }
        Pose::lerp(a.pose, b.pose, (t - a.t) / span)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
