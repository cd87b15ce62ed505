//! Process-wide presentation settings.
//!
//! [`OverlayConfig`] is owned by the [`Presenter`](crate::Presenter). Setters normalize their input
//! (clamping instead of rejecting) and only affect sessions created afterwards: every session works
//! from a [`ConfigSnapshot`] taken when it starts.

use std::{path::Path, str::FromStr};

use crate::foundation::{
    core::Rgba8,
    error::{AlertError, AlertResult},
};

/// Requested motion direction. `Auto` lets each style pick its natural direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Style default.
    #[default]
    Auto,
    /// Left side / leftward.
    Left,
    /// Right side / rightward.
    Right,
    /// Top side / upward.
    Top,
    /// Bottom side / downward.
    Bottom,
    /// Toward the viewer.
    Front,
    /// Away from the viewer.
    Back,
}

impl FromStr for Direction {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "top" | "up" => Ok(Self::Top),
            "bottom" | "down" => Ok(Self::Bottom),
            "front" => Ok(Self::Front),
            "back" => Ok(Self::Back),
            other => Err(AlertError::validation(format!(
                "unknown direction '{other}'"
            ))),
        }
    }
}

/// Background surface style behind the content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskStyle {
    /// Tinted color fill (black at 40% alpha unless overridden).
    #[default]
    Default,
    /// Fully transparent; blocks input but not sight.
    Transparent,
    /// Blurred backdrop material.
    Blur,
}

impl FromStr for MaskStyle {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "dim" => Ok(Self::Default),
            "transparent" | "clear" => Ok(Self::Transparent),
            "blur" => Ok(Self::Blur),
            other => Err(AlertError::validation(format!(
                "unknown mask style '{other}'"
            ))),
        }
    }
}

/// Default gravity magnitude in g units (1.0 = 1000 pt/s²).
pub const DEFAULT_GRAVITY: f64 = 1.0;
/// Default bounce/overshoot strength.
pub const DEFAULT_ELASTICITY: f64 = 0.5;
/// Default single-piece entrance duration in seconds.
pub const DEFAULT_ENTRANCE_DURATION: f64 = 0.35;
/// Default single-piece exit duration in seconds.
pub const DEFAULT_EXIT_DURATION: f64 = 0.25;
/// Longest accepted entrance or exit duration, in seconds.
pub const MAX_DURATION: f64 = 10.0;

/// Mutable presentation settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayConfig {
    direction: Direction,
    gravity: f64,
    elasticity: f64,
    entrance_stagger: f64,
    exit_stagger: f64,
    entrance_duration: f64,
    exit_duration: f64,
    mask_style: MaskStyle,
    mask_color: Option<Rgba8>,
    mask_tap_to_dismiss: bool,
    seed: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Auto,
            gravity: DEFAULT_GRAVITY,
            elasticity: DEFAULT_ELASTICITY,
            entrance_stagger: 0.0,
            exit_stagger: 0.0,
            entrance_duration: DEFAULT_ENTRANCE_DURATION,
            exit_duration: DEFAULT_EXIT_DURATION,
            mask_style: MaskStyle::Default,
            mask_color: None,
            mask_tap_to_dismiss: true,
            seed: 0,
        }
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

fn duration(v: f64) -> f64 {
    non_negative(v).min(MAX_DURATION)
}

fn unit_interval(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

impl OverlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_default_animation_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Negative and non-finite input is stored as `0.0`.
    pub fn set_physics_gravity_magnitude(&mut self, value: f64) {
        self.gravity = non_negative(value);
        if self.gravity != value {
            tracing::debug!(requested = value, stored = self.gravity, "gravity clamped");
        }
    }

    /// Clamped to `[0.0, 1.0]`.
    pub fn set_physics_elasticity(&mut self, value: f64) {
        self.elasticity = unit_interval(value);
        if self.elasticity != value {
            tracing::debug!(requested = value, stored = self.elasticity, "elasticity clamped");
        }
    }

    pub fn set_entrance_stagger(&mut self, seconds: f64) {
        self.entrance_stagger = non_negative(seconds);
    }

    pub fn set_exit_stagger(&mut self, seconds: f64) {
        self.exit_stagger = non_negative(seconds);
    }

    /// Clamped to `[0.0, MAX_DURATION]`; non-finite input is stored as `0.0`.
    pub fn set_entrance_duration(&mut self, seconds: f64) {
        self.entrance_duration = duration(seconds);
        if self.entrance_duration != seconds {
            tracing::debug!(
                requested = seconds,
                stored = self.entrance_duration,
                "entrance duration clamped"
            );
        }
    }

    /// Clamped to `[0.0, MAX_DURATION]`; non-finite input is stored as `0.0`.
    pub fn set_exit_duration(&mut self, seconds: f64) {
        self.exit_duration = duration(seconds);
        if self.exit_duration != seconds {
            tracing::debug!(
                requested = seconds,
                stored = self.exit_duration,
                "exit duration clamped"
            );
        }
    }

    pub fn set_mask_style(&mut self, style: MaskStyle) {
        self.mask_style = style;
    }

    /// No-op while the mask style is [`MaskStyle::Blur`].
    pub fn set_mask_color(&mut self, color: Rgba8) {
        if self.mask_style == MaskStyle::Blur {
            tracing::debug!(?color, "mask color ignored under blur mask style");
            return;
        }
        self.mask_color = Some(color);
    }

    pub fn set_mask_tap_to_dismiss(&mut self, enabled: bool) {
        self.mask_tap_to_dismiss = enabled;
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    pub fn default_animation_direction(&self) -> Direction {
        self.direction
    }

    pub fn physics_gravity_magnitude(&self) -> f64 {
        self.gravity
    }

    pub fn physics_elasticity(&self) -> f64 {
        self.elasticity
    }

    pub fn entrance_stagger(&self) -> f64 {
        self.entrance_stagger
    }

    pub fn exit_stagger(&self) -> f64 {
        self.exit_stagger
    }

    pub fn entrance_duration(&self) -> f64 {
        self.entrance_duration
    }

    pub fn exit_duration(&self) -> f64 {
        self.exit_duration
    }

    pub fn mask_style(&self) -> MaskStyle {
        self.mask_style
    }

    /// The explicit color override, if any.
    pub fn mask_color(&self) -> Option<Rgba8> {
        self.mask_color
    }

    pub fn mask_tap_to_dismiss(&self) -> bool {
        self.mask_tap_to_dismiss
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Freeze the current settings for one session.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            direction: self.direction,
            gravity: self.gravity,
            elasticity: self.elasticity,
            entrance_stagger: self.entrance_stagger,
            exit_stagger: self.exit_stagger,
            entrance_duration: self.entrance_duration,
            exit_duration: self.exit_duration,
            mask_style: self.mask_style,
            mask_color: self.mask_color.unwrap_or_else(Rgba8::dim),
            mask_tap_to_dismiss: self.mask_tap_to_dismiss,
            seed: self.seed,
        }
    }

    /// Parse a (possibly partial) JSON config document. Missing fields keep their defaults;
    /// present values are normalized through the setters.
    pub fn from_json_str(s: &str) -> AlertResult<Self> {
        let doc: ConfigDoc = serde_json::from_str(s)?;
        doc.into_config()
    }

    pub fn from_path(path: impl AsRef<Path>) -> AlertResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            AlertError::Other(anyhow::Error::new(e).context(format!(
                "read config '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&text)
    }
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigDoc {
    direction: Option<Direction>,
    gravity: Option<f64>,
    elasticity: Option<f64>,
    entrance_stagger: Option<f64>,
    exit_stagger: Option<f64>,
    entrance_duration: Option<f64>,
    exit_duration: Option<f64>,
    mask_style: Option<MaskStyle>,
    mask_color: Option<Rgba8>,
    mask_tap_to_dismiss: Option<bool>,
    seed: Option<u64>,
}

impl ConfigDoc {
    fn into_config(self) -> AlertResult<OverlayConfig> {
        let numbers = [
            ("gravity", self.gravity),
            ("elasticity", self.elasticity),
            ("entrance_stagger", self.entrance_stagger),
            ("exit_stagger", self.exit_stagger),
            ("entrance_duration", self.entrance_duration),
            ("exit_duration", self.exit_duration),
        ];
        for (name, value) in numbers {
            if let Some(v) = value
                && !v.is_finite()
            {
                return Err(AlertError::config(format!("{name} must be finite")));
            }
        }

        let mut cfg = OverlayConfig::default();
        if let Some(v) = self.direction {
            cfg.set_default_animation_direction(v);
        }
        if let Some(v) = self.gravity {
            cfg.set_physics_gravity_magnitude(v);
        }
        if let Some(v) = self.elasticity {
            cfg.set_physics_elasticity(v);
        }
        if let Some(v) = self.entrance_stagger {
            cfg.set_entrance_stagger(v);
        }
        if let Some(v) = self.exit_stagger {
            cfg.set_exit_stagger(v);
        }
        if let Some(v) = self.entrance_duration {
            cfg.set_entrance_duration(v);
        }
        if let Some(v) = self.exit_duration {
            cfg.set_exit_duration(v);
        }
        // The document describes a state, so the color lands before the style switch.
        if let Some(v) = self.mask_color {
            cfg.set_mask_color(v);
        }
        if let Some(v) = self.mask_style {
            cfg.set_mask_style(v);
        }
        if let Some(v) = self.mask_tap_to_dismiss {
            cfg.set_mask_tap_to_dismiss(v);
        }
        if let Some(v) = self.seed {
            cfg.set_seed(v);
        }
        Ok(cfg)
    }
}

/// Read-only copy of [`OverlayConfig`] frozen at session creation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ConfigSnapshot {
    /// Configured direction (may be `Auto`).
    pub direction: Direction,
    /// Gravity magnitude in g units.
    pub gravity: f64,
    /// Elasticity in `[0, 1]`.
    pub elasticity: f64,
    /// Per-fragment entrance delay step in seconds.
    pub entrance_stagger: f64,
    /// Per-fragment exit delay step in seconds.
    pub exit_stagger: f64,
    /// Base entrance duration of one piece in seconds.
    pub entrance_duration: f64,
    /// Base exit duration of one piece in seconds.
    pub exit_duration: f64,
    /// Mask style.
    pub mask_style: MaskStyle,
    /// Effective fill color for [`MaskStyle::Default`].
    pub mask_color: Rgba8,
    /// Whether tapping the mask dismisses a presented overlay.
    pub mask_tap_to_dismiss: bool,
    /// Base seed for jittered styles.
    pub seed: u64,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        OverlayConfig::default().snapshot()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
