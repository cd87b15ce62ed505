use std::str::FromStr;

use crate::foundation::error::AlertError;

/// Entrance/exit animation style of an overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStyle {
    /// Classic scale + fade.
    #[default]
    Scale,
    /// Scale driven by a damped spring.
    Spring,
    /// Content splits into two halves that slide together like doors.
    Door,
    /// Content shatters into a grid of pieces that reassemble.
    Explode,
    /// Content breaks into many small pieces with jittered trajectories.
    Confetti,
    /// Content drops in under gravity and bounces on its resting position.
    Gravity,
    /// Two leaves hinged on an edge swing open.
    Sesame,
    /// Content overshoots and oscillates into place.
    Elastic,
}

impl AnimationStyle {
    pub const ALL: [Self; 8] = [
        Self::Scale,
        Self::Spring,
        Self::Door,
        Self::Explode,
        Self::Confetti,
        Self::Gravity,
        Self::Sesame,
        Self::Elastic,
    ];

    pub fn profile(self) -> StyleProfile {
        match self {
            Self::Scale => StyleProfile::whole(AxisSet::Depth, Motion::Tween),
            Self::Spring => StyleProfile::whole(AxisSet::Depth, Motion::Spring),
            Self::Elastic => StyleProfile::whole(AxisSet::Depth, Motion::Elastic),
            Self::Gravity => StyleProfile::whole(AxisSet::Fall, Motion::Gravity),
            Self::Door => StyleProfile {
                layout: FragmentLayout::Halves,
                axes: AxisSet::Planar,
                motion: Motion::Slide,
            },
            Self::Sesame => StyleProfile {
                layout: FragmentLayout::Halves,
                axes: AxisSet::Planar,
                motion: Motion::Hinge,
            },
            Self::Explode => StyleProfile {
                layout: FragmentLayout::Grid { cols: 3, rows: 3 },
                axes: AxisSet::Radial,
                motion: Motion::Scatter,
            },
            Self::Confetti => StyleProfile {
                layout: FragmentLayout::Grid { cols: 4, rows: 4 },
                axes: AxisSet::Radial,
                motion: Motion::Confetti,
            },
        }
    }

    /// Whether the content is decomposed into fragments.
    pub fn is_fragmented(self) -> bool {
        self.profile().layout != FragmentLayout::Whole
    }

    pub fn fragment_count(self) -> usize {
        self.profile().layout.count()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Scale => "scale",
            Self::Spring => "spring",
            Self::Door => "door",
            Self::Explode => "explode",
            Self::Confetti => "confetti",
            Self::Gravity => "gravity",
            Self::Sesame => "sesame",
            Self::Elastic => "elastic",
        }
    }
}

impl std::fmt::Display for AnimationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimationStyle {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| AlertError::validation(format!("unknown animation style '{s}'")))
    }
}

/// Static, per-style parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StyleProfile {
    pub layout: FragmentLayout,
    pub axes: AxisSet,
    pub motion: Motion,
}

impl StyleProfile {
    const fn whole(axes: AxisSet, motion: Motion) -> Self {
        Self {
            layout: FragmentLayout::Whole,
            axes,
            motion,
        }
    }
}

/// How the content surface is partitioned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentLayout {
    /// Animated as a single surface.
    Whole,
    /// Two halves split along the resolved axis.
    Halves,
    /// Row-major grid of equal cells.
    Grid { cols: u32, rows: u32 },
}

impl FragmentLayout {
    /// Number of fragments; zero for [`FragmentLayout::Whole`].
    pub fn count(self) -> usize {
        match self {
            Self::Whole => 0,
            Self::Halves => 2,
            Self::Grid { cols, rows } => (cols as usize) * (rows as usize),
        }
    }
}

/// Which directions a style can honor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSet {
    /// Left/Right/Top/Bottom.
    Planar,
    /// Omni-directional; the configured direction is ignored.
    Radial,
    /// Always falls toward the bottom.
    Fall,
    /// Front/Back depth.
    Depth,
}

/// Motion family used to build curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    Tween,
    Spring,
    Elastic,
    Gravity,
    Slide,
    Hinge,
    Scatter,
    Confetti,
}

#[cfg(test)]
#[path = "../tests/unit/style.rs"]
mod tests;
