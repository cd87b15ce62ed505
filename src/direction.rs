use crate::{
    config::Direction,
    style::{AnimationStyle, AxisSet},
};

/// A side of the content rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Motion along the view axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    /// Grows toward the viewer.
    Front,
    /// Shrinks away from the viewer.
    Back,
}

/// A concrete motion direction. Unlike [`Direction`], there is no `Auto`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedDirection {
    /// Left and right halves moving apart horizontally.
    SplitHorizontal,
    /// Top and bottom halves moving apart vertically.
    SplitVertical,
    /// Leaves hinged on a single edge.
    Hinge(Edge),
    /// Outward from the content center in all directions.
    Radial,
    /// Downward toward the bottom of the viewport.
    Fall,
    /// Along the view axis.
    Depth(Depth),
}

/// Map the configured direction onto what `style` supports. Unsupported combinations fall back to
/// the style's `Auto` resolution.
pub fn resolve_direction(style: AnimationStyle, requested: Direction) -> ResolvedDirection {
    let resolved = match style.profile().axes {
        AxisSet::Radial => ResolvedDirection::Radial,
        AxisSet::Fall => ResolvedDirection::Fall,
        AxisSet::Depth => match requested {
            Direction::Back => ResolvedDirection::Depth(Depth::Back),
            _ => ResolvedDirection::Depth(Depth::Front),
        },
        AxisSet::Planar if style == AnimationStyle::Sesame => match requested {
            Direction::Left => ResolvedDirection::Hinge(Edge::Left),
            Direction::Right => ResolvedDirection::Hinge(Edge::Right),
            Direction::Top => ResolvedDirection::Hinge(Edge::Top),
            Direction::Bottom => ResolvedDirection::Hinge(Edge::Bottom),
            Direction::Auto | Direction::Front | Direction::Back => {
                ResolvedDirection::SplitHorizontal
            }
        },
        AxisSet::Planar => match requested {
            Direction::Top | Direction::Bottom => ResolvedDirection::SplitVertical,
            _ => ResolvedDirection::SplitHorizontal,
        },
    };
    tracing::trace!(%style, ?requested, ?resolved, "direction resolved");
    resolved
}

#[cfg(test)]
#[path = "../tests/unit/direction.rs"]
mod tests;
