//! Decomposition of the content surface into independently animated pieces.
//!
//! Partition schemes are fixed per style:
//!
//! - `Door`: two halves split along the resolved axis that slide in from their outer sides.
//! - `Sesame`: two leaves folded flat against their hinge. A horizontal split hinges each leaf on
//!   its outer edge (double door); an explicit edge produces two strips that share that hinge.
//! - `Explode`: a 3×3 row-major grid scattered radially from the content center.
//! - `Confetti`: a 4×4 row-major grid scattered radially with seeded per-piece jitter.
//!
//! Regions and anchors are expressed in content-local coordinates (origin at the top-left corner of
//! the content). Poses are offsets from a fragment's resting placement.

use crate::{
    config::ConfigSnapshot,
    direction::{Edge, ResolvedDirection},
    foundation::{
        core::{Pose, Rect, Size, Vec2},
        math::Rng64,
    },
    physics::PhysicsParams,
    style::{AnimationStyle, FragmentLayout, Motion},
};

const EXPLODE_SCATTER: f64 = 1.5;
const EXPLODE_MIN_TRAVEL: f64 = 60.0;
const EXPLODE_SPIN: f64 = 0.6;
const CONFETTI_FLIGHT: f64 = 2.4;
const CONFETTI_KICK: f64 = 250.0;

/// Start and end pose of one leg of a fragment's animation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PoseSpan {
    pub from: Pose,
    pub to: Pose,
}

/// Initial conditions for a projectile exit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Launch {
    /// Initial velocity in pt/s.
    pub velocity: Vec2,
    /// Angular velocity in rad/s.
    pub spin: f64,
    /// Flight time in seconds.
    pub flight: f64,
}

/// One piece of decomposed content.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Fragment {
    /// Z-order and stagger order.
    pub index: usize,
    /// Bounds within the content surface.
    pub source_region: Rect,
    /// Entrance delay: `index × entrance_stagger`.
    pub stagger_delay: f64,
    /// Exit delay: `(N - 1 - index) × exit_stagger`.
    pub exit_delay: f64,
    pub entrance: PoseSpan,
    pub exit: PoseSpan,
    /// Present for pieces that leave on a ballistic path.
    pub launch: Option<Launch>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FragmentPlan {
    pub fragments: Vec<Fragment>,
    /// Base per-piece entrance duration.
    pub piece_entrance: f64,
    /// Base per-piece exit duration.
    pub piece_exit: f64,
}

impl FragmentPlan {
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// `piece_entrance + (N - 1) × stagger`, or zero without fragments.
    pub fn entrance_total(&self) -> f64 {
        self.fragments
            .iter()
            .map(|f| f.stagger_delay + self.piece_entrance)
            .fold(0.0, f64::max)
    }

    /// Latest exit completion across fragments, including ballistic flights.
    pub fn exit_total(&self) -> f64 {
        self.fragments
            .iter()
            .map(|f| f.exit_delay + f.launch.map_or(self.piece_exit, |l| l.flight))
            .fold(0.0, f64::max)
    }
}

/// Partition `content` for `style`. Non-fragmented styles yield an empty plan.
pub fn plan_fragments(
    style: AnimationStyle,
    direction: ResolvedDirection,
    content: Size,
    snap: &ConfigSnapshot,
    seed: u64,
) -> FragmentPlan {
    let profile = style.profile();

    let pieces: Vec<(Rect, PoseSpan, PoseSpan, Option<Launch>)> = match profile.layout {
        FragmentLayout::Whole => Vec::new(),
        FragmentLayout::Halves => halves(direction, content)
            .into_iter()
            .map(|(region, folded)| {
                let folded = match profile.motion {
                    Motion::Hinge => folded.hinge,
                    _ => folded.slide,
                };
                let (entrance, exit) = spans(folded);
                (region, entrance, exit, None)
            })
            .collect(),
        FragmentLayout::Grid { cols, rows } => {
            let cells = grid(content, cols, rows);
            if profile.motion == Motion::Confetti {
                let mut rng = Rng64::new(seed);
                cells
                    .into_iter()
                    .map(|cell| confetti_piece(cell, content, snap, &mut rng))
                    .collect()
            } else {
                cells
                    .into_iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        let (entrance, exit) = spans(explode_pose(cell, content, i));
                        (cell, entrance, exit, None)
                    })
                    .collect()
            }
        }
    };

    let n = pieces.len();
    let fragments = pieces
        .into_iter()
        .enumerate()
        .map(|(index, (source_region, entrance, exit, launch))| Fragment {
            index,
            source_region,
            stagger_delay: index as f64 * snap.entrance_stagger,
            exit_delay: (n - 1 - index) as f64 * snap.exit_stagger,
            entrance,
            exit,
            launch,
        })
        .collect();

    FragmentPlan {
        fragments,
        piece_entrance: snap.entrance_duration,
        piece_exit: snap.exit_duration,
    }
}

/// Entrance and exit spans between `displaced` and a resting pose sharing its pivot.
fn spans(displaced: Pose) -> (PoseSpan, PoseSpan) {
    let rest = Pose::rest().with_anchor(displaced.transform.anchor);
    (
        PoseSpan {
            from: displaced,
            to: rest,
        },
        PoseSpan {
            from: rest,
            to: displaced,
        },
    )
}

struct Folded {
    slide: Pose,
    hinge: Pose,
}

fn halves(direction: ResolvedDirection, content: Size) -> [(Rect, Folded); 2] {
    let (w, h) = (content.width, content.height);
    let hidden = Pose::hidden();
    let left = Rect::new(0.0, 0.0, w / 2.0, h);
    let right = Rect::new(w / 2.0, 0.0, w, h);
    let top = Rect::new(0.0, 0.0, w, h / 2.0);
    let bottom = Rect::new(0.0, h / 2.0, w, h);

    // Anchor helpers in each piece's local space.
    let fold_x = |anchor_x: f64, piece: Rect| {
        hidden
            .with_scale(0.0, 1.0)
            .with_anchor(Vec2::new(anchor_x, piece.height() / 2.0))
    };
    let fold_y = |anchor_y: f64, piece: Rect| {
        hidden
            .with_scale(1.0, 0.0)
            .with_anchor(Vec2::new(piece.width() / 2.0, anchor_y))
    };

    match direction {
        ResolvedDirection::SplitVertical => [
            (
                top,
                Folded {
                    slide: hidden.with_translate(Vec2::new(0.0, -h / 2.0)),
                    hinge: fold_y(0.0, top),
                },
            ),
            (
                bottom,
                Folded {
                    slide: hidden.with_translate(Vec2::new(0.0, h / 2.0)),
                    hinge: fold_y(bottom.height(), bottom),
                },
            ),
        ],
        ResolvedDirection::Hinge(Edge::Left) => [
            (top, Folded::both(fold_x(0.0, top))),
            (bottom, Folded::both(fold_x(0.0, bottom))),
        ],
        ResolvedDirection::Hinge(Edge::Right) => [
            (top, Folded::both(fold_x(top.width(), top))),
            (bottom, Folded::both(fold_x(bottom.width(), bottom))),
        ],
        ResolvedDirection::Hinge(Edge::Top) => [
            (left, Folded::both(fold_y(0.0, left))),
            (right, Folded::both(fold_y(0.0, right))),
        ],
        ResolvedDirection::Hinge(Edge::Bottom) => [
            (left, Folded::both(fold_y(left.height(), left))),
            (right, Folded::both(fold_y(right.height(), right))),
        ],
        _ => [
            (
                left,
                Folded {
                    slide: hidden.with_translate(Vec2::new(-w / 2.0, 0.0)),
                    hinge: fold_x(0.0, left),
                },
            ),
            (
                right,
                Folded {
                    slide: hidden.with_translate(Vec2::new(w / 2.0, 0.0)),
                    hinge: fold_x(right.width(), right),
                },
            ),
        ],
    }
}

impl Folded {
    fn both(pose: Pose) -> Self {
        Self {
            slide: pose,
            hinge: pose,
        }
    }
}

fn grid(content: Size, cols: u32, rows: u32) -> Vec<Rect> {
    let cw = content.width / f64::from(cols.max(1));
    let ch = content.height / f64::from(rows.max(1));
    let mut out = Vec::with_capacity((cols * rows) as usize);
    for r in 0..rows {
        for c in 0..cols {
            let x0 = f64::from(c) * cw;
            let y0 = f64::from(r) * ch;
            out.push(Rect::new(x0, y0, x0 + cw, y0 + ch));
        }
    }
    out
}

fn outward(cell: Rect, content: Size) -> Vec2 {
    cell.center().to_vec2() - Vec2::new(content.width / 2.0, content.height / 2.0)
}

fn explode_pose(cell: Rect, content: Size, index: usize) -> Pose {
    let dir = outward(cell, content);
    let len = dir.hypot();
    let anchor = Vec2::new(cell.width() / 2.0, cell.height() / 2.0);
    let spin = if index % 2 == 0 {
        EXPLODE_SPIN
    } else {
        -EXPLODE_SPIN
    };
    if len < 1e-9 {
        return Pose::hidden().with_scale(0.2, 0.2).with_anchor(anchor);
    }
    let travel = dir * EXPLODE_SCATTER + dir / len * EXPLODE_MIN_TRAVEL;
    Pose::hidden()
        .with_translate(travel)
        .with_rotation(spin)
        .with_scale(0.6, 0.6)
        .with_anchor(anchor)
}

fn confetti_piece(
    cell: Rect,
    content: Size,
    snap: &ConfigSnapshot,
    rng: &mut Rng64,
) -> (Rect, PoseSpan, PoseSpan, Option<Launch>) {
    let dir = outward(cell, content);
    let base_angle = dir.y.atan2(dir.x);
    let angle = base_angle + rng.range(-0.5, 0.5);
    let heading = Vec2::from_angle(angle);
    let diag = content.width.hypot(content.height);
    let distance = diag * rng.range(0.6, 1.4);
    let spin = rng.range(-std::f64::consts::TAU, std::f64::consts::TAU);
    let speed = rng.range(300.0, 700.0);

    let anchor = Vec2::new(cell.width() / 2.0, cell.height() / 2.0);
    let scattered = Pose::hidden()
        .with_translate(heading * distance)
        .with_rotation(spin * 0.5)
        .with_scale(0.5, 0.5)
        .with_anchor(anchor);
    let flight = snap.exit_duration * CONFETTI_FLIGHT;
    let launch = Launch {
        velocity: heading * speed - Vec2::new(0.0, CONFETTI_KICK),
        spin,
        flight,
    };
    let accel = PhysicsParams::from_snapshot(snap).acceleration();
    let landing = Pose::hidden()
        .with_translate(launch.velocity * flight + Vec2::new(0.0, 0.5 * accel * flight * flight))
        .with_rotation(spin * flight)
        .with_anchor(anchor);

    (
        cell,
        PoseSpan {
            from: scattered,
            to: Pose::rest().with_anchor(anchor),
        },
        PoseSpan {
            from: Pose::rest().with_anchor(anchor),
            to: landing,
        },
        Some(launch),
    )
}

#[cfg(test)]
#[path = "../tests/unit/fragment.rs"]
mod tests;
