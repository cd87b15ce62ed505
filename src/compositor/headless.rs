use std::collections::BTreeMap;

use crate::{
    compositor::{AnimationSpec, Compositor, ContentHandle, SurfaceSpec},
    foundation::core::{AnimationId, Pose, Rect, SurfaceId},
    mask::MaskFill,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceKind {
    Content { frame: Rect },
    Mask(MaskFill),
    Fragment { content: SurfaceId, region: Rect },
}

#[derive(Clone, Debug)]
struct SurfaceState {
    kind: SurfaceKind,
    pose: Pose,
}

#[derive(Clone, Debug)]
struct Running {
    surface: SurfaceId,
    start: f64,
    spec: AnimationSpec,
}

impl Running {
    fn end(&self) -> f64 {
        self.start + self.spec.total()
    }

    fn pose_at(&self, now: f64) -> Pose {
        self.spec.curve.sample(now - self.start - self.spec.delay)
    }
}

/// Deterministic in-memory compositor driven by a virtual clock.
///
/// Nothing is drawn; the scene graph, surface poses and running animations are tracked so that
/// presentation logic can be exercised and inspected without a windowing system.
#[derive(Clone, Debug)]
pub struct HeadlessCompositor {
    viewport: Rect,
    now: f64,
    next_surface: u64,
    next_animation: u64,
    surfaces: BTreeMap<SurfaceId, SurfaceState>,
    scene: Vec<SurfaceId>,
    running: BTreeMap<AnimationId, Running>,
}

impl HeadlessCompositor {
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            now: 0.0,
            next_surface: 1,
            next_animation: 1,
            surfaces: BTreeMap::new(),
            scene: Vec::new(),
            running: BTreeMap::new(),
        }
    }

    fn alloc_surface(&mut self, kind: SurfaceKind) -> SurfaceId {
        let id = SurfaceId(self.next_surface);
        self.next_surface += 1;
        self.surfaces.insert(
            id,
            SurfaceState {
                kind,
                pose: Pose::rest(),
            },
        );
        id
    }

    /// Register a content surface the way a host application would before presenting it.
    pub fn create_content(&mut self, frame: Rect) -> ContentHandle {
        ContentHandle {
            surface: self.alloc_surface(SurfaceKind::Content { frame }),
            frame,
        }
    }

    /// Move the clock forward and return the animations that finished, in completion order.
    pub fn advance(&mut self, dt: f64) -> Vec<AnimationId> {
        if dt.is_finite() && dt > 0.0 {
            self.now += dt;
        }
        let now = self.now;

        let mut done: Vec<(f64, AnimationId)> = self
            .running
            .iter()
            .filter(|(_, r)| r.end() <= now + 1e-9)
            .map(|(id, r)| (r.end(), *id))
            .collect();
        done.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        done.into_iter()
            .map(|(_, id)| {
                if let Some(r) = self.running.remove(&id)
                    && let Some(s) = self.surfaces.get_mut(&r.surface)
                {
                    s.pose = r.spec.curve.end();
                }
                id
            })
            .collect()
    }

    /// Live pose of `surface`, following any running animation.
    pub fn pose(&self, surface: SurfaceId) -> Option<Pose> {
        let state = self.surfaces.get(&surface)?;
        Some(
            self.running
                .values()
                .find(|r| r.surface == surface)
                .map_or(state.pose, |r| r.pose_at(self.now)),
        )
    }

    pub fn kind(&self, surface: SurfaceId) -> Option<SurfaceKind> {
        self.surfaces.get(&surface).map(|s| s.kind)
    }

    pub fn is_in_scene(&self, surface: SurfaceId) -> bool {
        self.scene.contains(&surface)
    }

    /// Surfaces in the scene, bottom to top.
    pub fn scene(&self) -> &[SurfaceId] {
        &self.scene
    }

    /// Fill of the mask currently in the scene, if any.
    pub fn mask_fill(&self) -> Option<MaskFill> {
        self.scene.iter().find_map(|id| match self.kind(*id) {
            Some(SurfaceKind::Mask(fill)) => Some(fill),
            _ => None,
        })
    }

    pub fn fragments_in_scene(&self) -> usize {
        self.scene
            .iter()
            .filter(|id| matches!(self.kind(**id), Some(SurfaceKind::Fragment { .. })))
            .count()
    }

    /// Surfaces that exist, content included.
    pub fn live_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    pub fn running_animations(&self) -> usize {
        self.running.len()
    }

    /// Spec of a running animation.
    pub fn animation(&self, id: AnimationId) -> Option<&AnimationSpec> {
        self.running.get(&id).map(|r| &r.spec)
    }

    /// Running animation on `surface`, if any.
    pub fn animation_on(&self, surface: SurfaceId) -> Option<AnimationId> {
        self.running
            .iter()
            .find(|(_, r)| r.surface == surface)
            .map(|(id, _)| *id)
    }
}

impl Compositor for HeadlessCompositor {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn now(&self) -> f64 {
        self.now
    }

    fn create_surface(&mut self, spec: SurfaceSpec) -> SurfaceId {
        let kind = match spec {
            SurfaceSpec::Mask(fill) => SurfaceKind::Mask(fill),
            SurfaceSpec::Fragment {
                content, region, ..
            } => SurfaceKind::Fragment { content, region },
        };
        self.alloc_surface(kind)
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        self.remove(surface);
        self.running.retain(|_, r| r.surface != surface);
        self.surfaces.remove(&surface);
    }

    fn insert(&mut self, surface: SurfaceId) {
        if self.surfaces.contains_key(&surface) && !self.scene.contains(&surface) {
            self.scene.push(surface);
        }
    }

    fn remove(&mut self, surface: SurfaceId) {
        self.scene.retain(|s| *s != surface);
    }

    fn set_pose(&mut self, surface: SurfaceId, pose: Pose) {
        self.running.retain(|_, r| r.surface != surface);
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.pose = pose;
        }
    }

    fn animate(&mut self, surface: SurfaceId, spec: AnimationSpec) -> AnimationId {
        self.running.retain(|_, r| r.surface != surface);
        let id = AnimationId(self.next_animation);
        self.next_animation += 1;
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.pose = spec.curve.start();
        }
        self.running.insert(
            id,
            Running {
                surface,
                start: self.now,
                spec,
            },
        );
        id
    }

    fn sample(&self, animation: AnimationId) -> Option<Pose> {
        self.running.get(&animation).map(|r| r.pose_at(self.now))
    }

    fn cancel(&mut self, animation: AnimationId) {
        if let Some(r) = self.running.remove(&animation) {
            let pose = r.pose_at(self.now);
            if let Some(s) = self.surfaces.get_mut(&r.surface) {
                s.pose = pose;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/headless.rs"]
mod tests;
