//! Show/dismiss orchestration.
//!
//! A [`Presenter`] owns the configuration, the compositor and at most one
//! [`PresentationSession`]. The lifecycle is:
//!
//! ```text
//! Idle -> Presenting -> Presented -> Dismissing -> Idle
//!              \________________________/
//!               dismiss mid-entrance reverses from the captured pose
//! ```
//!
//! Requests that conflict with the current state are normalized rather than reported: `show` while
//! a session exists is ignored, `dismiss` while idle or already dismissing is ignored.

use crate::{
    compositor::{
        AnimationSpec, Compositor, ContentHandle, SurfaceSpec, headless::HeadlessCompositor,
    },
    config::{ConfigSnapshot, Direction, MaskStyle, OverlayConfig},
    direction::ResolvedDirection,
    foundation::core::{AnimationId, Pose, Rgba8, SurfaceId},
    fragment::Fragment,
    mask::{MaskController, MaskFill},
    style::AnimationStyle,
    timeline::{Stage, StylePlan, Timeline, TrackTarget},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationState {
    #[default]
    Idle,
    Presenting,
    Presented,
    Dismissing,
}

impl PresentationState {
    /// Whether the overlay counts as visible to callers.
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Presenting | Self::Presented)
    }
}

/// Notifications the host forwards from the compositor and input system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayEvent {
    AnimationFinished(AnimationId),
    MaskTapped,
}

/// The single active overlay instance.
#[derive(Debug)]
pub struct PresentationSession {
    serial: u64,
    state: PresentationState,
    content: ContentHandle,
    plan: StylePlan,
    snapshot: ConfigSnapshot,
    mask: MaskController,
    fragment_surfaces: Vec<SurfaceId>,
    pending: Vec<(AnimationId, TrackTarget)>,
    start_timestamp: f64,
    requested_dismiss_while_presenting: bool,
}

impl PresentationSession {
    /// Monotonic session number within its presenter, starting at 1.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    pub fn style(&self) -> AnimationStyle {
        self.plan.style
    }

    pub fn resolved_direction(&self) -> ResolvedDirection {
        self.plan.direction
    }

    pub fn content(&self) -> ContentHandle {
        self.content
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.plan.fragments.fragments
    }

    pub fn plan(&self) -> &StylePlan {
        &self.plan
    }

    /// Configuration frozen when the session was created.
    pub fn snapshot(&self) -> &ConfigSnapshot {
        &self.snapshot
    }

    pub fn mask_fill(&self) -> MaskFill {
        self.mask.fill()
    }

    pub fn start_timestamp(&self) -> f64 {
        self.start_timestamp
    }

    pub fn requested_dismiss_while_presenting(&self) -> bool {
        self.requested_dismiss_while_presenting
    }

    /// Animations the current phase is still waiting on.
    pub fn pending_animations(&self) -> impl Iterator<Item = (AnimationId, TrackTarget)> + '_ {
        self.pending.iter().copied()
    }

    fn surface_for(&self, target: TrackTarget) -> SurfaceId {
        match target {
            TrackTarget::Content => self.content.surface,
            TrackTarget::Mask => self.mask.surface(),
            TrackTarget::Fragment(i) => match self.fragment_surfaces.get(i) {
                Some(id) => *id,
                None => panic!(
                    "session {}: fragment {i} has no surface ({} spawned)",
                    self.serial,
                    self.fragment_surfaces.len()
                ),
            },
        }
    }

    fn run<C: Compositor + ?Sized>(&mut self, compositor: &mut C, timeline: Timeline) {
        for track in timeline.tracks {
            let surface = self.surface_for(track.target);
            let id = compositor.animate(
                surface,
                AnimationSpec {
                    delay: track.delay,
                    curve: track.curve,
                },
            );
            self.pending.push((id, track.target));
        }
    }

    /// Create one surface per fragment, in index order, each placed at `pose_of(fragment)`.
    fn spawn_fragments<C: Compositor + ?Sized>(
        &mut self,
        compositor: &mut C,
        pose_of: impl Fn(&Fragment) -> Pose,
    ) {
        debug_assert!(self.fragment_surfaces.is_empty());
        for f in &self.plan.fragments.fragments {
            let id = compositor.create_surface(SurfaceSpec::Fragment {
                content: self.content.surface,
                region: f.source_region,
                index: f.index,
            });
            compositor.set_pose(id, pose_of(f));
            compositor.insert(id);
            self.fragment_surfaces.push(id);
        }
    }

    fn despawn_fragments<C: Compositor + ?Sized>(&mut self, compositor: &mut C) {
        for id in self.fragment_surfaces.drain(..) {
            compositor.destroy_surface(id);
        }
    }

    fn start_entrance<C: Compositor + ?Sized>(&mut self, compositor: &mut C) {
        let timeline = self.plan.entrance();
        if self.plan.is_fragmented() {
            compositor.set_pose(self.content.surface, self.plan.content_rest().with_opacity(0.0));
            self.spawn_fragments(compositor, |f| f.entrance.from);
        }
        let total = timeline.total_duration();
        let fade = self.mask.fade_in(compositor, total);
        self.pending.push((fade, TrackTarget::Mask));
        self.run(compositor, timeline);
        tracing::debug!(
            session = self.serial,
            tracks = self.pending.len(),
            total,
            "entrance started"
        );
    }

    /// Halt the running entrance and return the interpolated pose of every track.
    fn capture<C: Compositor + ?Sized>(
        &mut self,
        compositor: &mut C,
    ) -> Vec<(TrackTarget, Pose)> {
        let mut captured = Vec::with_capacity(self.pending.len());
        for (id, target) in self.pending.drain(..) {
            if let Some(pose) = compositor.sample(id) {
                captured.push((target, pose));
            }
            compositor.cancel(id);
        }
        captured
    }

    fn start_exit<C: Compositor + ?Sized>(
        &mut self,
        compositor: &mut C,
        captured: &[(TrackTarget, Pose)],
    ) {
        let lookup = |target: TrackTarget| {
            captured
                .iter()
                .find(|(t, _)| *t == target)
                .map(|(_, pose)| *pose)
        };

        if self.plan.is_fragmented() && self.fragment_surfaces.is_empty() {
            compositor.set_pose(self.content.surface, self.plan.content_rest().with_opacity(0.0));
            self.spawn_fragments(compositor, |f| f.exit.from);
        }

        let timeline = self.plan.exit(lookup);
        let total = timeline.total_duration();
        let mask_from = lookup(TrackTarget::Mask).unwrap_or_else(Pose::rest);
        let fade = self.mask.fade_out(compositor, mask_from, total);
        self.pending.push((fade, TrackTarget::Mask));
        self.run(compositor, timeline);
        self.state = PresentationState::Dismissing;
        tracing::debug!(
            session = self.serial,
            tracks = self.pending.len(),
            total,
            "exit started"
        );
    }

    fn settle_presented<C: Compositor + ?Sized>(&mut self, compositor: &mut C) {
        self.despawn_fragments(compositor);
        self.mask.show_immediately(compositor);
        compositor.set_pose(self.content.surface, self.plan.content_rest());
        self.state = PresentationState::Presented;
    }

    /// Release everything the session holds. The content surface is handed back at rest.
    fn teardown<C: Compositor + ?Sized>(mut self, compositor: &mut C) {
        for (id, _) in self.pending.drain(..) {
            compositor.cancel(id);
        }
        self.despawn_fragments(compositor);
        compositor.remove(self.content.surface);
        compositor.set_pose(self.content.surface, Pose::rest());
        self.mask.destroy(compositor);
        tracing::debug!(session = self.serial, "session released");
    }
}

/// Presents and dismisses one modal overlay at a time.
pub struct Presenter<C: Compositor> {
    compositor: C,
    config: OverlayConfig,
    session: Option<PresentationSession>,
    serial: u64,
}

impl<C: Compositor> Presenter<C> {
    pub fn new(compositor: C) -> Self {
        Self::with_config(compositor, OverlayConfig::default())
    }

    pub fn with_config(compositor: C, config: OverlayConfig) -> Self {
        Self {
            compositor,
            config,
            session: None,
            serial: 0,
        }
    }

    pub fn compositor(&self) -> &C {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut C {
        &mut self.compositor
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Direct access to the configuration. Changes apply to the next session only.
    pub fn config_mut(&mut self) -> &mut OverlayConfig {
        &mut self.config
    }

    pub fn set_default_animation_direction(&mut self, direction: Direction) {
        self.config.set_default_animation_direction(direction);
    }

    pub fn set_physics_gravity_magnitude(&mut self, value: f64) {
        self.config.set_physics_gravity_magnitude(value);
    }

    pub fn set_physics_elasticity(&mut self, value: f64) {
        self.config.set_physics_elasticity(value);
    }

    pub fn set_entrance_stagger(&mut self, seconds: f64) {
        self.config.set_entrance_stagger(seconds);
    }

    pub fn set_exit_stagger(&mut self, seconds: f64) {
        self.config.set_exit_stagger(seconds);
    }

    pub fn set_mask_style(&mut self, style: MaskStyle) {
        self.config.set_mask_style(style);
    }

    pub fn set_mask_color(&mut self, color: Rgba8) {
        self.config.set_mask_color(color);
    }

    pub fn set_mask_tap_to_dismiss(&mut self, enabled: bool) {
        self.config.set_mask_tap_to_dismiss(enabled);
    }

    pub fn state(&self) -> PresentationState {
        self.session
            .as_ref()
            .map_or(PresentationState::Idle, |s| s.state)
    }

    pub fn session(&self) -> Option<&PresentationSession> {
        self.session.as_ref()
    }

    /// True while presenting or presented.
    pub fn is_alert_visible(&self) -> bool {
        self.state().is_visible()
    }

    /// True once the entrance has fully settled and until a dismiss starts.
    pub fn is_presented(&self) -> bool {
        self.state() == PresentationState::Presented
    }

    /// Show with the [`AnimationStyle::Scale`] style.
    pub fn show(&mut self, content: ContentHandle, animated: bool) {
        self.show_content(content, animated, AnimationStyle::Scale);
    }

    /// Present `content`. Ignored while another session is active.
    #[tracing::instrument(skip(self, content), fields(surface = content.surface.0))]
    pub fn show_content(&mut self, content: ContentHandle, animated: bool, style: AnimationStyle) {
        if let Some(active) = &self.session {
            tracing::warn!(
                active = active.serial,
                state = ?active.state,
                "show rejected: an overlay is already active"
            );
            return;
        }

        self.serial += 1;
        let snapshot = self.config.snapshot();
        let stage = Stage {
            viewport: self.compositor.viewport(),
            frame: content.frame,
        };
        let plan = StylePlan::for_session(style, stage, &snapshot, self.serial);
        assert_eq!(
            plan.is_fragmented(),
            style.is_fragmented(),
            "fragment plan for {style} does not match its layout"
        );

        let mask = MaskController::materialize(&snapshot, &mut self.compositor);
        self.compositor.insert(content.surface);

        let mut session = PresentationSession {
            serial: self.serial,
            state: PresentationState::Presenting,
            content,
            plan,
            snapshot,
            mask,
            fragment_surfaces: Vec::new(),
            pending: Vec::new(),
            start_timestamp: self.compositor.now(),
            requested_dismiss_while_presenting: false,
        };

        if animated {
            session.start_entrance(&mut self.compositor);
        } else {
            session.settle_presented(&mut self.compositor);
        }
        tracing::debug!(
            session = session.serial,
            direction = ?session.plan.direction,
            fragments = session.fragments().len(),
            state = ?session.state,
            "session created"
        );

        if let Some(prev) = self.session.replace(session) {
            panic!(
                "overlay invariant violated: session {} replaced session {} in state {:?}",
                self.serial, prev.serial, prev.state
            );
        }
    }

    /// Dismiss the active overlay. Ignored while idle or already dismissing.
    #[tracing::instrument(skip(self))]
    pub fn dismiss(&mut self, animated: bool) {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("dismiss ignored: idle");
            return;
        };

        let state = session.state;
        match state {
            PresentationState::Dismissing => {
                tracing::debug!(session = session.serial, "dismiss ignored: already dismissing");
            }
            PresentationState::Idle => {
                panic!("overlay invariant violated: session {} is idle", session.serial);
            }
            PresentationState::Presenting | PresentationState::Presented if !animated => {
                if let Some(session) = self.session.take() {
                    session.teardown(&mut self.compositor);
                }
            }
            PresentationState::Presenting => {
                session.requested_dismiss_while_presenting = true;
                let captured = session.capture(&mut self.compositor);
                session.start_exit(&mut self.compositor, &captured);
            }
            PresentationState::Presented => {
                session.start_exit(&mut self.compositor, &[]);
            }
        }
    }

    /// Feed a compositor or input notification into the state machine.
    pub fn handle(&mut self, event: OverlayEvent) {
        match event {
            OverlayEvent::AnimationFinished(id) => self.animation_finished(id),
            OverlayEvent::MaskTapped => {
                let accepted = self
                    .session
                    .as_ref()
                    .is_some_and(|s| s.mask.accepts_tap(s.state));
                if accepted {
                    self.dismiss(true);
                } else {
                    tracing::debug!(state = ?self.state(), "mask tap ignored");
                }
            }
        }
    }

    fn animation_finished(&mut self, id: AnimationId) {
        let Some(session) = self.session.as_mut() else {
            tracing::trace!(?id, "finished animation without a session");
            return;
        };
        let Some(pos) = session.pending.iter().position(|(p, _)| *p == id) else {
            tracing::trace!(?id, "finished animation is not pending");
            return;
        };
        session.pending.swap_remove(pos);
        if !session.pending.is_empty() {
            return;
        }

        let state = session.state;
        match state {
            PresentationState::Presenting => {
                session.settle_presented(&mut self.compositor);
                tracing::debug!(session = session.serial, "presented");
            }
            PresentationState::Dismissing => {
                if let Some(session) = self.session.take() {
                    session.teardown(&mut self.compositor);
                }
            }
            state => panic!(
                "overlay invariant violated: session {} finished animations in state {state:?}",
                session.serial
            ),
        }
    }
}

impl Presenter<HeadlessCompositor> {
    /// Advance the virtual clock and deliver every completion that falls inside `dt`.
    pub fn advance(&mut self, dt: f64) {
        for id in self.compositor.advance(dt) {
            self.handle(OverlayEvent::AnimationFinished(id));
        }
    }

    /// Step in `dt` increments until idle or presented, up to `limit` seconds. Returns at once
    /// when `dt` is not a positive finite step.
    pub fn run_until_settled(&mut self, dt: f64, limit: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            tracing::debug!(dt, "run_until_settled ignored: step must be positive");
            return;
        }
        let steps = (limit / dt).ceil();
        let mut taken = 0.0;
        while matches!(
            self.state(),
            PresentationState::Presenting | PresentationState::Dismissing
        ) && taken < steps
        {
            self.advance(dt);
            taken += 1.0;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/presenter.rs"]
mod tests;
