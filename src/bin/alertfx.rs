use std::path::PathBuf;

use alertfx::{
    AnimationStyle, Compositor as _, Direction, HeadlessCompositor, OverlayConfig, Pose,
    PresentationState, Presenter, Rect, Stage, StylePlan, Timeline, TrackTarget,
};
use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "alertfx", version)]
struct Cli {
    /// Log lifecycle events to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the entrance and exit timelines of a style as JSON.
    Plan(PlanArgs),
    /// Run a headless show/dismiss cycle and print the state transitions as JSON.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Animation style (scale, spring, door, explode, confetti, gravity, sesame, elastic).
    #[arg(long, default_value = "scale")]
    style: AnimationStyle,

    /// Overrides the configured default direction.
    #[arg(long)]
    direction: Option<Direction>,

    /// Configuration JSON; missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    entrance_stagger: Option<f64>,

    #[arg(long)]
    exit_stagger: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Viewport size in points, `WxH`.
    #[arg(long, default_value = "390x844", value_parser = parse_size)]
    viewport: (f64, f64),

    /// Content size in points, `WxH`, centered in the viewport.
    #[arg(long, default_value = "300x200", value_parser = parse_size)]
    content: (f64, f64),
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    scene: SceneArgs,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Seconds after `show` at which `dismiss` is requested. Defaults to one second after the
    /// entrance settles.
    #[arg(long)]
    dismiss_at: Option<f64>,

    /// Simulation step in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Skip the animations and show/dismiss immediately.
    #[arg(long)]
    immediate: bool,
}

fn parse_size(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        return Err(format!("size must be positive, got '{s}'"));
    }
    Ok((w, h))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

impl SceneArgs {
    fn load_config(&self) -> anyhow::Result<OverlayConfig> {
        let mut cfg = match &self.config {
            Some(path) => OverlayConfig::from_path(path)
                .with_context(|| format!("load config '{}'", path.display()))?,
            None => OverlayConfig::default(),
        };
        if let Some(d) = self.direction {
            cfg.set_default_animation_direction(d);
        }
        if let Some(s) = self.entrance_stagger {
            cfg.set_entrance_stagger(s);
        }
        if let Some(s) = self.exit_stagger {
            cfg.set_exit_stagger(s);
        }
        if let Some(seed) = self.seed {
            cfg.set_seed(seed);
        }
        Ok(cfg)
    }

    fn stage(&self) -> Stage {
        let (vw, vh) = self.viewport;
        let (cw, ch) = self.content;
        let x0 = (vw - cw) / 2.0;
        let y0 = (vh - ch) / 2.0;
        Stage {
            viewport: Rect::new(0.0, 0.0, vw, vh),
            frame: Rect::new(x0, y0, x0 + cw, y0 + ch),
        }
    }
}

#[derive(serde::Serialize)]
struct TrackSummary {
    target: TrackTarget,
    delay: f64,
    duration: f64,
    from: Pose,
    to: Pose,
}

#[derive(serde::Serialize)]
struct TimelineSummary {
    total: f64,
    tracks: Vec<TrackSummary>,
}

impl From<&Timeline> for TimelineSummary {
    fn from(t: &Timeline) -> Self {
        Self {
            total: t.total_duration(),
            tracks: t
                .tracks
                .iter()
                .map(|track| TrackSummary {
                    target: track.target,
                    delay: track.delay,
                    duration: track.curve.duration(),
                    from: track.curve.start(),
                    to: track.curve.end(),
                })
                .collect(),
        }
    }
}

#[derive(serde::Serialize)]
struct PlanReport {
    style: AnimationStyle,
    direction: alertfx::ResolvedDirection,
    stage: Stage,
    fragments: Vec<alertfx::Fragment>,
    entrance: TimelineSummary,
    exit: TimelineSummary,
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let cfg = args.scene.load_config()?;
    let plan = StylePlan::for_session(args.scene.style, args.scene.stage(), &cfg.snapshot(), 1);

    let report = PlanReport {
        style: plan.style,
        direction: plan.direction,
        stage: plan.stage,
        fragments: plan.fragments.fragments.clone(),
        entrance: (&plan.entrance()).into(),
        exit: (&plan.exit(|_| None)).into(),
    };
    let out = serde_json::to_string_pretty(&report).context("serialize plan")?;
    println!("{out}");
    Ok(())
}

#[derive(serde::Serialize)]
struct Transition {
    t: f64,
    state: PresentationState,
    visible: bool,
}

#[derive(serde::Serialize)]
struct SimulationReport {
    style: AnimationStyle,
    direction: alertfx::ResolvedDirection,
    fragments: usize,
    dismissed_mid_entrance: bool,
    transitions: Vec<Transition>,
}

const SIMULATION_LIMIT: f64 = 30.0;

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.dt.is_finite() && args.dt > 0.0) {
        anyhow::bail!("--dt must be positive, got {}", args.dt);
    }
    let cfg = args.scene.load_config()?;
    let stage = args.scene.stage();

    let mut compositor = HeadlessCompositor::new(stage.viewport);
    let content = compositor.create_content(stage.frame);
    let mut presenter = Presenter::with_config(compositor, cfg);

    let mut transitions = Vec::new();
    let mut last = presenter.state();
    let mut record = |p: &Presenter<HeadlessCompositor>, last: &mut PresentationState| {
        let state = p.state();
        if state != *last {
            transitions.push(Transition {
                t: p.compositor().now(),
                state,
                visible: p.is_alert_visible(),
            });
            *last = state;
        }
    };

    let animated = !args.immediate;
    presenter.show_content(content, animated, args.scene.style);
    let session = presenter
        .session()
        .context("show did not create a session")?;
    let direction = session.resolved_direction();
    let fragments = session.fragments().len();
    record(&presenter, &mut last);

    let mut dismiss_at = args.dismiss_at;
    let mut dismissed = false;
    let mut dismissed_mid_entrance = false;
    while presenter.compositor().now() < SIMULATION_LIMIT {
        let now = presenter.compositor().now();
        if dismiss_at.is_none() && presenter.state() == PresentationState::Presented {
            dismiss_at = Some(now + 1.0);
        }
        if !dismissed && dismiss_at.is_some_and(|at| now + 1e-9 >= at) {
            dismissed_mid_entrance = presenter.state() == PresentationState::Presenting;
            presenter.dismiss(animated);
            dismissed = true;
            record(&presenter, &mut last);
        }
        if dismissed && presenter.state() == PresentationState::Idle {
            break;
        }
        presenter.advance(args.dt);
        record(&presenter, &mut last);
    }
    if presenter.state() != PresentationState::Idle {
        anyhow::bail!(
            "simulation did not settle within {SIMULATION_LIMIT}s (state {:?})",
            presenter.state()
        );
    }

    let report = SimulationReport {
        style: args.scene.style,
        direction,
        fragments,
        dismissed_mid_entrance,
        transitions,
    };
    let out = serde_json::to_string_pretty(&report).context("serialize simulation")?;
    println!("{out}");
    Ok(())
}
