use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use backdrop::{
    Backdrop, CancelToken, HostSettings, ManualHost, NoiseField, RealtimeHost, RealtimeOpts,
    SoftwareSurface, TargetFps, Timestamp, ViewportMetrics, run_realtime,
};

/// Simulated display refresh period for headless stepping.
const REFRESH_MS: f64 = 1000.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "backdrop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the loop headless on a simulated clock and write the final frame as a PNG.
    Frame(FrameArgs),
    /// Run the loop against the wall clock for a while and report frame counters.
    Run(RunArgs),
}

#[derive(clap::Args, Debug)]
struct ViewArgs {
    /// Logical window width.
    #[arg(long, default_value_t = 640.0)]
    width: f64,

    /// Logical window height.
    #[arg(long, default_value_t = 360.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Maximum frame rate. Overrides (and, with --settings, updates) the stored value.
    #[arg(long)]
    fps: Option<f64>,

    /// Host settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Number of rendered frames to run before capturing.
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Fixed noise seed for reproducible output.
    #[arg(long)]
    seed: Option<u32>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RunArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Wall-clock seconds to run.
    #[arg(long, default_value_t = 2.0)]
    seconds: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn load_settings(view: &ViewArgs) -> anyhow::Result<HostSettings> {
    let mut settings = match &view.settings {
        Some(path) => HostSettings::load(path)?,
        None => HostSettings::default(),
    };
    if let Some(fps) = view.fps {
        anyhow::ensure!(
            fps.is_finite() && fps > 0.0,
            "--fps must be a positive number"
        );
        settings.target_fps = fps;
        if let Some(path) = &view.settings {
            settings.save(path)?;
        }
    }
    settings.filter.validate()?;
    Ok(settings)
}

fn metrics(view: &ViewArgs) -> ViewportMetrics {
    ViewportMetrics::new(view.width, view.height, view.dpr)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let settings = load_settings(&args.view)?;
    let fps = TargetFps::new(settings.target_fps);
    let host = ManualHost::new(Timestamp::ZERO);
    let filter = settings.filter;
    let acquire = move || Ok(SoftwareSurface::new(filter));

    let mut bd = match args.seed {
        Some(seed) => Backdrop::mount_with_field(
            host,
            fps,
            metrics(&args.view),
            NoiseField::with_seed(seed),
            acquire,
        ),
        None => Backdrop::mount(host, fps, metrics(&args.view), acquire),
    };
    anyhow::ensure!(bd.is_active(), "backdrop failed to mount");

    let wanted = args.frames.max(1);
    while bd.stats().frames_rendered < wanted {
        anyhow::ensure!(bd.step(REFRESH_MS), "frame loop stopped unexpectedly");
    }

    let snapshot = bd
        .surface()
        .context("surface released before capture")?
        .snapshot()?
        .context("no frame was presented")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &snapshot.data,
        snapshot.width,
        snapshot.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.seconds.is_finite() && args.seconds > 0.0,
        "--seconds must be a positive number"
    );
    let settings = load_settings(&args.view)?;
    let filter = settings.filter;
    let mut bd = Backdrop::mount(
        RealtimeHost::new(),
        TargetFps::new(settings.target_fps),
        metrics(&args.view),
        move || Ok(SoftwareSurface::new(filter)),
    );
    anyhow::ensure!(bd.is_active(), "backdrop failed to mount");

    let opts = RealtimeOpts {
        duration: Some(Duration::from_secs_f64(args.seconds)),
        ..RealtimeOpts::default()
    };
    let stats = run_realtime(&mut bd, opts, &CancelToken::new());

    eprintln!(
        "rendered {} frames ({} skipped, {} failed, {} allocations) in {:.1}s",
        stats.frames_rendered,
        stats.frames_skipped,
        stats.frames_failed,
        stats.reallocations,
        args.seconds
    );
    Ok(())
}
