//! roomar CLI: render planner snapshots and run the AR loop offline

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use roomar::demo::{classroom_layout, layout_point, ColorKeyDetector, ImageDirCamera, SyntheticCamera};
use roomar::{setup, PngPresenter, Renderer, ViewMode};
use roomar_config::AppConfig;
use roomar_vision::{FrameSource, MarkerBridge};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roomar")]
#[command(about = "Room layout planner with marker-anchored AR overlays")]
#[command(version)]
struct Cli {
    /// Config file (otherwise ROOMAR_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the demo classroom from the planner camera to a PNG
    Plan(PlanArgs),

    /// Run the AR loop and write overlay snapshots
    Ar(ArArgs),

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Debug, Args)]
struct PlanArgs {
    /// Output PNG path
    #[arg(long, default_value = "plan.png")]
    out: PathBuf,

    /// Extra orbit around the room, in degrees
    #[arg(long, default_value = "0.0")]
    orbit: f32,

    /// Render the empty room
    #[arg(long)]
    empty: bool,

    /// Hide the floor grid
    #[arg(long)]
    no_grid: bool,
}

#[derive(Debug, Args)]
struct ArArgs {
    /// Directory for PNG snapshots
    #[arg(long, default_value = "ar-frames")]
    out: PathBuf,

    /// Number of ticks to run
    #[arg(long, default_value = "60")]
    ticks: u64,

    /// Milliseconds per tick
    #[arg(long, default_value = "33")]
    tick_ms: u64,

    /// Keep every n-th snapshot
    #[arg(long, default_value = "10")]
    every: u64,

    /// Replay images from this directory instead of the synthetic camera
    #[arg(long)]
    images: Option<PathBuf>,

    /// Capture device index (overrides the config)
    #[arg(long)]
    device: Option<u32>,
}

fn init_logging(config: &AppConfig, verbose: bool) {
    let default_filter = if verbose {
        "debug".to_string()
    } else {
        config.logging.filter.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, source) =
        AppConfig::discover(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config, cli.verbose);
    info!("Configuration: {}", source);

    match cli.command {
        Commands::Plan(args) => run_plan(&config, &args),
        Commands::Ar(args) => run_ar(&config, &args),
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn build_renderer(config: &AppConfig) -> Result<Renderer> {
    let room = setup::room(config).context("Invalid room dimensions")?;
    Ok(Renderer::new(
        room,
        setup::renderer_options(config),
        MarkerBridge::new(ColorKeyDetector::default()),
        setup::bindings(config),
    ))
}

fn run_plan(config: &AppConfig, args: &PlanArgs) -> Result<()> {
    let mut renderer = build_renderer(config)?;
    if args.no_grid {
        renderer.set_show_grid(false);
    }
    if !args.empty {
        let (width, depth) = (renderer.room().width(), renderer.room().depth());
        for (kind, fx, fz) in classroom_layout() {
            renderer.place(kind, layout_point(fx, fz, width, depth));
        }
    }
    renderer.orbit(args.orbit.to_radians(), 0.0);

    let output = renderer.tick();
    output
        .image
        .save(&args.out)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;
    info!(
        "Wrote {} objects to {}",
        renderer.scene().len(),
        args.out.display()
    );
    Ok(())
}

fn run_ar(config: &AppConfig, args: &ArArgs) -> Result<()> {
    let settings = setup::capture_settings(config);
    let frames = match &args.images {
        Some(dir) => FrameSource::with_settings(ImageDirCamera::opener(dir.clone()), settings),
        None => {
            let device = args.device.unwrap_or(config.capture.device_index);
            let (w, h) = (config.viewport.width, config.viewport.height);
            FrameSource::with_settings(SyntheticCamera::opener(device, w, h), settings)
        }
    };

    let mut renderer = build_renderer(config)?.with_frame_source(frames);
    let mut presenter = PngPresenter::new(&args.out)?.with_prefix("ar").every(args.every);

    renderer.set_mode(ViewMode::Ar);
    let notices = renderer.run(
        &mut presenter,
        Some(args.ticks),
        Duration::from_millis(args.tick_ms),
    )?;
    renderer.set_mode(ViewMode::Planner);

    for notice in &notices {
        eprintln!("{notice}");
    }
    info!(
        "Wrote {} snapshot(s) to {}",
        presenter.written().len(),
        args.out.display()
    );
    Ok(())
}
