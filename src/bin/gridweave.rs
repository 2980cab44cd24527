use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gridweave", version, about = "Render distributed simulation snapshots")]
struct Cli {
    /// Log per-worker and per-file detail (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render one PNG per frame.
    Frames(FramesArgs),
    /// Validate the worker mesh and print its layout.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Simulation project directory (uses lib/grid_iterations and config/animation_config.csv).
    #[arg(long)]
    project: Option<PathBuf>,

    /// JSON render config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory with one `row_col` sub-directory per worker.
    #[arg(long)]
    grids: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Color config CSV (`label,number,color`).
    #[arg(long)]
    colors: Option<PathBuf>,

    /// Milliseconds each frame is shown.
    #[arg(long)]
    interval_ms: Option<u32>,

    /// Output pixels per grid cell along each axis.
    #[arg(long)]
    scale: Option<u32>,

    /// Load tiles and stitch frames in parallel.
    #[arg(long)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Output MP4 path.
    #[arg(long, default_value = "movie.mp4")]
    out: PathBuf,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Print the mesh summary as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "gridweave=debug"
    } else {
        "gridweave=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn base_config(source: &SourceArgs) -> anyhow::Result<gridweave::RenderConfig> {
    let mut cfg = match (&source.config, &source.project) {
        (Some(path), _) => gridweave::RenderConfig::from_json_path(path)?,
        (None, Some(project)) => gridweave::RenderConfig::for_project(project),
        (None, None) => gridweave::RenderConfig::default(),
    };
    if let (Some(_), Some(project)) = (&source.config, &source.project) {
        let layout = gridweave::RenderConfig::for_project(project);
        cfg.grids_dir = layout.grids_dir;
        cfg.color_config = layout.color_config;
    }
    if let Some(grids) = &source.grids {
        cfg.grids_dir = grids.clone();
    }
    Ok(cfg)
}

fn run_config(args: &RunArgs) -> anyhow::Result<gridweave::RenderConfig> {
    let mut cfg = base_config(&args.source)?;
    if let Some(colors) = &args.colors {
        cfg.color_config = colors.clone();
    }
    if let Some(interval_ms) = args.interval_ms {
        cfg.interval_ms = interval_ms;
    }
    if let Some(scale) = args.scale {
        cfg.scale = scale;
    }
    if args.parallel {
        cfg.parallel = true;
    }
    if args.threads.is_some() {
        cfg.threads = args.threads;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = run_config(&args.run)?;
    let mut opts = gridweave::FfmpegSinkOpts::new(&args.out);
    opts.overwrite = !args.no_overwrite;
    let mut sink = gridweave::FfmpegSink::new(opts);

    let out = gridweave::render_to_sink(&cfg, &mut sink)
        .with_context(|| format!("render '{}'", cfg.grids_dir.display()))?;
    eprintln!(
        "wrote {} ({} frames of {}x{} cells)",
        args.out.display(),
        out.sequence.len(),
        out.sequence.rows(),
        out.sequence.cols()
    );
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = run_config(&args.run)?;
    let mut sink = gridweave::PngSequenceSink::new(&args.out_dir);

    let out = gridweave::render_to_sink(&cfg, &mut sink)
        .with_context(|| format!("render '{}'", cfg.grids_dir.display()))?;
    eprintln!(
        "wrote {} frames to {}",
        out.sequence.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let cfg = base_config(&args.source)?;
    let mesh = gridweave::discover_partitions(&cfg.grids_dir, cfg.parallel)?;
    let summary = mesh.summary()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "mesh {}x{}, {} frames, global grid {}x{}",
        summary.mesh.rows, summary.mesh.cols, summary.frames, summary.total_rows, summary.total_cols
    );
    for w in &summary.workers {
        println!(
            "  {}: {}x{} cells from {}",
            w.key,
            w.rows,
            w.cols,
            w.source.display()
        );
    }
    Ok(())
}
