use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use devframe::{
    Canvas, DeviceVariant, EngineConfig, RawCapture, RenderEngine, RenderOutcome, RenderRequest,
    output_file_name,
};

#[derive(Parser, Debug)]
#[command(name = "devframe", version)]
struct Cli {
    /// Log at DEBUG instead of INFO.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a capture, frame it, and write the PNG.
    Frame(FrameArgs),
    /// Load every configured frame and print its dimensions.
    CheckFrames(ConfigArgs),
    /// Print the default configuration as JSON.
    DumpConfig,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Engine configuration JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Captured screenshot (any format the decoder recognizes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path, or an existing directory to write a derived file name into.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,

    /// Device variant (phone, android, phoneOverlay). Defaults to the configured device.
    #[arg(long)]
    device: Option<DeviceVariant>,

    /// Canonical width override.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Canonical height override.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Page URL the capture came from; used to name the output inside a directory.
    #[arg(long)]
    url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::CheckFrames(args) => cmd_check_frames(args),
        Command::DumpConfig => cmd_dump_config(),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let engine = RenderEngine::new(load_config(args.config.config.as_deref())?)?;

    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read capture '{}'", args.in_path.display()))?;

    let target = match (args.width, args.height) {
        (Some(w), Some(h)) => Some(Canvas::new(w, h)?),
        _ => None,
    };
    let request = RenderRequest {
        device: args.device,
        target,
    };

    let rendered = engine.render(&RawCapture::Encoded(bytes), &request)?;

    let out_path = if args.out.is_dir() {
        args.out
            .join(output_file_name(args.url.as_deref(), rendered.device))
    } else {
        args.out
    };
    rendered.write_png(&out_path)?;

    let canvas = rendered.canvas();
    match &rendered.outcome {
        RenderOutcome::Framed { strategy } => println!(
            "wrote {} ({}x{}, {} framed as {strategy:?})",
            out_path.display(),
            canvas.width,
            canvas.height,
            rendered.device
        ),
        RenderOutcome::Degraded { reason } => println!(
            "wrote {} ({}x{}, unframed: {reason})",
            out_path.display(),
            canvas.width,
            canvas.height
        ),
    }
    Ok(())
}

fn cmd_check_frames(args: ConfigArgs) -> anyhow::Result<()> {
    let engine = RenderEngine::new(load_config(args.config.as_deref())?)?;
    for asset in engine.frames().preload_all()? {
        println!(
            "{}: {}x{} ({})",
            asset.variant,
            asset.size.width,
            asset.size.height,
            asset.path.display()
        );
    }
    Ok(())
}

fn cmd_dump_config() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&EngineConfig::default())
        .context("serialize default config")?;
    println!("{json}");
    Ok(())
}
