use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use tickercast::{
    CpuSurface, DiscardSender, FfmpegSender, FfmpegSenderOpts, Fps, FrameDispatcher, FrameIndex,
    FrameSender, Quality, SenderInfo, StopSignal, TickerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "tickercast", version, about = "Stream a scrolling news ticker as live video")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate frames and stream them (requires `ffmpeg` on PATH unless `--dry-run`).
    Send(SendArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Print the effective configuration as JSON.
    PrintConfig(ConfigArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Ticker config JSON; defaults are used for missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ticker text.
    #[arg(long)]
    text: Option<String>,

    /// Font file (TTF/OTF).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Pixels the text moves per frame.
    #[arg(long)]
    speed: Option<f64>,

    /// Frame rate: `60`, `60000/1001` or `59.94`.
    #[arg(long)]
    fps: Option<Fps>,

    /// Stream name.
    #[arg(long)]
    name: Option<String>,

    /// Output URL handed to ffmpeg.
    #[arg(long)]
    address: Option<String>,

    /// Encoder quality.
    #[arg(long, value_enum)]
    quality: Option<Quality>,
}

impl ConfigArgs {
    fn load(&self) -> anyhow::Result<TickerConfig> {
        let mut config = match &self.config {
            Some(path) => TickerConfig::from_path(path)
                .with_context(|| format!("load config '{}'", path.display()))?,
            None => TickerConfig::default(),
        };
        if let Some(text) = &self.text {
            config.text = text.clone();
        }
        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }
        if let Some(speed) = self.speed {
            config.step_px = speed;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        if let Some(address) = &self.address {
            config.address = address.clone();
        }
        if let Some(quality) = self.quality {
            config.quality = quality;
        }
        config.validate().context("invalid ticker config")?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
struct SendArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Stop after this many frames (runs until killed otherwise).
    #[arg(long)]
    frames: Option<u64>,

    /// Generate and pace frames without streaming them anywhere.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Do not print a progress dot per frame.
    #[arg(long, short, default_value_t = false)]
    quiet: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    index: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Send(args) => cmd_send(args),
        Command::Frame(args) => cmd_frame(args),
        Command::PrintConfig(args) => cmd_print_config(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn cmd_send(args: SendArgs) -> anyhow::Result<()> {
    let config = args.config.load()?;
    let surface = CpuSurface::new(config.canvas)?;
    let dispatcher =
        FrameDispatcher::from_config(surface, &config).context("prepare ticker graphic")?;

    if args.dry_run {
        let sender = DiscardSender::new(&config.name, config.fps);
        stream(dispatcher, sender, args.frames, args.quiet)
    } else {
        let opts = FfmpegSenderOpts {
            quality: config.quality,
            container: config.container.clone(),
            info: Some(SenderInfo::this_crate()),
            ..FfmpegSenderOpts::new(&config.name, &config.address)
        };
        let sender = FfmpegSender::new(opts, dispatcher.frame().header())
            .context("start ffmpeg sender")?;
        stream(dispatcher, sender, args.frames, args.quiet)
    }
}

fn stream<F: FrameSender>(
    mut dispatcher: FrameDispatcher<CpuSurface>,
    mut sender: F,
    frames: Option<u64>,
    quiet: bool,
) -> anyhow::Result<()> {
    sender.set_sender_info(SenderInfo::this_crate());
    eprintln!("Sending on {}", sender.address());

    let stop = StopSignal::new();
    let mut stderr = std::io::stderr();
    let result = dispatcher.run(&mut sender, &stop, frames, |_, _| {
        if !quiet {
            let _ = write!(stderr, ".");
            let _ = stderr.flush();
        }
    });
    if !quiet {
        eprintln!();
    }

    let sent = sender.stats();
    drop(sender);
    let stats = result.context("frame generation stopped")?;
    eprintln!(
        "sent {} frames ({} bytes, {} dropped)",
        stats.frames, sent.bytes, sent.dropped
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = args.config.load()?;
    let surface = CpuSurface::new(config.canvas)?;
    let mut dispatcher =
        FrameDispatcher::from_config(surface, &config).context("prepare ticker graphic")?;
    let frame = dispatcher
        .render_frame_at(FrameIndex(args.index))
        .with_context(|| format!("render frame {}", args.index))?;
    let header = *frame.header();
    let rgba = frame.to_rgba8();

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &rgba,
        header.width,
        header.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_print_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = args.load()?;
    println!("{}", config.to_json_pretty()?);
    Ok(())
}
