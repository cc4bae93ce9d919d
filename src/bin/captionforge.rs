use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use captionforge::{
    CaptionTimeline, Color, EmojiDirectory, FontFace, JobSpec, PreviewRenderer, build_timeline,
    write_png,
};

#[derive(Parser, Debug)]
#[command(name = "captionforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the overlay timeline for a job and write it as JSON.
    Timeline(TimelineArgs),
    /// Render a single preview frame of a job as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct JobArgs {
    /// Input job JSON (config, transcription and segments).
    #[arg(long)]
    job: PathBuf,

    /// Caption font file; overrides `config.font_path`.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Emoji image directory; overrides `config.emoji_dir`.
    #[arg(long)]
    emoji_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    #[command(flatten)]
    job: JobArgs,

    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    job: JobArgs,

    /// Frame time in seconds.
    #[arg(long)]
    time: f64,

    /// Background color standing in for the base video.
    #[arg(long, default_value = "#202020")]
    background: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

struct LoadedJob {
    font: FontFace,
    built: CaptionTimeline,
}

fn load_and_build(args: &JobArgs) -> anyhow::Result<LoadedJob> {
    let spec = JobSpec::from_path(&args.job)
        .with_context(|| format!("load job '{}'", args.job.display()))?;

    let font_path = args
        .font
        .clone()
        .or_else(|| spec.config.font_path.clone())
        .context("no caption font: pass --font or set config.font_path")?;
    let mut font = FontFace::from_path(&font_path)
        .with_context(|| format!("load font '{}'", font_path.display()))?;

    let emoji_dir = args
        .emoji_dir
        .clone()
        .unwrap_or_else(|| spec.config.emoji_dir.clone());
    let mut emojis = EmojiDirectory::new(emoji_dir);

    let built = build_timeline(
        &spec.config,
        &spec.transcription,
        &spec.segments,
        spec.duration(),
        spec.base_video.clone(),
        &mut font,
        &mut emojis,
    )
    .context("build caption timeline")?;

    for miss in built.alignment.unmatched() {
        tracing::warn!(index = miss.index, text = %miss.text, reason = ?miss.reason, "segment not captioned");
    }
    Ok(LoadedJob { font, built })
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let job = load_and_build(&args.job)?;
    create_parent(&args.out)?;
    let f = std::fs::File::create(&args.out)
        .with_context(|| format!("create '{}'", args.out.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(f), &job.built)
        .context("write timeline JSON")?;

    let (base, shadows, texts, emojis) = job.built.timeline.counts();
    eprintln!(
        "wrote {} ({} layers: {base} base, {shadows} shadow, {texts} text, {emojis} emoji)",
        args.out.display(),
        job.built.timeline.layers.len()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let background = Color::parse(&args.background)
        .map_err(|e| anyhow::anyhow!("invalid --background: {e}"))?;
    let mut job = load_and_build(&args.job)?;

    let frame = PreviewRenderer::new(background)
        .render_frame(&job.built.timeline, args.time, &mut job.font)
        .with_context(|| format!("render frame at {}s", args.time))?;
    write_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
