use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use spiralux::{
    AnimationSession, AnimationSessionOpts, BitDepth, FrameDirLayout, FrameFileSink,
    HdrEncodeConfig, PresetLibrary,
};

#[derive(Parser, Debug)]
#[command(name = "spiralux", version)]
struct Cli {
    /// Show per-frame debug metrics.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available presets.
    Presets(PresetsArgs),
    /// Render a full animation to numbered frame files.
    Render(RenderArgs),
    /// Render one frame to a single image file.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct PresetsArgs {
    /// Preset library JSON (defaults to the built-in library).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Preset library JSON (defaults to the built-in library).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Preset name.
    #[arg(long)]
    preset: String,

    /// Directory the frame folder is created under.
    #[arg(long, default_value = ".")]
    out_root: PathBuf,

    /// Fan the shading stage out across worker threads.
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Preset library JSON (defaults to the built-in library).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Preset name.
    #[arg(long)]
    preset: String,

    /// Frame index (0-based). Earlier frames are replayed to reach it, since
    /// the recurrence state is carried frame-to-frame.
    #[arg(long)]
    frame: u64,

    /// Output image path (.png for 8-bit, .tiff for 16-bit presets).
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match cli.cmd {
        Command::Presets(args) => cmd_presets(args),
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn load_library(in_path: Option<&PathBuf>) -> anyhow::Result<PresetLibrary> {
    match in_path {
        Some(p) => PresetLibrary::from_path(p)
            .with_context(|| format!("load preset library '{}'", p.display())),
        None => Ok(PresetLibrary::builtin()),
    }
}

fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    let lib = load_library(args.in_path.as_ref())?;
    println!("Available presets:");
    println!("{}", "-".repeat(50));
    for name in lib.names() {
        let preset = lib.get(name)?;
        println!("{name:20} - {}", preset.description);
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let lib = load_library(args.in_path.as_ref())?;
    let preset = lib.get(&args.preset)?.clone();
    let depth = lib.output.depth();

    tracing::info!(
        preset = %args.preset,
        width = preset.video.width,
        height = preset.video.height,
        frames = preset.video.num_frames,
        max_nits = preset.hdr.max_nits,
        "rendering animation"
    );

    let layout = FrameDirLayout::new(
        &args.out_root,
        &args.preset,
        lib.output.create_timestamped_folder,
    );
    let mut sink = FrameFileSink::new(layout.dir());
    let mut session = AnimationSession::new(
        preset.clone(),
        depth,
        AnimationSessionOpts {
            parallel: args.parallel,
        },
    )?;

    let stats = session.run_into(&mut sink)?;
    tracing::info!(
        frames = stats.frames,
        elapsed_secs = stats.elapsed_secs,
        avg_frame_secs = stats.elapsed_secs / stats.frames.max(1) as f64,
        "render finished"
    );

    println!("Frames saved to: {}/", sink.dir().display());
    if depth == BitDepth::Sixteen {
        let encode = HdrEncodeConfig::for_run(preset.video.fps, sink.dir(), depth, &layout.tag());
        println!();
        println!("To encode as HDR video, run this ffmpeg command:");
        println!();
        println!("{}", encode.command_line());
        println!();
        println!(
            "HDR settings used: {} nits peak brightness, Rec. 2020 color gamut",
            preset.hdr.max_nits
        );
        if !spiralux::is_ffmpeg_on_path() {
            tracing::warn!("ffmpeg was not found on PATH");
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let lib = load_library(args.in_path.as_ref())?;
    let preset = lib.get(&args.preset)?.clone();
    let depth = lib.output.depth();

    let mut session = AnimationSession::new(preset, depth, AnimationSessionOpts::default())?;
    anyhow::ensure!(
        args.frame < session.preset().video.num_frames,
        "frame {} is outside the animation (num_frames = {})",
        args.frame,
        session.preset().video.num_frames
    );

    // Replay the trajectory up to the requested frame.
    let mut out = session.render_next()?;
    while session.next_frame() <= args.frame {
        out = session.render_next()?;
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    spiralux::encode::frames::write_image(&out.buffer, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
