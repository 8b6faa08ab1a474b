use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use etherloop::{
    AnimationSession, Canvas, Config, CpuSurface, FfmpegSink, FixedFrames, Fps, FrameIndex,
    FrameRange, FrameRecorder, FrameSink, OutlineRing, PngSequenceSink, Point, ScriptedHost,
    run_loop, write_png,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "etherloop", version, about = "Procedural contour animation around an SVG outline")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence.
    Frames(FramesArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Open an interactive window (left button = pressed, S = record, Esc = quit).
    #[cfg(feature = "live")]
    Live(LiveArgs),
    /// Print the default configuration as JSON.
    Config,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// SVG file whose first path is the base outline.
    #[arg(long)]
    outline: PathBuf,

    /// Configuration JSON; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 800)]
    height: u32,
}

#[derive(Args, Debug)]
struct ScriptArgs {
    /// Pointer position in surface pixels, as `X,Y`.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Point>,

    /// Hold the button over the frame range `A..B` (repeatable).
    #[arg(long, value_parser = parse_range)]
    press: Vec<FrameRange>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    script: ScriptArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    script: ScriptArgs,

    /// Number of frames, starting at frame 0.
    #[arg(long)]
    count: u64,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// File name prefix.
    #[arg(long, default_value = "frame")]
    prefix: String,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    script: ScriptArgs,

    /// Number of frames, starting at frame 0.
    #[arg(long)]
    count: u64,

    /// Output frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[cfg(feature = "live")]
#[derive(Parser, Debug)]
struct LiveArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Target frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Directory receiving recordings. Each start/stop of `S` produces one
    /// `<DIR>/take_NNN/frame_NNNNN.png` sequence, numbered from 00000.
    #[arg(long, default_value = "recordings")]
    record_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
        #[cfg(feature = "live")]
        Command::Live(args) => cmd_live(args),
        Command::Config => cmd_config(),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let cfg = match path {
        Some(p) => Config::load(p).with_context(|| format!("load config '{}'", p.display()))?,
        None => Config::default(),
    };
    Ok(cfg)
}

fn open_session(scene: &SceneArgs) -> anyhow::Result<(AnimationSession, CpuSurface)> {
    let cfg = load_config(scene.config.as_deref())?;
    let ring = OutlineRing::load_or_empty(&scene.outline, cfg.sample_count);
    let canvas = Canvas::new(scene.width, scene.height);
    let session = AnimationSession::new(cfg, ring, canvas)?;
    let surface = CpuSurface::new(canvas)?;
    Ok((session, surface))
}

fn script_host(script: &ScriptArgs) -> ScriptedHost {
    let mut host = ScriptedHost::new();
    if let Some(p) = script.pointer {
        host = host.with_pointer(p);
    }
    for &range in &script.press {
        host = host.with_press(range);
    }
    host
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (mut session, mut surface) = open_session(&args.scene)?;
    let host = script_host(&args.script);

    for i in 0..args.frame {
        session.advance(&host.input_at(FrameIndex(i)));
    }
    let frame = session.render_frame(&host.input_at(FrameIndex(args.frame)), &mut surface)?;
    write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let fps = Fps::new(60, 1)?;
    run_recorded(&args.scene, &args.script, args.count, fps, |_| {
        PngSequenceSink::new(&args.out_dir, args.prefix.clone())
    })?;
    eprintln!("wrote {} frames to {}", args.count, args.out_dir.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let fps = Fps::new(args.fps, 1)?;
    run_recorded(&args.scene, &args.script, args.count, fps, |cfg| {
        FfmpegSink::new(&args.out, cfg.background.to_rgba8())
    })?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn run_recorded<S: FrameSink>(
    scene: &SceneArgs,
    script: &ScriptArgs,
    count: u64,
    fps: Fps,
    make_sink: impl FnOnce(&Config) -> S,
) -> anyhow::Result<()> {
    if count == 0 {
        anyhow::bail!("--count must be > 0");
    }
    let (mut session, mut surface) = open_session(scene)?;
    let mut host = script_host(script);
    let mut recorder = FrameRecorder::new(make_sink(session.config()), fps);
    recorder.start(session.canvas())?;

    let stats = run_loop(
        &mut session,
        &mut FixedFrames::count(count),
        &mut host,
        &mut surface,
        &mut recorder,
    )?;
    tracing::info!(frames = stats.frames, captured = stats.captured, "render finished");
    Ok(())
}

#[cfg(feature = "live")]
fn cmd_live(args: LiveArgs) -> anyhow::Result<()> {
    use etherloop::{Paced, Unbounded, WindowHost};

    let (mut session, mut surface) = open_session(&args.scene)?;
    let fps = Fps::new(args.fps, 1)?;
    let mut host = WindowHost::new("etherloop", session.canvas())?;
    let sink = PngSequenceSink::new(&args.record_dir, "frame").with_takes();
    let mut recorder = FrameRecorder::new(sink, fps);

    let stats = run_loop(
        &mut session,
        &mut Paced::new(Unbounded::default(), fps),
        &mut host,
        &mut surface,
        &mut recorder,
    )?;
    tracing::info!(
        frames = stats.frames,
        recordings = recorder.recordings(),
        "window closed"
    );
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&Config::default()).context("serialize config")?;
    println!("{json}");
    Ok(())
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(Point::new(x, y))
}

fn parse_range(s: &str) -> Result<FrameRange, String> {
    let (a, b) = s
        .split_once("..")
        .ok_or_else(|| format!("expected A..B, got '{s}'"))?;
    let a: u64 = a.trim().parse().map_err(|e| format!("bad start '{a}': {e}"))?;
    let b: u64 = b.trim().parse().map_err(|e| format!("bad end '{b}': {e}"))?;
    FrameRange::new(FrameIndex(a), FrameIndex(b)).map_err(|e| e.to_string())
}
