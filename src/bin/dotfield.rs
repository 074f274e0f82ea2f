use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dotfield", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a number of ticks and write the last frame as a PNG.
    Frame(FrameArgs),
    /// Write every frame of a scripted run as a PNG sequence.
    Sequence(SequenceArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Surface width in logical pixels.
    #[arg(long, default_value_t = 320)]
    width: u32,

    /// Surface height in logical pixels.
    #[arg(long, default_value_t = 180)]
    height: u32,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Host viewport width in logical pixels (below 768 disables the pointer).
    #[arg(long, default_value_t = 1920.0)]
    viewport_width: f64,

    /// Palette.
    #[arg(long, value_enum, default_value_t = ThemeChoice::Dark)]
    theme: ThemeChoice,

    /// Tuning preset.
    #[arg(long, value_enum, default_value_t = VariantChoice::FadeIn)]
    variant: VariantChoice,

    /// JSON file overriding fields of the preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the twinkle phases.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Pointer position `x,y` (logical pixels), entered before the first frame.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<dotfield::Point>,

    /// Background colour (`#RRGGBB` or `#RRGGBBAA`); transparent when omitted.
    #[arg(long)]
    background: Option<String>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Ticks to run before capturing.
    #[arg(long, default_value_t = 60)]
    ticks: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Host frames to run.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Frame at which the pointer leaves the surface.
    #[arg(long)]
    leave_at: Option<u64>,

    /// First frame during which the surface is scrolled out of view.
    #[arg(long, requires = "hide_to")]
    hide_from: Option<u64>,

    /// Frame at which the surface is visible again.
    #[arg(long, requires = "hide_from")]
    hide_to: Option<u64>,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    Light,
    Dark,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantChoice {
    Classic,
    FadeIn,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
    }
}

fn parse_point(s: &str) -> Result<dotfield::Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(dotfield::Point::new(x, y))
}

impl SceneArgs {
    fn options(&self) -> anyhow::Result<dotfield::DotFieldOptions> {
        let theme = match self.theme {
            ThemeChoice::Light => dotfield::Theme::Light,
            ThemeChoice::Dark => dotfield::Theme::Dark,
        };
        let variant = match self.variant {
            VariantChoice::Classic => dotfield::Variant::Classic,
            VariantChoice::FadeIn => dotfield::Variant::FadeIn,
        };
        let preset = dotfield::DotFieldOptions::preset(theme, variant);

        let Some(path) = &self.config else {
            return Ok(preset);
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        dotfield::DotFieldOptions::from_json_over(&json, &preset)
            .with_context(|| format!("apply config '{}'", path.display()))
    }

    fn env(&self) -> dotfield::HostEnv {
        dotfield::HostEnv {
            size: dotfield::SurfaceSize::from_logical(
                f64::from(self.width),
                f64::from(self.height),
                self.dpr,
            ),
            device_pixel_ratio: self.dpr,
            viewport_width: self.viewport_width,
        }
    }

    fn surface(&self) -> anyhow::Result<dotfield::CpuSurface> {
        let clear = self
            .background
            .as_deref()
            .map(dotfield::Rgba8::from_hex)
            .transpose()
            .context("parse --background")?
            .map(|c| [c.r, c.g, c.b, c.a]);
        let opts = dotfield::CpuSurfaceOpts::default().with_clear_rgba(clear);
        Ok(dotfield::CpuSurface::new(self.env().size, opts)?)
    }

    fn animator(&self) -> anyhow::Result<dotfield::Animator> {
        Ok(dotfield::Animator::with_seed(
            self.options()?,
            self.env(),
            self.seed,
        )?)
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut surface = args.scene.surface()?;
    let mut animator = args.scene.animator()?;
    if let Some(p) = args.scene.pointer {
        animator.handle_pointer(dotfield::PointerEvent::Enter);
        animator.handle_pointer(dotfield::PointerEvent::Move(p));
    }

    for _ in 0..args.ticks {
        animator.tick(&mut surface)?;
    }
    let frame = surface.readback()?;
    dotfield::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let mut surface = args.scene.surface()?;
    let animator = args.scene.animator()?;

    let mut script = dotfield::PreviewScript::new();
    if let Some(p) = args.scene.pointer {
        script = script
            .at(0, dotfield::ScriptAction::Pointer(dotfield::PointerEvent::Enter))
            .at(
                0,
                dotfield::ScriptAction::Pointer(dotfield::PointerEvent::Move(p)),
            );
    }
    if let Some(at) = args.leave_at {
        script = script.at(
            at,
            dotfield::ScriptAction::Pointer(dotfield::PointerEvent::Leave),
        );
    }
    if let (Some(from), Some(to)) = (args.hide_from, args.hide_to) {
        anyhow::ensure!(from <= to, "--hide-from must not be after --hide-to");
        script = script
            .at(from, dotfield::ScriptAction::Hide)
            .at(to, dotfield::ScriptAction::Show);
    }

    let mut gate = dotfield::VisibilityGate::new(dotfield::ManualScheduler::new());
    gate.show(|| Ok(animator))?;

    let mut sink = dotfield::PngSequenceSink::new(&args.out_dir);
    let stats = dotfield::run_preview(&mut gate, &mut surface, &script, args.frames, &mut sink)?;

    eprintln!(
        "wrote {} frames to {} ({} suspended, {} skipped)",
        stats.rendered,
        args.out_dir.display(),
        stats.suspended,
        stats.skipped
    );
    Ok(())
}
