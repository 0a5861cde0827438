use std::{
    cell::RefCell,
    fs::File,
    io::{BufReader, Read as _},
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use framereel::vello_cpu::kurbo::{Affine, BezPath, Point};
use framereel::{
    Frame, Options, PacedScheduler, RasterSurface, Recorder, Rgba8, SettingsPatch, Size, Surface,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "framereel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record the demo animation into a zip of PNG frames.
    Record(RecordArgs),
    /// Run the demo animation in real time without capturing.
    Preview(LoopArgs),
    /// List the frames of a recorded archive.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct LoopArgs {
    /// Settings JSON; command-line flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Surface height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Number of frames to run (default 60).
    #[arg(long)]
    frames: Option<i64>,

    /// Frame rate.
    #[arg(long)]
    fps: Option<f64>,

    /// Clear color (CSS syntax, e.g. `#102030` or `rgb(16, 32, 48)`).
    #[arg(long)]
    color: Option<String>,

    /// Clear the surface before each frame.
    #[arg(long)]
    clear: bool,
}

#[derive(Parser, Debug)]
struct RecordArgs {
    #[command(flatten)]
    common: LoopArgs,

    /// Output zip path.
    #[arg(long, default_value = framereel::DEFAULT_ARCHIVE_NAME)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Archive to inspect.
    #[arg(long = "in")]
    in_path: PathBuf,
}

const DEFAULT_CLI_FRAMES: i64 = 60;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Record(args) => cmd_record(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn read_settings_json(path: &Path) -> anyhow::Result<SettingsPatch> {
    let f = File::open(path).with_context(|| format!("open settings '{}'", path.display()))?;
    let patch: SettingsPatch = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse settings JSON '{}'", path.display()))?;
    Ok(patch)
}

impl LoopArgs {
    /// Config file first, then flags. A missing frame limit falls back to
    /// [`DEFAULT_CLI_FRAMES`] so the command always terminates.
    fn settings_patch(&self) -> anyhow::Result<SettingsPatch> {
        let base = SettingsPatch {
            frames: Some(DEFAULT_CLI_FRAMES),
            ..SettingsPatch::default()
        };
        let file = match &self.config {
            Some(path) => read_settings_json(path)?,
            None => SettingsPatch::default(),
        };
        let size = match (self.width, self.height) {
            (None, None) => None,
            (w, h) => {
                let current = file.size.unwrap_or(Size::new(1024, 1024));
                Some(Size::new(
                    w.unwrap_or(current.width),
                    h.unwrap_or(current.height),
                ))
            }
        };
        let flags = SettingsPatch {
            record: None,
            clear: self.clear.then_some(true),
            size,
            frames: self.frames,
            color: self.color.clone(),
            fps: self.fps,
        };
        let patch = base.overlay(file).overlay(flags);
        if patch.frames.is_some_and(|n| n <= 0) {
            anyhow::bail!("the command line needs a positive frame count");
        }
        Ok(patch)
    }
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let mut patch = args.common.settings_patch()?;
    patch.record = Some(true);

    let mut rec = Recorder::raster()?;
    rec.options(patch)?;
    let out = args.out.clone();
    let saved = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&saved);
    rec.options(Options::new().on_complete(move |archive| {
        let res = framereel::save_archive(&archive, &out);
        *slot.borrow_mut() = Some(res.map(|()| archive.len()));
    }))?;
    rec.draw(draw_demo);
    rec.start()?;
    rec.run()?;

    match saved.borrow_mut().take() {
        Some(Ok(n)) => {
            println!("wrote {n} frames to {}", args.out.display());
            Ok(())
        }
        Some(Err(e)) => {
            Err(anyhow::Error::new(e).context(format!("save '{}'", args.out.display())))
        }
        None => anyhow::bail!("no frames were captured"),
    }
}

fn cmd_preview(args: LoopArgs) -> anyhow::Result<()> {
    let mut patch = args.settings_patch()?;
    patch.record = Some(false);
    let fps = patch.fps.unwrap_or(60.0);

    let mut rec = Recorder::with_scheduler(
        RasterSurface::new(Size::new(1024, 1024))?,
        PacedScheduler::with_rate(fps),
    )?;
    rec.options(patch)?;
    rec.draw(|f| {
        draw_demo(f);
        tracing::info!(frame = f.index().0, time_ms = f.time_ms(), "preview frame");
    });
    rec.start()?;
    rec.run()?;
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let f = File::open(&args.in_path)
        .with_context(|| format!("open archive '{}'", args.in_path.display()))?;
    let mut zip = zip::ZipArchive::new(BufReader::new(f))
        .with_context(|| format!("read archive '{}'", args.in_path.display()))?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        let img = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
            .with_context(|| format!("decode '{}'", entry.name()))?;
        println!(
            "{}\t{}x{}\t{} bytes",
            entry.name(),
            img.width(),
            img.height(),
            bytes.len()
        );
    }
    println!("{} frames", zip.len());
    Ok(())
}

/// A square orbiting the center while it spins, one turn per second.
fn draw_demo(f: &mut Frame<'_, RasterSurface>) {
    let Size { width, height } = f.size();
    let (w, h) = (f64::from(width), f64::from(height));
    let t = f.time_ms() / 1000.0;
    let angle = t * std::f64::consts::TAU;

    let side = w.min(h) * 0.2;
    let radius = w.min(h) * 0.3;
    let center = Point::new(w / 2.0 + radius * angle.cos(), h / 2.0 + radius * angle.sin());

    let mut square = BezPath::new();
    square.move_to((-side / 2.0, -side / 2.0));
    square.line_to((side / 2.0, -side / 2.0));
    square.line_to((side / 2.0, side / 2.0));
    square.line_to((-side / 2.0, side / 2.0));
    square.close_path();

    let hue = (t.fract() * 255.0) as u8;
    f.fill_path(
        &square,
        Affine::translate(center.to_vec2()) * Affine::rotate(angle),
        Rgba8::rgb(hue, 64, 255 - hue),
    );
}
