//! Sobel edge gradients for image files.
//!
//! Decodes the input with `image`, repacks it as 3-byte BGR rows, runs the
//! strip-parallel driver and encodes the `(w - 2) x (h - 2)` result.
//!
//! Run from the workspace root:
//!   cargo run -p eg-cli --release -- --help
//!   RUST_LOG=debug cargo run -p eg-cli -- in.png out.png --threads 8

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use edgegrad::{
    BYTES_PER_PIXEL, Bgr8, PixelSource, Raster, Schedule, SobelConfig, Strip, aligned_stride,
    output_dims, partition_rows, process_full, sobel_strips,
};
use image::{Rgb, RgbImage};
use log::info;
use serde::Serialize;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "edgegrad-cli")]
#[command(about = "Compute a Sobel edge-gradient image")]
struct Cli {
    /// Image to read (any format the `image` crate decodes)
    input: PathBuf,

    /// Gradient image to write; format follows the extension
    output: PathBuf,

    /// Also run the per-pixel accessor path serially, save it here and fail
    /// if it differs from the strip-parallel result
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Number of strips (defaults to available parallelism)
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long, value_enum)]
    schedule: Option<ScheduleArg>,

    /// JSON file with `threads` and/or `schedule`; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON run summary here
    #[arg(long)]
    meta: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ScheduleArg {
    Serial,
    ScopedThreads,
    Rayon,
}

impl From<ScheduleArg> for Schedule {
    fn from(arg: ScheduleArg) -> Self {
        match arg {
            ScheduleArg::Serial => Schedule::Serial,
            ScheduleArg::ScopedThreads => Schedule::ScopedThreads,
            ScheduleArg::Rayon => Schedule::Rayon,
        }
    }
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct RunMeta {
    input: [usize; 2],
    output: [usize; 2],
    output_stride: usize,
    config: SobelConfig,
    strips: Vec<Strip>,
    /// Wall-clock time of the strip-parallel run, in milliseconds.
    elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_matches: Option<bool>,
}

// ── Pixel access ──────────────────────────────────────────────────────────────

/// Per-pixel accessor over the decoded RGB image.
struct RgbSource<'a>(&'a RgbImage);

impl PixelSource for RgbSource<'_> {
    fn width(&self) -> usize {
        self.0.width() as usize
    }

    fn height(&self) -> usize {
        self.0.height() as usize
    }

    fn fetch(&self, x: usize, y: usize) -> Bgr8 {
        let Rgb([r, g, b]) = *self.0.get_pixel(x as u32, y as u32);
        Bgr8::new(b, g, r)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    run(&cli)?;
    Ok(())
}

fn run(cli: &Cli) -> Result<RunMeta> {
    let cfg = resolve_config(cli)?;

    ensure_file_exists(&cli.input, "input")?;
    let rgb = image::open(&cli.input)
        .with_context(|| format!("decoding {}", cli.input.display()))?
        .to_rgb8();
    let input = rgb_to_bgr(&rgb)?;
    info!(
        "loaded {} ({}x{})",
        cli.input.display(),
        input.width(),
        input.height()
    );

    output_dims(input.width(), input.height())
        .with_context(|| format!("checking size of {}", cli.input.display()))?;
    let strips = partition_rows(input.height(), cfg.threads).context("planning strips")?;

    let start = Instant::now();
    let gradient = sobel_strips(&input.as_view(), &strips, cfg.schedule)
        .with_context(|| format!("running sobel on {}", cli.input.display()))?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
    info!(
        "sobel {}x{} in {elapsed_ms:.2} ms ({} strips, {:?})",
        gradient.width(),
        gradient.height(),
        strips.len(),
        cfg.schedule
    );

    save_bgr(&cli.output, &gradient)?;

    let reference_matches = match &cli.reference {
        Some(path) => {
            let start = Instant::now();
            let reference = process_full(&RgbSource(&rgb)).context("running reference path")?;
            info!(
                "reference path in {:.2} ms",
                start.elapsed().as_secs_f64() * 1e3
            );
            save_bgr(path, &reference)?;
            Some(reference.packed_pixels() == gradient.packed_pixels())
        }
        None => None,
    };

    let meta = RunMeta {
        input: [input.width(), input.height()],
        output: [gradient.width(), gradient.height()],
        output_stride: gradient.stride(),
        config: cfg,
        strips,
        elapsed_ms,
        reference_matches,
    };
    if let Some(path) = &cli.meta {
        write_json(path, &meta)?;
    }

    check_reference(meta.reference_matches)?;
    Ok(meta)
}

fn check_reference(matches: Option<bool>) -> Result<()> {
    if matches == Some(false) {
        bail!("strip-parallel output differs from the reference path");
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<SobelConfig> {
    let mut cfg = match &cli.config {
        Some(path) => {
            ensure_file_exists(path, "config")?;
            read_json::<SobelConfig>(path)?
        }
        None => SobelConfig::default(),
    };

    if let Some(threads) = cli.threads {
        cfg.threads = threads;
    }
    if let Some(schedule) = cli.schedule {
        cfg.schedule = schedule.into();
    }

    Ok(cfg)
}

fn rgb_to_bgr(rgb: &RgbImage) -> Result<Raster> {
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let stride = aligned_stride(width);
    let mut data = vec![0u8; stride * height];

    if width > 0 {
        for (src, dst) in rgb
            .as_raw()
            .chunks_exact(width * BYTES_PER_PIXEL)
            .zip(data.chunks_exact_mut(stride))
        {
            for (s, d) in src
                .chunks_exact(BYTES_PER_PIXEL)
                .zip(dst.chunks_exact_mut(BYTES_PER_PIXEL))
            {
                d.copy_from_slice(&[s[2], s[1], s[0]]);
            }
        }
    }

    Raster::from_vec(width, height, stride, data).context("packing decoded image as BGR")
}

fn save_bgr(path: &Path, raster: &Raster) -> Result<()> {
    let view = raster.as_view();
    let rgb = RgbImage::from_fn(raster.width() as u32, raster.height() as u32, |x, y| {
        let px = view.fetch(x as usize, y as usize);
        Rgb([px.r, px.g, px.b])
    });
    rgb.save(path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> serde::Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
