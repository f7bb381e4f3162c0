use std::num::NonZeroUsize;
use std::thread;

use eg_core::{Error, PixelSource, Raster, RasterViewMut};
use eg_sobel::{output_dims, process_strip};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Schedule, Strip, StripJob, partition_rows, run_jobs};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SobelConfig {
    /// Requested number of strips. Capped at the number of output rows.
    pub threads: usize,
    pub schedule: Schedule,
}

impl Default for SobelConfig {
    fn default() -> Self {
        Self {
            threads: thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            schedule: Schedule::default(),
        }
    }
}

/// Gradient image of `input`, computed strip by strip.
///
/// The result is byte-identical to [`eg_sobel::process_full`] for every
/// thread count and schedule.
pub fn sobel<S>(input: &S, cfg: &SobelConfig) -> Result<Raster, Error>
where
    S: PixelSource + Sync + ?Sized,
{
    output_dims(input.width(), input.height())?;
    let strips = partition_rows(input.height(), cfg.threads)?;
    sobel_strips(input, &strips, cfg.schedule)
}

/// Gradient image of `input` over a precomputed strip plan.
///
/// `strips` must tile `[1, height - 1)` in order, as
/// [`partition_rows`] returns them.
pub fn sobel_strips<S>(input: &S, strips: &[Strip], schedule: Schedule) -> Result<Raster, Error>
where
    S: PixelSource + Sync + ?Sized,
{
    let (out_w, out_h) = output_dims(input.width(), input.height())?;
    debug!(
        "sobel {}x{} -> {out_w}x{out_h}: {} strips, {schedule:?}",
        input.width(),
        input.height(),
        strips.len(),
    );

    let mut out = Raster::new(out_w, out_h);
    let stride = out.stride();
    let jobs = assign_rows(out.as_view_mut(), strips, input.height())?;

    run_jobs(jobs, schedule, |mut job: StripJob<'_>| {
        process_strip(
            input,
            job.output.bytes_mut(),
            stride,
            job.strip.lower,
            job.strip.upper,
        )
    })?;

    Ok(out)
}

/// Hands each strip the output rows it owns, in order. Every output row
/// must be owned by exactly one strip.
fn assign_rows<'a>(
    mut rest: RasterViewMut<'a>,
    strips: &[Strip],
    height: usize,
) -> Result<Vec<StripJob<'a>>, Error> {
    let mut jobs = Vec::with_capacity(strips.len());
    let mut next_row = 0;

    for &strip in strips {
        if strip.lower < 1
            || strip.lower >= strip.upper
            || strip.output_rows().start != next_row
        {
            return Err(Error::InvalidStrip {
                lower: strip.lower,
                upper: strip.upper,
                height,
            });
        }

        let (output, tail) = rest.split_at_row(strip.rows())?;
        jobs.push(StripJob { strip, output });
        rest = tail;
        next_row += strip.rows();
    }

    if rest.height() != 0 {
        return Err(Error::InvalidStrip {
            lower: next_row + 1,
            upper: height - 1,
            height,
        });
    }

    Ok(jobs)
}
