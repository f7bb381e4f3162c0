//! Strip-addressable valid convolution.
//!
//! A strip is the half-open input row range `[lower, upper)` whose pixels are
//! used as neighborhood centers. Evaluating it reads input rows
//! `lower - 1 ..= upper` and writes `upper - lower` output rows, the first of
//! which lands at offset 0 of the caller's output slice.

use eg_core::{BYTES_PER_PIXEL, Error, PixelSource, Raster};

use crate::kernel::{Neighborhood, gradient};

/// Output size of a valid 3x3 convolution over a `width x height` input.
pub fn output_dims(width: usize, height: usize) -> Result<(usize, usize), Error> {
    if width < 3 || height < 3 {
        return Err(Error::ImageTooSmall { width, height });
    }
    Ok((width - 2, height - 2))
}

/// Neighborhood centered on `(x, y)`; pixel `[dx][dy]` is input
/// `(x + dx - 1, y + dy - 1)`.
///
/// Requires `1 <= x < width - 1` and `1 <= y < height - 1`.
#[inline]
pub fn gather<S: PixelSource + ?Sized>(src: &S, x: usize, y: usize) -> Neighborhood {
    let (x0, y0) = (x - 1, y - 1);
    core::array::from_fn(|dx| core::array::from_fn(|dy| src.fetch(x0 + dx, y0 + dy)))
}

/// Fills output rows for input rows `[lower, upper)`.
///
/// `output` starts at the strip's first output row and holds rows of
/// `output_stride` bytes; the last row may stop after its pixel bytes.
/// Nothing is written unless every precondition holds.
pub fn process_strip<S: PixelSource + ?Sized>(
    input: &S,
    output: &mut [u8],
    output_stride: usize,
    lower: usize,
    upper: usize,
) -> Result<(), Error> {
    let (out_w, _) = output_dims(input.width(), input.height())?;

    if lower < 1 || upper > input.height() - 1 || lower >= upper {
        return Err(Error::InvalidStrip {
            lower,
            upper,
            height: input.height(),
        });
    }

    let out_row_bytes = out_w * BYTES_PER_PIXEL;
    if output_stride < out_row_bytes {
        return Err(Error::InvalidStride);
    }

    let rows = upper - lower;
    let required = (rows - 1) * output_stride + out_row_bytes;
    if output.len() < required {
        return Err(Error::SizeMismatch {
            expected: required,
            actual: output.len(),
        });
    }

    for y in lower..upper {
        let start = (y - lower) * output_stride;
        let out_row = &mut output[start..start + out_row_bytes];
        for (dst, x) in out_row
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .zip(1..input.width() - 1)
        {
            let px = gradient(&gather(input, x, y));
            dst.copy_from_slice(&px.to_bytes());
        }
    }

    Ok(())
}

/// Single-worker run over the whole image.
pub fn process_full<S: PixelSource + ?Sized>(input: &S) -> Result<Raster, Error> {
    let (out_w, out_h) = output_dims(input.width(), input.height())?;
    let mut out = Raster::new(out_w, out_h);
    let stride = out.stride();
    process_strip(input, out.data_mut(), stride, 1, input.height() - 1)?;
    Ok(out)
}
