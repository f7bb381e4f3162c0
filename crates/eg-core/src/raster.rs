use crate::{Bgr8, Error, PixelSource};

pub const BYTES_PER_PIXEL: usize = 3;

/// Row stride for `width` pixels, rounded up to a 4-byte boundary.
pub fn aligned_stride(width: usize) -> usize {
    (width * BYTES_PER_PIXEL).next_multiple_of(4)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Zero-filled raster with a 4-byte aligned stride.
    pub fn new(width: usize, height: usize) -> Self {
        let stride = aligned_stride(width);
        let len = stride.checked_mul(height).expect("raster size overflow");
        Self {
            width,
            height,
            stride,
            data: vec![0; len],
        }
    }

    pub fn from_vec(
        width: usize,
        height: usize,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Self, Error> {
        if stride < row_bytes(width)? {
            return Err(Error::InvalidStride);
        }

        let expected = stride.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Packs `pixels` (row-major, `width * height` entries) with an aligned
    /// stride.
    pub fn from_pixels(width: usize, height: usize, pixels: &[Bgr8]) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: pixels.len(),
        })?;
        if pixels.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let mut out = Self::new(width, height);
        if width == 0 {
            return Ok(out);
        }

        let mut view = out.as_view_mut();
        for (y, src) in pixels.chunks_exact(width).enumerate() {
            for (dst, px) in view
                .row_mut(y)
                .chunks_exact_mut(BYTES_PER_PIXEL)
                .zip(src.iter())
            {
                dst.copy_from_slice(&px.to_bytes());
            }
        }

        Ok(out)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Bgr8> {
        self.as_view().get(x, y)
    }

    pub fn as_view(&self) -> RasterView<'_> {
        RasterView {
            width: self.width,
            height: self.height,
            stride: self.stride,
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> RasterViewMut<'_> {
        RasterViewMut {
            width: self.width,
            height: self.height,
            stride: self.stride,
            data: &mut self.data,
        }
    }

    /// Pixel rows without stride padding, for comparisons that must ignore
    /// padding bytes.
    pub fn packed_pixels(&self) -> Vec<u8> {
        let view = self.as_view();
        let mut out = Vec::with_capacity(view.row_bytes() * self.height);
        for y in 0..self.height {
            out.extend_from_slice(view.row(y));
        }
        out
    }
}

impl PixelSource for Raster {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn fetch(&self, x: usize, y: usize) -> Bgr8 {
        self.as_view().fetch(x, y)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RasterView<'a> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [u8],
}

impl<'a> RasterView<'a> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [u8],
    ) -> Result<Self, Error> {
        validate_layout(width, height, stride, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row_bytes(&self) -> usize {
        self.width * BYTES_PER_PIXEL
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Pixel bytes of row `y`, without padding.
    pub fn row(&self, y: usize) -> &'a [u8] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Bgr8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.fetch(x, y))
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == self.row_bytes()
    }
}

impl PixelSource for RasterView<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn fetch(&self, x: usize, y: usize) -> Bgr8 {
        let idx = y * self.stride + BYTES_PER_PIXEL * x;
        Bgr8::new(self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }
}

#[derive(Debug)]
pub struct RasterViewMut<'a> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a mut [u8],
}

impl<'a> RasterViewMut<'a> {
    pub fn from_slice_mut(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a mut [u8],
    ) -> Result<Self, Error> {
        validate_layout(width, height, stride, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row_bytes(&self) -> usize {
        self.width * BYTES_PER_PIXEL
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        let end = start + self.row_bytes();
        &mut self.data[start..end]
    }

    pub fn put(&mut self, x: usize, y: usize, px: Bgr8) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y * self.stride + BYTES_PER_PIXEL * x;
        self.data[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&px.to_bytes());
        true
    }

    /// Splits into rows `[0, y)` and `[y, height)`. Both halves keep the
    /// parent stride and own disjoint bytes.
    pub fn split_at_row(self, y: usize) -> Result<(RasterViewMut<'a>, RasterViewMut<'a>), Error> {
        let RasterViewMut {
            width,
            height,
            stride,
            data,
        } = self;

        if y > height {
            return Err(Error::SizeMismatch {
                expected: y,
                actual: height,
            });
        }

        let mid = (y * stride).min(data.len());
        let (top, bottom) = data.split_at_mut(mid);

        Ok((
            RasterViewMut {
                width,
                height: y,
                stride,
                data: top,
            },
            RasterViewMut {
                width,
                height: height - y,
                stride,
                data: bottom,
            },
        ))
    }

    pub fn as_view(&self) -> RasterView<'_> {
        RasterView {
            width: self.width,
            height: self.height,
            stride: self.stride,
            data: self.data,
        }
    }
}

fn row_bytes(width: usize) -> Result<usize, Error> {
    width
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(Error::InvalidStride)
}

fn validate_layout(width: usize, height: usize, stride: usize, len: usize) -> Result<(), Error> {
    if stride < row_bytes(width)? {
        return Err(Error::InvalidStride);
    }

    let min_len = min_required_len(width, height, stride).ok_or(Error::SizeMismatch {
        expected: usize::MAX,
        actual: len,
    })?;

    if len < min_len {
        return Err(Error::SizeMismatch {
            expected: min_len,
            actual: len,
        });
    }

    Ok(())
}

fn min_required_len(width: usize, height: usize, stride: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }

    let rows_before_last = height.checked_sub(1)?;
    let base = rows_before_last.checked_mul(stride)?;
    base.checked_add(width.checked_mul(BYTES_PER_PIXEL)?)
}
