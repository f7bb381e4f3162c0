//! Packed BGR raster primitives shared by the `edgegrad` crates.
//!
//! ## Pixel Format
//! Every raster is 3 bytes per pixel in blue-green-red order with no alpha.
//!
//! ## Stride
//! Rasters use byte stride: `stride` is the distance, in bytes, between
//! adjacent row starts and must be at least `width * 3`. Rows may carry
//! alignment padding after their last pixel. A borrowed view only needs the
//! last row's pixel bytes, so views over the tail of a padded buffer are
//! accepted.
//!
//! ## Pixel Access
//! [`PixelSource`] is the accessor abstraction consumed by the convolution
//! code. [`RasterView`] implements it directly over the packed bytes; other
//! image containers can implement it to reuse the same processing path.

mod error;
mod pixel;
mod raster;

pub use error::Error;
pub use pixel::{Bgr8, PixelSource};
pub use raster::{BYTES_PER_PIXEL, Raster, RasterView, RasterViewMut, aligned_stride};
