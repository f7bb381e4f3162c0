//! Fixed 3x3 Sobel gradients over packed BGR rasters.
//!
//! Coordinates follow the input raster: output pixel `(x - 1, y - 1)` is the
//! gradient centered on input pixel `(x, y)`. Only pixels whose full 3x3
//! neighborhood lies inside the input produce output (valid convolution), so
//! a `w x h` input yields a `(w - 2) x (h - 2)` output.
//!
//! Per channel, the two kernel responses are combined as
//! `min(255, |vertical| + |horizontal|)`. This L1 form is kept exactly; it is
//! not the Euclidean gradient magnitude.
//!
//! [`strip::process_strip`] evaluates any horizontal band of output rows, so
//! disjoint bands of one output buffer can be filled concurrently.

pub mod kernel;
pub mod strip;

pub use kernel::{
    ChannelSums, GradientResponse, HORIZONTAL, Kernel3, Neighborhood, VERTICAL, gradient, respond,
};
pub use strip::{gather, output_dims, process_full, process_strip};
