//! Umbrella crate for the `edgegrad` workspace.
//!
//! Re-exports the raster primitives, the Sobel kernel and strip processor,
//! and the strip-parallel driver.

pub use eg_core::*;
pub use eg_par::*;
pub use eg_sobel::*;
