//! Strip-parallel driver for the fixed Sobel filter.
//!
//! Partition policy:
//! - Input rows `[1, height - 1)` are split into `threads` contiguous strips of
//!   `workload = (height - 2) / threads` rows.
//! - Strip `i` starts at row 1 when `i == 0` and at `i * workload` otherwise;
//!   the last strip runs to `height - 1` and absorbs the remainder.
//! - Empty strips are dropped, and `threads` is capped at `height - 2`.
//!
//! Output ownership:
//! - One output raster is allocated per run. Before any job starts it is
//!   split into disjoint row bands, one per strip, so jobs never share a
//!   writable byte and need no locking.
//! - The raster is returned only after every job has finished.

mod driver;
mod partition;
mod schedule;

pub use driver::{SobelConfig, sobel, sobel_strips};
pub use partition::{Strip, partition_rows};
pub use schedule::{Schedule, StripJob, run_jobs};
