use std::ops::Range;

use eg_core::Error;
use log::{debug, warn};
use serde::Serialize;

/// Input rows `[lower, upper)` used as neighborhood centers by one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Strip {
    pub lower: usize,
    pub upper: usize,
}

impl Strip {
    pub fn rows(&self) -> usize {
        self.upper - self.lower
    }

    /// Output rows written by this strip.
    pub fn output_rows(&self) -> Range<usize> {
        self.lower - 1..self.upper - 1
    }
}

pub fn partition_rows(height: usize, threads: usize) -> Result<Vec<Strip>, Error> {
    if threads == 0 {
        return Err(Error::InvalidThreadCount);
    }
    if height < 3 {
        return Err(Error::InvalidStrip {
            lower: 1,
            upper: height.saturating_sub(1),
            height,
        });
    }

    let rows = height - 2;
    let count = threads.min(rows);
    if count < threads {
        warn!("capping {threads} threads to {count}: only {rows} output rows");
    }

    let workload = rows / count;
    let mut strips = Vec::with_capacity(count);
    for i in 0..count {
        let lower = if i == 0 { 1 } else { i * workload };
        let upper = if i + 1 == count {
            height - 1
        } else {
            (i + 1) * workload
        };

        if lower < upper {
            strips.push(Strip { lower, upper });
        } else {
            debug!("dropping empty strip {i} at row {lower}");
        }
    }

    Ok(strips)
}

#[cfg(test)]
mod tests {
    use eg_core::Error;

    use super::{Strip, partition_rows};

    fn s(lower: usize, upper: usize) -> Strip {
        Strip { lower, upper }
    }

    #[test]
    fn single_thread_takes_every_row() {
        assert_eq!(partition_rows(10, 1), Ok(vec![s(1, 9)]));
        assert_eq!(partition_rows(3, 1), Ok(vec![s(1, 2)]));
    }

    #[test]
    fn last_strip_absorbs_the_remainder() {
        assert_eq!(partition_rows(10, 3), Ok(vec![s(1, 2), s(2, 4), s(4, 9)]));
        assert_eq!(
            partition_rows(102, 4),
            Ok(vec![s(1, 25), s(25, 50), s(50, 75), s(75, 101)])
        );
    }

    #[test]
    fn empty_leading_strip_is_dropped() {
        assert_eq!(partition_rows(5, 3), Ok(vec![s(1, 2), s(2, 4)]));
    }

    #[test]
    fn threads_are_capped_by_output_rows() {
        assert_eq!(partition_rows(5, 64), partition_rows(5, 3));
    }

    #[test]
    fn strips_tile_the_valid_rows_exactly() {
        for height in 3..48 {
            for threads in 1..=height + 2 {
                let strips = partition_rows(height, threads).expect("valid partition");
                assert!(!strips.is_empty());
                assert_eq!(strips[0].lower, 1);
                assert_eq!(strips[strips.len() - 1].upper, height - 1);
                for pair in strips.windows(2) {
                    assert_eq!(pair[0].upper, pair[1].lower, "h={height} t={threads}");
                }
                assert!(strips.iter().all(|st| st.rows() > 0));
                assert!(strips.len() <= threads);
            }
        }
    }

    #[test]
    fn output_rows_are_shifted_by_one() {
        assert_eq!(s(4, 9).output_rows(), 3..8);
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        assert_eq!(partition_rows(10, 0), Err(Error::InvalidThreadCount));
        assert_eq!(
            partition_rows(2, 1),
            Err(Error::InvalidStrip {
                lower: 1,
                upper: 1,
                height: 2
            })
        );
    }
}
