use log::debug;

use crate::sample::FrequencyTable;
use crate::{Error, Result, TAIL_FRACTION};

/// Display range of a distribution: every total up to `cutoff` is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrimmedRange {
    pub cutoff: i32,
}

impl TrimmedRange {
    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        value <= self.cutoff
    }
}

/// Finds the cutoff that drops roughly the top 1% of samples.
///
/// Counts are accumulated from the highest total down; the first total at
/// which the running count reaches `ceil(repeats * 0.01)` is the cutoff, so
/// the totals above it hold fewer samples than that threshold.
pub fn trim_tail(table: &FrequencyTable, repeats: usize) -> Result<TrimmedRange> {
    if table.is_empty() {
        return Err(Error::EmptyDistribution);
    }
    let threshold = tail_threshold(repeats);
    let mut tail = 0u64;
    for (&value, &count) in table.iter().rev() {
        tail += count;
        if tail >= threshold {
            debug!("trimmed tail above {value} ({} of {repeats} samples dropped)", tail - count);
            return Ok(TrimmedRange { cutoff: value });
        }
    }
    Err(Error::EmptyDistribution)
}

fn tail_threshold(repeats: usize) -> u64 {
    ((repeats as f64 * TAIL_FRACTION).ceil() as u64).max(1)
}
