use itertools::Itertools;

use crate::sample::FrequencyTable;
use crate::trim::TrimmedRange;
use crate::{Error, Result};

/// Unit-width density histogram of the kept part of a distribution.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    /// One density per bin; they sum to 1.
    pub densities: Vec<f64>,
    /// Half-integer bin edges, one more than there are bins.
    pub edges: Vec<f64>,
    /// Mean of the whole, untrimmed distribution.
    pub expected: f64,
    /// Odd values up to the cutoff, for axis labels.
    pub ticks: Vec<i32>,
}

impl Histogram {
    /// Bin centers paired with their densities.
    pub fn bins(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.edges
            .iter()
            .map(|e| (e + 0.5) as i32)
            .zip(self.densities.iter().copied())
    }

    #[must_use]
    pub fn peak(&self) -> f64 {
        self.densities.iter().copied().fold(0.0, f64::max)
    }
}

pub fn build_histogram(table: &FrequencyTable, range: TrimmedRange) -> Result<Histogram> {
    let expected = table.mean().ok_or(Error::EmptyDistribution)?;
    let first = table.min_value().ok_or(Error::EmptyDistribution)?;
    let kept: u64 = table
        .iter()
        .filter(|(&v, _)| range.contains(v))
        .map(|(_, &c)| c)
        .sum();
    if kept == 0 {
        return Err(Error::EmptyDistribution);
    }

    let densities = (first..=range.cutoff)
        .map(|v| table.count(v) as f64 / kept as f64)
        .collect_vec();
    let edges = (first..=range.cutoff + 1)
        .map(|v| f64::from(v) - 0.5)
        .collect_vec();
    let ticks = (1..=range.cutoff).step_by(2).collect_vec();

    Ok(Histogram {
        densities,
        edges,
        expected,
        ticks,
    })
}
