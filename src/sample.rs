use std::collections::btree_map::{self, Entry};
use std::collections::BTreeMap;

use bon::Builder;
use log::debug;
use rand::rngs::ThreadRng;

use crate::histogram::{build_histogram, Histogram};
use crate::pool::Pool;
use crate::source::FaceSource;
use crate::trim::{trim_tail, TrimmedRange};
use crate::{Error, Result, DEFAULT_REPEATS};

/// Occurrence counts of roll totals, ordered by total.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable(BTreeMap<i32, u64>);

#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {
    pub dice: usize,
    pub crit_fail: bool,
    pub repeats: usize,
    pub expected: f64,
    pub table: FrequencyTable,
}

#[derive(Debug, Builder)]
pub struct Sampler<S = ThreadRng>
where
    S: FaceSource,
{
    #[builder(finish_fn)]
    source: S,
    #[builder(default = DEFAULT_REPEATS)]
    repeats: usize,
    #[builder(default = true)]
    crit_fail: bool,
}

impl FrequencyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, value: i32) {
        match self.0.entry(value) {
            Entry::Vacant(e) => {
                e.insert(1);
            }
            Entry::Occupied(mut e) => {
                *e.get_mut() += 1;
            }
        }
    }

    #[must_use]
    pub fn count(&self, value: i32) -> u64 {
        self.0.get(&value).copied().unwrap_or(0)
    }

    /// Total number of recorded samples.
    #[must_use]
    pub fn samples(&self) -> u64 {
        self.0.values().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn min_value(&self) -> Option<i32> {
        self.0.keys().next().copied()
    }

    /// Mean over every recorded sample, `None` when nothing was recorded.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        let n = self.samples();
        if n == 0 {
            return None;
        }
        let s: f64 = self.0.iter().map(|(&v, &c)| f64::from(v) * c as f64).sum();
        Some(s / n as f64)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, i32, u64> {
        self.0.iter()
    }
}

impl FromIterator<i32> for FrequencyTable {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let mut table = Self::new();
        for value in iter {
            table.record(value);
        }
        table
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = (&'a i32, &'a u64);
    type IntoIter = btree_map::Iter<'a, i32, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S> Sampler<S>
where
    S: FaceSource,
{
    pub fn sample(&mut self, dice: usize) -> Result<Distribution> {
        let (table, expected) =
            sample_distribution(&mut self.source, dice, self.crit_fail, self.repeats)?;
        Ok(Distribution {
            dice,
            crit_fail: self.crit_fail,
            repeats: self.repeats,
            expected,
            table,
        })
    }
}

impl Distribution {
    pub fn trim(&self) -> Result<TrimmedRange> {
        trim_tail(&self.table, self.repeats)
    }

    pub fn histogram(&self) -> Result<Histogram> {
        build_histogram(&self.table, self.trim()?)
    }
}

/// Rolls the same pool `repeats` times and tallies the totals.
///
/// The expected value is taken over the whole sample, before any trimming.
pub fn sample_distribution<S>(
    source: &mut S,
    dice: usize,
    crit_fail: bool,
    repeats: usize,
) -> Result<(FrequencyTable, f64)>
where
    S: FaceSource + ?Sized,
{
    if repeats < 1 {
        return Err(Error::InvalidRepeats(repeats));
    }
    let pool = Pool::builder(dice).crit_fail(crit_fail).build();

    let mut table = FrequencyTable::new();
    let mut sum = 0i64;
    for _ in 0..repeats {
        let total = pool.roll(source)?.total;
        sum += i64::from(total);
        table.record(total);
    }

    let expected = sum as f64 / repeats as f64;
    debug!(
        "sampled {dice}D crit_fail={crit_fail}: {repeats} rolls, {} totals, E={expected:.3}",
        table.len()
    );
    Ok((table, expected))
}
