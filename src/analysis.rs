use std::fmt;

use bon::Builder;
use log::info;

use crate::histogram::Histogram;
use crate::sample::Sampler;
use crate::source::FaceSource;
use crate::{Error, Result, DEFAULT_MAX_DICE, DEFAULT_REPEATS};

/// Distribution grid over every pool size from one die up to `max_dice`.
#[derive(Builder, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Analysis {
    #[builder(default = DEFAULT_MAX_DICE)]
    max_dice: usize,
    #[builder(default = DEFAULT_REPEATS)]
    repeats: usize,
    #[builder(default = true)]
    crit_fail: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub dice: usize,
    pub crit_fail: bool,
    pub histogram: Histogram,
}

impl Default for Analysis {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Analysis {
    pub fn run<S>(&self, source: S) -> Result<Vec<Panel>>
    where
        S: FaceSource,
    {
        if self.max_dice < 1 {
            return Err(Error::InvalidDiceCount(self.max_dice));
        }
        info!(
            "analyzing 1..={}D, {} rolls each, crit_fail={}",
            self.max_dice, self.repeats, self.crit_fail
        );

        let mut sampler = Sampler::builder()
            .repeats(self.repeats)
            .crit_fail(self.crit_fail)
            .build(source);
        (1..=self.max_dice)
            .map(|dice| -> Result<Panel> {
                let histogram = sampler.sample(dice)?.histogram()?;
                Ok(Panel {
                    dice,
                    crit_fail: self.crit_fail,
                    histogram,
                })
            })
            .collect()
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.crit_fail { "w" } else { "w/o" };
        write!(
            f,
            "{}D {mode} Crit-1 E={:.3}",
            self.dice, self.histogram.expected
        )
    }
}
