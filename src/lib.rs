mod analysis;
mod command;
mod histogram;
mod pool;
pub mod print;
mod sample;
mod source;
mod trim;
mod wild;

pub use analysis::{Analysis, Panel};
pub use command::{respond, Command};
pub use histogram::{build_histogram, Histogram};
pub use pool::{resolve_roll, Pool, Roll};
pub use sample::{sample_distribution, Distribution, FrequencyTable, Sampler};
pub use source::{Face, FaceSource, CRIT_FACE, EXPLODE_FACE, FACES};
pub use trim::{trim_tail, TrimmedRange};
pub use wild::roll_wild;

use thiserror::Error;

pub const DEFAULT_REPEATS: usize = 10_000;
pub const DEFAULT_MAX_DICE: usize = 6;
/// Largest pool a single roll accepts.
pub const MAX_DICE: usize = 1_000;
pub const MAX_EXPLOSIONS: usize = 10_000;
/// Share of samples dropped from the top of a distribution for display.
pub const TAIL_FRACTION: f64 = 0.01;

pub type Result<T> = ::core::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("dice count must be between 1 and {max}, got {0}", max = MAX_DICE)]
    InvalidDiceCount(usize),
    #[error("repeats must be at least 1, got {0}")]
    InvalidRepeats(usize),
    #[error("unrecognized format: {0:?}")]
    MalformedInput(String),
    #[error("empty distribution")]
    EmptyDistribution,
    #[error("wild die exploded more than {0} times")]
    ExhaustedRecursion(usize),
    #[error("roll total overflows with {0} pips")]
    TotalOverflow(i32),
}
