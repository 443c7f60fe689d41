use bon::Builder;
use itertools::Itertools;
use log::trace;

use crate::source::{Face, FaceSource, CRIT_FACE};
use crate::wild::roll_wild;
use crate::{Error, Result, MAX_DICE};

/// A dice pool: one wild die plus `dice - 1` ordinary dice and a flat bonus.
#[derive(Builder, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pool {
    #[builder(start_fn)]
    dice: usize,
    #[builder(default = 0)]
    pips: i32,
    #[builder(default = true)]
    crit_fail: bool,
}

/// The outcome of one pool roll.
///
/// `static_rolls` and `wild` hold every face as rolled, while `total` already
/// accounts for the faces listed in `removed`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roll {
    pub total: i32,
    pub static_rolls: Vec<Face>,
    pub wild: Vec<Face>,
    pub pips: i32,
    pub removed: Vec<Face>,
}

impl Pool {
    /// Rolls the wild die first, then the ordinary dice.
    pub fn roll<S>(&self, source: &mut S) -> Result<Roll>
    where
        S: FaceSource + ?Sized,
    {
        if !(1..=MAX_DICE).contains(&self.dice) {
            return Err(Error::InvalidDiceCount(self.dice));
        }

        let wild = roll_wild(source)?;
        let static_rolls = source.roll_faces(self.dice - 1);

        let mut combined: Vec<Face> = static_rolls.iter().chain(&wild).copied().collect();
        let removed = if self.crit_fail && wild.last() == Some(&CRIT_FACE) {
            remove_crit(&mut combined)
        } else {
            Vec::new()
        };

        let total = i32::try_from(sum_faces(&combined))
            .ok()
            .and_then(|sum| sum.checked_add(self.pips))
            .ok_or(Error::TotalOverflow(self.pips))?;
        let roll = Roll {
            total,
            static_rolls,
            wild,
            pips: self.pips,
            removed,
        };
        trace!("rolled {roll:?}");
        Ok(roll)
    }
}

impl Roll {
    #[must_use]
    pub fn dice(&self) -> usize {
        self.static_rolls.len() + 1
    }

    #[must_use]
    pub fn crit_failed(&self) -> bool {
        !self.removed.is_empty()
    }

    #[must_use]
    pub fn total_without_crit(&self) -> i64 {
        sum_faces(&self.static_rolls) + sum_faces(&self.wild) + i64::from(self.pips)
    }
}

pub fn resolve_roll<S>(source: &mut S, dice: usize, pips: i32, crit_fail: bool) -> Result<Roll>
where
    S: FaceSource + ?Sized,
{
    Pool::builder(dice)
        .pips(pips)
        .crit_fail(crit_fail)
        .build()
        .roll(source)
}

// Drops one crit face and then one highest face, by value.
fn remove_crit(combined: &mut Vec<Face>) -> Vec<Face> {
    let mut removed = Vec::with_capacity(2);
    if let Some(i) = combined.iter().position(|&f| f == CRIT_FACE) {
        removed.push(combined.swap_remove(i));
    }
    if let Some(i) = combined.iter().position_max() {
        removed.push(combined.swap_remove(i));
    }
    removed
}

fn sum_faces(faces: &[Face]) -> i64 {
    faces.iter().map(|&f| i64::from(f)).sum()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::source::tests::Scripted;

    #[test]
    fn pool_all_threes() {
        let mut src = Scripted::constant(3);
        let roll = resolve_roll(&mut src, 3, 2, true).unwrap();
        assert_eq!(roll.static_rolls, vec![3, 3]);
        assert_eq!(roll.wild, vec![3]);
        assert_eq!(roll.total, 11);
        assert!(!roll.crit_failed());
    }

    #[test]
    fn pool_crit_removes_crit_and_highest() {
        let mut src = Scripted::new([1, 4]);
        let roll = resolve_roll(&mut src, 2, 0, true).unwrap();
        assert_eq!(roll.static_rolls, vec![4]);
        assert_eq!(roll.wild, vec![1]);
        assert_eq!(roll.removed, vec![1, 4]);
        assert_eq!(roll.total, 0);
        assert_eq!(roll.total_without_crit(), 5);
    }

    #[test]
    fn pool_exploding_wild_alone() {
        let mut src = Scripted::new([6, 6, 2]);
        let roll = resolve_roll(&mut src, 1, 0, true).unwrap();
        assert_eq!(roll.wild, vec![6, 6, 2]);
        assert!(roll.static_rolls.is_empty());
        assert_eq!(roll.total, 14);
    }

    #[test]
    fn pool_single_crit_die_totals_zero() {
        let mut src = Scripted::new([1]);
        let roll = resolve_roll(&mut src, 1, 0, true).unwrap();
        assert_eq!(roll.removed, vec![1]);
        assert_eq!(roll.total, 0);
    }

    #[test]
    fn pool_crit_keeps_pips() {
        let mut src = Scripted::new([1]);
        let roll = resolve_roll(&mut src, 1, 3, true).unwrap();
        assert_eq!(roll.total, 3);
    }

    #[test]
    fn pool_crit_can_remove_exploded_six() {
        // Wild 6, 1 with statics 2, 5: the 1 goes, then the wild six.
        let mut src = Scripted::new([6, 1, 2, 5]);
        let roll = resolve_roll(&mut src, 3, 0, true).unwrap();
        assert_eq!(roll.wild, vec![6, 1]);
        assert_eq!(roll.static_rolls, vec![2, 5]);
        assert_eq!(roll.removed, vec![1, 6]);
        assert_eq!(roll.total, 7);
    }

    #[test]
    fn pool_crit_removes_one_of_tied_max() {
        let mut src = Scripted::new([1, 5, 5, 2]);
        let roll = resolve_roll(&mut src, 4, 0, true).unwrap();
        assert_eq!(roll.removed, vec![1, 5]);
        assert_eq!(roll.total, 7);
    }

    #[test]
    fn pool_crit_removes_only_one_crit_face() {
        let mut src = Scripted::new([1, 1, 1]);
        let roll = resolve_roll(&mut src, 3, 0, true).unwrap();
        assert_eq!(roll.removed, vec![1, 1]);
        assert_eq!(roll.total, 1);
    }

    #[test]
    fn pool_crit_disabled() {
        let mut src = Scripted::new([1, 4]);
        let roll = resolve_roll(&mut src, 2, 0, false).unwrap();
        assert!(roll.removed.is_empty());
        assert_eq!(roll.total, 5);
    }

    #[test]
    fn pool_negative_pips() {
        let mut src = Scripted::constant(2);
        let roll = Pool::builder(2).pips(-5).build().roll(&mut src).unwrap();
        assert_eq!(roll.total, -1);
    }

    #[test]
    fn pool_rejects_zero_dice() {
        let mut src = Scripted::constant(3);
        assert_eq!(
            resolve_roll(&mut src, 0, 0, true),
            Err(Error::InvalidDiceCount(0))
        );
    }

    #[test]
    fn pool_rejects_oversized_pool() {
        let mut src = Scripted::constant(3);
        assert_eq!(
            resolve_roll(&mut src, 100_000_000_000, 0, true),
            Err(Error::InvalidDiceCount(100_000_000_000))
        );
        assert!(resolve_roll(&mut src, MAX_DICE, 0, true).is_ok());
    }

    #[test]
    fn pool_total_overflow_is_an_error() {
        let mut src = Scripted::constant(3);
        assert_eq!(
            resolve_roll(&mut src, 1, i32::MAX, true),
            Err(Error::TotalOverflow(i32::MAX))
        );
        let roll = resolve_roll(&mut src, 1, i32::MAX - 3, true).unwrap();
        assert_eq!(roll.total, i32::MAX);
        assert_eq!(roll.total_without_crit(), i64::from(i32::MAX));
    }

    #[test]
    fn pool_properties_over_seeds() {
        let mut rng = StdRng::seed_from_u64(42);
        for dice in 1..=8 {
            for _ in 0..500 {
                let plain = resolve_roll(&mut rng, dice, 2, false).unwrap();
                assert_eq!(plain.static_rolls.len(), dice - 1);
                assert!(!plain.wild.is_empty());
                assert_eq!(i64::from(plain.total), plain.total_without_crit());

                let crit = resolve_roll(&mut rng, dice, 2, true).unwrap();
                assert_eq!(crit.dice(), dice);
                if crit.wild.last() == Some(&CRIT_FACE) {
                    let n = crit.static_rolls.len() + crit.wild.len();
                    let expected = if n == 1 { 1 } else { 2 };
                    assert_eq!(crit.removed.len(), expected);
                    let removed = sum_faces(&crit.removed);
                    assert_eq!(i64::from(crit.total), crit.total_without_crit() - removed);
                } else {
                    assert!(crit.removed.is_empty());
                    assert_eq!(i64::from(crit.total), crit.total_without_crit());
                }
            }
        }
    }
}
