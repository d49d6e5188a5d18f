//! Weighted sampling without replacement, one position at a time.
//!
//! Position `base` is played out among the unplaced suffix `base..n`, where
//! each element wins with probability proportional to its weight; the winner is
//! swapped into place and the process repeats on the remaining suffix. This
//! yields an out-of-order factor of `1 - ln 2 ≈ 31%`, where 0% means sorted by
//! weight and 50% means uniformly random.
//!
//! Both algorithms take `O(n^2)` time and `O(1)` additional space. They are
//! not recommended for more than ~100 elements, see
//! [`IN_PLACE_RECOMMENDED_MAX_LEN`](crate::strategy::IN_PLACE_RECOMMENDED_MAX_LEN).
//!
//! There is no implicit default random source: every function borrows the
//! generator it draws from. Pass `&mut rand::thread_rng()` for the default
//! one, or use [`Strategy::apply_with_thread_rng`](crate::strategy::Strategy::apply_with_thread_rng)
//! and [`WeightedShuffle::weighted_shuffle_with_thread_rng`](crate::api::WeightedShuffle::weighted_shuffle_with_thread_rng).
use crate::error::{check_weight, WeightError};
use crate::fisher_yates::fisher_yates;
use crate::permutable::Permutable;
use crate::random::gen_unit;
use log::{debug, error, warn};
use rand::Rng;

/// Reorders `data` such that elements with higher weight are more likely to be
/// placed in front. Elements of weight zero are only selected after all
/// positive weight is used up, i.e. they end up behind all other elements.
///
/// The weight function receives the live sequence and an index into it, i.e.
/// it has to report the weight of whatever element currently is at that index.
///
/// # Errors
/// [`WeightError::InvalidWeight`] if any weight is negative, NaN or infinite;
/// this is detected before the first swap. [`WeightError::NegativeWeightSum`]
/// if a selected weight exceeds the weight that was left to distribute by
/// more than rounding can explain, i.e. the weight function reported values
/// that are inconsistent with the initial ones. Rounding drift alone never
/// causes an error: if the running sum dips below zero, it is recomputed from
/// the unplaced elements.
///
/// # Example
/// ```
/// use weighted_shuffle::in_place::weighted_order_in_place;
///
/// let mut data = vec![0.0, 1.0, 2.0, 3.0, 4.0];
/// weighted_order_in_place(&mut rand::thread_rng(), &mut data, |d, i| d[i]).unwrap();
///
/// assert_eq!(data[4], 0.0);
/// ```
pub fn weighted_order_in_place<R, S, W>(rng: &mut R, data: &mut S, weight: W) -> Result<(), WeightError>
where
    R: Rng + ?Sized,
    S: Permutable + ?Sized,
    W: FnMut(&S, usize) -> f64,
{
    select_in_place(rng, data, weight, ZeroTail::Keep)
}

/// As [`weighted_order_in_place`], but as soon as only elements of weight zero
/// remain, they are arranged in a uniformly random order instead.
///
/// # Example
/// ```
/// use weighted_shuffle::in_place::weighted_shuffle_in_place;
///
/// let mut data = vec![0, 0, 0, 5, 0, 0, 7];
/// weighted_shuffle_in_place(&mut rand::thread_rng(), &mut data, |d, i| d[i] as f64).unwrap();
///
/// assert!(data[..2].iter().all(|&x| x > 0));
/// ```
pub fn weighted_shuffle_in_place<R, S, W>(rng: &mut R, data: &mut S, weight: W) -> Result<(), WeightError>
where
    R: Rng + ?Sized,
    S: Permutable + ?Sized,
    W: FnMut(&S, usize) -> f64,
{
    select_in_place(rng, data, weight, ZeroTail::Shuffle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZeroTail {
    Keep,
    Shuffle,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    weight: f64,
}

fn select_in_place<R, S, W>(
    rng: &mut R,
    data: &mut S,
    mut weight: W,
    zero_tail: ZeroTail,
) -> Result<(), WeightError>
where
    R: Rng + ?Sized,
    S: Permutable + ?Sized,
    W: FnMut(&S, usize) -> f64,
{
    let n = data.len();
    if n <= 1 {
        return Ok(());
    }

    let total_weight = remaining_weight(&*data, &mut weight, 0)?;
    let mut weight_sum = total_weight;

    for base in 0..n {
        let target = gen_unit(rng) * weight_sum;

        let Some(selected) = draw_candidate(&*data, &mut weight, base, target)? else {
            // no positive weight left in `base..n`; further draws cannot move anything
            debug!("only zero weights left after {} of {} elements", base, n);
            if zero_tail == ZeroTail::Shuffle {
                fisher_yates(rng, data, base..n);
            }
            return Ok(());
        };

        data.swap_two(base, selected.index);

        weight_sum -= selected.weight;
        if weight_sum < 0.0 {
            let tracked = weight_sum;
            weight_sum = remaining_weight(&*data, &mut weight, base + 1)?;

            // rounding can push the tracked sum slightly below zero; anything
            // beyond the accumulated rounding error of `n` subtractions means
            // the selected weight exceeded what was left.
            if -tracked > rounding_tolerance(total_weight, n) {
                error!(
                    "remaining weight sum {} < 0 after placing {} of {} elements",
                    tracked,
                    base + 1,
                    n
                );
                return Err(WeightError::NegativeWeightSum { remaining: tracked });
            }

            debug!(
                "weight sum drifted to {}, recomputed {} for the last {} elements",
                tracked,
                weight_sum,
                n - base - 1
            );
        }
    }

    Ok(())
}

/// Sum of the validated weights of `from..n`.
fn remaining_weight<S, W>(data: &S, weight: &mut W, from: usize) -> Result<f64, WeightError>
where
    S: Permutable + ?Sized,
    W: FnMut(&S, usize) -> f64,
{
    let mut sum = 0.0;
    for idx in from..data.len() {
        sum += check_weight(idx, weight(data, idx))?;
    }
    Ok(sum)
}

/// Upper bound on the rounding error accumulated by `n` additions and `n`
/// subtractions on a sum of magnitude `total`.
fn rounding_tolerance(total: f64, n: usize) -> f64 {
    4.0 * n as f64 * f64::EPSILON * total
}

/// Scans `base..n` subtracting weights from `target` and returns the first
/// element that drives it below zero. Returns `None` iff no element in the
/// scanned range has positive weight.
fn draw_candidate<S, W>(
    data: &S,
    weight: &mut W,
    base: usize,
    mut target: f64,
) -> Result<Option<Candidate>, WeightError>
where
    S: Permutable + ?Sized,
    W: FnMut(&S, usize) -> f64,
{
    let mut last_positive = None;

    for index in base..data.len() {
        let w = check_weight(index, weight(data, index))?;

        target -= w;
        if target < 0.0 {
            return Ok(Some(Candidate { index, weight: w }));
        }

        if w > 0.0 {
            last_positive = Some(Candidate { index, weight: w });
        }
    }

    // the tracked weight sum exceeds the actual one due to rounding
    if let Some(candidate) = last_positive {
        warn!(
            "weight sum drift: residual target {} at position {}, selecting index {}",
            target, base, candidate.index
        );
    }

    Ok(last_positive)
}
