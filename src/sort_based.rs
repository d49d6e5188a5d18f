//! Weighted reordering by sorting on randomized keys.
//!
//! Each element receives the key `weight * u` with `u` drawn uniformly from
//! `[0, 1)` and the sequence is stably sorted by descending key. For two
//! weights `a <= b` the lighter element wins with probability `a / (2b)`, which
//! amounts to an out-of-order factor of 25% (0% means sorted by weight, 50%
//! means uniformly random).
//!
//! Both algorithms take `O(n log n)` time and `O(n)` auxiliary space. The
//! weight function is evaluated exactly once per element, before any element
//! is moved.
//!
//! There is no implicit default random source: every function borrows the
//! generator it draws from. Pass `&mut rand::thread_rng()` for the default
//! one, or use [`Strategy::apply_with_thread_rng`](crate::strategy::Strategy::apply_with_thread_rng)
//! and [`WeightedShuffle::weighted_shuffle_with_thread_rng`](crate::api::WeightedShuffle::weighted_shuffle_with_thread_rng).
use crate::error::{check_weight, WeightError};
use crate::fisher_yates::fisher_yates;
use crate::permutable::{apply_order, Permutable};
use crate::random::gen_unit;
use log::debug;
use rand::Rng;
use std::cmp::Ordering;

/// Reorders `data` such that elements with higher weight are more likely to be
/// placed in front.
///
/// Elements of weight zero all receive the key zero and therefore trail all
/// positive elements in their original relative order. Use
/// [`weighted_shuffle_sort`] if they should be shuffled instead.
///
/// # Errors
/// [`WeightError::InvalidWeight`] if any weight is negative, NaN or infinite.
/// All weights are read before the first swap, so `data` is unchanged in that
/// case.
///
/// # Example
/// ```
/// use weighted_shuffle::sort_based::weighted_order_sort;
///
/// let mut data: Vec<u32> = (0..1000).collect();
/// weighted_order_sort(&mut rand::thread_rng(), &mut data, |d, i| d[i] as f64).unwrap();
///
/// assert_eq!(data[999], 0);
/// ```
pub fn weighted_order_sort<R, S, W>(rng: &mut R, data: &mut S, mut weight: W) -> Result<(), WeightError>
where
    R: Rng + ?Sized,
    S: Permutable + ?Sized,
    W: FnMut(&S, usize) -> f64,
{
    if data.len() <= 1 {
        return Ok(());
    }

    let weights = read_weights(&*data, &mut weight)?;
    sort_by_random_keys(rng, data, weights);

    Ok(())
}

/// As [`weighted_order_sort`], but elements of weight zero do not take part in
/// the sort. They are moved behind all positive elements and arranged in a
/// uniformly random order.
///
/// # Example
/// ```
/// use weighted_shuffle::sort_based::weighted_shuffle_sort;
///
/// let mut data = vec![3, 0, 0, 0, 1, 0, 2];
/// weighted_shuffle_sort(&mut rand::thread_rng(), &mut data, |d, i| d[i] as f64).unwrap();
///
/// assert!(data[..3].iter().all(|&x| x > 0));
/// assert!(data[3..].iter().all(|&x| x == 0));
/// ```
pub fn weighted_shuffle_sort<R, S, W>(rng: &mut R, data: &mut S, mut weight: W) -> Result<(), WeightError>
where
    R: Rng + ?Sized,
    S: Permutable + ?Sized,
    W: FnMut(&S, usize) -> f64,
{
    let n = data.len();
    if n <= 1 {
        return Ok(());
    }

    let mut weights = read_weights(&*data, &mut weight)?;

    let num_positive = partition_zero_weights(data, &mut weights);
    weights.truncate(num_positive);

    sort_by_random_keys(rng, data, weights);

    if num_positive < n {
        debug!(
            "shuffling {} zero weight elements behind {} weighted ones",
            n - num_positive,
            num_positive
        );
        fisher_yates(rng, data, num_positive..n);
    }

    Ok(())
}

fn read_weights<S, W>(data: &S, weight: &mut W) -> Result<Vec<f64>, WeightError>
where
    S: Permutable + ?Sized,
    W: FnMut(&S, usize) -> f64,
{
    (0..data.len())
        .map(|idx| check_weight(idx, weight(data, idx)))
        .collect()
}

/// Moves all elements of weight zero to the end of `data`, keeping `weights`
/// aligned with `data`. Returns the number of positive elements, which then
/// form the prefix.
fn partition_zero_weights<S: Permutable + ?Sized>(data: &mut S, weights: &mut [f64]) -> usize {
    let mut end = weights.len();
    let mut idx = 0;

    while idx < end {
        if weights[idx] == 0.0 {
            // the element swapped in from the back has not been examined yet
            end -= 1;
            data.swap_two(idx, end);
            weights.swap(idx, end);
        } else {
            idx += 1;
        }
    }

    end
}

/// Stably sorts the prefix `data[..weights.len()]` by descending `weight * u`.
fn sort_by_random_keys<R, S>(rng: &mut R, data: &mut S, weights: Vec<f64>)
where
    R: Rng + ?Sized,
    S: Permutable + ?Sized,
{
    if weights.len() <= 1 {
        return;
    }

    let keys: Vec<f64> = weights.into_iter().map(|w| w * gen_unit(rng)).collect();

    let mut order: Vec<usize> = (0..keys.len()).collect();
    // keys are finite, so the fallback only equates +0.0 and -0.0
    order.sort_by(|&a, &b| keys[b].partial_cmp(&keys[a]).unwrap_or(Ordering::Equal));

    apply_order(data, 0, &order);
}
