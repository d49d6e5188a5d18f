use crate::permutable::Permutable;
use crate::random::gen_index;
use rand::Rng;
use std::ops::Range;

/// Rearranges `data[range]` in a uniformly random permutation; elements outside
/// of `range` are not touched.
///
/// # Example
/// ```
/// use weighted_shuffle::fisher_yates::fisher_yates;
///
/// let mut data: Vec<_> = (0..10).collect();
/// fisher_yates(&mut rand::thread_rng(), &mut data, 5..10);
///
/// assert_eq!(data[..5], [0, 1, 2, 3, 4]);
/// ```
pub fn fisher_yates<R, S>(rng: &mut R, data: &mut S, range: Range<usize>)
where
    R: Rng + ?Sized,
    S: Permutable + ?Sized,
{
    debug_assert!(range.end <= data.len());

    let offset = range.start;
    for i in (1..range.len()).rev() {
        let j = gen_index(rng, i + 1);
        data.swap_two(offset + i, offset + j);
    }
}
