//! Sequences whose elements can be rearranged by swapping two positions.

/// An indexable sequence of fixed length that supports swapping two elements.
///
/// All algorithms of this crate only ever move elements with [`Permutable::swap_two`],
/// hence the result is always a permutation of the input. Implementations
/// must keep `len` constant during a call.
pub trait Permutable {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exchanges the elements at `i` and `j`; may be called with `i == j`.
    fn swap_two(&mut self, i: usize, j: usize);
}

impl<T> Permutable for [T] {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn swap_two(&mut self, i: usize, j: usize) {
        self.swap(i, j);
    }
}

impl<T> Permutable for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn swap_two(&mut self, i: usize, j: usize) {
        self.as_mut_slice().swap(i, j);
    }
}

impl<P: Permutable + ?Sized> Permutable for &mut P {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn swap_two(&mut self, i: usize, j: usize) {
        (**self).swap_two(i, j);
    }
}

/// Two parallel sequences of equal length that are permuted in lockstep, e.g.
/// a column of weights next to a column of payloads.
///
/// # Example
/// ```
/// use weighted_shuffle::prelude::*;
/// use rand::SeedableRng;
///
/// let mut weights = vec![1.0, 0.0, 4.0];
/// let mut names = vec!["b", "z", "a"];
/// let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(3);
///
/// let mut columns = (weights.as_mut_slice(), names.as_mut_slice());
/// weighted_shuffle_sort(&mut rng, &mut columns, |(w, _), i| w[i]).unwrap();
///
/// assert_eq!(names[2], "z");
/// assert_eq!(weights[2], 0.0);
/// ```
impl<A: Permutable, B: Permutable> Permutable for (A, B) {
    #[inline]
    fn len(&self) -> usize {
        debug_assert_eq!(self.0.len(), self.1.len());
        self.0.len()
    }

    #[inline]
    fn swap_two(&mut self, i: usize, j: usize) {
        self.0.swap_two(i, j);
        self.1.swap_two(i, j);
    }
}

/// Rearranges `data[offset..offset + order.len()]` such that afterwards the
/// element at `offset + i` is the one previously found at `offset + order[i]`.
/// Runs in `O(n)` time with one visited flag per position and uses at most
/// `order.len() - 1` swaps.
///
/// `order` must be a permutation of `0..order.len()`.
pub(crate) fn apply_order<S: Permutable + ?Sized>(data: &mut S, offset: usize, order: &[usize]) {
    debug_assert!(offset + order.len() <= data.len());

    let mut visited = vec![false; order.len()];

    for start in 0..order.len() {
        if visited[start] {
            continue;
        }

        // walk the cycle through `start`; after swapping `j` with `order[j]`,
        // position `j` is final and `order[j]` holds the element of `start`.
        let mut j = start;
        loop {
            visited[j] = true;
            let next = order[j];
            if next == start {
                break;
            }
            data.swap_two(offset + j, offset + next);
            j = next;
        }
    }
}
