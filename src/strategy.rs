use crate::error::WeightError;
use crate::permutable::Permutable;
use crate::{in_place, sort_based};
use rand::Rng;

/// Inputs shorter than this are cheap enough for the quadratic in-place
/// algorithms; longer ones should use the sort-based algorithms.
pub const IN_PLACE_RECOMMENDED_MAX_LEN: usize = 100;

/// Selects one of the four weighted algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// [`sort_based::weighted_order_sort`]
    OrderSort,
    /// [`in_place::weighted_order_in_place`]
    OrderInPlace,
    /// [`sort_based::weighted_shuffle_sort`]
    ShuffleSort,
    /// [`in_place::weighted_shuffle_in_place`]
    ShuffleInPlace,
}

impl Strategy {
    /// Picks the in-place algorithm for short inputs and the sort-based one
    /// otherwise. If `zero_aware` is set, elements of weight zero are
    /// shuffled uniformly instead of keeping an arbitrary order.
    ///
    /// # Example
    /// ```
    /// use weighted_shuffle::strategy::Strategy;
    ///
    /// assert_eq!(Strategy::recommended(10, true), Strategy::ShuffleInPlace);
    /// assert_eq!(Strategy::recommended(10_000, false), Strategy::OrderSort);
    /// ```
    pub fn recommended(len: usize, zero_aware: bool) -> Self {
        match (len < IN_PLACE_RECOMMENDED_MAX_LEN, zero_aware) {
            (true, false) => Self::OrderInPlace,
            (true, true) => Self::ShuffleInPlace,
            (false, false) => Self::OrderSort,
            (false, true) => Self::ShuffleSort,
        }
    }

    pub fn is_zero_aware(self) -> bool {
        matches!(self, Self::ShuffleSort | Self::ShuffleInPlace)
    }

    pub fn is_in_place(self) -> bool {
        matches!(self, Self::OrderInPlace | Self::ShuffleInPlace)
    }

    /// Runs the selected algorithm; see the respective function for details.
    pub fn apply<R, S, W>(self, rng: &mut R, data: &mut S, weight: W) -> Result<(), WeightError>
    where
        R: Rng + ?Sized,
        S: Permutable + ?Sized,
        W: FnMut(&S, usize) -> f64,
    {
        match self {
            Self::OrderSort => sort_based::weighted_order_sort(rng, data, weight),
            Self::OrderInPlace => in_place::weighted_order_in_place(rng, data, weight),
            Self::ShuffleSort => sort_based::weighted_shuffle_sort(rng, data, weight),
            Self::ShuffleInPlace => in_place::weighted_shuffle_in_place(rng, data, weight),
        }
    }

    /// As [`Strategy::apply`] with [`rand::thread_rng`] as the random source.
    ///
    /// # Example
    /// ```
    /// use weighted_shuffle::prelude::*;
    ///
    /// let mut weights = vec![2.0, 0.0, 1.0];
    /// let mut ids = vec![7, 8, 9];
    /// let mut columns = (weights.as_mut_slice(), ids.as_mut_slice());
    ///
    /// Strategy::ShuffleSort
    ///     .apply_with_thread_rng(&mut columns, |(w, _), i| w[i])
    ///     .unwrap();
    /// assert_eq!(ids[2], 8);
    /// ```
    pub fn apply_with_thread_rng<S, W>(self, data: &mut S, weight: W) -> Result<(), WeightError>
    where
        S: Permutable + ?Sized,
        W: FnMut(&S, usize) -> f64,
    {
        self.apply(&mut rand::thread_rng(), data, weight)
    }
}
