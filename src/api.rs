use super::*;
use rand::Rng;

pub trait WeightedShuffle {
    type Item;

    /// Rearranges the input in a random order that prefers elements with a
    /// higher weight in front; see [`Strategy`] for the available algorithms.
    /// The permutation only depends on the weights and the random number
    /// generator. If a deterministic generator is provided, the output is the
    /// same each run with the same build on the same machine.
    ///
    /// The weight of each element is computed from the element itself, hence
    /// it always matches the current arrangement of the input.
    ///
    /// # Warning
    /// We might fine-tune the algorithms in the future. Therefore, the emitted
    /// order for a given seed might change with future revisions of the code.
    ///
    /// # Example
    /// ```
    /// use weighted_shuffle::prelude::*;
    ///
    /// let mut tasks = vec![("idle", 0.0), ("urgent", 100.0), ("normal", 1.0)];
    /// tasks
    ///     .weighted_shuffle_with(Strategy::ShuffleInPlace, &mut rand::thread_rng(), |t| t.1)
    ///     .unwrap();
    ///
    /// assert_eq!(tasks[2].0, "idle");
    /// ```
    fn weighted_shuffle_with<R: Rng + ?Sized>(
        &mut self,
        strategy: Strategy,
        rng: &mut R,
        weight: impl FnMut(&Self::Item) -> f64,
    ) -> Result<(), WeightError>;

    /// Shorthand for [`WeightedShuffle::weighted_shuffle_with`] with [`Strategy::OrderSort`].
    fn weighted_reorder<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        weight: impl FnMut(&Self::Item) -> f64,
    ) -> Result<(), WeightError> {
        self.weighted_shuffle_with(Strategy::OrderSort, rng, weight)
    }

    /// Shorthand for [`WeightedShuffle::weighted_shuffle_with`] with [`Strategy::OrderInPlace`].
    fn weighted_reorder_in_place<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        weight: impl FnMut(&Self::Item) -> f64,
    ) -> Result<(), WeightError> {
        self.weighted_shuffle_with(Strategy::OrderInPlace, rng, weight)
    }

    /// Shorthand for [`WeightedShuffle::weighted_shuffle_with`] with [`Strategy::ShuffleSort`].
    ///
    /// # Example
    /// ```
    /// use weighted_shuffle::WeightedShuffle;
    ///
    /// let mut data: Vec<u32> = (0..1000).map(|x| x % 2).collect();
    /// data.weighted_shuffle(&mut rand::thread_rng(), |&x| x as f64).unwrap();
    ///
    /// assert!(data[..500].iter().all(|&x| x == 1));
    /// ```
    fn weighted_shuffle<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        weight: impl FnMut(&Self::Item) -> f64,
    ) -> Result<(), WeightError> {
        self.weighted_shuffle_with(Strategy::ShuffleSort, rng, weight)
    }

    /// Shorthand for [`WeightedShuffle::weighted_shuffle_with`] with [`Strategy::ShuffleInPlace`].
    fn weighted_shuffle_in_place<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        weight: impl FnMut(&Self::Item) -> f64,
    ) -> Result<(), WeightError> {
        self.weighted_shuffle_with(Strategy::ShuffleInPlace, rng, weight)
    }

    /// Invokes [`WeightedShuffle::weighted_shuffle_with`] with the thread-local
    /// generator of `rand`, which is safe to use from any thread.
    fn weighted_shuffle_with_thread_rng(
        &mut self,
        strategy: Strategy,
        weight: impl FnMut(&Self::Item) -> f64,
    ) -> Result<(), WeightError> {
        self.weighted_shuffle_with(strategy, &mut rand::thread_rng(), weight)
    }

    /// Invokes [`WeightedShuffle::weighted_shuffle_with`] with a generator
    /// deterministically derived from `seed`.
    ///
    /// # Example
    /// ```
    /// use weighted_shuffle::prelude::*;
    ///
    /// let mut a: Vec<u32> = (0..100).collect();
    /// let mut b = a.clone();
    ///
    /// a.weighted_shuffle_seed_from_u64(Strategy::OrderSort, 42, |&x| x as f64).unwrap();
    /// b.weighted_shuffle_seed_from_u64(Strategy::OrderSort, 42, |&x| x as f64).unwrap();
    ///
    /// assert_eq!(a, b);
    /// ```
    #[cfg(feature = "seed_with")]
    fn weighted_shuffle_seed_from_u64(
        &mut self,
        strategy: Strategy,
        seed: u64,
        weight: impl FnMut(&Self::Item) -> f64,
    ) -> Result<(), WeightError> {
        let mut pcg = random::seeded_rng(seed);
        self.weighted_shuffle_with(strategy, &mut pcg, weight)
    }

    /// Invokes [`WeightedShuffle::weighted_shuffle_with`] with a fast generator
    /// that is seeded with an arbitrary RNG provided.
    #[cfg(feature = "seed_with")]
    fn weighted_shuffle_seed_with<R: Rng + ?Sized>(
        &mut self,
        strategy: Strategy,
        rng: &mut R,
        weight: impl FnMut(&Self::Item) -> f64,
    ) -> Result<(), WeightError> {
        self.weighted_shuffle_seed_from_u64(strategy, rng.gen(), weight)
    }
}

impl<T> WeightedShuffle for [T] {
    type Item = T;

    fn weighted_shuffle_with<R: Rng + ?Sized>(
        &mut self,
        strategy: Strategy,
        rng: &mut R,
        mut weight: impl FnMut(&Self::Item) -> f64,
    ) -> Result<(), WeightError> {
        strategy.apply(rng, self, |data: &[T], idx| weight(&data[idx]))
    }
}
