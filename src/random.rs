//! The random primitives consumed by the weighted algorithms: uniform reals in
//! `[0, 1)` for the weighted phases and uniform indices for the unweighted tail.
use rand::Rng;

/// Below this bound, indices are drawn from 32 random bits; above it the
/// rejection rate of the 32 bit variant rises and 64 bits are used.
pub const U32_MAX_UPPER_BOUND: u32 = u32::MAX / 16;

/// Draws a real uniformly from `[0, 1)` with 53 bits of precision.
///
/// # Example
/// ```
/// use weighted_shuffle::random::gen_unit;
///
/// for _ in 0..100 {
///     let u = gen_unit(&mut rand::thread_rng());
///     assert!((0.0..1.0).contains(&u));
/// }
/// ```
#[inline]
pub fn gen_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// Generates an index from the exclusive range `0..ub` uniformly at random.
/// Functionally equivalent to `rng.gen_range(0..ub)`, but avoids the division
/// in the common case.
///
/// # Warning
/// The upper bound must be strictly positive. This is not checked in release
/// builds!
///
/// # Example
/// ```
/// use weighted_shuffle::random::gen_index;
///
/// for ub in 1..100 {
///     assert!(gen_index(&mut rand::thread_rng(), ub) < ub);
/// }
/// ```
#[inline]
pub fn gen_index<R: Rng + ?Sized>(rng: &mut R, exclusive_ub: usize) -> usize {
    if exclusive_ub <= U32_MAX_UPPER_BOUND as usize {
        bounded_u32(rng, exclusive_ub as u32) as usize
    } else {
        bounded_u64(rng, exclusive_ub as u64) as usize
    }
}

macro_rules! impl_bounded {
    ($name : ident, $t : ty, $wide : ty) => {
        /// Lemire's multiply-and-reject: the high half of `rand * ub` is uniform
        /// in `0..ub` unless the low half falls below `2^BITS mod ub`.
        #[inline]
        fn $name<R: Rng + ?Sized>(rng: &mut R, exclusive_ub: $t) -> $t {
            debug_assert!(exclusive_ub != 0);

            let wide_multiply = |rand: $t| {
                let res = (rand as $wide) * (exclusive_ub as $wide);
                (res as $t, (res >> <$t>::BITS) as $t)
            };

            let (mut lo, mut hi) = wide_multiply(rng.gen());
            if lo >= exclusive_ub {
                return hi;
            }

            let threshold = exclusive_ub.wrapping_neg() % exclusive_ub;
            while lo < threshold {
                (lo, hi) = wide_multiply(rng.gen());
            }

            hi
        }
    };
}

impl_bounded!(bounded_u32, u32, u64);
impl_bounded!(bounded_u64, u64, u128);

/// The PCG variant used by the seeded entry points.
#[cfg(feature = "seed_with")]
pub type SeededRng = rand_pcg::Pcg64Mcg;

/// Creates the deterministic generator used by the seeded entry points.
#[cfg(feature = "seed_with")]
pub fn seeded_rng(seed: u64) -> SeededRng {
    use rand::SeedableRng;
    SeededRng::seed_from_u64(seed)
}
