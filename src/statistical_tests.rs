#![allow(unused_macros)]

/// Fraction of pairs `i < j` with `data[i] < data[j]`, i.e. pairs in which the
/// lighter element precedes the heavier one when each value is its own weight.
pub(crate) fn out_of_order_factor(data: &[usize]) -> f64 {
    let n = data.len();
    let mut out_of_order: u64 = 0;

    for (i, &x) in data.iter().enumerate() {
        out_of_order += data[i + 1..].iter().filter(|&&y| x < y).count() as u64;
    }

    out_of_order as f64 / ((n * (n - 1) / 2) as f64)
}

/// Sum of the first half of `data` divided by the sum of its second half.
pub(crate) fn front_to_back_ratio(data: &[usize]) -> f64 {
    let (front, back) = data.split_at(data.len() / 2);
    front.iter().sum::<usize>() as f64 / back.iter().sum::<usize>() as f64
}

/// Two-sided p-value of observing `actual_count` successes in `num_counts`
/// Bernoulli trials with success probability `success_prob`.
pub(crate) fn binomial_p_value(num_counts: u64, success_prob: f64, actual_count: u64) -> f64 {
    use statrs::{
        distribution::{Binomial, DiscreteCDF},
        statistics::Distribution,
    };

    let distr = Binomial::new(success_prob, num_counts).unwrap();
    let mean = distr.mean().unwrap();

    if mean >= actual_count as f64 {
        2.0 * distr.cdf(actual_count)
    } else {
        2.0 * (1.0 - distr.cdf(actual_count - 1))
    }
}

#[cfg(tarpaulin)]
macro_rules! test_shuffle_algorithm {
    ($func : ident) => {};
}

#[cfg(not(tarpaulin))]
macro_rules! test_shuffle_algorithm {
    ($func : ident) => {
        use rand::SeedableRng;
        use rand_pcg::Pcg64Mcg;

        /// This test asserts that the shuffling algorithm maintains a permutation of the
        /// input elements, i.e. no elements are modified, removed, or added.
        #[test]
        fn preserve_elements() {
            let mut rng = Pcg64Mcg::seed_from_u64(1234);

            for n in 0..500 {
                let mut data: Vec<_> = (0..n).into_iter().map(|x| 3 * x).collect();
                $func(&mut rng, &mut data);
                data.sort();

                for (idx, &val) in data.iter().enumerate() {
                    assert_eq!(3 * idx, val, "n={}", n);
                }
            }
        }

        /// Produces a large number of random permutations of the same input and asserts
        /// that each element is spotted in each position. This boils down to the
        /// coupon-collector problem and therefore Theta(n*log(n)) runs per input of length n suffice.
        #[test]
        fn test_1_independence() {
            let mut rng = Pcg64Mcg::seed_from_u64(12345);

            for n in [2, 3, 4, 5, 10, 13, 29, 33, 50] {
                let runs = 5 * n * ((n as f64).ln().ceil() as usize);

                let mut positions: Vec<Vec<usize>> = (0..n)
                    .into_iter()
                    .map(|_| Vec::with_capacity(runs))
                    .collect();

                for run in 0..runs {
                    let mut data: Vec<_> = (0usize..n).into_iter().collect();
                    $func(&mut rng, &mut data);
                    for (i, &x) in data.iter().enumerate() {
                        assert_eq!(positions[x].len(), run);
                        positions[x].push(i);
                    }
                }

                for (x, ranks) in positions.iter_mut().enumerate() {
                    ranks.sort();
                    ranks.dedup();

                    let missing: Vec<usize> = if ranks.len() == n {
                        Vec::new()
                    } else {
                        (0..n).into_iter().filter(|x| !ranks.contains(x)).collect()
                    };

                    assert_eq!(
                        ranks.len(),
                        n,
                        "x = {}, n = {}, missing = {:?}",
                        x,
                        n,
                        missing
                    );
                }
            }
        }

        /// Analogously to `test_1_independence` but this time, we consider all pairs of input elements
        /// and assert that each pair of input elements reaches any of the `n*(n-1)` possible indices.
        /// We therefore need `Theta(n*n*log(n))` many rounds per input sequence.
        #[test]
        fn test_2_independence() {
            let mut rng = Pcg64Mcg::seed_from_u64(2345);

            for n in [5usize, 17, 23] {
                let num_items = (n as f64).powi(2);
                let runs = (3.0 * num_items * num_items.ln()).ceil() as usize;

                let mut positions: Vec<Vec<usize>> = (0..n * n)
                    .into_iter()
                    .map(|_| Vec::with_capacity(runs))
                    .collect();

                for run in 0..runs {
                    let mut data: Vec<_> = (0usize..n).into_iter().collect();
                    $func(&mut rng, &mut data);
                    for (i, &x) in data.iter().enumerate() {
                        for (j, &y) in data.iter().enumerate() {
                            if i == j {
                                continue;
                            }
                            let pair = x + n * y;
                            let rank = i + n * j;
                            assert_eq!(positions[pair].len(), run);
                            positions[pair].push(rank);
                        }
                    }
                }

                for (pair, ranks) in positions.iter_mut().enumerate() {
                    if pair % n == pair / n {
                        assert!(ranks.is_empty());
                        continue;
                    }

                    ranks.sort();
                    ranks.dedup();

                    assert_eq!(
                        ranks.len(),
                        n * n - n,
                        "n = {}, pair = {:?}",
                        n,
                        (pair % n, pair / n)
                    );
                }
            }
        }
    };
}

macro_rules! test_shuffle_algorithm_deterministic {
    ($func : ident) => {
        /// Runs the algorithm repeatedly with identically seeded generators and
        /// asserts that all runs emit the same permutation.
        #[test]
        fn deterministic() {
            for num in [2, 5, 10, 13, 29, 50] {
                let rng = Pcg64Mcg::seed_from_u64(1234 * num);

                let runs: Vec<Vec<_>> = (0..10)
                    .map(|_| {
                        let mut data: Vec<_> = (0..num as usize).into_iter().map(|x| 3 * x).collect();
                        let mut rng = rng.clone();
                        $func(&mut rng, &mut data);
                        data
                    })
                    .collect();

                for i in 1..runs.len() {
                    assert_eq!(runs[0], runs[i]);
                }
            }
        }
    };
}

/// Tests shared by all four weighted algorithms. Each element's value doubles
/// as its weight, so the identity `0..n` is the heaviest-first order reversed.
macro_rules! test_weighted_algorithm {
    ($func : ident, $expected_out_of_order : expr) => {
        use crate::error::WeightError;
        use crate::statistical_tests::{front_to_back_ratio, out_of_order_factor};
        use itertools::Itertools;
        use rand::SeedableRng;
        use rand_pcg::Pcg64Mcg;

        fn by_value(data: &[usize], idx: usize) -> f64 {
            data[idx] as f64
        }

        fn reorder_identity(seed: u64, n: usize) -> Vec<usize> {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            let mut data: Vec<usize> = (0..n).collect();
            $func(&mut rng, data.as_mut_slice(), by_value).unwrap();
            data
        }

        /// This test asserts that the algorithm maintains a permutation of the
        /// input elements, i.e. no elements are modified, removed, or added.
        #[test]
        fn preserve_elements() {
            let mut rng = Pcg64Mcg::seed_from_u64(1234);

            for n in 0..200 {
                let mut data: Vec<usize> = (0..n).map(|x| 3 * x).collect();
                $func(&mut rng, data.as_mut_slice(), by_value).unwrap();

                assert!(
                    data.iter().copied().sorted().eq((0..n).map(|x| 3 * x)),
                    "n={}",
                    n
                );
            }
        }

        #[test]
        fn degenerate_sizes() {
            let mut rng = Pcg64Mcg::seed_from_u64(1);

            let mut empty: Vec<usize> = Vec::new();
            assert_eq!($func(&mut rng, empty.as_mut_slice(), by_value), Ok(()));
            assert!(empty.is_empty());

            for weight in [0.0, 1.0, 1e10] {
                let mut single = vec![7usize];
                assert_eq!($func(&mut rng, single.as_mut_slice(), |_: &[usize], _| weight), Ok(()));
                assert_eq!(single, [7]);
            }
        }

        #[test]
        fn out_of_order() {
            let data = reorder_identity(0, 10_000);

            // the only element of weight zero can never precede a positive one
            assert_eq!(data.last(), Some(&0));

            let factor = out_of_order_factor(&data);
            assert!(
                (factor - $expected_out_of_order).abs() <= 0.04,
                "out of order factor: {factor}"
            );
        }

        #[test]
        fn weighting_bias() {
            let data = reorder_identity(1, 10_000);
            let ratio = front_to_back_ratio(&data);
            assert!((ratio - 1.8).abs() <= 0.2, "front/back ratio: {ratio}");
        }

        #[test]
        fn deterministic() {
            for n in [2, 5, 10, 13, 29, 50, 1000] {
                let runs = (0..5).map(|_| reorder_identity(1234 * n as u64, n)).collect_vec();
                assert!(runs.iter().all_equal(), "n = {n}");
            }
        }

        #[test]
        fn randomized() {
            let runs = (0..5).map(|seed| reorder_identity(seed, 50)).collect_vec();
            assert!(!runs.iter().all_equal());
        }

        #[test]
        fn reject_negative_weight_before_swapping() {
            let mut rng = Pcg64Mcg::seed_from_u64(2);

            for bad in [0, 17, 49] {
                let mut data: Vec<usize> = (0..50).collect();
                let res = $func(&mut rng, data.as_mut_slice(), |s: &[usize], i| {
                    if s[i] == bad {
                        -1.0
                    } else {
                        s[i] as f64
                    }
                });

                assert_eq!(
                    res,
                    Err(WeightError::InvalidWeight {
                        index: bad,
                        weight: -1.0
                    })
                );
                assert!(data.iter().copied().eq(0..50));
            }
        }

        #[test]
        fn reject_non_finite_weight() {
            let mut rng = Pcg64Mcg::seed_from_u64(3);

            for bad in [f64::NAN, f64::INFINITY] {
                let mut data: Vec<usize> = (0..20).collect();
                let res = $func(&mut rng, data.as_mut_slice(), |s: &[usize], i| {
                    if s[i] == 5 {
                        bad
                    } else {
                        1.0
                    }
                });

                assert!(matches!(res, Err(WeightError::InvalidWeight { index: 5, .. })));
                assert!(data.iter().copied().eq(0..20));
            }
        }
    };
}

/// Tests for the flavors that move zero-weight elements to a uniformly shuffled tail.
macro_rules! test_zero_weight_aware {
    ($func : ident) => {
        mod zero_weight {
            use super::*;
            use crate::statistical_tests::binomial_p_value;
            use rand::SeedableRng;
            use rand_pcg::Pcg64Mcg;

            /// Even indices carry a positive value, odd indices a negative one;
            /// negative values have weight zero.
            fn alternating(n: usize) -> Vec<i64> {
                (0..n as i64)
                    .map(|i| if i % 2 == 0 { i + 1 } else { -i })
                    .collect()
            }

            fn clamped(data: &[i64], idx: usize) -> f64 {
                data[idx].max(0) as f64
            }

            fn run(seed: u64, n: usize) -> Vec<i64> {
                let mut rng = Pcg64Mcg::seed_from_u64(seed);
                let mut data = alternating(n);
                $func(&mut rng, data.as_mut_slice(), clamped).unwrap();
                data
            }

            #[test]
            fn tail_placement() {
                for seed in 0..20 {
                    for n in [2, 3, 10, 101, 1000] {
                        let data = run(seed, n);
                        let num_positive = (n + 1) / 2;

                        assert!(data[..num_positive].iter().all(|&x| x > 0), "{data:?}");
                        assert!(data[num_positive..].iter().all(|&x| x <= 0), "{data:?}");
                    }
                }
            }

            #[test]
            fn tail_fairness() {
                const N: usize = 4000;

                let s0 = run(0, N);
                let s1 = run(N as u64, N);

                let tail = N / 2;
                let greater = s0[tail..]
                    .iter()
                    .zip(&s1[tail..])
                    .filter(|(v0, v1)| v1 > v0)
                    .count() as u64;

                // two independent uniform picks from `tail` values differ w.p. 1 - 1/tail
                let success_prob = 0.5 * (1.0 - 1.0 / tail as f64);
                let p_value = binomial_p_value(tail as u64, success_prob, greater);
                assert!(p_value >= 0.001, "greater: {greater} of {tail}, p-value: {p_value}");
            }

            #[test]
            fn only_zero_weights() {
                let mut rng = Pcg64Mcg::seed_from_u64(4);
                let mut data: Vec<usize> = (0..100).collect();
                $func(&mut rng, data.as_mut_slice(), |_: &[usize], _| 0.0).unwrap();

                let mut sorted = data.clone();
                sorted.sort_unstable();
                assert!(sorted.into_iter().eq(0..100));
                assert!(!data.iter().copied().eq(0..100));
            }

            mod uniform_when_all_zero {
                use super::super::*;
                use rand::Rng;

                fn all_zero<R: Rng>(rng: &mut R, data: &mut [usize]) {
                    $func(rng, data, |_: &[usize], _| 0.0).unwrap();
                }

                crate::statistical_tests::test_shuffle_algorithm!(all_zero);
                crate::statistical_tests::test_shuffle_algorithm_deterministic!(all_zero);
            }
        }
    };
}

pub(crate) use test_shuffle_algorithm;
pub(crate) use test_shuffle_algorithm_deterministic;
pub(crate) use test_weighted_algorithm;
pub(crate) use test_zero_weight_aware;
