use thiserror::Error;

/// Fatal conditions reported by the weighted algorithms.
///
/// Both variants indicate a programming error rather than a runtime condition:
/// retrying the call with the same weight function will fail again.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WeightError {
    /// The weight function returned a negative, NaN or infinite value.
    ///
    /// Detected before the first swap, so the input is left untouched.
    #[error("invalid weight {weight} at index {index}: weights must be finite and non-negative")]
    InvalidWeight { index: usize, weight: f64 },

    /// A selected weight exceeded the weight sum left for the unplaced suffix
    /// by more than floating point rounding accounts for, so the weight
    /// function is not consistent with the live arrangement. `remaining` is
    /// the tracked sum after the subtraction. The input may be partially
    /// permuted.
    #[error("internal error: remaining weight sum {remaining} < 0")]
    NegativeWeightSum { remaining: f64 },
}

/// Returns `weight` if it is a valid weight for the element at `index`.
#[inline]
pub(crate) fn check_weight(index: usize, weight: f64) -> Result<f64, WeightError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(WeightError::InvalidWeight { index, weight })
    }
}
