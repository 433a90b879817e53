use crate::PeError;

/// Floating point type used throughout the engine model
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PeError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PeError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, PeError> {
    ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(PeError::InvalidArg { what })
    }
}

/// Clamp `value` into `[lo, hi]`.
///
/// Returns the clamped value and whether it differs from the input. The lower
/// bound wins if the range is inverted.
pub fn clamp_to_range(value: Real, lo: Real, hi: Real) -> (Real, bool) {
    let clamped = if value > hi { hi } else { value };
    let clamped = if clamped < lo { lo } else { clamped };
    (clamped, clamped != value)
}
