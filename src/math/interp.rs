//! Piecewise-linear interpolation of membership curves.
//!
//! ## Purpose
//!
//! This module converts a crisp value into a degree of membership by
//! interpolating a level's curve along the variable's sampled domain
//! (fuzzification). Interpolation is linear between adjacent samples, in the
//! manner of `numpy.interp`.
//!
//! ## Invariants
//!
//! * `domain` is strictly increasing and the same length as `curve`.
//! * `value` lies within `[domain.first, domain.last]`; callers validate
//!   range membership before interpolating (the variable layer enforces
//!   this at value assignment).
//!
//! ## Non-goals
//!
//! * No extrapolation beyond the domain ends.

// External dependencies
use num_traits::Float;

// ============================================================================
// Interpolation
// ============================================================================

/// Interpolate `curve` at `value` along `domain`.
///
/// A `value` equal to a domain sample returns that sample's curve entry
/// bit-identically; values between samples are linearly interpolated.
pub fn interp_membership<T: Float>(domain: &[T], curve: &[T], value: T) -> T {
    debug_assert_eq!(domain.len(), curve.len());
    debug_assert!(domain.len() >= 2);
    debug_assert!(
        value >= domain[0] && value <= domain[domain.len() - 1],
        "value outside domain; callers must range-check first"
    );

    let n = domain.len();
    let idx = domain.partition_point(|&x| x < value);
    if idx == 0 {
        return curve[0];
    }
    if idx >= n {
        return curve[n - 1];
    }
    if domain[idx] == value {
        return curve[idx];
    }

    let (x0, x1) = (domain[idx - 1], domain[idx]);
    let (y0, y1) = (curve[idx - 1], curve[idx]);
    y0 + (value - x0) * (y1 - y0) / (x1 - x0)
}
