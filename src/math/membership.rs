//! Triangular membership function generation.
//!
//! ## Purpose
//!
//! This module builds the piecewise-linear (triangular) membership curves a
//! variable's levels are made of. Curves come from one of two sources:
//! explicit `[foot, peak, foot]` parameters, or a canonical table of evenly
//! overlapping unit-interval triangles selected by level count and index.
//!
//! ## Design notes
//!
//! * **Canonical table**: shapes are defined only for 2 to 5 levels. The
//!   leftmost and rightmost sets are half-triangles (degenerate left/right
//!   feet) so total membership sums to 1 everywhere; interior sets overlap
//!   their neighbors at 0.5 membership.
//! * **Fail-fast**: any other level count is unsupported and rejected with a
//!   configuration error rather than extrapolated from a guessed formula.
//! * **Affine mapping**: unit parameters are mapped onto a variable's real
//!   range with `min + p * (max - min)`.
//!
//! ## Invariants
//!
//! * Every generated curve value lies in `[0, 1]`.
//! * A curve has exactly one value per domain sample.
//!
//! ## Non-goals
//!
//! * Non-triangular shapes (trapezoid, gaussian) are not provided.

// External dependencies
use core::fmt;
use num_traits::Float;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::primitives::errors::FuzzyError;

/// Membership function shape tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MfShape {
    /// Piecewise-linear triangle described by `[left foot, peak, right foot]`.
    #[default]
    Triangle,
}

impl fmt::Display for MfShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MfShape::Triangle => write!(f, "triangle"),
        }
    }
}

// ============================================================================
// Canonical Unit-Interval Shapes
// ============================================================================

const UNIT_PARAMS_2: [[f64; 3]; 2] = [[0.0, 0.0, 1.0], [0.0, 1.0, 1.0]];

const UNIT_PARAMS_3: [[f64; 3]; 3] = [[0.0, 0.0, 0.5], [0.0, 0.5, 1.0], [0.5, 1.0, 1.0]];

const UNIT_PARAMS_4: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.333],
    [0.0, 0.333, 0.666],
    [0.333, 0.666, 1.0],
    [0.666, 1.0, 1.0],
];

const UNIT_PARAMS_5: [[f64; 3]; 5] = [
    [0.0, 0.0, 0.25],
    [0.0, 0.25, 0.5],
    [0.25, 0.5, 0.75],
    [0.5, 0.75, 1.0],
    [0.75, 1.0, 1.0],
];

/// Canonical triangle parameters on `[0, 1]` for one of `level_count`
/// evenly overlapping fuzzy sets, indexed left to right from low to high.
///
/// Only `level_count` in `{2, 3, 4, 5}` has a defined shape; any other
/// count fails with [`FuzzyError::Config`].
pub fn default_unit_params<T: Float>(
    level_count: usize,
    level_index: usize,
    shape: MfShape,
) -> Result<[T; 3], FuzzyError> {
    let MfShape::Triangle = shape;
    let table: &[[f64; 3]] = match level_count {
        2 => &UNIT_PARAMS_2,
        3 => &UNIT_PARAMS_3,
        4 => &UNIT_PARAMS_4,
        5 => &UNIT_PARAMS_5,
        n => {
            return Err(FuzzyError::Config(format!(
                "no default {} shapes defined for {} levels (supported: 2-5)",
                shape, n
            )))
        }
    };
    let params = table.get(level_index).ok_or_else(|| {
        FuzzyError::Config(format!(
            "level index {} out of range for {} levels",
            level_index, level_count
        ))
    })?;
    Ok([
        T::from(params[0]).unwrap(),
        T::from(params[1]).unwrap(),
        T::from(params[2]).unwrap(),
    ])
}

/// Affine-map a parameter vector defined on `[0, 1]` into `[min, max]`.
pub fn scale_unit_params<T: Float>(min: T, max: T, unit_params: [T; 3]) -> [T; 3] {
    let slope = max - min;
    [
        min + unit_params[0] * slope,
        min + unit_params[1] * slope,
        min + unit_params[2] * slope,
    ]
}

// ============================================================================
// Curve Evaluation
// ============================================================================

/// Evaluate the standard triangular membership function at every point of
/// `domain`, clipped to `[0, 1]`.
///
/// `params` is `[a, b, c]` with `a <= b <= c`: left foot, peak, right foot.
/// Degenerate feet (`a == b` or `b == c`) produce the half-triangle
/// shoulders used by the boundary levels of the canonical table.
pub fn triangular_curve<T: Float>(domain: &[T], params: [T; 3]) -> Result<Vec<T>, FuzzyError> {
    let [a, b, c] = params;
    if !(a.is_finite() && b.is_finite() && c.is_finite()) || a > b || b > c {
        return Err(FuzzyError::Config(format!(
            "triangle parameters must satisfy a <= b <= c, got [{}, {}, {}]",
            a.to_f64().unwrap_or(f64::NAN),
            b.to_f64().unwrap_or(f64::NAN),
            c.to_f64().unwrap_or(f64::NAN),
        )));
    }

    let zero = T::zero();
    let one = T::one();
    let curve = domain
        .iter()
        .map(|&x| {
            let y = if x == b {
                one
            } else if x > a && x < b {
                (x - a) / (b - a)
            } else if x > b && x < c {
                (c - x) / (c - b)
            } else {
                zero
            };
            y.max(zero).min(one)
        })
        .collect();
    Ok(curve)
}
