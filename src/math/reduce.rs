//! Operator library: combination, implication, aggregation, defuzzification.
//!
//! ## Purpose
//!
//! This module holds every reduction the inference pipeline performs:
//!
//! * **Combination**: folding a rule's fuzzified antecedent degrees into
//!   one truth degree (AND = min, OR = max).
//! * **Implication**: clipping an output level's curve by a rule's
//!   weighted truth degree (MIN).
//! * **Aggregation**: reducing all rules' implicated curves per output
//!   variable into one curve (OR = pointwise max, SUM, AVERAGE).
//! * **Defuzzification**: reducing an aggregated curve to a crisp number
//!   (CENTROID).
//!
//! ## Design notes
//!
//! * **Closed enumerations**: each operator family is a closed tagged enum
//!   carrying its wire name; an unsupported tag fails at parse time, never
//!   mid-run. The serde tags are the specification strings (`"AND"`,
//!   `"OR"`, `"MIN"`, `"SUM"`, `"AVERAGE"`, `"CENTROID"`).
//! * **SIMD**: the pointwise curve loops process two lanes at a time via
//!   `wide::f64x2` with a scalar tail for odd-length curves.
//! * **Zero seeding**: aggregating zero curves yields the all-zero curve,
//!   so an output nothing fired for fails loudly at defuzzification instead
//!   of producing a silently wrong crisp value.
//!
//! ## Invariants
//!
//! * All curve inputs to one aggregation share the same length.
//! * Combination operands and curve values lie in `[0, 1]`; a SUM-aggregated
//!   curve may exceed 1.

// External dependencies
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use wide::f64x2;

// Internal dependencies
use crate::primitives::errors::FuzzyError;

// ============================================================================
// Antecedent Combination
// ============================================================================

/// Binary operator combining fuzzified antecedent degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicOp {
    /// Minimum of the operands.
    And,
    /// Maximum of the operands.
    Or,
}

impl LogicOp {
    /// Reduce an ordered, non-empty list of fuzzy degrees left to right.
    ///
    /// A single operand is returned unchanged.
    pub fn combine(self, degrees: &[f64]) -> f64 {
        debug_assert!(!degrees.is_empty(), "combine on empty operand list");
        let first = degrees[0];
        degrees[1..].iter().fold(first, |acc, &d| match self {
            LogicOp::And => acc.min(d),
            LogicOp::Or => acc.max(d),
        })
    }
}

impl fmt::Display for LogicOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicOp::And => write!(f, "AND"),
            LogicOp::Or => write!(f, "OR"),
        }
    }
}

impl FromStr for LogicOp {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self, FuzzyError> {
        match s {
            "AND" => Ok(LogicOp::And),
            "OR" => Ok(LogicOp::Or),
            other => Err(FuzzyError::Config(format!(
                "unknown antecedent operator \"{}\"",
                other
            ))),
        }
    }
}

// ============================================================================
// Implication
// ============================================================================

/// Operator turning a rule's truth degree into a clipped output curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Implication {
    /// Pointwise minimum of the level curve and the truth degree.
    #[default]
    Min,
}

impl Implication {
    /// Apply the implication to a level curve, broadcasting `degree`.
    pub fn apply(self, curve: &[f64], degree: f64) -> Vec<f64> {
        let Implication::Min = self;
        let mut out = curve.to_vec();
        clip_in_place(&mut out, degree);
        out
    }
}

impl fmt::Display for Implication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Implication::Min => write!(f, "MIN"),
        }
    }
}

impl FromStr for Implication {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self, FuzzyError> {
        match s {
            "MIN" => Ok(Implication::Min),
            other => Err(FuzzyError::Config(format!(
                "unknown implication \"{}\"",
                other
            ))),
        }
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Method for reducing all rules' implicated curves per output variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Aggregation {
    /// Pointwise maximum across curves, seeded at zero.
    #[default]
    Or,
    /// Pointwise sum across curves.
    Sum,
    /// Pointwise mean across curves.
    Average,
}

impl Aggregation {
    /// Reduce `curves` (each of length `len`) into one curve.
    ///
    /// With zero contributing curves the result is the all-zero curve; the
    /// defuzzification stage then rejects it as carrying no signal.
    pub fn aggregate(self, curves: &[&[f64]], len: usize) -> Vec<f64> {
        let mut acc = vec![0.0; len];
        match self {
            Aggregation::Or => {
                for curve in curves {
                    max_in_place(&mut acc, curve);
                }
            }
            Aggregation::Sum => {
                for curve in curves {
                    add_in_place(&mut acc, curve);
                }
            }
            Aggregation::Average => {
                for curve in curves {
                    add_in_place(&mut acc, curve);
                }
                if !curves.is_empty() {
                    let count = curves.len() as f64;
                    for v in acc.iter_mut() {
                        *v /= count;
                    }
                }
            }
        }
        acc
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregation::Or => write!(f, "OR"),
            Aggregation::Sum => write!(f, "SUM"),
            Aggregation::Average => write!(f, "AVERAGE"),
        }
    }
}

impl FromStr for Aggregation {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self, FuzzyError> {
        match s {
            "OR" => Ok(Aggregation::Or),
            "SUM" => Ok(Aggregation::Sum),
            "AVERAGE" => Ok(Aggregation::Average),
            other => Err(FuzzyError::Config(format!(
                "unknown aggregation method \"{}\"",
                other
            ))),
        }
    }
}

// ============================================================================
// Defuzzification
// ============================================================================

/// Method for reducing an aggregated curve to one crisp number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Defuzzification {
    /// Area-weighted centroid over the sampled domain.
    #[default]
    Centroid,
}

impl Defuzzification {
    /// Reduce a membership curve to a crisp value.
    ///
    /// The centroid is the discrete `sum(x_i * mu_i) / sum(mu_i)`. A curve
    /// with zero total mass carries no information and fails with
    /// [`FuzzyError::Defuzzification`].
    pub fn defuzzify(self, domain: &[f64], curve: &[f64]) -> Result<f64, FuzzyError> {
        let Defuzzification::Centroid = self;
        debug_assert_eq!(domain.len(), curve.len());

        let (moment, mass) = weighted_moment(domain, curve);
        if mass == 0.0 {
            return Err(FuzzyError::Defuzzification(
                "membership curve has zero mass".to_string(),
            ));
        }
        Ok(moment / mass)
    }
}

impl fmt::Display for Defuzzification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Defuzzification::Centroid => write!(f, "CENTROID"),
        }
    }
}

impl FromStr for Defuzzification {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self, FuzzyError> {
        match s {
            "CENTROID" => Ok(Defuzzification::Centroid),
            other => Err(FuzzyError::Config(format!(
                "unknown defuzzification method \"{}\"",
                other
            ))),
        }
    }
}

// ============================================================================
// Pointwise Kernels (SIMD + scalar tail)
// ============================================================================

/// `acc[i] = max(acc[i], curve[i])` for all i.
fn max_in_place(acc: &mut [f64], curve: &[f64]) {
    debug_assert_eq!(acc.len(), curve.len());
    let n = acc.len();
    let mut i = 0;

    while i + 2 <= n {
        let a = f64x2::new([acc[i], acc[i + 1]]);
        let c = f64x2::new([curve[i], curve[i + 1]]);
        let m = a.max(c).to_array();
        acc[i] = m[0];
        acc[i + 1] = m[1];
        i += 2;
    }

    // Tail
    for k in i..n {
        acc[k] = acc[k].max(curve[k]);
    }
}

/// `acc[i] += curve[i]` for all i.
fn add_in_place(acc: &mut [f64], curve: &[f64]) {
    debug_assert_eq!(acc.len(), curve.len());
    let n = acc.len();
    let mut i = 0;

    while i + 2 <= n {
        let a = f64x2::new([acc[i], acc[i + 1]]);
        let c = f64x2::new([curve[i], curve[i + 1]]);
        let s = (a + c).to_array();
        acc[i] = s[0];
        acc[i + 1] = s[1];
        i += 2;
    }

    // Tail
    for k in i..n {
        acc[k] += curve[k];
    }
}

/// `out[i] = min(out[i], cap)` for all i.
fn clip_in_place(out: &mut [f64], cap: f64) {
    let n = out.len();
    let mut i = 0;
    let cap2 = f64x2::splat(cap);

    while i + 2 <= n {
        let c = f64x2::new([out[i], out[i + 1]]);
        let m = c.min(cap2).to_array();
        out[i] = m[0];
        out[i + 1] = m[1];
        i += 2;
    }

    // Tail
    for k in i..n {
        out[k] = out[k].min(cap);
    }
}

/// Accumulate `(sum(x_i * mu_i), sum(mu_i))` in one pass.
fn weighted_moment(domain: &[f64], curve: &[f64]) -> (f64, f64) {
    let n = domain.len();
    let mut i = 0;

    let mut s_moment = f64x2::splat(0.0);
    let mut s_mass = f64x2::splat(0.0);

    while i + 2 <= n {
        let x = f64x2::new([domain[i], domain[i + 1]]);
        let mu = f64x2::new([curve[i], curve[i + 1]]);
        s_moment += x * mu;
        s_mass += mu;
        i += 2;
    }

    let mut moment = s_moment.reduce_add();
    let mut mass = s_mass.reduce_add();

    // Tail
    for k in i..n {
        moment += domain[k] * curve[k];
        mass += curve[k];
    }

    (moment, mass)
}
