//! Fuzzy variables and their levels.
//!
//! ## Purpose
//!
//! A [`Variable`] owns a sampled domain, a named ordered set of membership
//! curves (its levels), an optional crisp value, per-level memoized
//! fuzzified values, and the aggregated result curve used only on output
//! variables.
//!
//! ## Design notes
//!
//! * **Write-once memo cells**: each level carries an explicit
//!   `Option<f64>` fuzzified-value cell, populated at most once and read
//!   through on demand. The cache is local to the variable, so no
//!   engine-wide synchronization is ever needed.
//! * **Missing value is not a fault**: fuzzifying a variable without a
//!   crisp value returns `None` so that dependent rules silently do not
//!   fire; only an unknown level name is an error.
//! * **Boundary snapping**: a crisp value numerically close to a domain
//!   boundary (relative tolerance 1e-9) is snapped onto the exact boundary
//!   sample, absorbing floating-point range construction error.
//!
//! ## Invariants
//!
//! * The domain is strictly increasing, length >= 2, and fixed after
//!   construction; level curves are computed against that exact domain and
//!   never resampled.
//! * `value`, when present, lies within `[domain.first, domain.last]`.
//! * `value` is set once at construction for inputs and exactly once via
//!   defuzzification for outputs.

// External dependencies
use tracing::trace;

// Internal dependencies
use crate::math::grid::{is_close, is_strictly_increasing, sample_domain, DEFAULT_INTERVALS};
use crate::math::interp::interp_membership;
use crate::math::membership::{
    default_unit_params, scale_unit_params, triangular_curve, MfShape,
};
use crate::math::reduce::Defuzzification;
use crate::primitives::errors::FuzzyError;
use crate::spec::{LevelSnapshot, LevelSpec, VariableSnapshot, VariableSpec};

// ============================================================================
// Level
// ============================================================================

/// One fuzzy set of a variable.
#[derive(Debug, Clone)]
pub struct Level {
    name: String,
    shape: MfShape,
    params: Vec<f64>,
    curve: Vec<f64>,
    /// Write-once memoized fuzzified degree.
    fuzzy: Option<f64>,
}

impl Level {
    /// Level name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Membership shape tag.
    pub fn shape(&self) -> MfShape {
        self.shape
    }

    /// Resolved shape parameters on the variable's domain.
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Membership curve, one value per domain sample.
    pub fn curve(&self) -> &[f64] {
        &self.curve
    }

    /// Memoized fuzzified degree, if computed.
    pub fn fuzzy_value(&self) -> Option<f64> {
        self.fuzzy
    }
}

// ============================================================================
// Variable
// ============================================================================

/// A fuzzy variable: sampled domain, levels, and optional crisp value.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    domain: Vec<f64>,
    value: Option<f64>,
    levels: Vec<Level>,
    aggregated: Option<Vec<f64>>,
}

impl Variable {
    /// Build a variable from its specification.
    ///
    /// The domain comes from an explicit `x` array (validated strictly
    /// increasing) or is sampled from min/max with ten intervals. Levels
    /// without explicit parameters take the canonical shape for the
    /// variable's level count and their position.
    pub fn from_spec(spec: &VariableSpec) -> Result<Self, FuzzyError> {
        let domain = Self::input_domain(spec)?;
        let value = Self::input_value(spec, &domain)?;
        let levels = Self::input_levels(spec, &domain)?;
        Ok(Self {
            name: spec.name.clone(),
            domain,
            value,
            levels,
            aggregated: None,
        })
    }

    fn input_domain(spec: &VariableSpec) -> Result<Vec<f64>, FuzzyError> {
        if let Some(x) = &spec.x {
            if x.len() < 2 || !is_strictly_increasing(x) {
                return Err(FuzzyError::Config(format!(
                    "domain of \"{}\" must be strictly increasing with at least 2 points",
                    spec.name
                )));
            }
            return Ok(x.clone());
        }
        match (spec.min, spec.max) {
            (Some(min), Some(max)) => sample_domain(min, max, DEFAULT_INTERVALS),
            _ => Err(FuzzyError::Config(format!(
                "\"{}\" needs either an explicit domain or min and max",
                spec.name
            ))),
        }
    }

    fn input_value(spec: &VariableSpec, domain: &[f64]) -> Result<Option<f64>, FuzzyError> {
        let value = match spec.value {
            Some(v) => v,
            None => return Ok(None),
        };
        let first = domain[0];
        let last = domain[domain.len() - 1];
        // When min/max come from measured data, a value equal to the bound
        // may be slightly off after range construction; snap it.
        if is_close(value, first) {
            return Ok(Some(first));
        }
        if is_close(value, last) {
            return Ok(Some(last));
        }
        if value < first || value > last {
            return Err(FuzzyError::OutOfRange {
                variable: spec.name.clone(),
                value,
                min: first,
                max: last,
            });
        }
        Ok(Some(value))
    }

    fn input_levels(spec: &VariableSpec, domain: &[f64]) -> Result<Vec<Level>, FuzzyError> {
        let count = spec.levels.len();
        if count == 0 {
            return Err(FuzzyError::Config(format!(
                "\"{}\" has no levels",
                spec.name
            )));
        }
        let mut levels: Vec<Level> = Vec::with_capacity(count);
        for (index, level_spec) in spec.levels.iter().enumerate() {
            if levels.iter().any(|l| l.name == level_spec.name) {
                return Err(FuzzyError::Config(format!(
                    "duplicate level \"{}\" on \"{}\"",
                    level_spec.name, spec.name
                )));
            }
            levels.push(Self::build_level(spec, level_spec, domain, count, index)?);
        }
        Ok(levels)
    }

    fn build_level(
        spec: &VariableSpec,
        level_spec: &LevelSpec,
        domain: &[f64],
        count: usize,
        index: usize,
    ) -> Result<Level, FuzzyError> {
        let shape = level_spec.mf_type.unwrap_or_default();
        let params: [f64; 3] = match &level_spec.mf_params {
            Some(p) => <[f64; 3]>::try_from(p.as_slice()).map_err(|_| {
                FuzzyError::Config(format!(
                    "level \"{}\" of \"{}\": triangle takes 3 parameters, got {}",
                    level_spec.name,
                    spec.name,
                    p.len()
                ))
            })?,
            None => {
                let unit = default_unit_params(count, index, shape)?;
                scale_unit_params(domain[0], domain[domain.len() - 1], unit)
            }
        };
        let curve = triangular_curve(domain, params)?;
        Ok(Level {
            name: level_spec.name.clone(),
            shape,
            params: params.to_vec(),
            curve,
            fuzzy: None,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sampled domain.
    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    /// Current crisp value, if any.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Ordered levels.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Membership curve of a level.
    pub fn level_curve(&self, level: &str) -> Result<&[f64], FuzzyError> {
        self.level_index(level)
            .map(|i| self.levels[i].curve.as_slice())
            .ok_or_else(|| self.unknown_level(level))
    }

    /// Aggregated result curve; present on output variables after the
    /// aggregation stage.
    pub fn aggregated(&self) -> Option<&[f64]> {
        self.aggregated.as_deref()
    }

    fn level_index(&self, level: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.name == level)
    }

    fn unknown_level(&self, level: &str) -> FuzzyError {
        FuzzyError::UnknownLevel {
            variable: self.name.clone(),
            level: level.to_string(),
        }
    }

    // ========================================================================
    // Pipeline Operations
    // ========================================================================

    /// Fuzzify the crisp value against one level.
    ///
    /// Returns `Ok(None)` when the variable has no value: "cannot evaluate"
    /// is a normal outcome, not a fault. The computed degree is memoized
    /// and returned bit-identically on repeat calls.
    pub fn fuzzify(&mut self, level: &str) -> Result<Option<f64>, FuzzyError> {
        let index = self
            .level_index(level)
            .ok_or_else(|| self.unknown_level(level))?;
        let value = match self.value {
            Some(v) => v,
            None => return Ok(None),
        };
        if let Some(memoized) = self.levels[index].fuzzy {
            return Ok(Some(memoized));
        }
        debug_assert!(value >= self.domain[0] && value <= self.domain[self.domain.len() - 1]);
        let degree = interp_membership(&self.domain, &self.levels[index].curve, value);
        self.levels[index].fuzzy = Some(degree);
        trace!(variable = %self.name, level, degree, "fuzzified");
        Ok(Some(degree))
    }

    /// Store the aggregated curve; normally invoked by the engine's
    /// aggregation stage.
    pub fn set_aggregated(&mut self, curve: Vec<f64>) {
        debug_assert_eq!(curve.len(), self.domain.len());
        self.aggregated = Some(curve);
    }

    /// Reduce the aggregated curve to a crisp value and store it.
    ///
    /// Preconditions: the value is unset and the aggregated curve is set;
    /// both indicate the pipeline was driven in order and are checked as
    /// debug assertions.
    pub fn defuzzify(&mut self, method: Defuzzification) -> Result<f64, FuzzyError> {
        debug_assert!(
            self.value.is_none(),
            "defuzzify on a variable that already has a value"
        );
        debug_assert!(self.aggregated.is_some(), "defuzzify before aggregation");
        let curve = self.aggregated.as_deref().ok_or_else(|| {
            FuzzyError::Defuzzification(format!("\"{}\" has no aggregated curve", self.name))
        })?;
        let crisp = method
            .defuzzify(&self.domain, curve)
            .map_err(|err| match err {
                FuzzyError::Defuzzification(reason) => {
                    FuzzyError::Defuzzification(format!("\"{}\": {}", self.name, reason))
                }
                other => other,
            })?;
        self.value = Some(crisp);
        Ok(crisp)
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Serializable view of the variable's current state.
    pub fn snapshot(&self) -> VariableSnapshot {
        VariableSnapshot {
            name: self.name.clone(),
            x: self.domain.clone(),
            value: self.value,
            levels: self
                .levels
                .iter()
                .map(|l| LevelSnapshot {
                    name: l.name.clone(),
                    curve: l.curve.clone(),
                    fuzzy_value: l.fuzzy,
                })
                .collect(),
            aggregated: self.aggregated.clone(),
        }
    }

    /// Specification that reconstructs this variable with an identical
    /// domain and identical level curves.
    pub fn to_spec(&self) -> VariableSpec {
        VariableSpec {
            name: self.name.clone(),
            min: None,
            max: None,
            x: Some(self.domain.clone()),
            value: self.value,
            levels: self
                .levels
                .iter()
                .map(|l| LevelSpec {
                    name: l.name.clone(),
                    mf_type: Some(l.shape),
                    mf_params: Some(l.params.clone()),
                })
                .collect(),
        }
    }
}
