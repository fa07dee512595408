//! Input validation for engine specifications.
//!
//! ## Purpose
//!
//! This module provides validation for the specification an engine is
//! constructed from, and for the optional strict missing-value check that
//! runs before inference. Validation of a single variable's domain, value
//! range, and level shapes happens during `Variable` construction; the
//! checks here are the cross-cutting ones a single variable cannot see.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: validation stops at the first error encountered.
//! * **Efficiency**: checks are ordered from cheap to expensive.
//! * **Construction-time dispatch**: operator and method tags are closed
//!   enums parsed before validation starts; an unsupported tag can never
//!   reach a run.
//!
//! ## Invariants
//!
//! * A specification that passes validation constructs an engine whose
//!   every rule term resolves to an existing variable and level.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not build variables or rules.
//! * This module does not provide automatic correction of invalid inputs.

// Internal dependencies
use crate::inference::registry::VariableRegistry;
use crate::inference::rule::Rule;
use crate::primitives::errors::FuzzyError;
use crate::spec::{EngineSpec, TermSpec};

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for engine specifications.
///
/// All methods return `Result<(), FuzzyError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Specification Validation
    // ========================================================================

    /// Validate the cross-cutting structure of a specification.
    pub fn validate_spec(spec: &EngineSpec) -> Result<(), FuzzyError> {
        // Check 1: Non-empty system
        if spec.variables.is_empty() {
            return Err(FuzzyError::Config(
                "specification has no variables".to_string(),
            ));
        }
        if spec.rules.is_empty() {
            return Err(FuzzyError::Config("specification has no rules".to_string()));
        }

        // Check 2: Per-rule structure and references
        for rule in &spec.rules {
            Self::validate_weight(rule.weight)?;
            Self::validate_clause(&rule.antecedent.variables, "antecedent", spec)?;
            Self::validate_clause(&rule.consequent.variables, "consequent", spec)?;
        }

        Ok(())
    }

    /// Validate a rule weight: finite and in `(0, 1]`.
    pub fn validate_weight(weight: f64) -> Result<(), FuzzyError> {
        if !weight.is_finite() || weight <= 0.0 || weight > 1.0 {
            return Err(FuzzyError::Config(format!(
                "rule weight must be in (0, 1], got {}",
                weight
            )));
        }
        Ok(())
    }

    /// Validate one rule clause: non-empty, and every (variable, level)
    /// reference resolves against the specification.
    fn validate_clause(
        terms: &[TermSpec],
        role: &str,
        spec: &EngineSpec,
    ) -> Result<(), FuzzyError> {
        if terms.is_empty() {
            return Err(FuzzyError::Config(format!(
                "rule {} references no variables",
                role
            )));
        }
        for term in terms {
            let variable = spec
                .variables
                .iter()
                .find(|v| v.name == term.name)
                .ok_or_else(|| FuzzyError::NotFound {
                    name: term.name.clone(),
                })?;
            if !variable.levels.iter().any(|l| l.name == term.level) {
                return Err(FuzzyError::UnknownLevel {
                    variable: term.name.clone(),
                    level: term.level.clone(),
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Runtime Preconditions
    // ========================================================================

    /// Strict missing-value check: every input variable referenced by any
    /// rule's antecedent must carry a crisp value.
    ///
    /// Fails with [`FuzzyError::MissingValue`] naming the first offending
    /// variable in rule order. Skipped in permissive mode, where missing
    /// values propagate as "rule does not fire" instead.
    pub fn check_missing_values(
        rules: &[Rule],
        vars: &VariableRegistry,
    ) -> Result<(), FuzzyError> {
        for rule in rules {
            for term in rule.antecedent().terms() {
                let variable = vars.get(term.var);
                if variable.value().is_none() {
                    return Err(FuzzyError::MissingValue {
                        variable: variable.name().to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
