//! Error types for fuzzy inference operations.
//!
//! ## Purpose
//!
//! This module defines the single error enum used throughout the crate.
//! Every fallible operation returns `Result<_, FuzzyError>`; all fatal
//! errors abort the current inference run. There is no partial-result mode:
//! either the full Evaluate -> Aggregate -> Defuzzify sequence completes for
//! all output variables, or the run fails and no output value is valid.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: configuration problems surface at construction, never at
//!   first use deep inside a run.
//! * **Deterministic**: inference is a pure function of its inputs, so a
//!   failed run reproduces the same error on retry; no retry logic exists.
//! * **Soft-failure path**: a missing input value in permissive mode is NOT
//!   an error; it propagates as "rule does not fire" (see `inference::rule`).
//!   `MissingValue` is raised only when strict checking is requested.

use thiserror::Error;

/// Errors produced during engine construction or an inference run.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FuzzyError {
    /// Malformed specification: unsupported level count, bad membership
    /// parameters, bad weight, missing required field.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Degenerate or inverted domain bounds.
    #[error("invalid range: min {min} must be less than max {max}")]
    InvalidRange {
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },

    /// A crisp value lies outside its variable's sampled domain.
    #[error("value {value} out of range [{min}, {max}] for variable \"{variable}\"")]
    OutOfRange {
        /// Name of the offending variable.
        variable: String,
        /// The rejected value.
        value: f64,
        /// Domain lower bound.
        min: f64,
        /// Domain upper bound.
        max: f64,
    },

    /// An input variable required by some rule has no crisp value.
    /// Raised only when strict checking is enabled.
    #[error("\"{variable}\" has no value")]
    MissingValue {
        /// Name of the variable lacking a value.
        variable: String,
    },

    /// The aggregated curve carries no usable signal (all-zero mass).
    #[error("cannot defuzzify: {0}")]
    Defuzzification(String),

    /// A referenced level name does not exist on the variable.
    #[error("unknown level \"{level}\" for variable \"{variable}\"")]
    UnknownLevel {
        /// The variable that was queried.
        variable: String,
        /// The level name that was not found.
        level: String,
    },

    /// A referenced variable name does not exist in the registry.
    #[error("\"{name}\" not found")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },
}
