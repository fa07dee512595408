//! High-level API for Mamdani fuzzy inference.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point: a small
//! fluent builder over [`InferenceEngine`] construction, plus the public
//! re-exports of every type a caller needs.
//!
//! ## Key concepts
//!
//! * **Configuration Flow**: `Mamdani::new(spec)` -> optional
//!   `.allow_missing(true)` -> `.build()` -> `engine.run()`.
//! * **Strictness**: by default, construction fails when an input variable
//!   referenced by any rule has no crisp value. Permissive mode turns that
//!   into the no-fire path instead.

// Publicly re-exported types
pub use crate::engine::executor::{InferenceEngine, Stage};
pub use crate::inference::registry::{VariableKey, VariableRegistry};
pub use crate::inference::rule::{Antecedent, Consequent, Rule, Term};
pub use crate::inference::variable::{Level, Variable};
pub use crate::math::membership::MfShape;
pub use crate::math::reduce::{Aggregation, Defuzzification, Implication, LogicOp};
pub use crate::primitives::errors::FuzzyError;
pub use crate::spec::{
    AntecedentSpec, ConsequentSpec, EngineSnapshot, EngineSpec, LevelSpec, RuleSpec, TermSpec,
    VariableSpec,
};

/// Fluent builder for configuring and constructing an inference engine.
#[derive(Debug, Clone)]
pub struct MamdaniBuilder {
    spec: EngineSpec,
    allow_missing: bool,
}

impl MamdaniBuilder {
    /// Start building an engine from a specification.
    pub fn new(spec: EngineSpec) -> Self {
        Self {
            spec,
            allow_missing: false,
        }
    }

    /// Allow input variables without crisp values.
    ///
    /// Rules referencing a valueless variable then silently do not fire
    /// instead of failing construction with
    /// [`FuzzyError::MissingValue`](crate::primitives::errors::FuzzyError::MissingValue).
    pub fn allow_missing(mut self, allow: bool) -> Self {
        self.allow_missing = allow;
        self
    }

    /// Validate the specification and construct the engine.
    pub fn build(self) -> Result<InferenceEngine, FuzzyError> {
        InferenceEngine::build(&self.spec, self.allow_missing)
    }
}
