//! Language-neutral specification structures.
//!
//! ## Purpose
//!
//! This module defines the serde data model external collaborators use to
//! talk to the engine. Spreadsheet readers, YAML/JSON loaders and plotting
//! tools are deliberately outside this crate; they produce an [`EngineSpec`]
//! (nested maps and sequences of primitives) and consume an
//! [`EngineSnapshot`].
//!
//! ## Design notes
//!
//! * **Input vs output shape**: the snapshot mirrors the spec shape
//!   augmented with each variable's sampled domain, current value,
//!   per-level curves, memoized fuzzified values and aggregated curves.
//! * **Defaults**: rule weight defaults to 1.0; membership shape defaults
//!   to `triangle`; a variable with min/max and no explicit `x` is sampled
//!   with ten intervals.
//! * **Closed tags**: operator and method fields deserialize directly into
//!   the closed enums of `math::reduce`, so an unrecognized string is a
//!   parse error, never a silent default.

// External dependencies
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::membership::MfShape;
use crate::math::reduce::{Aggregation, Defuzzification, Implication, LogicOp};

// ============================================================================
// Input Specification
// ============================================================================

/// Complete specification of an inference system and its input values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSpec {
    /// Method for reducing implicated curves per output variable.
    pub aggregation: Aggregation,
    /// Method for reducing an aggregated curve to a crisp number.
    pub defuzzification: Defuzzification,
    /// Every variable referenced by the rules, inputs and outputs alike.
    pub variables: Vec<VariableSpec>,
    /// The rule table, evaluated in order.
    pub rules: Vec<RuleSpec>,
}

/// Specification of one fuzzy variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    /// Unique variable name.
    pub name: String,
    /// Domain lower bound; required unless `x` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Domain upper bound; required unless `x` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Explicit sampled domain, strictly increasing; overrides min/max.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<f64>>,
    /// Crisp value; set for inputs, absent for outputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Ordered levels, low to high.
    pub levels: Vec<LevelSpec>,
}

/// Specification of one fuzzy level (fuzzy set) of a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Level name, e.g. "low".
    pub name: String,
    /// Membership shape; defaults to `triangle`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mf_type: Option<MfShape>,
    /// Explicit shape parameters; defaults to the canonical table entry
    /// for the variable's level count and this level's position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mf_params: Option<Vec<f64>>,
}

/// Specification of one fuzzy rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Rule importance in `(0, 1]`.
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// The "if" part.
    pub antecedent: AntecedentSpec,
    /// The "then" part.
    pub consequent: ConsequentSpec,
}

/// Specification of a rule antecedent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntecedentSpec {
    /// Operator combining the operands.
    pub operator: LogicOp,
    /// Ordered (variable, level) operands.
    pub variables: Vec<TermSpec>,
}

/// Specification of a rule consequent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsequentSpec {
    /// Implication operator.
    pub implication: Implication,
    /// Ordered (variable, level) targets.
    pub variables: Vec<TermSpec>,
}

/// One (variable, level) reference inside a rule clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSpec {
    /// Variable name.
    pub name: String,
    /// Level name on that variable.
    pub level: String,
}

fn default_weight() -> f64 {
    1.0
}

// ============================================================================
// Output Snapshot
// ============================================================================

/// Full serializable state of an engine, the output counterpart of
/// [`EngineSpec`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    /// Aggregation method in use.
    pub aggregation: Aggregation,
    /// Defuzzification method in use.
    pub defuzzification: Defuzzification,
    /// Per-variable state, in specification order.
    pub variables: Vec<VariableSnapshot>,
    /// Per-rule state, in specification order.
    pub rules: Vec<RuleSnapshot>,
}

/// Serializable state of one variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableSnapshot {
    /// Variable name.
    pub name: String,
    /// Sampled domain.
    pub x: Vec<f64>,
    /// Current crisp value, if any.
    pub value: Option<f64>,
    /// Per-level curves and memoized fuzzified values.
    pub levels: Vec<LevelSnapshot>,
    /// Aggregated curve; present on output variables after aggregation.
    pub aggregated: Option<Vec<f64>>,
}

/// Serializable state of one level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSnapshot {
    /// Level name.
    pub name: String,
    /// Membership curve, one value per domain sample.
    pub curve: Vec<f64>,
    /// Memoized fuzzified degree, if computed.
    pub fuzzy_value: Option<f64>,
}

/// Serializable state of one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSnapshot {
    /// Rule weight.
    pub weight: f64,
    /// Antecedent operator, operands, and computed truth degree.
    pub antecedent: AntecedentSnapshot,
    /// Consequent implication, targets, and implicated curves.
    pub consequent: ConsequentSnapshot,
}

/// Serializable state of a rule antecedent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AntecedentSnapshot {
    /// Operator combining the operands.
    pub operator: LogicOp,
    /// Ordered operands.
    pub variables: Vec<TermSpec>,
    /// Combined truth degree; `None` when the rule could not fire.
    pub result: Option<f64>,
}

/// Serializable state of a rule consequent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsequentSnapshot {
    /// Implication operator.
    pub implication: Implication,
    /// Ordered targets.
    pub variables: Vec<TermSpec>,
    /// Implicated curve per target, in target order; `None` where the
    /// rule did not fire.
    pub result: Vec<Option<Vec<f64>>>,
}
