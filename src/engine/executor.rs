//! The inference engine and its pipeline state machine.
//!
//! ## Purpose
//!
//! This module provides the engine that owns all rules and the variable
//! registry, and orchestrates the Mamdani pipeline: evaluate every rule,
//! aggregate each output variable's implicated curves, and defuzzify the
//! aggregated curves back to crisp numbers.
//!
//! ## Design notes
//!
//! * **Explicit state machine**: the engine moves through
//!   `Constructed -> Checked -> Evaluated -> Aggregated -> Defuzzified`.
//!   Stage methods debug-assert they are entered in order; driving the
//!   pipeline out of order is a programming error, not a recoverable one.
//! * **Deterministic order**: rules are evaluated in list order. Each
//!   rule's side effects are confined to its own consequent curves (plus
//!   the shared fuzzification memos, which are write-once), so order does
//!   not affect the result, but a fixed order aids reproducibility.
//! * **Derived views**: the input and output variable sets are recomputed
//!   by walking all rules' antecedents and consequents, never stored.
//! * **Loud zero-fire failure**: an output variable no rule fired for gets
//!   the all-zero aggregated curve, and defuzzification of it fails; the
//!   run never yields a silently wrong crisp value.
//!
//! ## Invariants
//!
//! * Every consequent result is written at most once per run.
//! * An output variable's value is written only by defuzzification.
//!
//! ## Non-goals
//!
//! * This module does not read external file formats (external
//!   collaborators hand it an `EngineSpec`).
//! * This module does not render plots or persist results.

// External dependencies
use tracing::{debug, trace};

// Internal dependencies
use crate::engine::validator::Validator;
use crate::inference::registry::{VariableKey, VariableRegistry};
use crate::inference::rule::{Antecedent, Consequent, Rule, Term};
use crate::inference::variable::Variable;
use crate::math::reduce::{Aggregation, Defuzzification};
use crate::primitives::errors::FuzzyError;
use crate::spec::{
    AntecedentSpec, ConsequentSpec, EngineSnapshot, EngineSpec, RuleSpec, TermSpec,
};

// ============================================================================
// Pipeline Stage
// ============================================================================

/// Pipeline position of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Variables and rules built; nothing evaluated.
    Constructed,
    /// Strict missing-value check passed.
    Checked,
    /// Every rule evaluated.
    Evaluated,
    /// Every output variable carries an aggregated curve.
    Aggregated,
    /// Every output variable carries a crisp value.
    Defuzzified,
}

// ============================================================================
// Inference Engine
// ============================================================================

/// Mamdani fuzzy inference engine.
///
/// Owns the variable registry and the rule list; rules reference variables
/// through registry keys, so variables referenced by several rules are
/// shared, mutated in place, and never copied.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    aggregation: Aggregation,
    defuzzification: Defuzzification,
    rules: Vec<Rule>,
    vars: VariableRegistry,
    stage: Stage,
}

impl InferenceEngine {
    /// Build an engine from a specification with strict missing-value
    /// checking.
    ///
    /// Equivalent to `Mamdani::new(spec).build()`. Use the builder's
    /// `allow_missing(true)` for partial input, where rules referencing
    /// valueless variables silently do not fire.
    pub fn from_spec(spec: &EngineSpec) -> Result<Self, FuzzyError> {
        Self::build(spec, false)
    }

    pub(crate) fn build(spec: &EngineSpec, allow_missing: bool) -> Result<Self, FuzzyError> {
        Validator::validate_spec(spec)?;

        let mut vars = VariableRegistry::new();
        for variable_spec in &spec.variables {
            vars.insert(Variable::from_spec(variable_spec)?)?;
        }

        let mut rules = Vec::with_capacity(spec.rules.len());
        for rule_spec in &spec.rules {
            let antecedent = Antecedent::new(
                rule_spec.antecedent.operator,
                resolve_terms(&rule_spec.antecedent.variables, &vars)?,
            );
            let consequent = Consequent::new(
                rule_spec.consequent.implication,
                resolve_terms(&rule_spec.consequent.variables, &vars)?,
            );
            rules.push(Rule::new(antecedent, consequent, rule_spec.weight));
        }

        let mut engine = Self {
            aggregation: spec.aggregation,
            defuzzification: spec.defuzzification,
            rules,
            vars,
            stage: Stage::Constructed,
        };
        if !allow_missing {
            engine.check_missing_values()?;
        }
        Ok(engine)
    }

    // ========================================================================
    // Pipeline Stages
    // ========================================================================

    /// Strict check that every rule's input variables carry values.
    pub fn check_missing_values(&mut self) -> Result<(), FuzzyError> {
        debug_assert_eq!(self.stage, Stage::Constructed, "check after evaluation");
        Validator::check_missing_values(&self.rules, &self.vars)?;
        self.stage = Stage::Checked;
        Ok(())
    }

    /// Perform fuzzy inference: evaluate every rule, aggregate all rules'
    /// implicated curves, defuzzify each aggregated curve.
    ///
    /// On error the run is aborted and no output value is valid; inference
    /// is deterministic, so retrying without changing the specification
    /// reproduces the same error.
    pub fn run(&mut self) -> Result<(), FuzzyError> {
        self.evaluate_rules()?;
        self.aggregate()?;
        self.defuzzify_outputs()?;
        Ok(())
    }

    /// Evaluate every rule in list order.
    pub fn evaluate_rules(&mut self) -> Result<(), FuzzyError> {
        debug_assert!(
            self.stage <= Stage::Checked,
            "rules already evaluated this run"
        );
        debug!(rules = self.rules.len(), "evaluating rules");
        for (index, rule) in self.rules.iter_mut().enumerate() {
            rule.evaluate(&mut self.vars)?;
            trace!(rule = index, degree = ?rule.antecedent().result(), "rule evaluated");
        }
        self.stage = Stage::Evaluated;
        Ok(())
    }

    /// Aggregate every output variable's implicated curves.
    pub fn aggregate(&mut self) -> Result<(), FuzzyError> {
        debug_assert_eq!(self.stage, Stage::Evaluated, "aggregate before evaluation");
        let outputs = self.output_keys();
        debug!(
            outputs = outputs.len(),
            method = %self.aggregation,
            "aggregating implicated curves"
        );
        for key in outputs {
            let len = self.vars.get(key).domain().len();
            let curves: Vec<&[f64]> = self
                .rules
                .iter()
                .filter_map(|rule| rule.consequent().implicated(key))
                .collect();
            trace!(
                variable = self.vars.get(key).name(),
                contributing = curves.len(),
                "aggregating"
            );
            let aggregated = self.aggregation.aggregate(&curves, len);
            self.vars.get_mut(key).set_aggregated(aggregated);
        }
        self.stage = Stage::Aggregated;
        Ok(())
    }

    /// Defuzzify every output variable's aggregated curve.
    pub fn defuzzify_outputs(&mut self) -> Result<(), FuzzyError> {
        debug_assert_eq!(self.stage, Stage::Aggregated, "defuzzify before aggregation");
        for key in self.output_keys() {
            let variable = self.vars.get_mut(key);
            let crisp = variable.defuzzify(self.defuzzification)?;
            debug!(variable = variable.name(), value = crisp, "defuzzified");
        }
        self.stage = Stage::Defuzzified;
        Ok(())
    }

    // ========================================================================
    // Derived Views
    // ========================================================================

    fn input_keys(&self) -> Vec<VariableKey> {
        let mut keys = Vec::new();
        for rule in &self.rules {
            for term in rule.antecedent().terms() {
                if !keys.contains(&term.var) {
                    keys.push(term.var);
                }
            }
        }
        keys
    }

    fn output_keys(&self) -> Vec<VariableKey> {
        let mut keys = Vec::new();
        for rule in &self.rules {
            for term in rule.consequent().terms() {
                if !keys.contains(&term.var) {
                    keys.push(term.var);
                }
            }
        }
        keys
    }

    /// Variables referenced by any rule's antecedent, in rule order.
    pub fn input_variables(&self) -> Vec<&Variable> {
        self.input_keys().iter().map(|&k| self.vars.get(k)).collect()
    }

    /// Variables referenced by any rule's consequent, in rule order.
    pub fn output_variables(&self) -> Vec<&Variable> {
        self.output_keys().iter().map(|&k| self.vars.get(k)).collect()
    }

    /// Crisp value of a variable found in either derived view.
    ///
    /// Fails with [`FuzzyError::NotFound`] when no rule references the
    /// name.
    pub fn variable_value(&self, name: &str) -> Result<Option<f64>, FuzzyError> {
        for key in self.input_keys().into_iter().chain(self.output_keys()) {
            let variable = self.vars.get(key);
            if variable.name() == name {
                return Ok(variable.value());
            }
        }
        Err(FuzzyError::NotFound {
            name: name.to_string(),
        })
    }

    /// Aggregation method in use.
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Defuzzification method in use.
    pub fn defuzzification(&self) -> Defuzzification {
        self.defuzzification
    }

    /// The rule list, in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Current pipeline stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Serializable state of the whole engine: the specification shape
    /// augmented with sampled domains, values, per-level curves, fuzzified
    /// values, and aggregated curves.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            aggregation: self.aggregation,
            defuzzification: self.defuzzification,
            variables: self.vars.iter().map(|(_, v)| v.snapshot()).collect(),
            rules: self.rules.iter().map(|r| r.snapshot(&self.vars)).collect(),
        }
    }

    /// Specification that reconstructs an engine with identical variable
    /// domains, level curves, and rule structure.
    ///
    /// Volatile run state (memoized fuzzified values, implicated and
    /// aggregated curves) is not part of the specification. Current crisp
    /// values are carried over, so a spec taken after a run includes the
    /// computed output values.
    pub fn to_spec(&self) -> EngineSpec {
        EngineSpec {
            aggregation: self.aggregation,
            defuzzification: self.defuzzification,
            variables: self.vars.iter().map(|(_, v)| v.to_spec()).collect(),
            rules: self
                .rules
                .iter()
                .map(|rule| RuleSpec {
                    weight: rule.weight(),
                    antecedent: AntecedentSpec {
                        operator: rule.antecedent().op(),
                        variables: self.term_specs(rule.antecedent().terms()),
                    },
                    consequent: ConsequentSpec {
                        implication: rule.consequent().implication(),
                        variables: self.term_specs(rule.consequent().terms()),
                    },
                })
                .collect(),
        }
    }

    fn term_specs(&self, terms: &[Term]) -> Vec<TermSpec> {
        terms
            .iter()
            .map(|t| TermSpec {
                name: self.vars.get(t.var).name().to_string(),
                level: t.level.clone(),
            })
            .collect()
    }
}

fn resolve_terms(
    specs: &[TermSpec],
    vars: &VariableRegistry,
) -> Result<Vec<Term>, FuzzyError> {
    specs
        .iter()
        .map(|term| {
            let key = vars.key(&term.name).ok_or_else(|| FuzzyError::NotFound {
                name: term.name.clone(),
            })?;
            Ok(Term {
                var: key,
                level: term.level.clone(),
            })
        })
        .collect()
}
