//! Rules: antecedent combination and consequent implication.
//!
//! ## Purpose
//!
//! A [`Rule`] pairs one [`Antecedent`] and one [`Consequent`] with a
//! weight. Evaluating a rule evaluates its antecedent, then feeds the
//! weighted truth degree into its consequent, which clips each referenced
//! output level's curve.
//!
//! ## Design notes
//!
//! * **No-fire path**: when any antecedent variable has no crisp value, the
//!   antecedent's result stays `None` and the consequent is left untouched.
//!   The rule simply contributes nothing to aggregation; no error is
//!   raised. This is a first-class branch, not an exception path.
//! * **At-most-once evaluation**: antecedent and consequent results are
//!   written at most once per run. Re-evaluation is a contract violation
//!   caught by debug assertions; with assertions compiled out the behavior
//!   is undefined.
//! * **Shared references**: rules address variables through registry keys;
//!   curves are read from the shared instances, never copied into rules.

// Internal dependencies
use crate::inference::registry::{VariableKey, VariableRegistry};
use crate::math::reduce::{Implication, LogicOp};
use crate::primitives::errors::FuzzyError;
use crate::spec::{
    AntecedentSnapshot, ConsequentSnapshot, RuleSnapshot, TermSpec,
};

// ============================================================================
// Terms
// ============================================================================

/// One (variable, level) reference inside a rule clause.
#[derive(Debug, Clone)]
pub struct Term {
    /// Registry handle of the referenced variable.
    pub var: VariableKey,
    /// Level name on that variable.
    pub level: String,
}

fn term_specs(terms: &[Term], vars: &VariableRegistry) -> Vec<TermSpec> {
    terms
        .iter()
        .map(|t| TermSpec {
            name: vars.get(t.var).name().to_string(),
            level: t.level.clone(),
        })
        .collect()
}

// ============================================================================
// Antecedent
// ============================================================================

/// The "if" part of a rule.
#[derive(Debug, Clone)]
pub struct Antecedent {
    op: LogicOp,
    terms: Vec<Term>,
    result: Option<f64>,
}

impl Antecedent {
    /// Create an unevaluated antecedent.
    pub fn new(op: LogicOp, terms: Vec<Term>) -> Self {
        Self {
            op,
            terms,
            result: None,
        }
    }

    /// Combining operator.
    pub fn op(&self) -> LogicOp {
        self.op
    }

    /// Ordered operands.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Combined truth degree; `None` until evaluated or when the rule
    /// cannot fire.
    pub fn result(&self) -> Option<f64> {
        self.result
    }

    /// Combine the fuzzified values of the referenced variables.
    ///
    /// If any referenced variable is unfuzzifiable (no crisp value), the
    /// result stays `None` and `Ok(None)` is returned.
    pub fn evaluate(&mut self, vars: &mut VariableRegistry) -> Result<Option<f64>, FuzzyError> {
        debug_assert!(self.result.is_none(), "antecedent evaluated twice");
        let mut degrees = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            match vars.get_mut(term.var).fuzzify(&term.level)? {
                Some(degree) => degrees.push(degree),
                None => return Ok(None),
            }
        }
        let combined = self.op.combine(&degrees);
        self.result = Some(combined);
        Ok(Some(combined))
    }

    fn snapshot(&self, vars: &VariableRegistry) -> AntecedentSnapshot {
        AntecedentSnapshot {
            operator: self.op,
            variables: term_specs(&self.terms, vars),
            result: self.result,
        }
    }
}

// ============================================================================
// Consequent
// ============================================================================

/// The "then" part of a rule.
#[derive(Debug, Clone)]
pub struct Consequent {
    implication: Implication,
    terms: Vec<Term>,
    /// Implicated curve per term, aligned with `terms`; each written at
    /// most once per run.
    results: Vec<Option<Vec<f64>>>,
}

impl Consequent {
    /// Create an unevaluated consequent.
    pub fn new(implication: Implication, terms: Vec<Term>) -> Self {
        let results = vec![None; terms.len()];
        Self {
            implication,
            terms,
            results,
        }
    }

    /// Implication operator.
    pub fn implication(&self) -> Implication {
        self.implication
    }

    /// Ordered targets.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Implicated curve for a variable, if this rule fired for it.
    pub fn implicated(&self, var: VariableKey) -> Option<&[f64]> {
        self.terms
            .iter()
            .position(|t| t.var == var)
            .and_then(|i| self.results[i].as_deref())
    }

    /// Clip each referenced level's curve by the weighted truth degree.
    pub fn evaluate(
        &mut self,
        weighted_degree: f64,
        vars: &VariableRegistry,
    ) -> Result<(), FuzzyError> {
        debug_assert!(
            self.results.iter().all(Option::is_none),
            "consequent evaluated twice"
        );
        for (i, term) in self.terms.iter().enumerate() {
            let curve = vars.get(term.var).level_curve(&term.level)?;
            self.results[i] = Some(self.implication.apply(curve, weighted_degree));
        }
        Ok(())
    }

    fn snapshot(&self, vars: &VariableRegistry) -> ConsequentSnapshot {
        ConsequentSnapshot {
            implication: self.implication,
            variables: term_specs(&self.terms, vars),
            result: self.results.clone(),
        }
    }
}

// ============================================================================
// Rule
// ============================================================================

/// One fuzzy rule: antecedent, consequent, and weight.
#[derive(Debug, Clone)]
pub struct Rule {
    weight: f64,
    antecedent: Antecedent,
    consequent: Consequent,
}

impl Rule {
    /// Create a rule. The weight must already be validated to `(0, 1]`.
    pub fn new(antecedent: Antecedent, consequent: Consequent, weight: f64) -> Self {
        debug_assert!(weight > 0.0 && weight <= 1.0);
        Self {
            weight,
            antecedent,
            consequent,
        }
    }

    /// Rule importance in `(0, 1]`.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The "if" part.
    pub fn antecedent(&self) -> &Antecedent {
        &self.antecedent
    }

    /// The "then" part.
    pub fn consequent(&self) -> &Consequent {
        &self.consequent
    }

    /// Evaluate the antecedent and, if it fired, the consequent with the
    /// weighted truth degree.
    pub fn evaluate(&mut self, vars: &mut VariableRegistry) -> Result<(), FuzzyError> {
        if let Some(degree) = self.antecedent.evaluate(vars)? {
            self.consequent.evaluate(degree * self.weight, vars)?;
        }
        Ok(())
    }

    /// Serializable view of the rule's current state.
    pub fn snapshot(&self, vars: &VariableRegistry) -> RuleSnapshot {
        RuleSnapshot {
            weight: self.weight,
            antecedent: self.antecedent.snapshot(vars),
            consequent: self.consequent.snapshot(vars),
        }
    }
}
