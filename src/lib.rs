//! # mamdani-rs: Mamdani Fuzzy Inference for Rust
//!
//! A Mamdani-style fuzzy inference engine: given named input variables with
//! crisp numeric values and a table of fuzzy rules relating input variable
//! levels to output variable levels, it computes crisp output values.
//!
//! ## How inference works
//!
//! 1. **Fuzzification**: each input's crisp value is converted into a
//!    degree of membership per referenced level by piecewise-linear
//!    interpolation of the level's membership curve.
//! 2. **Rule evaluation**: each rule combines its antecedent degrees
//!    (AND = min, OR = max) into one truth degree, then clips each
//!    referenced output level's curve at the weighted degree (MIN
//!    implication).
//! 3. **Aggregation**: per output variable, all rules' implicated curves
//!    are reduced pointwise (OR = max, SUM, AVERAGE) into one curve.
//! 4. **Defuzzification**: the aggregated curve is reduced to a crisp
//!    number (CENTROID).
//!
//! Rules whose inputs have no value simply do not fire; that is a normal
//! outcome, not an error. An output variable no rule fired for fails
//! loudly at defuzzification rather than producing an arbitrary number.
//!
//! ## Quick Start
//!
//! ```rust
//! use mamdani_rs::prelude::*;
//!
//! // A thermostat: one input, one output, two rules.
//! let spec = EngineSpec {
//!     aggregation: Aggregation::Or,
//!     defuzzification: Defuzzification::Centroid,
//!     variables: vec![
//!         VariableSpec {
//!             name: "temperature".into(),
//!             min: Some(0.0),
//!             max: Some(40.0),
//!             x: None,
//!             value: Some(12.0),
//!             levels: vec![
//!                 LevelSpec { name: "low".into(), mf_type: None, mf_params: None },
//!                 LevelSpec { name: "high".into(), mf_type: None, mf_params: None },
//!             ],
//!         },
//!         VariableSpec {
//!             name: "heater".into(),
//!             min: Some(0.0),
//!             max: Some(10.0),
//!             x: None,
//!             value: None,
//!             levels: vec![
//!                 LevelSpec { name: "low".into(), mf_type: None, mf_params: None },
//!                 LevelSpec { name: "high".into(), mf_type: None, mf_params: None },
//!             ],
//!         },
//!     ],
//!     rules: vec![
//!         RuleSpec {
//!             weight: 1.0,
//!             antecedent: AntecedentSpec {
//!                 operator: LogicOp::And,
//!                 variables: vec![TermSpec { name: "temperature".into(), level: "low".into() }],
//!             },
//!             consequent: ConsequentSpec {
//!                 implication: Implication::Min,
//!                 variables: vec![TermSpec { name: "heater".into(), level: "high".into() }],
//!             },
//!         },
//!         RuleSpec {
//!             weight: 1.0,
//!             antecedent: AntecedentSpec {
//!                 operator: LogicOp::And,
//!                 variables: vec![TermSpec { name: "temperature".into(), level: "high".into() }],
//!             },
//!             consequent: ConsequentSpec {
//!                 implication: Implication::Min,
//!                 variables: vec![TermSpec { name: "heater".into(), level: "low".into() }],
//!             },
//!         },
//!     ],
//! };
//!
//! let mut engine = Mamdani::new(spec).build()?;
//! engine.run()?;
//!
//! // Cold room, so the heater runs well above half power.
//! let heater = engine.variable_value("heater")?.unwrap();
//! assert!(heater > 5.0 && heater < 10.0);
//! # Ok::<(), FuzzyError>(())
//! ```
//!
//! ## Specification structure
//!
//! The [`spec::EngineSpec`] family mirrors a language-neutral nested
//! structure of maps, sequences and primitives, so external collaborators
//! (YAML/JSON loaders, spreadsheet readers, plotting tools) can produce and
//! consume it without knowing this crate's internals. All serde-enabled;
//! unrecognized operator or method tags fail at parse time.
//!
//! Variables may give an explicit sampled domain `x` or `min`/`max` (ten
//! intervals). Levels without explicit parameters take canonical evenly
//! overlapping triangles, defined for 2 to 5 levels per variable.
//!
//! ## Error handling
//!
//! Every fallible operation returns `Result<_, FuzzyError>`. Configuration
//! problems fail at construction; a run either completes for all output
//! variables or aborts with no valid outputs. See
//! [`primitives::errors::FuzzyError`].

#![deny(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - error taxonomy.
pub mod primitives;

// Layer 2: Math - pure numeric functions.
//
// Domain sampling, triangular membership generation, piecewise-linear
// interpolation, and the operator library (combination, implication,
// aggregation, defuzzification).
pub mod math;

// Layer 3: Specification - the serde data model external collaborators
// produce and consume.
pub mod spec;

// Layer 4: Inference - stateful objects: variables, the shared variable
// registry, and rules.
pub mod inference;

// Layer 5: Engine - specification validation and the pipeline state
// machine.
pub mod engine;

// Layer 6: API - fluent builder and public re-exports.
pub mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Convenience prelude re-exporting the commonly used types.
///
/// ```
/// use mamdani_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        Aggregation, AntecedentSpec, ConsequentSpec, Defuzzification, EngineSnapshot, EngineSpec,
        FuzzyError, Implication, InferenceEngine, Level, LevelSpec, LogicOp,
        MamdaniBuilder as Mamdani, MfShape, RuleSpec, Stage, TermSpec, Variable, VariableSpec,
    };
}
