//! Shared variable registry.
//!
//! ## Purpose
//!
//! All [`Variable`] instances live in one slotmap owned by the engine.
//! Rules, antecedents and consequents hold lightweight [`VariableKey`]
//! handles into it, never copies, so every rule referencing "service" sees
//! the same instance and its memoized fuzzified values.
//!
//! ## Invariants
//!
//! * Variable names are unique; inserting a duplicate fails.
//! * Keys are never invalidated: variables are inserted at construction and
//!   never removed.

// External dependencies
use slotmap::{new_key_type, SlotMap};
use std::collections::HashMap;

// Internal dependencies
use crate::inference::variable::Variable;
use crate::primitives::errors::FuzzyError;

new_key_type! {
    /// Handle to a variable in the registry.
    pub struct VariableKey;
}

/// Name-indexed owner of every variable in an engine.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    vars: SlotMap<VariableKey, Variable>,
    by_name: HashMap<String, VariableKey>,
    insertion: Vec<VariableKey>,
}

impl VariableRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable, failing on a duplicate name.
    pub fn insert(&mut self, variable: Variable) -> Result<VariableKey, FuzzyError> {
        if self.by_name.contains_key(variable.name()) {
            return Err(FuzzyError::Config(format!(
                "duplicate variable \"{}\"",
                variable.name()
            )));
        }
        let name = variable.name().to_string();
        let key = self.vars.insert(variable);
        self.by_name.insert(name, key);
        self.insertion.push(key);
        Ok(key)
    }

    /// Look up a variable's key by name.
    pub fn key(&self, name: &str) -> Option<VariableKey> {
        self.by_name.get(name).copied()
    }

    /// Shared access to a variable.
    pub fn get(&self, key: VariableKey) -> &Variable {
        &self.vars[key]
    }

    /// Exclusive access to a variable.
    pub fn get_mut(&mut self, key: VariableKey) -> &mut Variable {
        &mut self.vars[key]
    }

    /// Number of registered variables.
    pub fn len(&self) -> usize {
        self.insertion.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.insertion.is_empty()
    }

    /// Iterate variables in insertion (specification) order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &Variable)> + '_ {
        self.insertion.iter().map(move |&k| (k, &self.vars[k]))
    }
}
