//! Evaluation context for a single set of crisp inputs
//!
//! Holds the fuzzified degrees every rule term is looked up in.

use crate::{DomainPolicy, Fuzzified, LinguisticVariable, MamdaniError, MamdaniResult, Term};
use std::collections::HashMap;

/// Per-evaluation state: one label -> degree table per input variable
pub struct EvaluationContext {
    /// Value as supplied and value actually fuzzified, per variable
    pub applied: HashMap<String, (f64, f64)>,

    /// Variable name -> degrees in label declaration order
    pub fuzzified: HashMap<String, Fuzzified>,
}

impl EvaluationContext {
    /// Fuzzify every input variable independently
    pub fn fuzzify(
        variables: &[LinguisticVariable],
        inputs: &HashMap<String, f64>,
        policy: &DomainPolicy,
    ) -> MamdaniResult<Self> {
        let mut applied = HashMap::with_capacity(variables.len());
        let mut fuzzified = HashMap::with_capacity(variables.len());

        for variable in variables {
            let value = *inputs
                .get(&variable.name)
                .ok_or_else(|| MamdaniError::InputMismatch {
                    missing: vec![variable.name.clone()],
                    unexpected: Vec::new(),
                })?;
            let (used, degrees) = variable.fuzzify_with(value, policy)?;
            applied.insert(variable.name.clone(), (value, used));
            fuzzified.insert(variable.name.clone(), degrees);
        }

        Ok(Self {
            applied,
            fuzzified,
        })
    }

    /// Degree of a term, failing if the reference does not resolve
    pub fn degree(&self, term: &Term) -> MamdaniResult<f64> {
        let degrees = self
            .fuzzified
            .get(&term.variable)
            .ok_or_else(|| MamdaniError::UnknownVariable(term.variable.clone()))?;

        degrees
            .iter()
            .find(|(label, _)| label == &term.label)
            .map(|(_, degree)| *degree)
            .ok_or_else(|| MamdaniError::UnknownLabel {
                variable: term.variable.clone(),
                label: term.label.clone(),
            })
    }
}
