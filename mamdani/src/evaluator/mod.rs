//! Mamdani inference
//!
//! Evaluates one set of crisp inputs by:
//! 1. Checking the inputs match the input variables exactly
//! 2. Fuzzifying every input
//! 3. Computing each rule's firing strength
//! 4. Clipping and aggregating the output shapes
//! 5. Taking the centroid of the aggregate

pub mod aggregation;
pub mod context;
pub mod defuzzify;
pub mod rules;

use crate::{
    Engine, FuzzifiedInput, InputValue, LabelDegree, MamdaniError, MamdaniResult, Response,
    RuleFiring,
};
use aggregation::{group_strengths, AggregatedSet};
use context::EvaluationContext;
use std::collections::HashMap;
use tracing::debug;

/// Runs the inference pipeline against an engine's immutable configuration
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate crisp inputs and record every stage
    pub fn evaluate(
        &self,
        engine: &Engine,
        inputs: &HashMap<String, f64>,
    ) -> MamdaniResult<Response> {
        // Phase 1: exact input coverage
        check_inputs(engine, inputs)?;

        // Phase 2: fuzzification
        let context =
            EvaluationContext::fuzzify(engine.input_variables(), inputs, engine.policy())?;

        // Phase 3: rule strengths
        let mut firings = Vec::with_capacity(engine.rules().len());
        for (index, rule) in engine.rules().iter().enumerate() {
            let strength = rules::evaluate_rule(rule, &context)?;
            firings.push(RuleFiring {
                index,
                rule: rule.to_string(),
                consequent: rule.consequent.clone(),
                strength,
            });
        }
        debug!(
            fired = firings.iter().filter(|f| f.fired()).count(),
            rules = firings.len(),
            "evaluated rule strengths"
        );

        // Phase 4: implication and aggregation
        let shapes = engine.output_shapes();
        let strengths = group_strengths(
            shapes,
            firings.iter().map(|f| (f.consequent.as_str(), f.strength)),
        );
        let points = engine.output_variable().universe.points();
        let aggregate = AggregatedSet::aggregate(points, shapes, &strengths);

        // Phase 5: defuzzification
        let score = defuzzify::centroid(&aggregate)?;
        let category = engine.categorize(score).to_string();
        debug!(score, category = %category, height = aggregate.height(), "defuzzified");

        Ok(Response {
            inputs: input_values(engine, &context),
            fuzzified: fuzzified_inputs(engine, &context),
            rules: firings,
            output_variable: engine.output_variable().name.clone(),
            score,
            category,
            aggregate,
        })
    }
}

/// Inputs must name exactly the engine's input variables
fn check_inputs(engine: &Engine, inputs: &HashMap<String, f64>) -> MamdaniResult<()> {
    let mut missing: Vec<String> = engine
        .input_variables()
        .iter()
        .filter(|v| !inputs.contains_key(&v.name))
        .map(|v| v.name.clone())
        .collect();
    let mut unexpected: Vec<String> = inputs
        .keys()
        .filter(|name| engine.input_variable(name).is_none())
        .cloned()
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        return Ok(());
    }
    missing.sort();
    unexpected.sort();
    Err(MamdaniError::InputMismatch {
        missing,
        unexpected,
    })
}

fn input_values(engine: &Engine, context: &EvaluationContext) -> Vec<InputValue> {
    engine
        .input_variables()
        .iter()
        .filter_map(|v| {
            context.applied.get(&v.name).map(|(value, applied)| InputValue {
                name: v.name.clone(),
                value: *value,
                applied: *applied,
            })
        })
        .collect()
}

fn fuzzified_inputs(engine: &Engine, context: &EvaluationContext) -> Vec<FuzzifiedInput> {
    engine
        .input_variables()
        .iter()
        .filter_map(|v| {
            context.fuzzified.get(&v.name).map(|degrees| FuzzifiedInput {
                variable: v.name.clone(),
                degrees: degrees
                    .iter()
                    .map(|(label, degree)| LabelDegree {
                        label: label.clone(),
                        degree: *degree,
                    })
                    .collect(),
            })
        })
        .collect()
}
