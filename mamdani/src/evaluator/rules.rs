//! Rule evaluation
//!
//! A rule's firing strength is its condition evaluated over fuzzified inputs:
//! AND is the minimum of its operands, OR the maximum.

use super::context::EvaluationContext;
use crate::{Condition, FuzzyRule, MamdaniResult};

/// Fuzzy AND (t-norm): minimum
pub fn fuzzy_and(left: f64, right: f64) -> f64 {
    left.min(right)
}

/// Fuzzy OR (t-conorm): maximum
pub fn fuzzy_or(left: f64, right: f64) -> f64 {
    left.max(right)
}

/// Evaluate a condition tree to a degree in `[0, 1]`
pub fn evaluate_condition(
    condition: &Condition,
    context: &EvaluationContext,
) -> MamdaniResult<f64> {
    match condition {
        Condition::Term(term) => context.degree(term),
        Condition::And(left, right) => Ok(fuzzy_and(
            evaluate_condition(left, context)?,
            evaluate_condition(right, context)?,
        )),
        Condition::Or(left, right) => Ok(fuzzy_or(
            evaluate_condition(left, context)?,
            evaluate_condition(right, context)?,
        )),
    }
}

/// Firing strength of a rule
pub fn evaluate_rule(rule: &FuzzyRule, context: &EvaluationContext) -> MamdaniResult<f64> {
    evaluate_condition(&rule.condition, context)
}
