//! # Mamdani Engine
//!
//! **Fuzzy inference for scores that are hard to measure**
//!
//! Mamdani scores a composite condition (for example the health of an economy)
//! from a handful of crisp indicators. Indicators are described with linguistic
//! variables, combined with fuzzy rules and collapsed back into a single number
//! with centroid defuzzification.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mamdani::{load_knowledge, Engine, MamdaniResult, ResourceLimits};
//! use std::collections::HashMap;
//!
//! fn main() -> MamdaniResult<()> {
//!     let knowledge = load_knowledge(
//!         r#"{
//!             "inputs": [
//!                 { "name": "inflation",
//!                   "labels": [ { "label": "low", "triangle": [0, 0, 8] },
//!                               { "label": "high", "triangle": [6, 20, 20] } ] }
//!             ],
//!             "output": {
//!                 "name": "economic_condition",
//!                 "universe": { "min": 0, "max": 10, "step": 0.1 },
//!                 "labels": [ { "label": "poor", "triangle": [0, 0, 3] },
//!                             { "label": "good", "triangle": [7, 10, 10] } ]
//!             },
//!             "rules": [
//!                 { "when": "inflation is high", "then": "poor" },
//!                 { "when": "inflation is low", "then": "good" }
//!             ]
//!         }"#,
//!         "economy.json",
//!         &ResourceLimits::default(),
//!     )?;
//!
//!     let engine = Engine::new(knowledge)?;
//!     let inputs = HashMap::from([("inflation".to_string(), 12.5)]);
//!     let score = engine.evaluate(&inputs)?;
//!     println!("{:.2} ({})", score, engine.categorize(score));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Linguistic variables
//! A variable owns a discretized universe and a set of labels such as `low`,
//! `medium` and `high`, each described by a triangular membership function.
//!
//! ### Rules
//! A rule reads like `inflation is high and unemployment is high` and points
//! at one label of the output variable. `and` takes the minimum of its
//! operands, `or` the maximum.
//!
//! ### Inference
//! Every rule clips its output label at its firing strength, the clipped
//! shapes are merged with a pointwise maximum and the centroid of the merged
//! shape is the score.

pub mod ast;
pub mod category;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod loader;
pub mod membership;
pub mod parser;
pub mod resource_limits;
pub mod response;
pub mod semantic;
pub mod validator;
pub mod variable;

pub use ast::Span;
pub use category::{CategoryScale, Threshold};
pub use engine::Engine;
pub use error::{ErrorDetails, MamdaniError, SourceLocation};
pub use evaluator::aggregation::AggregatedSet;
pub use loader::{load_knowledge, KnowledgeFile};
pub use membership::MembershipFunction;
pub use parser::{parse_condition, parse_consequent, parse_inputs};
pub use resource_limits::ResourceLimits;
pub use response::{FuzzifiedInput, InputValue, LabelDegree, Response, RuleFiring};
pub use semantic::{Condition, FuzzyRule, KnowledgeBase, Term};
pub use validator::Validator;
pub use variable::{DomainPolicy, Fuzzified, LinguisticVariable, Universe};

/// Result type for Mamdani operations
pub type MamdaniResult<T> = Result<T, MamdaniError>;

#[cfg(test)]
mod tests;
