use crate::evaluator::aggregation::{sample_shapes, OutputShape};
use crate::evaluator::Evaluator;
use crate::{
    load_knowledge, CategoryScale, DomainPolicy, FuzzyRule, KnowledgeBase, LinguisticVariable,
    MamdaniError, MamdaniResult, ResourceLimits, Response, Validator,
};
use std::collections::HashMap;
use tracing::debug;

/// The fuzzy inference engine.
///
/// Built once from validated knowledge and immutable afterwards. Every
/// evaluation is a pure function of the engine and its inputs, so one engine
/// can be shared between threads without locking.
#[derive(Debug, Clone)]
pub struct Engine {
    inputs: Vec<LinguisticVariable>,
    output: LinguisticVariable,
    output_shapes: Vec<OutputShape>,
    rules: Vec<FuzzyRule>,
    categories: CategoryScale,
    policy: DomainPolicy,
    limits: ResourceLimits,
    evaluator: Evaluator,
    source_id: String,
}

impl Engine {
    /// Build an engine that clamps out-of-range inputs
    pub fn new(knowledge: KnowledgeBase) -> MamdaniResult<Self> {
        Self::with_options(knowledge, DomainPolicy::default(), ResourceLimits::default())
    }

    /// Build an engine with an explicit domain policy and resource limits
    pub fn with_options(
        knowledge: KnowledgeBase,
        policy: DomainPolicy,
        limits: ResourceLimits,
    ) -> MamdaniResult<Self> {
        Validator::new().validate(&knowledge)?;

        if let DomainPolicy::Reject { tolerance } = policy {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(MamdaniError::configuration(
                    format!("domain tolerance must be a non-negative number, got {}", tolerance),
                    knowledge.source_id,
                ));
            }
        }

        if knowledge.rules.len() > limits.max_rules {
            return Err(MamdaniError::ResourceLimitExceeded {
                limit_name: "max_rules".to_string(),
                limit_value: limits.max_rules.to_string(),
                actual_value: knowledge.rules.len().to_string(),
                suggestion: "Merge rules that share a consequent with 'or'".to_string(),
            });
        }
        let points = knowledge.output.universe.len();
        if points > limits.max_universe_points {
            return Err(MamdaniError::ResourceLimitExceeded {
                limit_name: "max_universe_points".to_string(),
                limit_value: limits.max_universe_points.to_string(),
                actual_value: points.to_string(),
                suggestion: "Use a coarser step for the output universe".to_string(),
            });
        }

        let output_shapes = sample_shapes(&knowledge.output);
        debug!(
            source = %knowledge.source_id,
            inputs = knowledge.inputs.len(),
            rules = knowledge.rules.len(),
            output_points = points,
            "built engine"
        );

        Ok(Self {
            inputs: knowledge.inputs,
            output: knowledge.output,
            output_shapes,
            rules: knowledge.rules,
            categories: knowledge.categories,
            policy,
            limits,
            evaluator: Evaluator::new(),
            source_id: knowledge.source_id,
        })
    }

    /// Load JSON knowledge and build an engine with default options
    pub fn from_json(content: &str, source_id: &str) -> MamdaniResult<Self> {
        let limits = ResourceLimits::default();
        let knowledge = load_knowledge(content, source_id, &limits)?;
        Self::with_options(knowledge, DomainPolicy::default(), limits)
    }

    /// Crisp output for a complete set of crisp inputs
    pub fn evaluate(&self, inputs: &HashMap<String, f64>) -> MamdaniResult<f64> {
        self.evaluate_detailed(inputs).map(|response| response.score)
    }

    /// Crisp output together with every intermediate stage
    pub fn evaluate_detailed(&self, inputs: &HashMap<String, f64>) -> MamdaniResult<Response> {
        self.evaluator.evaluate(self, inputs)
    }

    /// Category label of a crisp output
    pub fn categorize(&self, score: f64) -> &str {
        self.categories.categorize(score)
    }

    /// Input variables in declaration order
    pub fn input_variables(&self) -> &[LinguisticVariable] {
        &self.inputs
    }

    pub fn input_variable(&self, name: &str) -> Option<&LinguisticVariable> {
        self.inputs.iter().find(|v| v.name == name)
    }

    pub fn output_variable(&self) -> &LinguisticVariable {
        &self.output
    }

    pub(crate) fn output_shapes(&self) -> &[OutputShape] {
        &self.output_shapes
    }

    pub fn rules(&self) -> &[FuzzyRule] {
        &self.rules
    }

    pub fn categories(&self) -> &CategoryScale {
        &self.categories
    }

    pub fn policy(&self) -> &DomainPolicy {
        &self.policy
    }

    /// Get the resource limits the engine was built with
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }
}
