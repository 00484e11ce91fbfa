//! Knowledge loading
//!
//! Reads a JSON knowledge file into a [`KnowledgeBase`]: input variables, the
//! output variable, rules written as text and an optional category scale.
//! Everything is resolved and validated here, before any engine exists.

use crate::ast::Span;
use crate::{
    parse_condition, parse_consequent, CategoryScale, FuzzyRule, KnowledgeBase,
    LinguisticVariable, MamdaniError, MamdaniResult, MembershipFunction, ResourceLimits, Universe,
    Validator,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// The knowledge file as written on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeFile {
    pub inputs: Vec<VariableDef>,
    pub output: VariableDef,
    pub rules: Vec<RuleDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoryScale>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableDef {
    pub name: String,
    /// Derived from the label parameters when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub universe: Option<UniverseDef>,
    pub labels: Vec<LabelDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UniverseDef {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelDef {
    pub label: String,
    pub triangle: [f64; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDef {
    pub when: String,
    pub then: String,
}

/// Parse and validate knowledge from JSON text
pub fn load_knowledge(
    content: &str,
    source_id: &str,
    limits: &ResourceLimits,
) -> MamdaniResult<KnowledgeBase> {
    if content.len() > limits.max_knowledge_bytes {
        return Err(MamdaniError::ResourceLimitExceeded {
            limit_name: "max_knowledge_bytes".to_string(),
            limit_value: format!(
                "{} bytes ({} MB)",
                limits.max_knowledge_bytes,
                limits.max_knowledge_bytes / (1024 * 1024)
            ),
            actual_value: format!(
                "{} bytes ({:.2} MB)",
                content.len(),
                content.len() as f64 / (1024.0 * 1024.0)
            ),
            suggestion: "Reduce the knowledge file size".to_string(),
        });
    }

    let file: KnowledgeFile = serde_json::from_str(content).map_err(|e| {
        MamdaniError::parse(
            format!("Invalid knowledge file: {}", e),
            Span::from_line_col(content, e.line(), e.column()),
            source_id,
            Arc::from(content),
        )
    })?;

    let knowledge = file.into_knowledge(source_id, limits)?;
    // Warnings are left to engine construction
    Validator::new().check(&knowledge)?;

    debug!(
        source = source_id,
        inputs = knowledge.inputs.len(),
        rules = knowledge.rules.len(),
        "loaded knowledge"
    );
    Ok(knowledge)
}

impl KnowledgeFile {
    /// Build typed knowledge, collecting every problem instead of stopping at the first
    pub fn into_knowledge(
        self,
        source_id: &str,
        limits: &ResourceLimits,
    ) -> MamdaniResult<KnowledgeBase> {
        let mut errors = Vec::new();

        if self.rules.len() > limits.max_rules {
            return Err(MamdaniError::ResourceLimitExceeded {
                limit_name: "max_rules".to_string(),
                limit_value: limits.max_rules.to_string(),
                actual_value: self.rules.len().to_string(),
                suggestion: "Merge rules that share a consequent with 'or'".to_string(),
            });
        }

        let mut inputs = Vec::with_capacity(self.inputs.len());
        for (index, def) in self.inputs.iter().enumerate() {
            let location = format!("{}: inputs[{}]", source_id, index);
            if let Some(variable) = build_variable(def, &location, limits, &mut errors) {
                inputs.push(variable);
            }
        }

        let output_location = format!("{}: output", source_id);
        let output = build_variable(&self.output, &output_location, limits, &mut errors);

        let mut rules = Vec::with_capacity(self.rules.len());
        for (index, def) in self.rules.iter().enumerate() {
            let location = format!("{}: rules[{}]", source_id, index);
            match build_rule(def, &location, limits) {
                Ok(rule) => rules.push(rule),
                Err(e) => errors.push(e),
            }
        }

        if let Some(error) = MamdaniError::from_errors(errors) {
            return Err(error);
        }
        let output = output.ok_or_else(|| {
            MamdaniError::configuration("output variable could not be built", output_location)
        })?;

        Ok(KnowledgeBase {
            inputs,
            output,
            rules,
            categories: self.categories.unwrap_or_default(),
            source_id: source_id.to_string(),
        })
    }
}

fn build_variable(
    def: &VariableDef,
    location: &str,
    limits: &ResourceLimits,
    errors: &mut Vec<MamdaniError>,
) -> Option<LinguisticVariable> {
    let before = errors.len();

    let mut terms = Vec::with_capacity(def.labels.len());
    for (index, label) in def.labels.iter().enumerate() {
        match MembershipFunction::triangular(label.label.clone(), label.triangle) {
            Ok(term) => terms.push(term),
            Err(e) => errors.push(e.in_source(format!("{}.labels[{}]", location, index))),
        }
    }

    if def.labels.is_empty() {
        errors.push(MamdaniError::configuration(
            format!("variable '{}' declares no labels", def.name),
            location,
        ));
        return None;
    }
    if errors.len() > before {
        return None;
    }

    let universe = match def.universe {
        Some(u) => Universe::with_max_points(u.min, u.max, u.step, limits.max_universe_points),
        None => Universe::from_labels(&terms, limits.max_universe_points),
    };
    match universe {
        Ok(universe) => {
            let mut variable = LinguisticVariable::new(def.name.clone(), universe);
            variable.terms = terms;
            Some(variable)
        }
        Err(e) => {
            errors.push(e.in_source(format!("{}.universe", location)));
            None
        }
    }
}

fn build_rule(def: &RuleDef, location: &str, limits: &ResourceLimits) -> MamdaniResult<FuzzyRule> {
    let when_id = format!("{}.when", location);
    let condition = parse_condition(&def.when, &when_id, limits)?;
    let then_id = format!("{}.then", location);
    let (output_variable, consequent) = parse_consequent(&def.then, &then_id)?;

    Ok(FuzzyRule {
        condition,
        consequent,
        output_variable,
        source_id: when_id,
        source_text: Some(Arc::from(def.when.as_str())),
    })
}
