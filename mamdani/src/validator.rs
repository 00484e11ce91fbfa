use crate::{FuzzyRule, KnowledgeBase, LinguisticVariable, MamdaniError, MamdaniResult, Term};
use std::collections::HashSet;
use tracing::warn;

/// Consistency checks that run after loading but before an engine is built
#[derive(Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a knowledge base, reporting every problem found and warning
    /// about inputs no rule reads and rules that repeat an earlier one
    pub fn validate(&self, knowledge: &KnowledgeBase) -> MamdaniResult<()> {
        self.check(knowledge)?;
        self.warn_unused_inputs(knowledge);
        self.warn_duplicate_rules(knowledge);
        Ok(())
    }

    /// The error checks of [`Validator::validate`] without its warnings
    pub fn check(&self, knowledge: &KnowledgeBase) -> MamdaniResult<()> {
        let mut errors = Vec::new();

        // Phase 1: variables and their labels
        self.validate_variables(knowledge, &mut errors);

        // Phase 2: rule references against the variable table
        self.validate_rules(knowledge, &mut errors);

        // Phase 3: category scale
        for problem in knowledge.categories.problems() {
            errors.push(MamdaniError::configuration(
                problem,
                format!("{}: categories", knowledge.source_id),
            ));
        }

        match MamdaniError::from_errors(errors) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn validate_variables(&self, knowledge: &KnowledgeBase, errors: &mut Vec<MamdaniError>) {
        let source = &knowledge.source_id;

        if knowledge.inputs.is_empty() {
            errors.push(MamdaniError::configuration(
                "knowledge declares no input variables",
                source.as_str(),
            ));
        }

        let mut seen = HashSet::new();
        for variable in &knowledge.inputs {
            if !seen.insert(variable.name.as_str()) {
                errors.push(MamdaniError::configuration(
                    format!("input variable '{}' is declared more than once", variable.name),
                    source.as_str(),
                ));
            }
            self.validate_variable(variable, source, errors);
        }

        if seen.contains(knowledge.output.name.as_str()) {
            errors.push(MamdaniError::configuration(
                format!(
                    "output variable '{}' has the same name as an input variable",
                    knowledge.output.name
                ),
                source.as_str(),
            ));
        }
        self.validate_variable(&knowledge.output, source, errors);
    }

    fn validate_variable(
        &self,
        variable: &LinguisticVariable,
        source: &str,
        errors: &mut Vec<MamdaniError>,
    ) {
        if variable.name.trim().is_empty() {
            errors.push(MamdaniError::configuration(
                "variable name must not be empty",
                source,
            ));
        }
        if variable.terms.is_empty() {
            errors.push(MamdaniError::configuration(
                format!("variable '{}' declares no labels", variable.name),
                source,
            ));
        }

        let mut labels = HashSet::new();
        for term in &variable.terms {
            if !labels.insert(term.label.as_str()) {
                errors.push(MamdaniError::configuration(
                    format!(
                        "label '{}' is declared more than once in variable '{}'",
                        term.label, variable.name
                    ),
                    source,
                ));
            }
            let ordered = term.a <= term.b && term.b <= term.c;
            let finite = term.a.is_finite() && term.b.is_finite() && term.c.is_finite();
            if !ordered || !finite {
                errors.push(MamdaniError::configuration(
                    format!(
                        "label '{}' of variable '{}' has invalid parameters [{}, {}, {}]",
                        term.label, variable.name, term.a, term.b, term.c
                    ),
                    source,
                ));
            }
        }
    }

    fn validate_rules(&self, knowledge: &KnowledgeBase, errors: &mut Vec<MamdaniError>) {
        if knowledge.rules.is_empty() {
            errors.push(
                MamdaniError::configuration("knowledge declares no rules", &knowledge.source_id)
                    .with_suggestion("Add at least one rule under \"rules\""),
            );
            return;
        }

        let output = &knowledge.output;
        for rule in &knowledge.rules {
            for term in rule.condition.terms() {
                if let Some(error) = self.check_term(knowledge, rule, term) {
                    errors.push(error);
                }
            }

            if let Some(named) = &rule.output_variable {
                if named != &output.name {
                    errors.push(MamdaniError::configuration(
                        format!(
                            "rule concludes '{}' but the output variable is '{}'",
                            named, output.name
                        ),
                        &rule.source_id,
                    ));
                }
            }
            if !output.has_label(&rule.consequent) {
                errors.push(
                    MamdaniError::configuration(
                        format!(
                            "output variable '{}' has no label '{}'",
                            output.name, rule.consequent
                        ),
                        &rule.source_id,
                    )
                    .with_suggestion(available_labels(output)),
                );
            }
        }
    }

    fn check_term(
        &self,
        knowledge: &KnowledgeBase,
        rule: &FuzzyRule,
        term: &Term,
    ) -> Option<MamdaniError> {
        let located = |message: String| match (&term.span, &rule.source_text) {
            (Some(span), Some(text)) => MamdaniError::configuration_at(
                message,
                span.clone(),
                rule.source_id.clone(),
                text.clone(),
            ),
            _ => MamdaniError::configuration(message, rule.source_id.clone()),
        };

        if term.variable == knowledge.output.name {
            return Some(located(format!(
                "output variable '{}' cannot appear in a rule condition",
                term.variable
            )));
        }

        match knowledge.input(&term.variable) {
            None => {
                let known: Vec<&str> = knowledge.inputs.iter().map(|v| v.name.as_str()).collect();
                Some(
                    located(format!("unknown variable '{}'", term.variable))
                        .with_suggestion(format!("Known variables: {}", known.join(", "))),
                )
            }
            Some(variable) if !variable.has_label(&term.label) => Some(
                located(format!(
                    "variable '{}' has no label '{}'",
                    term.variable, term.label
                ))
                .with_suggestion(available_labels(variable)),
            ),
            Some(_) => None,
        }
    }

    fn warn_unused_inputs(&self, knowledge: &KnowledgeBase) {
        let referenced: HashSet<&str> = knowledge
            .rules
            .iter()
            .flat_map(|r| r.condition.terms())
            .map(|t| t.variable.as_str())
            .collect();

        for variable in &knowledge.inputs {
            if !referenced.contains(variable.name.as_str()) {
                warn!(
                    variable = %variable.name,
                    "input variable is not used by any rule but is still required"
                );
            }
        }
    }

    fn warn_duplicate_rules(&self, knowledge: &KnowledgeBase) {
        for (index, rule) in knowledge.rules.iter().enumerate() {
            let earlier = knowledge.rules[..index]
                .iter()
                .position(|r| r.condition == rule.condition && r.consequent == rule.consequent);
            if let Some(first) = earlier {
                warn!(
                    rule = index,
                    duplicate_of = first,
                    "rule repeats an earlier rule and never changes the aggregate"
                );
            }
        }
    }
}

fn available_labels(variable: &LinguisticVariable) -> String {
    let labels: Vec<&str> = variable.labels().collect();
    format!("Available labels: {}", labels.join(", "))
}
