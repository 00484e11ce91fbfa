//! Typed knowledge: rule terms, condition trees, rules and the knowledge base

use crate::ast::Span;
use crate::{CategoryScale, LinguisticVariable};
use serde::Serialize;
use std::fmt;

/// A reference to one label of one variable, e.g. `inflation is high`
#[derive(Debug, Clone, Serialize)]
pub struct Term {
    pub variable: String,
    pub label: String,
    #[serde(skip)]
    pub span: Option<Span>,
}

impl Term {
    pub fn new(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            label: label.into(),
            span: None,
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.variable == other.variable && self.label == other.label
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.variable, self.label)
    }
}

/// Rule antecedent: terms combined with fuzzy AND (min) and OR (max)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Term(Term),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    pub fn term(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Condition::Term(Term::new(variable, label))
    }

    pub fn and(self, other: Condition) -> Self {
        Condition::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Condition) -> Self {
        Condition::Or(Box::new(self), Box::new(other))
    }

    /// All terms of the tree, left to right
    pub fn terms(&self) -> Vec<&Term> {
        let mut terms = Vec::new();
        self.collect_terms(&mut terms);
        terms
    }

    fn collect_terms<'a>(&'a self, terms: &mut Vec<&'a Term>) {
        match self {
            Condition::Term(term) => terms.push(term),
            Condition::And(left, right) | Condition::Or(left, right) => {
                left.collect_terms(terms);
                right.collect_terms(terms);
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Condition::Or(_, _) => 1,
            Condition::And(_, _) => 2,
            Condition::Term(_) => 3,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parent: u8) -> fmt::Result {
        if self.precedence() < parent {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Term(term) => write!(f, "{}", term),
            Condition::And(left, right) => {
                left.fmt_operand(f, 2)?;
                write!(f, " and ")?;
                right.fmt_operand(f, 3)
            }
            Condition::Or(left, right) => {
                left.fmt_operand(f, 1)?;
                write!(f, " or ")?;
                right.fmt_operand(f, 2)
            }
        }
    }
}

/// IF `condition` THEN `output is consequent`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyRule {
    pub condition: Condition,
    /// Label on the output variable
    pub consequent: String,
    /// Output variable named by the rule, when it spelled one out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_variable: Option<String>,
    /// Where the rule was defined, e.g. `rules[3]`
    #[serde(skip)]
    pub source_id: String,
    /// The condition as written, for error reports
    #[serde(skip)]
    pub source_text: Option<std::sync::Arc<str>>,
}

impl FuzzyRule {
    pub fn new(condition: Condition, consequent: impl Into<String>) -> Self {
        Self {
            condition,
            consequent: consequent.into(),
            output_variable: None,
            source_id: "<rule>".to_string(),
            source_text: None,
        }
    }
}

impl fmt::Display for FuzzyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if {} then ", self.condition)?;
        if let Some(output) = &self.output_variable {
            write!(f, "{} is ", output)?;
        }
        write!(f, "{}", self.consequent)
    }
}

/// Everything an engine is built from, not yet validated
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub inputs: Vec<LinguisticVariable>,
    pub output: LinguisticVariable,
    pub rules: Vec<FuzzyRule>,
    pub categories: CategoryScale,
    /// Identifies the knowledge source in error messages
    pub source_id: String,
}

impl KnowledgeBase {
    pub fn new(inputs: Vec<LinguisticVariable>, output: LinguisticVariable) -> Self {
        Self {
            inputs,
            output,
            rules: Vec::new(),
            categories: CategoryScale::default(),
            source_id: "<knowledge>".to_string(),
        }
    }

    pub fn with_rule(mut self, rule: FuzzyRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_categories(mut self, categories: CategoryScale) -> Self {
        self.categories = categories;
        self
    }

    pub fn input(&self, name: &str) -> Option<&LinguisticVariable> {
        self.inputs.iter().find(|v| v.name == name)
    }
}
