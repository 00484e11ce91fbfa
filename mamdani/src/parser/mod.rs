use crate::ast::Span;
use crate::error::MamdaniError;
use crate::resource_limits::ResourceLimits;
use crate::semantic::Condition;
use pest::Parser;
use pest_derive::Parser;
use std::collections::HashMap;
use std::sync::Arc;

pub mod conditions;
pub mod inputs;

#[derive(Parser)]
#[grammar = "src/parser/mamdani.pest"]
pub struct MamdaniParser;

/// Parse a rule condition such as `inflation is high and unemployment is high`
pub fn parse_condition(
    text: &str,
    source_id: &str,
    limits: &ResourceLimits,
) -> Result<Condition, MamdaniError> {
    let source_text: Arc<str> = Arc::from(text);
    check_nesting_depth(text, limits)?;

    let mut pairs = MamdaniParser::parse(Rule::condition, text)
        .map_err(|e| pest_error(e, source_id, &source_text))?;
    let condition = pairs.next().ok_or_else(|| {
        MamdaniError::parse("Empty condition", empty_span(), source_id, source_text.clone())
    })?;

    conditions::parse_condition_pair(condition, source_id, &source_text)
}

/// Parse a rule consequent: either `label` or `output_variable is label`
pub fn parse_consequent(
    text: &str,
    source_id: &str,
) -> Result<(Option<String>, String), MamdaniError> {
    let source_text: Arc<str> = Arc::from(text);
    let mut pairs = MamdaniParser::parse(Rule::consequent, text)
        .map_err(|e| pest_error(e, source_id, &source_text))?;
    let consequent = pairs.next().ok_or_else(|| {
        MamdaniError::parse("Empty consequent", empty_span(), source_id, source_text.clone())
    })?;

    let mut identifiers: Vec<String> = consequent
        .into_inner()
        .filter(|p| p.as_rule() == Rule::identifier)
        .map(|p| p.as_str().to_string())
        .collect();

    match identifiers.len() {
        1 => Ok((None, identifiers.remove(0))),
        2 => {
            let label = identifiers.remove(1);
            Ok((Some(identifiers.remove(0)), label))
        }
        _ => Err(MamdaniError::parse(
            "Grammar error: consequent must name one label",
            empty_span(),
            source_id,
            source_text,
        )),
    }
}

/// Parse crisp inputs of the form `name=value`
pub fn parse_inputs(assignments: &[&str]) -> Result<HashMap<String, f64>, MamdaniError> {
    inputs::parse_assignments(assignments)
}

/// Pest recurses once per parenthesis, so depth is bounded before parsing
fn check_nesting_depth(text: &str, limits: &ResourceLimits) -> Result<(), MamdaniError> {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    for ch in text.chars() {
        match ch {
            '(' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    if deepest > limits.max_expression_depth {
        return Err(MamdaniError::ResourceLimitExceeded {
            limit_name: "max_expression_depth".to_string(),
            limit_value: limits.max_expression_depth.to_string(),
            actual_value: deepest.to_string(),
            suggestion: "Flatten nested parentheses in the rule condition".to_string(),
        });
    }
    Ok(())
}

fn empty_span() -> Span {
    Span {
        start: 0,
        end: 0,
        line: 1,
        col: 1,
    }
}

pub(crate) fn pest_error(
    e: pest::error::Error<Rule>,
    source_id: &str,
    source_text: &Arc<str>,
) -> MamdaniError {
    let (start, end) = match e.location {
        pest::error::InputLocation::Pos(pos) => (pos, pos),
        pest::error::InputLocation::Span((start, end)) => (start, end),
    };
    let (line, col) = match e.line_col {
        pest::error::LineColLocation::Pos((line, col)) => (line, col),
        pest::error::LineColLocation::Span((line, col), _) => (line, col),
    };

    MamdaniError::parse(
        format!("Parse error: {}", e.variant.message()),
        Span {
            start,
            end,
            line,
            col,
        },
        source_id,
        source_text.clone(),
    )
}
