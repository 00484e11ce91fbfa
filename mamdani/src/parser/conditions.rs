use crate::ast::Span;
use crate::error::MamdaniError;
use crate::parser::Rule;
use crate::semantic::{Condition, Term};
use pest::iterators::Pair;
use std::sync::Arc;

fn grammar_error(
    message: &str,
    pair: &Pair<Rule>,
    source_id: &str,
    text: &Arc<str>,
) -> MamdaniError {
    MamdaniError::parse(
        format!("Grammar error: {}", message),
        Span::from_pest_span(pair.as_span()),
        source_id,
        text.clone(),
    )
}

pub(crate) fn parse_condition_pair(
    pair: Pair<Rule>,
    source_id: &str,
    text: &Arc<str>,
) -> Result<Condition, MamdaniError> {
    // condition = { SOI ~ or_expression ~ EOI }
    let or_pair = pair
        .clone()
        .into_inner()
        .find(|p| p.as_rule() == Rule::or_expression)
        .ok_or_else(|| grammar_error("condition missing expression", &pair, source_id, text))?;
    parse_or_expression(or_pair, source_id, text)
}

fn parse_or_expression(
    pair: Pair<Rule>,
    source_id: &str,
    text: &Arc<str>,
) -> Result<Condition, MamdaniError> {
    let mut operands = pair
        .clone()
        .into_inner()
        .filter(|p| p.as_rule() == Rule::and_expression);

    let first = operands
        .next()
        .ok_or_else(|| grammar_error("missing left operand of or", &pair, source_id, text))?;
    let mut left = parse_and_expression(first, source_id, text)?;

    // Left-associative: a or b or c == (a or b) or c
    for right_pair in operands {
        let right = parse_and_expression(right_pair, source_id, text)?;
        left = Condition::Or(Box::new(left), Box::new(right));
    }

    Ok(left)
}

fn parse_and_expression(
    pair: Pair<Rule>,
    source_id: &str,
    text: &Arc<str>,
) -> Result<Condition, MamdaniError> {
    let mut operands = pair
        .clone()
        .into_inner()
        .filter(|p| matches!(p.as_rule(), Rule::term | Rule::group));

    let first = operands
        .next()
        .ok_or_else(|| grammar_error("missing left operand of and", &pair, source_id, text))?;
    let mut left = parse_primary(first, source_id, text)?;

    for right_pair in operands {
        let right = parse_primary(right_pair, source_id, text)?;
        left = Condition::And(Box::new(left), Box::new(right));
    }

    Ok(left)
}

fn parse_primary(
    pair: Pair<Rule>,
    source_id: &str,
    text: &Arc<str>,
) -> Result<Condition, MamdaniError> {
    match pair.as_rule() {
        Rule::term => parse_term(pair, source_id, text).map(Condition::Term),
        Rule::group => {
            let inner = pair
                .clone()
                .into_inner()
                .find(|p| p.as_rule() == Rule::or_expression)
                .ok_or_else(|| grammar_error("empty parentheses", &pair, source_id, text))?;
            parse_or_expression(inner, source_id, text)
        }
        _ => Err(grammar_error("unexpected operand", &pair, source_id, text)),
    }
}

fn parse_term(pair: Pair<Rule>, source_id: &str, text: &Arc<str>) -> Result<Term, MamdaniError> {
    let span = Span::from_pest_span(pair.as_span());
    let mut identifiers = pair
        .clone()
        .into_inner()
        .filter(|p| p.as_rule() == Rule::identifier);

    let variable = identifiers
        .next()
        .ok_or_else(|| grammar_error("term missing variable", &pair, source_id, text))?;
    let label = identifiers
        .next()
        .ok_or_else(|| grammar_error("term missing label", &pair, source_id, text))?;

    Ok(Term {
        variable: variable.as_str().to_string(),
        label: label.as_str().to_string(),
        span: Some(span),
    })
}
