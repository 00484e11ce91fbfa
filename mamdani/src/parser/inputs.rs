use crate::ast::Span;
use crate::error::MamdaniError;
use crate::parser::{pest_error, MamdaniParser, Rule};
use pest::Parser;
use std::collections::HashMap;
use std::sync::Arc;

pub(crate) fn parse_assignments(
    assignments: &[&str],
) -> Result<HashMap<String, f64>, MamdaniError> {
    let mut inputs = HashMap::new();

    for assignment in assignments {
        let source_text: Arc<str> = Arc::from(*assignment);
        let pairs = MamdaniParser::parse(Rule::input_assignment, assignment)
            .map_err(|e| pest_error(e, "<input>", &source_text))?;

        let mut name = None;
        let mut value = None;
        for pair in pairs.flatten() {
            match pair.as_rule() {
                Rule::identifier => name = Some(pair.as_str().to_string()),
                Rule::number => value = Some(pair.as_str()),
                _ => {}
            }
        }

        let whole = Span {
            start: 0,
            end: assignment.len(),
            line: 1,
            col: 1,
        };
        let (name, raw) = name.zip(value).ok_or_else(|| {
            MamdaniError::parse(
                format!("Failed to parse input '{}'", assignment),
                whole.clone(),
                "<input>",
                source_text.clone(),
            )
        })?;
        let value: f64 = raw.parse().map_err(|_| {
            MamdaniError::parse(
                format!("Invalid number '{}' for {}", raw, name),
                whole.clone(),
                "<input>",
                source_text.clone(),
            )
        })?;

        if inputs.insert(name.clone(), value).is_some() {
            return Err(MamdaniError::parse(
                format!("Input '{}' given more than once", name),
                whole,
                "<input>",
                source_text,
            ));
        }
    }

    Ok(inputs)
}
