use ariadne::{Color, Label, Report, ReportKind, Source};
use mamdani::{ErrorDetails, MamdaniError};

/// Format a MamdaniError with fancy terminal output using Ariadne
pub fn format_error(error: &MamdaniError) -> String {
    match error {
        MamdaniError::Parse(details) => format_located("Parse error", details, error),
        MamdaniError::Configuration(details) => {
            format_located("Configuration error", details, error)
        }
        MamdaniError::InputMismatch {
            missing,
            unexpected,
        } => {
            let mut result = String::from("Input mismatch");
            if !missing.is_empty() {
                result.push_str(&format!("\n  Missing: {}", missing.join(", ")));
            }
            if !unexpected.is_empty() {
                result.push_str(&format!("\n  Unexpected: {}", unexpected.join(", ")));
            }
            result.push_str("\n  Give every input variable exactly once as name=value");
            result
        }
        MamdaniError::NoRuleFired => format!(
            "{}\n  Use --fallback <SCORE> to report a score anyway",
            error
        ),
        MamdaniError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
                limit_name, limit_value, actual_value, suggestion
            )
        }
        MamdaniError::MultipleErrors(errors) => {
            let mut result = String::from("Multiple errors occurred:\n\n");
            for error in errors {
                result.push_str(&format_error(error));
                result.push_str("\n\n");
            }
            result
        }
        MamdaniError::Domain { .. }
        | MamdaniError::UnknownVariable(_)
        | MamdaniError::UnknownLabel { .. } => error.to_string(),
    }
}

fn format_located(kind: &str, details: &ErrorDetails, error: &MamdaniError) -> String {
    let Some(location) = &details.location else {
        return error.to_string();
    };

    let text: &str = location.source_text.as_ref();
    let start = location.span.start.min(text.len());
    let end = location.span.end.clamp(start, text.len());
    // Zero-width spans still need one column to point at
    let range = if start == end && end < text.len() {
        start..end + 1
    } else {
        start..end
    };

    let message = format!(
        "{}: {} ({}:{}:{})",
        kind, details.message, details.source_id, location.span.line, location.span.col
    );

    let mut output = Vec::new();
    let mut report = Report::build(ReportKind::Error, &details.source_id, start)
        .with_message(message)
        .with_label(
            Label::new((&details.source_id, range))
                .with_message("here")
                .with_color(Color::Red),
        );

    if let Some(suggestion) = &details.suggestion {
        report = report.with_help(suggestion);
    }

    match report
        .finish()
        .write((&details.source_id, Source::from(text)), &mut output)
    {
        Ok(_) => String::from_utf8_lossy(&output).to_string(),
        Err(_) => error.to_string(),
    }
}
