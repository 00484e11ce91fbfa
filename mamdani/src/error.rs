use crate::ast::Span;
use std::fmt;
use std::sync::Arc;

/// Where in a piece of source text an error was found
#[derive(Debug, Clone)]
pub struct SourceLocation {
    pub span: Span,
    pub source_text: Arc<str>,
}

/// Detailed error information with optional source location
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    /// Identifies the text the span points into, e.g. `economy.json` or `rules[3].when`
    pub source_id: String,
    pub location: Option<SourceLocation>,
    pub suggestion: Option<String>,
}

/// Error types for knowledge loading and fuzzy inference
#[derive(Debug, Clone)]
pub enum MamdaniError {
    /// Knowledge file or rule text could not be parsed
    Parse(Box<ErrorDetails>),

    /// Knowledge definitions are malformed or inconsistent
    Configuration(Box<ErrorDetails>),

    /// Supplied inputs do not match the engine's input variables
    InputMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// Every rule evaluated to zero, so the output set has no centroid
    NoRuleFired,

    /// An input value lies outside its variable's universe
    Domain {
        variable: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A rule term references a variable the engine does not know
    UnknownVariable(String),

    /// A rule term references a label its variable does not define
    UnknownLabel { variable: String, label: String },

    /// A configured resource limit was exceeded
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },

    /// Multiple errors collected together
    MultipleErrors(Vec<MamdaniError>),
}

impl MamdaniError {
    /// Create a parse error pointing into source text
    pub fn parse(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            source_id: source_id.into(),
            location: Some(SourceLocation { span, source_text }),
            suggestion: None,
        }))
    }

    /// Create a configuration error without a source location
    pub fn configuration(message: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self::Configuration(Box::new(ErrorDetails {
            message: message.into(),
            source_id: source_id.into(),
            location: None,
            suggestion: None,
        }))
    }

    /// Create a configuration error pointing into rule text
    pub fn configuration_at(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
    ) -> Self {
        Self::Configuration(Box::new(ErrorDetails {
            message: message.into(),
            source_id: source_id.into(),
            location: Some(SourceLocation { span, source_text }),
            suggestion: None,
        }))
    }

    /// Attach a suggestion to a parse or configuration error
    pub fn with_suggestion(self, suggestion: impl Into<String>) -> Self {
        match self {
            MamdaniError::Parse(mut details) => {
                details.suggestion = Some(suggestion.into());
                MamdaniError::Parse(details)
            }
            MamdaniError::Configuration(mut details) => {
                details.suggestion = Some(suggestion.into());
                MamdaniError::Configuration(details)
            }
            other => other,
        }
    }

    /// Replace the source id of a parse or configuration error
    pub fn in_source(self, source_id: impl Into<String>) -> Self {
        match self {
            MamdaniError::Parse(mut details) => {
                details.source_id = source_id.into();
                MamdaniError::Parse(details)
            }
            MamdaniError::Configuration(mut details) => {
                details.source_id = source_id.into();
                MamdaniError::Configuration(details)
            }
            other => other,
        }
    }

    /// True for errors that mean the knowledge itself is unusable
    pub fn is_configuration(&self) -> bool {
        match self {
            MamdaniError::Parse(_)
            | MamdaniError::Configuration(_)
            | MamdaniError::ResourceLimitExceeded { .. } => true,
            MamdaniError::MultipleErrors(errors) => errors.iter().all(|e| e.is_configuration()),
            _ => false,
        }
    }

    /// Collapse a list of errors into a single error, if there are any
    pub fn from_errors(mut errors: Vec<MamdaniError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(MamdaniError::MultipleErrors(errors)),
        }
    }
}

fn write_details(f: &mut fmt::Formatter<'_>, kind: &str, details: &ErrorDetails) -> fmt::Result {
    write!(f, "{}: {}", kind, details.message)?;
    if let Some(suggestion) = &details.suggestion {
        write!(f, " (suggestion: {})", suggestion)?;
    }
    match &details.location {
        Some(location) => write!(
            f,
            " at {}:{}:{}",
            details.source_id, location.span.line, location.span.col
        ),
        None => write!(f, " in {}", details.source_id),
    }
}

impl fmt::Display for MamdaniError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MamdaniError::Parse(details) => write_details(f, "Parse error", details),
            MamdaniError::Configuration(details) => {
                write_details(f, "Configuration error", details)
            }
            MamdaniError::InputMismatch {
                missing,
                unexpected,
            } => {
                write!(f, "Input mismatch:")?;
                if !missing.is_empty() {
                    write!(f, " missing [{}]", missing.join(", "))?;
                }
                if !unexpected.is_empty() {
                    write!(f, " unexpected [{}]", unexpected.join(", "))?;
                }
                Ok(())
            }
            MamdaniError::NoRuleFired => write!(
                f,
                "No rule fired: every rule evaluated to zero for these inputs"
            ),
            MamdaniError::Domain {
                variable,
                value,
                min,
                max,
            } => write!(
                f,
                "Domain error: {} = {} lies outside [{}, {}]",
                variable, value, min, max
            ),
            MamdaniError::UnknownVariable(name) => write!(f, "Unknown variable: {}", name),
            MamdaniError::UnknownLabel { variable, label } => {
                write!(f, "Unknown label: {} is not a label of {}", label, variable)
            }
            MamdaniError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
                suggestion,
            } => write!(
                f,
                "Resource limit exceeded: {} (limit {}, actual {}). {}",
                limit_name, limit_value, actual_value, suggestion
            ),
            MamdaniError::MultipleErrors(errors) => {
                writeln!(f, "Multiple errors:")?;
                for (i, error) in errors.iter().enumerate() {
                    write!(f, "  {}. {}", i + 1, error)?;
                    if i < errors.len() - 1 {
                        writeln!(f)?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for MamdaniError {}
