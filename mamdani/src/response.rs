use crate::AggregatedSet;
use serde::Serialize;

/// A crisp input as supplied and as fuzzified
///
/// `applied` differs from `value` only when the domain policy clamped it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputValue {
    pub name: String,
    pub value: f64,
    pub applied: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelDegree {
    pub label: String,
    pub degree: f64,
}

/// Membership degrees of one input in every label of its variable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzifiedInput {
    pub variable: String,
    pub degrees: Vec<LabelDegree>,
}

impl FuzzifiedInput {
    /// Label with the highest degree, first declared wins on ties
    pub fn dominant(&self) -> Option<&LabelDegree> {
        self.degrees
            .iter()
            .fold(None, |best: Option<&LabelDegree>, current| match best {
                Some(b) if b.degree >= current.degree => Some(b),
                _ => Some(current),
            })
    }
}

/// Firing strength of a single rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleFiring {
    /// Position in the knowledge file's rule list
    pub index: usize,
    pub rule: String,
    pub consequent: String,
    pub strength: f64,
}

impl RuleFiring {
    pub fn fired(&self) -> bool {
        self.strength > 0.0
    }
}

/// Response from evaluating one set of crisp inputs
///
/// Carries every intermediate stage so callers can explain a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub inputs: Vec<InputValue>,
    pub fuzzified: Vec<FuzzifiedInput>,
    pub rules: Vec<RuleFiring>,
    pub output_variable: String,
    pub score: f64,
    pub category: String,
    #[serde(skip)]
    pub aggregate: AggregatedSet,
}

impl Response {
    /// Rules that fired with non-zero strength, strongest first
    pub fn fired_rules(&self) -> Vec<&RuleFiring> {
        let mut fired: Vec<&RuleFiring> = self.rules.iter().filter(|r| r.fired()).collect();
        fired.sort_by(|a, b| b.strength.total_cmp(&a.strength).then(a.index.cmp(&b.index)));
        fired
    }
}
