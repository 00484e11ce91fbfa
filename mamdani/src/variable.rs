//! Universes of discourse and linguistic variables

use crate::{MamdaniError, MamdaniResult, MembershipFunction, ResourceLimits};
use serde::Serialize;

/// An evenly spaced, strictly increasing grid over `[min, max]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Universe {
    min: f64,
    max: f64,
    step: f64,
    #[serde(skip)]
    points: Vec<f64>,
}

impl Universe {
    /// Build the grid `min, min + step, ...`, ending exactly at `max`
    ///
    /// Points are computed as `min + i * step` so no rounding error accumulates.
    /// When `max` is not reached by a whole number of steps it is appended.
    pub fn new(min: f64, max: f64, step: f64) -> MamdaniResult<Self> {
        Self::with_max_points(min, max, step, ResourceLimits::default().max_universe_points)
    }

    /// Like [`Universe::new`], refusing grids with more than `max_points` points
    pub fn with_max_points(
        min: f64,
        max: f64,
        step: f64,
        max_points: usize,
    ) -> MamdaniResult<Self> {
        if !(min.is_finite() && max.is_finite() && step.is_finite()) {
            return Err(MamdaniError::configuration(
                format!("universe [{}, {}] step {} must be finite", min, max, step),
                "universe",
            ));
        }
        if step <= 0.0 {
            return Err(MamdaniError::configuration(
                format!("universe step must be positive, got {}", step),
                "universe",
            ));
        }
        if max <= min {
            return Err(MamdaniError::configuration(
                format!("universe max {} must be greater than min {}", max, min),
                "universe",
            ));
        }

        let intervals = ((max - min) / step + 1e-9).floor();
        if intervals + 1.0 > max_points as f64 {
            return Err(MamdaniError::ResourceLimitExceeded {
                limit_name: "max_universe_points".to_string(),
                limit_value: max_points.to_string(),
                actual_value: format!("{}", intervals + 1.0),
                suggestion: format!(
                    "Use a coarser step than {} for the universe [{}, {}]",
                    step, min, max
                ),
            });
        }
        let intervals = intervals as usize;
        let tolerance = step * 1e-9;
        let mut points: Vec<f64> = (0..=intervals)
            .map(|i| min + step * i as f64)
            .filter(|x| *x <= max + tolerance)
            .collect();
        match points.last_mut() {
            Some(last) if (*last - max).abs() <= tolerance => *last = max,
            _ => points.push(max),
        }

        Ok(Self {
            min,
            max,
            step,
            points,
        })
    }

    /// Derive a universe from the triangle parameters of a variable's labels
    ///
    /// Spans the smallest and largest parameter. The step is 0.1 when every
    /// parameter is a whole number and 0.01 otherwise.
    pub fn from_labels(terms: &[MembershipFunction], max_points: usize) -> MamdaniResult<Self> {
        let params: Vec<f64> = terms.iter().flat_map(|t| t.params()).collect();
        let min = params.iter().copied().fold(f64::INFINITY, f64::min);
        let max = params.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let integral = params.iter().all(|p| p.fract() == 0.0);
        let step = if integral { 0.1 } else { 0.01 };
        Self::with_max_points(min, max, step, max_points)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }
}

/// What happens to inputs that fall outside a variable's universe
///
/// Non-finite inputs are rejected under every policy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DomainPolicy {
    /// Move the value to the nearest universe bound before fuzzifying
    #[default]
    Clamp,
    /// Fail when the value lies further than `tolerance` outside the bounds
    Reject { tolerance: f64 },
}

impl DomainPolicy {
    /// Value to fuzzify for `x`, or a domain error
    pub fn apply(&self, variable: &str, universe: &Universe, x: f64) -> MamdaniResult<f64> {
        let out_of_domain = || MamdaniError::Domain {
            variable: variable.to_string(),
            value: x,
            min: universe.min(),
            max: universe.max(),
        };
        if !x.is_finite() {
            return Err(out_of_domain());
        }
        match self {
            DomainPolicy::Clamp => Ok(x.clamp(universe.min(), universe.max())),
            DomainPolicy::Reject { tolerance } => {
                if x < universe.min() - tolerance || x > universe.max() + tolerance {
                    Err(out_of_domain())
                } else {
                    Ok(x.clamp(universe.min(), universe.max()))
                }
            }
        }
    }
}

/// Degrees of membership of one crisp value, in label declaration order
pub type Fuzzified = Vec<(String, f64)>;

/// A named universe with a set of labelled membership functions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinguisticVariable {
    pub name: String,
    pub universe: Universe,
    pub terms: Vec<MembershipFunction>,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            universe,
            terms: Vec::new(),
        }
    }

    pub fn with_term(mut self, term: MembershipFunction) -> Self {
        self.terms.push(term);
        self
    }

    pub fn term(&self, label: &str) -> Option<&MembershipFunction> {
        self.terms.iter().find(|t| t.label == label)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.term(label).is_some()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.label.as_str())
    }

    /// Degree of `x` in every label, zeros included
    pub fn fuzzify(&self, x: f64) -> Fuzzified {
        self.terms
            .iter()
            .map(|term| (term.label.clone(), term.degree(x)))
            .collect()
    }

    /// Fuzzify after applying a domain policy; returns the value actually used
    pub fn fuzzify_with(
        &self,
        x: f64,
        policy: &DomainPolicy,
    ) -> MamdaniResult<(f64, Fuzzified)> {
        let applied = policy.apply(&self.name, &self.universe, x)?;
        Ok((applied, self.fuzzify(applied)))
    }

    /// Sample a label's shape over this variable's universe grid
    pub fn sample(&self, label: &str) -> Option<Vec<f64>> {
        let term = self.term(label)?;
        Some(
            self.universe
                .points()
                .iter()
                .map(|x| term.degree(*x))
                .collect(),
        )
    }
}
