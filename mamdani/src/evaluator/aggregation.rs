//! Implication and aggregation over the output universe
//!
//! Each output label's shape is sampled once over the output grid. At
//! evaluation time a label is clipped at the strongest firing of the rules that
//! conclude it, and the clipped shapes are merged with a pointwise maximum.
//! Both min and max are order independent, so the aggregate does not depend on
//! the order rules were declared in.

use crate::LinguisticVariable;
use serde::Serialize;

/// An output label's membership sampled over the output grid
#[derive(Debug, Clone, PartialEq)]
pub struct OutputShape {
    pub label: String,
    pub samples: Vec<f64>,
}

/// Sample every label of the output variable over its universe
pub fn sample_shapes(output: &LinguisticVariable) -> Vec<OutputShape> {
    output
        .terms
        .iter()
        .map(|term| OutputShape {
            label: term.label.clone(),
            samples: output
                .universe
                .points()
                .iter()
                .map(|x| term.degree(*x))
                .collect(),
        })
        .collect()
}

/// Strongest firing per output label, in label declaration order
///
/// Labels no rule concludes get strength 0.
pub fn group_strengths<'a>(
    shapes: &[OutputShape],
    firings: impl IntoIterator<Item = (&'a str, f64)>,
) -> Vec<f64> {
    let mut strengths = vec![0.0f64; shapes.len()];
    for (label, strength) in firings {
        if let Some(index) = shapes.iter().position(|s| s.label == label) {
            strengths[index] = strengths[index].max(strength);
        }
    }
    strengths
}

/// Mamdani implication: clip a shape at the firing strength
pub fn clip(samples: &[f64], strength: f64) -> Vec<f64> {
    samples.iter().map(|mu| mu.min(strength)).collect()
}

/// The aggregated output fuzzy set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedSet {
    pub points: Vec<f64>,
    pub degrees: Vec<f64>,
}

impl AggregatedSet {
    /// Pointwise maximum of every shape clipped at its label's strength
    pub fn aggregate(points: &[f64], shapes: &[OutputShape], strengths: &[f64]) -> Self {
        let mut degrees = vec![0.0; points.len()];
        for (shape, strength) in shapes.iter().zip(strengths) {
            if *strength <= 0.0 {
                continue;
            }
            for (degree, clipped) in degrees.iter_mut().zip(clip(&shape.samples, *strength)) {
                *degree = f64::max(*degree, clipped);
            }
        }
        Self {
            points: points.to_vec(),
            degrees,
        }
    }

    /// True when no grid point has positive membership
    pub fn is_zero(&self) -> bool {
        self.degrees.iter().all(|mu| *mu <= 0.0)
    }

    /// Largest membership degree of the set
    pub fn height(&self) -> f64 {
        self.degrees.iter().copied().fold(0.0, f64::max)
    }
}
