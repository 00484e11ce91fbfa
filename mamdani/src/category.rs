//! Mapping crisp scores to category labels

use serde::{Deserialize, Serialize};

/// Scores up to and including `upto` fall in `label`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub upto: f64,
    pub label: String,
}

/// Ordered thresholds plus a catch-all label for scores above the last one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScale {
    pub thresholds: Vec<Threshold>,
    pub otherwise: String,
}

impl Default for CategoryScale {
    /// `<= 3` is poor, `<= 7` is normal, anything higher is good
    fn default() -> Self {
        Self {
            thresholds: vec![
                Threshold {
                    upto: 3.0,
                    label: "poor".to_string(),
                },
                Threshold {
                    upto: 7.0,
                    label: "normal".to_string(),
                },
            ],
            otherwise: "good".to_string(),
        }
    }
}

impl CategoryScale {
    pub fn new(thresholds: Vec<Threshold>, otherwise: impl Into<String>) -> Self {
        Self {
            thresholds,
            otherwise: otherwise.into(),
        }
    }

    /// Label of the first threshold the score does not exceed
    pub fn categorize(&self, score: f64) -> &str {
        self.thresholds
            .iter()
            .find(|t| score <= t.upto)
            .map(|t| t.label.as_str())
            .unwrap_or(&self.otherwise)
    }

    /// Problems with the scale: non-finite or non-increasing bounds, empty labels
    pub(crate) fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for threshold in &self.thresholds {
            if !threshold.upto.is_finite() {
                problems.push(format!(
                    "category '{}' has a non-finite bound {}",
                    threshold.label, threshold.upto
                ));
            }
            if threshold.label.trim().is_empty() {
                problems.push(format!("category bound {} has an empty label", threshold.upto));
            }
        }
        for pair in self.thresholds.windows(2) {
            if pair[1].upto <= pair[0].upto {
                problems.push(format!(
                    "category bounds must increase: '{}' ({}) follows '{}' ({})",
                    pair[1].label, pair[1].upto, pair[0].label, pair[0].upto
                ));
            }
        }
        if self.otherwise.trim().is_empty() {
            problems.push("the catch-all category label is empty".to_string());
        }
        problems
    }
}
