//! Centroid defuzzification

use super::aggregation::AggregatedSet;
use crate::{MamdaniError, MamdaniResult};

/// Neumaier compensated sum, accumulated in iteration order
#[derive(Default)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn add(&mut self, value: f64) {
        let total = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - total) + value;
        } else {
            self.compensation += (value - total) + self.sum;
        }
        self.sum = total;
    }

    fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Center of gravity `Σ x·μ(x) / Σ μ(x)` over the grid
///
/// An identically zero set has no centroid and yields `NoRuleFired`.
pub fn centroid(set: &AggregatedSet) -> MamdaniResult<f64> {
    let mut moment = CompensatedSum::default();
    let mut area = CompensatedSum::default();

    for (x, mu) in set.points.iter().zip(&set.degrees) {
        moment.add(x * mu);
        area.add(*mu);
    }

    let area = area.value();
    if area <= 0.0 {
        return Err(MamdaniError::NoRuleFired);
    }
    Ok(moment.value() / area)
}
