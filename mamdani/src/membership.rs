//! Triangular membership functions

use crate::{MamdaniError, MamdaniResult};
use serde::Serialize;
use std::fmt;

/// A labelled triangular fuzzy set with parameters `a <= b <= c`
///
/// The degree rises linearly from `a` to the peak at `b` and falls linearly
/// from `b` to `c`. With `a == b` the shape is a falling ramp that starts at
/// full membership, with `b == c` a rising ramp that ends at full membership.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MembershipFunction {
    pub label: String,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl MembershipFunction {
    /// Create a triangular membership function, rejecting unordered or non-finite parameters
    pub fn triangular(label: impl Into<String>, params: [f64; 3]) -> MamdaniResult<Self> {
        let label = label.into();
        let [a, b, c] = params;
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(MamdaniError::configuration(
                format!("label '{}' has non-finite parameters [{}, {}, {}]", label, a, b, c),
                label,
            ));
        }
        if a > b || b > c {
            return Err(MamdaniError::configuration(
                format!(
                    "label '{}' parameters [{}, {}, {}] are not ordered a <= b <= c",
                    label, a, b, c
                ),
                label,
            )
            .with_suggestion("List the triangle as [left foot, peak, right foot]"));
        }
        Ok(Self { label, a, b, c })
    }

    /// Degree of membership of `x`, always within `[0, 1]`
    pub fn degree(&self, x: f64) -> f64 {
        let (a, b, c) = (self.a, self.b, self.c);
        let degree = if x == b {
            1.0
        } else if x <= a || x >= c {
            0.0
        } else if x < b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        };
        // NaN compares false everywhere above and lands in the falling branch
        if degree.is_nan() {
            0.0
        } else {
            degree.clamp(0.0, 1.0)
        }
    }

    /// Location of full membership
    pub fn peak(&self) -> f64 {
        self.b
    }

    /// Interval outside of which the degree is zero
    pub fn support(&self) -> (f64, f64) {
        (self.a, self.c)
    }

    pub fn params(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }
}

impl fmt::Display for MembershipFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {}, {}]", self.label, self.a, self.b, self.c)
    }
}
