use serde::{Deserialize, Serialize};

/// The learned state of a line `y = slope * x + intercept`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub slope: f64,
    pub intercept: f64,
}

impl ModelParameters {
    /// Returns new `ModelParameters`.
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Evaluates the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Whether both components are finite reals.
    pub fn is_finite(&self) -> bool {
        self.slope.is_finite() && self.intercept.is_finite()
    }

    /// The parameters laid out as a flat slice, in `[slope, intercept]` order.
    pub(crate) fn to_array(self) -> [f64; 2] {
        [self.slope, self.intercept]
    }

    pub(crate) fn from_array([slope, intercept]: [f64; 2]) -> Self {
        Self { slope, intercept }
    }
}
