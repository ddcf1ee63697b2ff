//! Weight shrinkage under L2 (ridge) and L1 (lasso) penalties.

use serde::{Deserialize, Serialize};

use crate::error::{InvalidConfig, Result};

/// A penalty on weight magnitude and the closed-form shrinkage it induces.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Penalty {
    #[default]
    None,
    Ridge {
        lambda: f64,
    },
    Lasso {
        lambda: f64,
    },
}

impl Penalty {
    /// # Errors
    /// `InvalidConfiguration` if `lambda` is negative or not finite.
    pub fn new_ridge(lambda: f64) -> Result<Self> {
        check_lambda(lambda)?;
        Ok(Self::Ridge { lambda })
    }

    /// # Errors
    /// `InvalidConfiguration` if `lambda` is negative or not finite.
    pub fn new_lasso(lambda: f64) -> Result<Self> {
        check_lambda(lambda)?;
        Ok(Self::Lasso { lambda })
    }

    /// Shrinks a single weight.
    ///
    /// Ridge scales it by `1 / (1 + lambda)`, lasso soft-thresholds it, moving it `lambda`
    /// closer to zero and clamping to exactly zero when it would cross.
    pub fn shrink(&self, w: f64) -> f64 {
        match *self {
            Penalty::None => w,
            Penalty::Ridge { lambda } => w / (1.0 + lambda),
            Penalty::Lasso { lambda } if w.abs() > lambda => w - w.signum() * lambda,
            Penalty::Lasso { .. } => 0.0,
        }
    }

    pub fn shrink_all(&self, weights: &[f64]) -> Vec<f64> {
        weights.iter().map(|&w| self.shrink(w)).collect()
    }
}

fn check_lambda(lambda: f64) -> Result<()> {
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(InvalidConfig::Penalty { got: lambda }.into());
    }

    Ok(())
}

/// The wavy, unpenalized weights the lecture uses to show shrinkage, `3 sin(i / 2)`.
pub fn illustrative_weights(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 * 0.5).sin() * 3.0).collect()
}
