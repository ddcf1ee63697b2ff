use ndarray::{Array1, ArrayView1};

use super::LossFn;

/// Mean squared error halved, that is, the squared residuals summed and divided by `2N`.
///
/// Its derivative with respect to each prediction is `residual / N`, without the stray
/// factor of two of the plain mean squared error.
#[derive(Debug, Default, Clone, Copy)]
pub struct HalfMse;

impl HalfMse {
    /// Returns a new `HalfMse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for HalfMse {
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        let n = y_pred.len() as f64;
        (&y_pred - &y).mapv(|r| r.powi(2)).sum() / (2.0 * n)
    }

    fn loss_prime(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64> {
        let n = y_pred.len() as f64;
        (&y_pred - &y) / n
    }
}
