use ndarray::{Array1, ArrayView1};

/// Measures how far a model's predictions are from the expected targets.
pub trait LossFn {
    /// The cost of `y_pred` against `y`.
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> f64;

    /// The partial derivative of `loss` with respect to every prediction.
    fn loss_prime(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64>;
}
