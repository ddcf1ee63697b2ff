use super::Optimizer;

/// Plain gradient descent, `params -= learning_rate * grad`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`. The rate is taken as is, callers validate it.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    /// The step length multiplier.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}

impl Optimizer for GradientDescent {
    /// Moves every parameter against its partial derivative, scaled by `learning_rate`.
    ///
    /// # Arguments
    /// * `params` - The parameters, updated in place.
    /// * `grad` - The gradient evaluated at `params` before the update.
    fn update_params(&mut self, params: &mut [f64], grad: &[f64]) {
        let lr = self.learning_rate;

        for (w, g) in params.iter_mut().zip(grad) {
            *w -= lr * g;
        }
    }
}
