/// A learning rule turning a gradient into a parameter update.
pub trait Optimizer {
    /// Moves `params` according to `grad`, component-wise.
    fn update_params(&mut self, params: &mut [f64], grad: &[f64]);
}
