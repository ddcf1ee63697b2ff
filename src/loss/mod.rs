mod half_mse;
mod loss_fn;

pub use half_mse::HalfMse;
pub use loss_fn::LossFn;
