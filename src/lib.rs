pub mod config;
pub mod dataset;
pub mod driver;
pub mod error;
pub mod history;
pub mod loss;
pub mod metrics;
pub mod model;
pub mod optimization;
pub mod params;
pub mod regularization;

pub use config::LectureConfig;
pub use dataset::{DataPoint, Dataset};
pub use driver::TrainingDriver;
pub use error::{InvalidConfig, RegressionErr, Result};
pub use model::{TrainableLinearModel, TrainingOutcome, TrainingSnapshot, TrainingState};
pub use params::ModelParameters;
