use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, RegressionErr>;

/// An out-of-domain input rejected before it can touch any model state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidConfig {
    EmptyDataset,
    NonFiniteSample { index: usize },
    LearningRate { got: f64 },
    MaxEpochs { got: usize },
    HistoryCapacity,
    InitialParameters,
    Penalty { got: f64 },
    Cadence,
}

impl Display for InvalidConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidConfig::EmptyDataset => write!(f, "the dataset must contain at least one point"),
            InvalidConfig::NonFiniteSample { index } => {
                write!(f, "the {index}-th data point has a non finite coordinate")
            }
            InvalidConfig::LearningRate { got } => {
                write!(f, "the learning rate must be finite and positive, got {got}")
            }
            InvalidConfig::MaxEpochs { got } => {
                write!(f, "the epoch bound must be positive, got {got}")
            }
            InvalidConfig::HistoryCapacity => {
                write!(f, "the loss history capacity must be positive")
            }
            InvalidConfig::InitialParameters => {
                write!(f, "the initial parameters must be finite")
            }
            InvalidConfig::Penalty { got } => {
                write!(f, "the penalty strength must be finite and non negative, got {got}")
            }
            InvalidConfig::Cadence => write!(f, "the training cadence must be non zero"),
        }
    }
}

/// The crate's error type.
#[derive(Debug)]
pub enum RegressionErr {
    /// Rejected input, the existing state is left untouched.
    InvalidConfiguration(InvalidConfig),
    /// A step produced non finite values, or the model had already diverged.
    DivergedState { epoch: usize },
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for RegressionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionErr::InvalidConfiguration(cfg) => write!(f, "invalid configuration: {cfg}"),
            RegressionErr::DivergedState { epoch } => write!(
                f,
                "training diverged at epoch {epoch}, the model must be reset before stepping again"
            ),
            RegressionErr::Io(e) => write!(f, "io error: {e}"),
            RegressionErr::Json(e) => write!(f, "invalid JSON: {e}"),
        }
    }
}

impl Error for RegressionErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RegressionErr::Io(e) => Some(e),
            RegressionErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InvalidConfig> for RegressionErr {
    fn from(value: InvalidConfig) -> Self {
        Self::InvalidConfiguration(value)
    }
}

impl From<io::Error> for RegressionErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RegressionErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl RegressionErr {
    /// Whether this error is an `InvalidConfiguration`.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }

    /// Whether this error is a `DivergedState`.
    pub fn is_diverged(&self) -> bool {
        matches!(self, Self::DivergedState { .. })
    }
}
