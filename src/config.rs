use std::{fs, num::NonZeroUsize, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    dataset::{DataPoint, Dataset, LECTURE_POINTS},
    error::{InvalidConfig, Result},
    history::DEFAULT_HISTORY_CAPACITY,
    model::{self, TrainableLinearModel},
    params::ModelParameters,
    regularization::Penalty,
};

/// Everything needed to set up the lecture's training demo.
///
/// Every field is optional in JSON, missing ones take the values the lecture uses.
///
/// ```json
/// {
///     "dataset": [{ "x": 1.0, "y": 3.2 }, { "x": 2.0, "y": 5.1 }],
///     "learning_rate": 0.01,
///     "max_epochs": 100,
///     "history_capacity": 50,
///     "cadence_ms": 50,
///     "initial": { "slope": 0.0, "intercept": 0.0 },
///     "penalty": { "kind": "ridge", "lambda": 0.5 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LectureConfig {
    pub dataset: Vec<DataPoint>,
    pub learning_rate: f64,
    pub max_epochs: usize,
    pub history_capacity: usize,
    pub cadence_ms: u64,
    pub initial: ModelParameters,
    pub penalty: Penalty,
}

impl Default for LectureConfig {
    fn default() -> Self {
        Self {
            dataset: LECTURE_POINTS.into_iter().map(DataPoint::from).collect(),
            learning_rate: 0.01,
            max_epochs: 100,
            history_capacity: DEFAULT_HISTORY_CAPACITY.get(),
            cadence_ms: 50,
            initial: ModelParameters::default(),
            penalty: Penalty::None,
        }
    }
}

impl LectureConfig {
    /// Parses a `LectureConfig` from a JSON document.
    ///
    /// # Errors
    /// `Json` if the document is malformed or has unknown fields.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a `LectureConfig` from a JSON file.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `Json` if it cannot be parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Builds the model described by this configuration.
    ///
    /// # Errors
    /// `InvalidConfiguration` if any of the model's inputs is out of domain.
    pub fn build_model(&self) -> Result<TrainableLinearModel> {
        let dataset = Dataset::new(self.dataset.iter().copied())?;

        TrainableLinearModel::with_initial(dataset, self.learning_rate, self.initial)?
            .with_history_capacity(self.history_capacity)
    }

    /// The interval between two training steps.
    ///
    /// # Errors
    /// `InvalidConfiguration` if it is zero.
    pub fn cadence(&self) -> Result<Duration> {
        if self.cadence_ms == 0 {
            return Err(InvalidConfig::Cadence.into());
        }

        Ok(Duration::from_millis(self.cadence_ms))
    }

    /// Checks every field without building the model.
    ///
    /// # Errors
    /// `InvalidConfiguration` naming the first field out of domain.
    pub fn validate(&self) -> Result<()> {
        Dataset::new(self.dataset.iter().copied())?;
        model::check_hyperparameters(self.learning_rate, self.initial)?;
        NonZeroUsize::new(self.history_capacity).ok_or(InvalidConfig::HistoryCapacity)?;
        self.cadence()?;

        if self.max_epochs == 0 {
            return Err(InvalidConfig::MaxEpochs {
                got: self.max_epochs,
            }
            .into());
        }

        match self.penalty {
            Penalty::None => Ok(()),
            Penalty::Ridge { lambda } => Penalty::new_ridge(lambda).map(|_| ()),
            Penalty::Lasso { lambda } => Penalty::new_lasso(lambda).map(|_| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegressionErr;

    #[test]
    fn empty_document_uses_lecture_defaults() {
        let config = LectureConfig::from_json("{}").unwrap();

        assert_eq!(config, LectureConfig::default());
        assert_eq!(config.dataset.len(), 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn fields_override_defaults() {
        let config = LectureConfig::from_json(
            r#"{
                "dataset": [{ "x": 0.0, "y": 1.0 }, { "x": 1.0, "y": 3.0 }],
                "learning_rate": 0.05,
                "max_epochs": 10,
                "history_capacity": 4,
                "cadence_ms": 5,
                "initial": { "slope": 1.0, "intercept": -1.0 },
                "penalty": { "kind": "lasso", "lambda": 0.25 }
            }"#,
        )
        .unwrap();

        let model = config.build_model().unwrap();

        assert_eq!(model.dataset().len(), 2);
        assert_eq!(model.learning_rate(), 0.05);
        assert_eq!(model.parameters(), ModelParameters::new(1.0, -1.0));
        assert_eq!(model.history().capacity().get(), 4);
        assert_eq!(config.cadence().unwrap(), Duration::from_millis(5));
        assert_eq!(config.penalty, Penalty::Lasso { lambda: 0.25 });
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = LectureConfig::from_json(r#"{ "lr": 0.1 }"#).unwrap_err();
        assert!(matches!(err, RegressionErr::Json(_)));
    }

    #[test]
    fn empty_dataset_fails_to_build() {
        let config = LectureConfig {
            dataset: vec![],
            ..Default::default()
        };

        assert!(matches!(
            config.build_model().unwrap_err(),
            RegressionErr::InvalidConfiguration(InvalidConfig::EmptyDataset)
        ));
    }

    #[test]
    fn validate_reports_out_of_domain_fields() {
        let zero_epochs = LectureConfig {
            max_epochs: 0,
            ..Default::default()
        };
        let zero_cadence = LectureConfig {
            cadence_ms: 0,
            ..Default::default()
        };
        let negative_lambda = LectureConfig {
            penalty: Penalty::Ridge { lambda: -1.0 },
            ..Default::default()
        };

        for config in [zero_epochs, zero_cadence, negative_lambda] {
            assert!(config.validate().unwrap_err().is_invalid_configuration());
        }
    }

    #[test]
    fn validate_agrees_with_build_model() {
        let configs = [
            LectureConfig::default(),
            LectureConfig {
                learning_rate: -0.5,
                ..Default::default()
            },
            LectureConfig {
                learning_rate: f64::NAN,
                ..Default::default()
            },
            LectureConfig {
                history_capacity: 0,
                ..Default::default()
            },
            LectureConfig {
                initial: ModelParameters::new(f64::INFINITY, 0.0),
                ..Default::default()
            },
            LectureConfig {
                dataset: vec![DataPoint::new(1.0, f64::NAN)],
                ..Default::default()
            },
            LectureConfig {
                learning_rate: 5.0,
                ..Default::default()
            },
        ];

        for config in configs {
            assert_eq!(
                config.validate().is_ok(),
                config.build_model().is_ok(),
                "{config:?}"
            );
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = LectureConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, RegressionErr::Io(_)));
    }
}
