use std::{num::NonZeroUsize, ops::RangeInclusive};

use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    dataset::Dataset,
    error::{InvalidConfig, RegressionErr, Result},
    history::LossHistory,
    loss::{HalfMse, LossFn},
    optimization::{GradientDescent, Optimizer},
    params::ModelParameters,
};

/// The learning rates the lecture's slider offers. Rates outside of it are still accepted.
pub const ADVISORY_LEARNING_RATES: RangeInclusive<f64> = 0.001..=0.1;

/// Where a model is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrainingState {
    Idle,
    Training,
    /// Terminal until `reset`.
    Diverged,
}

/// How a training run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrainingOutcome {
    /// The epoch bound was reached.
    Completed {
        epoch: usize,
        params: ModelParameters,
    },
    /// The caller asked to stop before the bound was reached.
    Cancelled {
        epoch: usize,
        params: ModelParameters,
    },
    /// A step produced non finite values, `last_finite` are the parameters of `epoch`.
    Diverged {
        epoch: usize,
        last_finite: ModelParameters,
    },
}

impl TrainingOutcome {
    /// The last completed epoch.
    pub fn epoch(&self) -> usize {
        match *self {
            TrainingOutcome::Completed { epoch, .. }
            | TrainingOutcome::Cancelled { epoch, .. }
            | TrainingOutcome::Diverged { epoch, .. } => epoch,
        }
    }

    /// The last finite parameters reached by the run.
    pub fn params(&self) -> ModelParameters {
        match *self {
            TrainingOutcome::Completed { params, .. }
            | TrainingOutcome::Cancelled { params, .. } => params,
            TrainingOutcome::Diverged { last_finite, .. } => last_finite,
        }
    }

    pub fn is_diverged(&self) -> bool {
        matches!(self, TrainingOutcome::Diverged { .. })
    }
}

/// A copy of everything an observer needs to render a model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingSnapshot {
    pub params: ModelParameters,
    pub epoch: usize,
    pub loss: f64,
    pub history: Vec<f64>,
    pub state: TrainingState,
}

/// A line `y = slope * x + intercept` fitted to a fixed dataset by full-batch gradient descent.
///
/// Every `step` computes the gradient against the current parameters and replaces both of
/// them at once, so neither component is ever updated from a partially updated pair. The
/// model does no locking: concurrent callers must serialize access themselves.
#[derive(Debug, Clone)]
pub struct TrainableLinearModel {
    dataset: Dataset,
    optimizer: GradientDescent,
    loss_fn: HalfMse,

    initial: ModelParameters,
    params: ModelParameters,
    epoch: usize,
    history: LossHistory,
    state: TrainingState,
}

impl TrainableLinearModel {
    /// Returns a new `TrainableLinearModel` starting at the origin.
    ///
    /// # Arguments
    /// * `dataset` - The observations to fit.
    /// * `learning_rate` - The step length multiplier, must be finite and positive.
    ///
    /// # Errors
    /// `InvalidConfiguration` if the learning rate is out of domain.
    pub fn new(dataset: Dataset, learning_rate: f64) -> Result<Self> {
        Self::with_initial(dataset, learning_rate, ModelParameters::default())
    }

    /// Returns a new `TrainableLinearModel` starting at `initial`, which is also where
    /// `reset` brings it back to.
    ///
    /// # Errors
    /// `InvalidConfiguration` if the learning rate is out of domain or `initial` is not finite.
    pub fn with_initial(
        dataset: Dataset,
        learning_rate: f64,
        initial: ModelParameters,
    ) -> Result<Self> {
        check_hyperparameters(learning_rate, initial)?;

        if !ADVISORY_LEARNING_RATES.contains(&learning_rate) {
            warn!(learning_rate = learning_rate; "learning rate outside of the advisory range");
        }

        Ok(Self {
            dataset,
            optimizer: GradientDescent::new(learning_rate),
            loss_fn: HalfMse::new(),
            initial,
            params: initial,
            epoch: 0,
            history: LossHistory::default(),
            state: TrainingState::Idle,
        })
    }

    /// Retains at most `capacity` losses from now on. Losses already recorded are kept,
    /// dropping the oldest ones if they no longer fit.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `capacity` is zero.
    pub fn with_history_capacity(mut self, capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(InvalidConfig::HistoryCapacity)?;
        self.history.resize(capacity);
        Ok(self)
    }

    /// The halved mean squared error of the line given by `params` over the dataset.
    pub fn compute_loss(&self, params: ModelParameters) -> f64 {
        let y_pred = self.predictions(params);
        self.loss_fn.loss(y_pred.view(), self.dataset.y())
    }

    /// The exact partial derivatives of `compute_loss` at `params`, as `(d_slope, d_intercept)`.
    pub fn compute_gradient(&self, params: ModelParameters) -> (f64, f64) {
        let x = self.dataset.x();
        let y_pred = self.predictions(params);
        let delta = self.loss_fn.loss_prime(y_pred.view(), self.dataset.y());

        (delta.dot(&x), delta.sum())
    }

    /// Performs a single gradient descent step.
    ///
    /// On success the parameters, the epoch counter and the loss history are all updated.
    /// On failure none of them are.
    ///
    /// # Returns
    /// The new parameters.
    ///
    /// # Errors
    /// `DivergedState` if the step would leave the parameters or their loss non finite, in
    /// which case the model becomes `Diverged`, or if it already was.
    pub fn step(&mut self) -> Result<ModelParameters> {
        if self.state == TrainingState::Diverged {
            return Err(RegressionErr::DivergedState { epoch: self.epoch });
        }

        let (d_slope, d_intercept) = self.compute_gradient(self.params);
        let mut next = self.params.to_array();
        self.optimizer
            .update_params(&mut next, &[d_slope, d_intercept]);

        let next = ModelParameters::from_array(next);
        let loss = self.compute_loss(next);

        if !next.is_finite() || !loss.is_finite() {
            self.state = TrainingState::Diverged;
            warn!(
                epoch = self.epoch,
                slope = next.slope,
                intercept = next.intercept;
                "training diverged"
            );
            return Err(RegressionErr::DivergedState { epoch: self.epoch });
        }

        self.params = next;
        self.history.record(loss);
        self.epoch += 1;

        debug!(epoch = self.epoch, loss = loss; "gradient step");
        Ok(next)
    }

    /// Steps until the epoch counter reaches `max_epochs` or the model diverges.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `max_epochs` is zero, `DivergedState` if the model had
    /// already diverged before the run started.
    pub fn run_training(&mut self, max_epochs: usize) -> Result<TrainingOutcome> {
        self.run_training_until(max_epochs, |_| false)
    }

    /// Like `run_training`, but consults `should_stop` before every step and ends the run
    /// as `Cancelled` as soon as it returns `true`.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `max_epochs` is zero, `DivergedState` if the model had
    /// already diverged before the run started.
    pub fn run_training_until<F>(
        &mut self,
        max_epochs: usize,
        mut should_stop: F,
    ) -> Result<TrainingOutcome>
    where
        F: FnMut(&Self) -> bool,
    {
        if max_epochs == 0 {
            return Err(InvalidConfig::MaxEpochs { got: max_epochs }.into());
        }

        self.start()?;
        info!(from = self.epoch, to = max_epochs; "training started");

        let outcome = loop {
            if self.epoch >= max_epochs {
                break TrainingOutcome::Completed {
                    epoch: self.epoch,
                    params: self.params,
                };
            }

            if should_stop(self) {
                break TrainingOutcome::Cancelled {
                    epoch: self.epoch,
                    params: self.params,
                };
            }

            match self.step() {
                Ok(_) => {}
                Err(RegressionErr::DivergedState { epoch }) => {
                    break TrainingOutcome::Diverged {
                        epoch,
                        last_finite: self.params,
                    };
                }
                Err(e) => {
                    self.pause();
                    return Err(e);
                }
            }
        };

        self.pause();
        info!(epoch = self.epoch, loss = self.current_loss(); "training stopped");

        Ok(outcome)
    }

    /// Marks the model as `Training`, as an external cadence does before stepping.
    ///
    /// # Errors
    /// `DivergedState` if the model has diverged.
    pub fn start(&mut self) -> Result<()> {
        if self.state == TrainingState::Diverged {
            return Err(RegressionErr::DivergedState { epoch: self.epoch });
        }

        self.state = TrainingState::Training;
        Ok(())
    }

    /// Brings a `Training` model back to `Idle`. A diverged model stays diverged.
    pub fn pause(&mut self) {
        if self.state == TrainingState::Training {
            self.state = TrainingState::Idle;
        }
    }

    /// Restores the initial parameters, zeroes the epoch counter and clears the history.
    pub fn reset(&mut self) {
        self.params = self.initial;
        self.epoch = 0;
        self.history.clear();
        self.state = TrainingState::Idle;

        info!("model reset");
    }

    pub fn parameters(&self) -> ModelParameters {
        self.params
    }

    pub fn initial_parameters(&self) -> ModelParameters {
        self.initial
    }

    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn state(&self) -> TrainingState {
        self.state
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// An owned copy of the retained losses, oldest first.
    pub fn loss_history_snapshot(&self) -> Vec<f64> {
        self.history.snapshot()
    }

    pub fn history(&self) -> &LossHistory {
        &self.history
    }

    /// The loss at the current parameters.
    pub fn current_loss(&self) -> f64 {
        self.compute_loss(self.params)
    }

    /// Evaluates the current line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.params.predict(x)
    }

    pub fn snapshot(&self) -> TrainingSnapshot {
        TrainingSnapshot {
            params: self.params,
            epoch: self.epoch,
            loss: self.current_loss(),
            history: self.history.snapshot(),
            state: self.state,
        }
    }

    fn predictions(&self, params: ModelParameters) -> ndarray::Array1<f64> {
        self.dataset.x().mapv(|x| params.predict(x))
    }
}

/// Checks the model's scalar inputs without building anything.
pub(crate) fn check_hyperparameters(learning_rate: f64, initial: ModelParameters) -> Result<()> {
    if !learning_rate.is_finite() || learning_rate <= 0.0 {
        return Err(InvalidConfig::LearningRate { got: learning_rate }.into());
    }

    if !initial.is_finite() {
        return Err(InvalidConfig::InitialParameters.into());
    }

    Ok(())
}
