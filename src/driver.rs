use std::time::Duration;

use log::{debug, info};
use tokio::{
    sync::watch,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{
    error::{InvalidConfig, RegressionErr, Result},
    model::{TrainableLinearModel, TrainingOutcome, TrainingSnapshot},
};

/// Drives a model's training one step per tick of a fixed cadence, the way an animated
/// chart would, publishing a snapshot after every step.
///
/// The model itself never waits on anything: the driver only decides *when* to call
/// `step`, so any number of drivers can run side by side on independent models.
pub struct TrainingDriver {
    model: TrainableLinearModel,
    cadence: Duration,
    snapshots: watch::Sender<TrainingSnapshot>,
}

impl TrainingDriver {
    /// Returns a new `TrainingDriver`.
    ///
    /// # Arguments
    /// * `model` - The model to train, owned by the driver until `into_model`.
    /// * `cadence` - The interval between two consecutive steps.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `cadence` is zero.
    pub fn new(model: TrainableLinearModel, cadence: Duration) -> Result<Self> {
        if cadence.is_zero() {
            return Err(InvalidConfig::Cadence.into());
        }

        let (snapshots, _) = watch::channel(model.snapshot());

        Ok(Self {
            model,
            cadence,
            snapshots,
        })
    }

    /// A receiver that always holds the latest published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<TrainingSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn model(&self) -> &TrainableLinearModel {
        &self.model
    }

    /// Mutable access for in-between runs, e.g. to `reset` the model.
    pub fn model_mut(&mut self) -> &mut TrainableLinearModel {
        &mut self.model
    }

    pub fn into_model(self) -> TrainableLinearModel {
        self.model
    }

    /// Steps the model once per tick until its epoch counter reaches `max_epochs`, `cancel`
    /// is triggered or it diverges. The first step happens one full cadence after the call.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `max_epochs` is zero, `DivergedState` if the model had
    /// already diverged.
    pub async fn run(
        &mut self,
        max_epochs: usize,
        cancel: CancellationToken,
    ) -> Result<TrainingOutcome> {
        if max_epochs == 0 {
            return Err(InvalidConfig::MaxEpochs { got: max_epochs }.into());
        }

        self.model.start()?;
        self.publish();
        info!(
            cadence_ms = self.cadence.as_millis() as u64,
            max_epochs = max_epochs;
            "driving training"
        );

        let mut ticker = time::interval_at(Instant::now() + self.cadence, self.cadence);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let outcome = loop {
            let epoch = self.model.epoch();
            let params = self.model.parameters();

            if epoch >= max_epochs {
                break TrainingOutcome::Completed { epoch, params };
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(epoch = epoch; "training cancelled");
                    break TrainingOutcome::Cancelled { epoch, params };
                }
                _ = ticker.tick() => {}
            }

            match self.model.step() {
                Ok(_) => self.publish(),
                Err(RegressionErr::DivergedState { epoch }) => {
                    break TrainingOutcome::Diverged {
                        epoch,
                        last_finite: self.model.parameters(),
                    };
                }
                Err(e) => {
                    self.model.pause();
                    self.publish();
                    return Err(e);
                }
            }
        };

        self.model.pause();
        self.publish();

        Ok(outcome)
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.model.snapshot());
    }
}
