use std::env;

use anyhow::Context;
use log::{info, warn};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use regression_lecture::{
    metrics::{self, FitReport},
    regularization::{self, Penalty},
    LectureConfig, TrainingDriver, TrainingOutcome,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => LectureConfig::load(&path).with_context(|| format!("loading '{path}'"))?,
        None => LectureConfig::default(),
    };
    config.validate()?;
    info!("{config:?}");

    let model = config.build_model()?;
    let mut driver = TrainingDriver::new(model, config.cadence()?)?;
    let mut snapshots = driver.subscribe();

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("received SIGINT");
            on_ctrl_c.cancel();
        }
    });

    tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            println!(
                "EPOCH_{:03} | slope {:>8.4} | intercept {:>8.4} | loss {:.4}",
                snapshot.epoch, snapshot.params.slope, snapshot.params.intercept, snapshot.loss
            );
        }
    });

    let outcome = driver.run(config.max_epochs, cancel).await?;
    let model = driver.into_model();

    match outcome {
        TrainingOutcome::Completed { epoch, .. } => {
            info!("training completed after {epoch} epochs")
        }
        TrainingOutcome::Cancelled { epoch, .. } => {
            info!("training cancelled at epoch {epoch}")
        }
        TrainingOutcome::Diverged { epoch, .. } => {
            warn!("training diverged after {epoch} epochs, try a smaller learning rate")
        }
    }

    let params = outcome.params();
    let report = FitReport::new(model.dataset(), params);

    println!("y = {:.4}x + {:.4}", params.slope, params.intercept);
    println!("loss = {:.6}", model.compute_loss(params));
    println!("MSE = {:.4}, MAE = {:.4}", report.mse, report.mae);

    for r in metrics::residuals(model.dataset(), params) {
        println!("  x = {:>6.2}  y = {:>8.3}  residual = {:>+8.4}", r.x, r.y, r.residual);
    }

    if config.penalty != Penalty::None {
        let weights = regularization::illustrative_weights(10);
        println!(
            "{:?} shrinks {:.2?} to {:.2?}",
            config.penalty,
            weights,
            config.penalty.shrink_all(&weights)
        );
    }

    Ok(())
}
