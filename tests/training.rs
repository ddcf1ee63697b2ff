use regression_lecture::{
    DataPoint, Dataset, InvalidConfig, ModelParameters, RegressionErr, TrainableLinearModel,
    TrainingOutcome, TrainingState,
};

fn lecture_model(learning_rate: f64) -> TrainableLinearModel {
    let dataset = Dataset::new([
        (1.0, 3.2),
        (2.0, 5.1),
        (3.0, 6.8),
        (4.0, 8.5),
        (5.0, 10.2),
        (6.0, 12.1),
        (7.0, 13.8),
        (8.0, 15.5),
    ])
    .unwrap();

    TrainableLinearModel::new(dataset, learning_rate).unwrap()
}

#[test]
fn hundred_steps_approach_the_lecture_line() {
    let mut model = lecture_model(0.01);
    let initial_loss = model.compute_loss(ModelParameters::default());

    for _ in 0..100 {
        model.step().unwrap();
    }

    let params = model.parameters();
    assert!((1.5..=2.0).contains(&params.slope), "slope {}", params.slope);
    assert!((0.5..=2.0).contains(&params.intercept), "intercept {}", params.intercept);
    assert!(model.current_loss() < initial_loss);
    assert_eq!(model.epoch(), 100);
}

#[test]
fn run_training_matches_manual_stepping() {
    let mut stepped = lecture_model(0.01);
    for _ in 0..100 {
        stepped.step().unwrap();
    }

    let mut ran = lecture_model(0.01);
    let outcome = ran.run_training(100).unwrap();

    assert_eq!(
        outcome,
        TrainingOutcome::Completed {
            epoch: 100,
            params: stepped.parameters()
        }
    );
    assert_eq!(ran.loss_history_snapshot(), stepped.loss_history_snapshot());
}

#[test]
fn empty_dataset_is_invalid() {
    let err = Dataset::new(Vec::<DataPoint>::new()).unwrap_err();

    assert!(matches!(
        err,
        RegressionErr::InvalidConfiguration(InvalidConfig::EmptyDataset)
    ));
}

#[test]
fn zero_max_epochs_is_invalid() {
    let mut model = lecture_model(0.01);

    let err = model.run_training(0).unwrap_err();

    assert!(matches!(
        err,
        RegressionErr::InvalidConfiguration(InvalidConfig::MaxEpochs { got: 0 })
    ));
}

#[test]
fn history_is_capped_on_long_runs() {
    let cap = 50;
    let mut model = lecture_model(0.01).with_history_capacity(cap).unwrap();

    model.run_training(cap * 3 + 7).unwrap();

    let history = model.loss_history_snapshot();
    assert_eq!(history.len(), cap);
    assert_eq!(history.last().copied(), Some(model.current_loss()));
}

#[test]
fn excessive_learning_rate_is_detected_as_divergence() {
    let mut model = lecture_model(0.5);

    let outcome = model.run_training(100_000).unwrap();

    let TrainingOutcome::Diverged { epoch, last_finite } = outcome else {
        panic!("expected divergence, got {outcome:?}");
    };
    assert!(epoch < 100_000);
    assert!(last_finite.is_finite());
    assert!(model.parameters().is_finite());
    assert!(model.loss_history_snapshot().iter().all(|l| l.is_finite()));
    assert!(model.step().unwrap_err().is_diverged());
}

#[test]
fn reset_restores_construction_state() {
    let initial = ModelParameters::new(0.25, -1.0);
    let mut model = TrainableLinearModel::with_initial(Dataset::lecture(), 0.01, initial).unwrap();
    model.run_training(42).unwrap();

    model.reset();

    assert_eq!(model.epoch(), 0);
    assert_eq!(model.loss_history_snapshot().len(), 0);
    assert_eq!(model.parameters(), initial);
    assert_eq!(model.state(), TrainingState::Idle);
}

#[test]
fn independent_models_do_not_interfere() {
    let mut fast = lecture_model(0.05);
    let mut slow = lecture_model(0.001);

    for _ in 0..20 {
        fast.step().unwrap();
        slow.step().unwrap();
    }

    let mut alone = lecture_model(0.05);
    alone.run_training(20).unwrap();

    assert_eq!(fast.parameters(), alone.parameters());
    assert_ne!(fast.parameters(), slow.parameters());
}
