//! Residual diagnostics of a fitted line, as drawn next to the data in the lecture.

use serde::Serialize;

use crate::{dataset::Dataset, params::ModelParameters};

/// The vertical gap between an observation and the line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Residual {
    pub x: f64,
    pub y: f64,
    pub prediction: f64,
    /// `prediction - y`.
    pub residual: f64,
}

/// Error summaries of a line over a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitReport {
    /// Mean of the squared residuals, not halved.
    pub mse: f64,
    /// Mean of the absolute residuals.
    pub mae: f64,
}

impl FitReport {
    pub fn new(dataset: &Dataset, params: ModelParameters) -> Self {
        Self {
            mse: mse(dataset, params),
            mae: mae(dataset, params),
        }
    }
}

/// One residual per observation, in dataset order.
pub fn residuals(dataset: &Dataset, params: ModelParameters) -> Vec<Residual> {
    dataset
        .points()
        .map(|p| {
            let prediction = params.predict(p.x);
            Residual {
                x: p.x,
                y: p.y,
                prediction,
                residual: prediction - p.y,
            }
        })
        .collect()
}

pub fn mse(dataset: &Dataset, params: ModelParameters) -> f64 {
    mean_of(dataset, params, |r| r.powi(2))
}

pub fn mae(dataset: &Dataset, params: ModelParameters) -> f64 {
    mean_of(dataset, params, f64::abs)
}

fn mean_of<F>(dataset: &Dataset, params: ModelParameters, f: F) -> f64
where
    F: Fn(f64) -> f64,
{
    let total: f64 = residuals(dataset, params)
        .into_iter()
        .map(|r| f(r.residual))
        .sum();

    total / dataset.len() as f64
}
