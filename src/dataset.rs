use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::{InvalidConfig, Result};

/// A single `(x, y)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    /// Returns a new `DataPoint`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// The observations used in the lecture, roughly following `y = 1.8x + 1.3`.
pub const LECTURE_POINTS: [(f64, f64); 8] = [
    (1.0, 3.2),
    (2.0, 5.1),
    (3.0, 6.8),
    (4.0, 8.5),
    (5.0, 10.2),
    (6.0, 12.1),
    (7.0, 13.8),
    (8.0, 15.5),
];

/// An ordered, non empty and immutable sequence of observations.
///
/// The inputs and targets are stored column-wise so the loss and its gradient can be
/// evaluated as array operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl Dataset {
    /// Returns a new `Dataset`.
    ///
    /// # Arguments
    /// * `points` - The observations, in order.
    ///
    /// # Errors
    /// `InvalidConfiguration` if there are no points or any coordinate is not finite.
    pub fn new<I, P>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<DataPoint>,
    {
        let mut x = Vec::new();
        let mut y = Vec::new();

        for (index, point) in points.into_iter().map(Into::into).enumerate() {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(InvalidConfig::NonFiniteSample { index }.into());
            }

            x.push(point.x);
            y.push(point.y);
        }

        if x.is_empty() {
            return Err(InvalidConfig::EmptyDataset.into());
        }

        Ok(Self {
            x: Array1::from_vec(x),
            y: Array1::from_vec(y),
        })
    }

    /// The dataset shown in the lecture.
    pub fn lecture() -> Self {
        Self {
            x: LECTURE_POINTS.iter().map(|&(x, _)| x).collect(),
            y: LECTURE_POINTS.iter().map(|&(_, y)| y).collect(),
        }
    }

    /// The amount of observations, never zero.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Never true for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The inputs column.
    pub fn x(&self) -> ArrayView1<'_, f64> {
        self.x.view()
    }

    /// The targets column.
    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    /// Iterates the observations in order.
    pub fn points(&self) -> impl Iterator<Item = DataPoint> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| DataPoint { x, y })
    }
}
