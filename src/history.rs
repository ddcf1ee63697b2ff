use std::{collections::VecDeque, num::NonZeroUsize};

/// How many losses the lecture's chart keeps visible.
pub const DEFAULT_HISTORY_CAPACITY: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(cap) => cap,
    None => unreachable!(),
};

/// A sliding window over the most recent losses.
///
/// Once full, recording a new loss evicts the oldest one, so the length never exceeds
/// the configured capacity no matter how long training runs.
#[derive(Debug, Clone, PartialEq)]
pub struct LossHistory {
    capacity: NonZeroUsize,
    losses: VecDeque<f64>,
}

impl LossHistory {
    /// Returns a new, empty `LossHistory`.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            losses: VecDeque::with_capacity(capacity.get()),
        }
    }

    /// Appends `loss`, evicting the oldest entry if the window is full.
    pub fn record(&mut self, loss: f64) {
        if self.losses.len() == self.capacity.get() {
            self.losses.pop_front();
        }

        self.losses.push_back(loss);
    }

    /// Changes the capacity, evicting the oldest losses that no longer fit.
    pub fn resize(&mut self, capacity: NonZeroUsize) {
        let excess = self.losses.len().saturating_sub(capacity.get());
        self.losses.drain(..excess);
        self.capacity = capacity;
    }

    pub fn clear(&mut self) {
        self.losses.clear();
    }

    pub fn len(&self) -> usize {
        self.losses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// The most recently recorded loss.
    pub fn latest(&self) -> Option<f64> {
        self.losses.back().copied()
    }

    /// The largest retained loss, used to scale a loss chart.
    pub fn max(&self) -> Option<f64> {
        self.losses.iter().copied().reduce(f64::max)
    }

    /// An owned copy of the retained losses, oldest first.
    pub fn snapshot(&self) -> Vec<f64> {
        self.losses.iter().copied().collect()
    }
}

impl Default for LossHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
