use crate::models::PriceSample;
use std::collections::VecDeque;

/// Number of samples kept in a session window
pub const WINDOW_CAPACITY: usize = 20;

/// In-memory rolling window of price samples
///
/// Samples are stored newest-first. Once the window is full, each push
/// evicts the oldest sample from the back.
#[derive(Debug, Clone)]
pub struct PriceWindow {
    samples: VecDeque<PriceSample>,
    capacity: usize,
}

impl PriceWindow {
    /// Create an empty window with the standard capacity
    pub fn new() -> Self {
        Self::with_capacity(WINDOW_CAPACITY)
    }

    /// Create an empty window holding at most `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Add a sample at the front
    ///
    /// If the window is full, removes the oldest sample
    pub fn push(&mut self, sample: PriceSample) -> &Self {
        self.samples.push_front(sample);

        while self.samples.len() > self.capacity {
            self.samples.pop_back();
        }

        self
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<&PriceSample> {
        self.samples.front()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate newest-first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PriceSample> + '_ {
        self.samples.iter()
    }

    /// Iterate oldest-first
    pub fn chronological(&self) -> impl Iterator<Item = &PriceSample> + '_ {
        self.samples.iter().rev()
    }

    /// Copy of the window, newest-first
    pub fn to_vec(&self) -> Vec<PriceSample> {
        self.samples.iter().copied().collect()
    }
}

impl Default for PriceWindow {
    fn default() -> Self {
        Self::new()
    }
}
