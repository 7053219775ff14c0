// Bounded per-metric sample history for charting

use std::collections::VecDeque;

/// Samples kept per metric stream.
pub const HISTORY_CAPACITY: usize = 60;

/// FIFO of the most recent samples; the oldest is evicted on overflow.
/// One instance per metric per surface. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryBuffer {
    samples: VecDeque<f32>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Returns the buffer with `sample` appended and, past capacity, the oldest sample dropped.
    #[must_use]
    pub fn append(mut self, sample: f32) -> Self {
        self.push(sample);
        self
    }

    pub fn push(&mut self, sample: f32) {
        if self.samples.len() >= HISTORY_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<f32> {
        self.samples.back().copied()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.iter().collect()
    }
}
