//! Ring buffers holding recent input and output samples.

use num_traits::Zero;

/// Fixed-length sliding window over the last `len` samples.
///
/// Pushing overwrites the oldest slot and advances the head, so every update
/// is O(1). Index 0 is the oldest sample, `len - 1` the newest. A zero-length
/// ring accepts pushes and stores nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRing<F> {
    buf: Vec<F>,
    /// Slot holding the oldest sample.
    head: usize,
}

impl<F: Copy + Zero> HistoryRing<F> {
    /// Zero-filled ring of `len` samples.
    pub fn new(len: usize) -> Self {
        HistoryRing {
            buf: vec![F::zero(); len],
            head: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// `i`-th oldest sample.
    pub fn get(&self, i: usize) -> Option<F> {
        if i >= self.buf.len() {
            return None;
        }
        Some(self.buf[(self.head + i) % self.buf.len()])
    }

    /// Drop the oldest sample and append `value` as the newest.
    pub fn push(&mut self, value: F) {
        if self.buf.is_empty() {
            return;
        }
        self.buf[self.head] = value;
        self.head = (self.head + 1) % self.buf.len();
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.get(i))
    }

    pub fn reset(&mut self) {
        self.buf.iter_mut().for_each(|v| *v = F::zero());
        self.head = 0;
    }
}
