//! Front-coalescing work list of dirty tiles
//!
//! Propagation pushes the neighbors of a freshly narrowed tile to the
//! front of the queue so changes spread outward before far-away tiles
//! are revisited. Membership is tracked in a bitset so each tile holds
//! at most one queue slot; promoting an already queued tile moves that
//! single slot to the front.

use bitvec::prelude::{BitVec, bitvec};
use std::collections::VecDeque;

/// Deduplicated double-ended queue of flat tile indices
#[derive(Debug)]
pub struct WorkList {
    queue: VecDeque<usize>,
    queued: BitVec,
}

impl WorkList {
    /// Create an empty work list covering `capacity` tile indices
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            queued: bitvec![0; capacity],
        }
    }

    /// Append an index unless it is already queued
    pub fn push_back(&mut self, index: usize) {
        if self.mark(index) {
            self.queue.push_back(index);
        }
    }

    /// Move an index to the front, coalescing any existing slot
    pub fn promote_front(&mut self, index: usize) {
        if !self.mark(index) {
            // Already queued somewhere; collapse to the single front slot
            self.queue.retain(|&queued| queued != index);
        }
        self.queue.push_front(index);
    }

    /// Take the next index from the front
    pub fn pop_front(&mut self) -> Option<usize> {
        let index = self.queue.pop_front()?;
        self.queued.set(index, false);
        Some(index)
    }

    /// Whether no work remains
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued tiles
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Record membership; returns whether the index was newly marked
    fn mark(&mut self, index: usize) -> bool {
        if self.queued.get(index).as_deref() == Some(&true) {
            return false;
        }
        if index < self.queued.len() {
            self.queued.set(index, true);
        }
        true
    }
}
