use std::collections::VecDeque;

use crate::model::DrillType;

/// Number of drill types remembered by a [`RecencyWindow`].
pub const RECENCY_CAPACITY: usize = 3;

/// Most recently assigned drill types, oldest evicted first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecencyWindow {
    entries: VecDeque<DrillType>,
}

impl RecencyWindow {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(RECENCY_CAPACITY),
        }
    }

    pub fn push(&mut self, drill: DrillType) {
        if self.entries.len() == RECENCY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(drill);
    }

    /// Up to `n` most recent entries, newest first.
    pub fn most_recent(&self, n: usize) -> impl Iterator<Item = DrillType> + '_ {
        self.entries.iter().rev().take(n).copied()
    }

    /// Newest entry.
    #[must_use]
    pub fn last(&self) -> Option<DrillType> {
        self.entries.back().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest to newest.
    #[must_use]
    pub fn to_vec(&self) -> Vec<DrillType> {
        self.entries.iter().copied().collect()
    }
}
