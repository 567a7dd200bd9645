use crate::model::Block;
use std::collections::VecDeque;

/// Number of snapshots kept by an editor.
pub const HISTORY_CAPACITY: usize = 20;

/// Bounded stack of document snapshots with FIFO eviction.
///
/// Pushing past capacity discards the oldest snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    snapshots: VecDeque<Vec<Block>>,
    capacity: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a snapshot, returning the one evicted to make room, if any.
    pub fn push(&mut self, snapshot: Vec<Block>) -> Option<Vec<Block>> {
        if self.capacity == 0 {
            return Some(snapshot);
        }
        let evicted = if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front()
        } else {
            None
        };
        self.snapshots.push_back(snapshot);
        evicted
    }

    /// Removes and returns the newest snapshot.
    pub fn pop(&mut self) -> Option<Vec<Block>> {
        self.snapshots.pop_back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn oldest(&self) -> Option<&[Block]> {
        self.snapshots.front().map(Vec::as_slice)
    }

    pub fn newest(&self) -> Option<&[Block]> {
        self.snapshots.back().map(Vec::as_slice)
    }

    /// Iterates snapshots from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &[Block]> {
        self.snapshots.iter().map(Vec::as_slice)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
