//! Linear undo/redo history over whole-layout snapshots.

use serde::{Deserialize, Serialize};

/// Maximum number of snapshots kept, including the present one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryLimit {
    /// Keep every snapshot.
    #[default]
    Unbounded,
    /// Keep at most this many snapshots; the oldest are discarded first.
    Depth(usize),
}

/// Ordered list of snapshots with a cursor at the present one.
///
/// Committing a snapshot equal to the present is a no-op. Committing a new
/// snapshot after an undo discards everything ahead of the cursor.
#[derive(Debug, Clone)]
pub struct History<T> {
    snapshots: Vec<T>,
    index: usize,
    limit: HistoryLimit,
}

impl<T: Clone + PartialEq> History<T> {
    /// Start a history at `initial` with no limit.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, HistoryLimit::Unbounded)
    }

    /// Start a history at `initial` with a depth limit.
    #[must_use]
    pub fn with_limit(initial: T, limit: HistoryLimit) -> Self {
        Self {
            snapshots: vec![initial],
            index: 0,
            limit,
        }
    }

    /// The present snapshot.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.snapshots[self.index]
    }

    /// Record `next` as the present.
    ///
    /// Returns `false` when `next` equals the present snapshot.
    pub fn commit(&mut self, next: T) -> bool {
        if *self.current() == next {
            return false;
        }
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(next);
        if let HistoryLimit::Depth(max) = self.limit {
            let max = max.max(1);
            if self.snapshots.len() > max {
                let excess = self.snapshots.len() - max;
                self.snapshots.drain(..excess);
            }
        }
        self.index = self.snapshots.len() - 1;
        true
    }

    /// Step back one snapshot. Returns `false` at the oldest.
    pub fn undo(&mut self) -> bool {
        if self.can_undo() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one snapshot. Returns `false` at the newest.
    pub fn redo(&mut self) -> bool {
        if self.can_redo() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Discard all history and start over at `state`.
    pub fn reset(&mut self, state: T) {
        self.snapshots = vec![state];
        self.index = 0;
    }

    /// Whether an older snapshot exists.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether a newer snapshot exists.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Number of snapshots held.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Cursor position within the snapshots.
    #[must_use]
    pub fn position(&self) -> usize {
        self.index
    }
}
