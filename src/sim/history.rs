//! Bounded linear undo/redo log of grid snapshots.
//!
//! Each entry is an owned deep copy of a grid. Recording while the cursor is
//! behind the newest entry discards the redo branch.

use super::grid::Grid;
use std::collections::VecDeque;

/// Default number of snapshots kept.
pub const DEFAULT_CAPACITY: usize = 50;

/// Snapshot history with a cursor into the sequence.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Grid>,
    /// Index of the current entry; `None` only while empty.
    cursor: Option<usize>,
    capacity: usize,
}

impl History {
    /// Creates an empty history holding at most `capacity` snapshots (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            cursor: None,
            capacity,
        }
    }

    /// Records a snapshot of `grid`.
    ///
    /// Entries after the cursor are dropped first. A snapshot equal to the
    /// current entry is not stored again. If the append pushes the log past
    /// capacity the oldest entry is evicted and the cursor stays put, which
    /// leaves it on the new entry; otherwise the cursor advances.
    pub fn record(&mut self, grid: &Grid) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
            if self.entries[cursor] == *grid {
                return;
            }
        }
        self.entries.push_back(grid.clone());

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            log::debug!("history full, evicted oldest of {} snapshots", self.capacity);
        } else {
            self.cursor = Some(self.cursor.map_or(0, |c| c + 1));
        }
    }

    /// Steps back one entry and returns a copy of it. No-op at the oldest entry.
    pub fn undo(&mut self) -> Option<Grid> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                Some(self.entries[cursor - 1].clone())
            }
            _ => None,
        }
    }

    /// Steps forward one entry and returns a copy of it. No-op at the newest entry.
    pub fn redo(&mut self) -> Option<Grid> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                Some(self.entries[cursor + 1].clone())
            }
            _ => None,
        }
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Option<&Grid> {
        self.cursor.map(|c| &self.entries[c])
    }

    pub fn can_undo(&self) -> bool {
        self.undo_depth() > 0
    }

    pub fn can_redo(&self) -> bool {
        self.redo_depth() > 0
    }

    /// How many undo steps are available.
    pub fn undo_depth(&self) -> usize {
        self.cursor.unwrap_or(0)
    }

    /// How many redo steps are available.
    pub fn redo_depth(&self) -> usize {
        self.cursor.map_or(0, |c| self.entries.len() - c - 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Drops every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
