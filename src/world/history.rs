//! Linear undo/redo log of block snapshots.
//!
//! Edits do not commit immediately: each one restarts a debounce timer and
//! only a quiet period appends a snapshot, so a burst of edits (drag
//! painting) becomes a single undo step. Appending truncates the redo branch.

use crate::core::timer::Debounce;
use crate::core::types::Millis;
use super::block::Block;

/// Immutable copy of the block collection at one point in time
pub type Snapshot = Vec<Block>;

/// Snapshot log with a cursor. Never empty.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    index: usize,
    max_entries: usize,
    commit_timer: Debounce,
}

impl History {
    /// Single-entry log holding `initial`
    pub fn new(initial: &[Block], max_entries: usize, debounce_ms: Millis) -> Self {
        Self {
            snapshots: vec![initial.to_vec()],
            index: 0,
            max_entries: max_entries.max(1),
            commit_timer: Debounce::new(debounce_ms),
        }
    }

    /// Rebuild from persisted parts. An empty log becomes a single empty
    /// snapshot and an out-of-range cursor is clamped to the last entry.
    pub fn from_parts(
        mut snapshots: Vec<Snapshot>,
        index: usize,
        max_entries: usize,
        debounce_ms: Millis,
    ) -> Self {
        if snapshots.is_empty() {
            snapshots.push(Vec::new());
        }
        let last = snapshots.len() - 1;
        if index > last {
            log::warn!("History cursor {} out of range, clamping to {}", index, last);
        }
        let mut history = Self {
            index: index.min(last),
            snapshots,
            max_entries: max_entries.max(1),
            commit_timer: Debounce::new(debounce_ms),
        };
        history.enforce_limit();
        history
    }

    /// Restart the commit timer
    pub fn schedule_commit(&mut self, now: Millis) {
        self.commit_timer.schedule(now);
    }

    pub fn has_pending_commit(&self) -> bool {
        self.commit_timer.is_pending()
    }

    /// Commit `current` if the debounce deadline has passed
    pub fn poll(&mut self, now: Millis, current: &[Block]) -> bool {
        if self.commit_timer.fire(now) {
            self.commit(current);
            true
        } else {
            false
        }
    }

    /// Commit `current` right away if a commit is pending
    pub fn flush(&mut self, current: &[Block]) -> bool {
        if self.commit_timer.cancel() {
            self.commit(current);
            true
        } else {
            false
        }
    }

    /// Drop the redo branch and append a copy of `current`
    pub fn commit(&mut self, current: &[Block]) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(current.to_vec());
        self.index += 1;
        self.enforce_limit();
        log::debug!("History commit: {} of {} ({} blocks)", self.index, self.snapshots.len(), current.len());
    }

    /// Replace the whole log with a single entry holding `current`
    pub fn reset(&mut self, current: &[Block]) {
        self.commit_timer.cancel();
        self.snapshots.clear();
        self.snapshots.push(current.to_vec());
        self.index = 0;
    }

    /// Step back, returning a copy of the snapshot to restore
    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(self.snapshots[self.index].clone())
    }

    /// Step forward, returning a copy of the snapshot to restore
    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(self.snapshots[self.index].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true: the log always holds at least one snapshot
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> &[Block] {
        &self.snapshots[self.index]
    }

    fn enforce_limit(&mut self) {
        if self.snapshots.len() > self.max_entries {
            let excess = self.snapshots.len() - self.max_entries;
            self.snapshots.drain(..excess);
            self.index = self.index.saturating_sub(excess);
        }
    }
}
