//! Linear undo/redo history of committed-surface snapshots.
//!
//! The undo stack always holds the current state on top; the entry below it
//! is what an undo restores. Pushing a new state invalidates redo.

mod snapshot;

pub use snapshot::Snapshot;

use crate::CanvasError;
use crate::draw::Surface;
use std::collections::VecDeque;

/// Default number of snapshots kept on the undo stack.
pub const DEFAULT_MAX_DEPTH: usize = 20;

#[derive(Debug)]
pub struct History {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    max_depth: usize,
}

impl History {
    /// Creates an empty history. A depth below 1 is raised to 1 so the
    /// current state always fits.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Drops everything and records `surface` as the initial state.
    pub fn reset(&mut self, surface: &Surface) -> Result<(), CanvasError> {
        let initial = Snapshot::capture(surface)?;
        self.undo.clear();
        self.redo.clear();
        self.undo.push_back(initial);
        Ok(())
    }

    /// Records the current state of `surface` after a committed action.
    pub fn snapshot(&mut self, surface: &Surface) -> Result<(), CanvasError> {
        let entry = Snapshot::capture(surface)?;
        self.push(entry);
        Ok(())
    }

    /// Appends an entry, evicting the oldest beyond the depth limit and
    /// invalidating redo.
    pub fn push(&mut self, entry: Snapshot) {
        self.undo.push_back(entry);
        while self.undo.len() > self.max_depth {
            self.undo.pop_front();
        }
        if !self.redo.is_empty() {
            log::debug!("Discarding {} redo entries", self.redo.len());
            self.redo.clear();
        }
    }

    /// Restores the previous state into `surface`.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. On a restore error
    /// both stacks are left as they were.
    pub fn undo(&mut self, surface: &Surface) -> Result<bool, CanvasError> {
        if self.undo.len() <= 1 {
            return Ok(false);
        }
        let previous = &self.undo[self.undo.len() - 2];
        previous.restore_into(surface)?;
        if let Some(top) = self.undo.pop_back() {
            self.redo.push(top);
        }
        Ok(true)
    }

    /// Re-applies the most recently undone state into `surface`.
    ///
    /// Returns `Ok(false)` when the redo stack is empty. On a restore error
    /// both stacks are left as they were.
    pub fn redo(&mut self, surface: &Surface) -> Result<bool, CanvasError> {
        let Some(next) = self.redo.last() else {
            return Ok(false);
        };
        next.restore_into(surface)?;
        if let Some(entry) = self.redo.pop() {
            self.undo.push_back(entry);
            while self.undo.len() > self.max_depth {
                self.undo.pop_front();
            }
        }
        Ok(true)
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn can_undo(&self) -> bool {
        self.undo.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Oldest entry still on the undo stack.
    pub fn oldest(&self) -> Option<&Snapshot> {
        self.undo.front()
    }

    #[cfg(test)]
    pub(crate) fn entry_mut(&mut self, index: usize) -> Option<&mut Snapshot> {
        self.undo.get_mut(index)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests;
