use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::edit_state::EditState;
use crate::layer::Layer;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("History must contain at least one entry")]
    Empty,

    #[error("History index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// An immutable snapshot of the document, labelled for the history panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub name: String,
    pub state: EditState,
    pub layers: Vec<Layer>,
}

impl HistoryItem {
    pub fn new(name: impl Into<String>, state: &EditState, layers: &[Layer]) -> Self {
        Self {
            name: name.into(),
            state: state.clone(),
            layers: layers.to_vec(),
        }
    }
}

/// Linear undo/redo log of document snapshots with a cursor.
///
/// The log is never empty and the cursor always points at a valid item.
/// Recording after an undo discards everything past the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLog {
    items: Vec<HistoryItem>,
    current_index: usize,
}

impl HistoryLog {
    /// Starts a log whose only entry is `initial` ("Image Loaded", "New Project Created").
    pub fn new(initial: HistoryItem) -> Self {
        Self {
            items: vec![initial],
            current_index: 0,
        }
    }

    /// Rebuilds a log from persisted parts.
    pub fn from_parts(items: Vec<HistoryItem>, current_index: usize) -> Result<Self, HistoryError> {
        if items.is_empty() {
            return Err(HistoryError::Empty);
        }
        if current_index >= items.len() {
            return Err(HistoryError::IndexOutOfRange {
                index: current_index,
                len: items.len(),
            });
        }
        Ok(Self { items, current_index })
    }

    /// Appends a copy of `state` and `layers` after the cursor, dropping any
    /// redo branch, and moves the cursor onto the new entry.
    pub fn record(&mut self, name: impl Into<String>, state: &EditState, layers: &[Layer]) {
        let item = HistoryItem::new(name, state, layers);
        let discarded = self.items.len() - (self.current_index + 1);
        self.items.truncate(self.current_index + 1);
        debug!(
            "Recording history '{}' at {} (discarded {} redo entries)",
            item.name,
            self.items.len(),
            discarded
        );
        self.items.push(item);
        self.current_index = self.items.len() - 1;
    }

    /// Moves the cursor back one entry. Returns false at the first entry.
    pub fn undo(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        debug!("Undo to {} '{}'", self.current_index, self.current().name);
        true
    }

    /// Moves the cursor forward one entry. Returns false at the last entry.
    pub fn redo(&mut self) -> bool {
        if self.current_index + 1 >= self.items.len() {
            return false;
        }
        self.current_index += 1;
        debug!("Redo to {} '{}'", self.current_index, self.current().name);
        true
    }

    /// Moves the cursor to `index`, clamped into the log. Nothing is truncated.
    pub fn jump(&mut self, index: usize) -> usize {
        self.current_index = index.min(self.items.len() - 1);
        debug!("Jump to {} '{}'", self.current_index, self.current().name);
        self.current_index
    }

    pub fn current(&self) -> &HistoryItem {
        &self.items[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.items.len()
    }

    /// Entry labels, oldest first.
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }
}
