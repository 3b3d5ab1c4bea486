//! Undo/redo: bounded snapshot stacks.
//!
//! One manager per open document, reset when a document is replaced.
//! Each entry captures the whole element store plus the scroll offset
//! and current page at checkpoint time, so undoing a change also puts
//! the user back where they were looking.

use stage_model::{ElementStore, PageId};

/// What an entry restores besides the store itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryContext {
    pub scroll: (f64, f64),
    pub page: Option<PageId>,
}

#[derive(Debug, Clone)]
struct HistoryEntry {
    store: ElementStore,
    context: HistoryContext,
}

#[derive(Debug)]
pub struct HistoryManager {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    max_depth: usize,
}

impl HistoryManager {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Drop everything; called when a document is opened or replaced.
    pub fn reset(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Record the state about to be changed. Clears the redo stack,
    /// like any fresh edit does.
    pub fn checkpoint(&mut self, store: &ElementStore, context: HistoryContext) {
        self.undo_stack.push(HistoryEntry {
            store: store.clone(),
            context,
        });
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Swap the current state for the last checkpoint. Returns the
    /// restored context, or `None` when there is nothing to undo.
    pub fn undo(
        &mut self,
        store: &mut ElementStore,
        context: HistoryContext,
    ) -> Option<HistoryContext> {
        let entry = self.undo_stack.pop()?;
        self.redo_stack.push(HistoryEntry {
            store: std::mem::replace(store, entry.store),
            context,
        });
        Some(entry.context)
    }

    pub fn redo(
        &mut self,
        store: &mut ElementStore,
        context: HistoryContext,
    ) -> Option<HistoryContext> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(HistoryEntry {
            store: std::mem::replace(store, entry.store),
            context,
        });
        Some(entry.context)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
