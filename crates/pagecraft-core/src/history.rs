//! Snapshot-based undo/redo.

use crate::action::{Action, reduce};
use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::editor::{EditorState, Selection};
use std::collections::VecDeque;

/// Undo history over full editor snapshots.
///
/// Undoable actions push the previous present onto the past and clear the
/// future. Other actions only replace the present.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<EditorState>,
    present: EditorState,
    future: VecDeque<EditorState>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(EditorState::default())
    }
}

impl History {
    pub fn new(present: EditorState) -> Self {
        Self::with_limit(present, DEFAULT_HISTORY_LIMIT)
    }

    /// History keeping at most `limit` past and `limit` future snapshots.
    pub fn with_limit(present: EditorState, limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present,
            future: VecDeque::new(),
            limit,
        }
    }

    pub fn present(&self) -> &EditorState {
        &self.present
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Replace the present and forget all history (e.g. after loading a project).
    pub fn reset(&mut self, present: EditorState) {
        self.past.clear();
        self.future.clear();
        self.present = present;
    }

    /// Apply an action. Returns true if the state changed.
    ///
    /// Undoable actions always record an entry, even when they change nothing
    /// (a move clamped at the origin, an update to a stale id), so undoing N
    /// actions always returns to the state before them.
    pub fn apply(&mut self, action: &Action) -> bool {
        let next = reduce(&self.present, action);
        let changed = next != self.present;
        if action.is_undoable() {
            let previous = std::mem::replace(&mut self.present, next);
            self.push_past(previous);
            self.future.clear();
        } else if changed {
            self.present = next;
        }
        log::trace!("Applied {} (undo depth {})", action.name(), self.past.len());
        changed
    }

    /// Apply an action as a continuation of the most recent history entry.
    ///
    /// Undoable actions update the present without recording a new snapshot,
    /// so one continuous gesture undoes in a single step.
    pub fn amend(&mut self, action: &Action) -> bool {
        let next = reduce(&self.present, action);
        let changed = next != self.present;
        if action.is_undoable() {
            self.future.clear();
        }
        self.present = next;
        changed
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    ///
    /// The page being edited is view state: undo and redo stay on it as long as
    /// the restored project still has that page.
    pub fn undo(&mut self) -> bool {
        let Some(mut previous) = self.past.pop_back() else {
            return false;
        };
        keep_current_page(&self.present, &mut previous);
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        self.future.truncate(self.limit);
        true
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(mut next) = self.future.pop_front() else {
            return false;
        };
        keep_current_page(&self.present, &mut next);
        let current = std::mem::replace(&mut self.present, next);
        self.push_past(current);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    fn push_past(&mut self, state: EditorState) {
        self.past.push_back(state);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
    }
}

/// Move `restored` onto the page shown in `present`, keeping only the selected
/// elements that live on it.
fn keep_current_page(present: &EditorState, restored: &mut EditorState) {
    let page_id = &present.project.current_page_id;
    if restored.project.current_page_id == *page_id {
        return;
    }
    let Some(page) = restored.project.page(page_id) else {
        return;
    };
    let on_page: Vec<_> = restored
        .selection
        .ids()
        .iter()
        .copied()
        .filter(|&id| page.contains(id))
        .collect();
    restored.selection = Selection::from_ids(on_page);
    restored.project.current_page_id = page_id.clone();
}
