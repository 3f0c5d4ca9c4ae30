use std::collections::VecDeque;

use crate::document::Document;

/// Linear undo/redo over whole-collection snapshots
///
/// Each entry is the full collection as it was before a change, not a
/// diff. Recording a change always drops the redo branch.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Collections that can be restored by undo, newest at the back
    undo_stack: VecDeque<Document>,
    /// Collections that can be restored by redo, newest at the back
    redo_stack: VecDeque<Document>,
    /// Maximum entries per stack, `None` for unbounded
    limit: Option<usize>,
}

impl History {
    /// Creates an unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history that keeps at most `limit` entries per stack,
    /// dropping the oldest on overflow. A limit of zero means unbounded.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.filter(|n| *n > 0),
            ..Self::default()
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Record the collection as it was before a change and drop the redo branch
    pub fn record_before_change(&mut self, collection: Document) {
        Self::push_bounded(&mut self.undo_stack, collection, self.limit);
        self.redo_stack.clear();
    }

    /// Step back: returns the previous collection and remembers `current` for redo
    pub fn undo(&mut self, current: Document) -> Option<Document> {
        let previous = self.undo_stack.pop_back()?;
        Self::push_bounded(&mut self.redo_stack, current, self.limit);
        Some(previous)
    }

    /// Step forward: returns the next collection and remembers `current` for undo
    pub fn redo(&mut self, current: Document) -> Option<Document> {
        let next = self.redo_stack.pop_back()?;
        Self::push_bounded(&mut self.undo_stack, current, self.limit);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    fn push_bounded(stack: &mut VecDeque<Document>, collection: Document, limit: Option<usize>) {
        stack.push_back(collection);
        if let Some(limit) = limit {
            while stack.len() > limit {
                stack.pop_front();
            }
        }
    }
}
