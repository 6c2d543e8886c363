use serde::Serialize;

use crate::tree::{NodeId, Range, TreeCursor};

/// Node ids touched by one command, for incremental re-rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderHints {
    pub updated: Vec<NodeId>,
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
}

impl RenderHints {
    /// Record a content or kind change. Ids already added or removed by
    /// this command are not repeated.
    pub fn update(&mut self, id: NodeId) {
        if !self.updated.contains(&id) && !self.added.contains(&id) && !self.removed.contains(&id)
        {
            self.updated.push(id);
        }
    }

    pub fn add(&mut self, id: NodeId) {
        if !self.added.contains(&id) {
            self.added.push(id);
        }
    }

    /// A removed id never stays in `updated`; a node added and removed by
    /// the same command is not reported at all.
    pub fn remove(&mut self, id: NodeId) {
        self.updated.retain(|&u| u != id);
        if let Some(i) = self.added.iter().position(|&a| a == id) {
            self.added.remove(i);
        } else if !self.removed.contains(&id) {
            self.removed.push(id);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }
}

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patch {
    /// Markdown before the command ran, for caller-owned undo.
    pub before: String,
    pub hints: RenderHints,
    pub cursor: Option<TreeCursor>,
    pub selection: Option<Range>,
    pub version: u64,
}
