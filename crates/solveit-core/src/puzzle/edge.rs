//! Puzzle edges — named faces that rotate through authored movesets.

use serde::{Deserialize, Serialize};

use super::PuzzleComponent;
use crate::input::receiver::InputReceiver;

/// One rotation cycle of an edge: piece ids in visiting order.
///
/// Authored movesets close the loop, so the first id is repeated at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMoveset {
    pub order: Vec<i64>,
}

impl EdgeMoveset {
    pub fn new(order: Vec<i64>) -> Self {
        Self { order }
    }
}

/// Write access to a single edge, as handed out by a [`PuzzleEdgeStore`].
pub trait EdgeHandle {
    fn edge_name(&self) -> &str;

    /// Append a moveset to this edge's behavior.
    fn add_moveset(&mut self, moveset: EdgeMoveset);
}

/// Name-based edge lookup on a puzzle.
pub trait PuzzleEdgeStore {
    fn lookup_edge(&mut self, name: &str) -> Option<&mut dyn EdgeHandle>;
}

/// A named edge component.
///
/// Edges are input receivers: their receiver name is the edge name, and every
/// received action is queued as a pending turn for gameplay code to consume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeComponent {
    name: String,
    movesets: Vec<EdgeMoveset>,
    pending_turns: Vec<String>,
}

impl EdgeComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            movesets: Vec::new(),
            pending_turns: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn movesets(&self) -> &[EdgeMoveset] {
        &self.movesets
    }

    /// Action labels received since the last [`EdgeComponent::take_pending_turns`].
    pub fn pending_turns(&self) -> &[String] {
        &self.pending_turns
    }

    pub fn take_pending_turns(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_turns)
    }
}

impl EdgeHandle for EdgeComponent {
    fn edge_name(&self) -> &str {
        &self.name
    }

    fn add_moveset(&mut self, moveset: EdgeMoveset) {
        tracing::debug!(edge = %self.name, ids = ?moveset.order, "moveset appended");
        self.movesets.push(moveset);
    }
}

impl InputReceiver for EdgeComponent {
    fn receiver_name(&self) -> &str {
        &self.name
    }

    fn receive_input(&mut self, action_label: &str) {
        tracing::trace!(edge = %self.name, action = action_label, "edge received input");
        self.pending_turns.push(action_label.to_string());
    }
}

impl PuzzleComponent for EdgeComponent {
    fn as_receiver(&self) -> Option<&dyn InputReceiver> {
        Some(self)
    }

    fn as_receiver_mut(&mut self) -> Option<&mut dyn InputReceiver> {
        Some(self)
    }

    fn as_edge(&self) -> Option<&EdgeComponent> {
        Some(self)
    }

    fn as_edge_mut(&mut self) -> Option<&mut EdgeComponent> {
        Some(self)
    }
}
