//! Bevy messages for puzzle input binding and edge editing.

use bevy::prelude::*;
use solveit_core::authoring::AuthoringError;
use solveit_core::puzzle::EdgeMoveset;

/// Request to (re)bind the puzzle actions of the director on `puzzle`.
#[derive(Message, Debug, Clone, Copy)]
pub struct BindPuzzleActions {
    /// Entity carrying the `InputDirectorComponent`.
    pub puzzle: Entity,
}

/// Fired after a trigger reached at least one receiver on a puzzle.
#[derive(Message, Debug, Clone)]
pub struct EdgeInputReceived {
    pub puzzle: Entity,
    pub action_id: String,
    /// Number of receivers the trigger was delivered to.
    pub receivers: usize,
}

/// Commands from the edge editor panel.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum EdgeEditorCommand {
    /// The edge name text box changed.
    SetEdgeName(String),
    /// The "Add Moveset" button was pressed.
    ConfirmMoveset,
}

/// Result of a `ConfirmMoveset` command, for display in the editor.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum EdgeEditorFeedback {
    MovesetAdded {
        puzzle: Entity,
        edge_name: String,
        moveset: EdgeMoveset,
    },
    Failed(AuthoringError),
}
