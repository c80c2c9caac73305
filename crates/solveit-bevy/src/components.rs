//! ECS components hosting puzzles, directors, and editor selections.

use bevy::prelude::*;
use solveit_core::input::binding::InputBindingTable;
use solveit_core::{InputDirector, Puzzle, PuzzleAction, PuzzleId};

/// Puzzle identity used by the Bevy layer: the puzzle entity itself.
pub fn puzzle_id(entity: Entity) -> PuzzleId {
    PuzzleId(entity.to_bits())
}

/// The puzzle model of a puzzle entity.
///
/// The inner puzzle's id is overwritten with [`puzzle_id`] of the entity by
/// [`crate::editor::assign_puzzle_ids`] once the actor is added, so pieces
/// referring to the entity resolve to this puzzle.
#[derive(Component, Debug)]
pub struct PuzzleActor {
    pub puzzle: Puzzle,
}

impl PuzzleActor {
    pub fn new(puzzle: Puzzle) -> Self {
        Self { puzzle }
    }
}

/// Input director of a puzzle entity, with the bindings it owns.
///
/// The director's owner is the `PuzzleActor` on the same entity.
#[derive(Component, Debug, Default)]
pub struct InputDirectorComponent {
    pub director: InputDirector,
    pub bindings: InputBindingTable,
}

impl InputDirectorComponent {
    pub fn new(actions: Vec<PuzzleAction>) -> Self {
        Self {
            director: InputDirector::new(actions),
            bindings: InputBindingTable::new(),
        }
    }

    pub fn with_bind_inputs(mut self, bind_inputs: bool) -> Self {
        self.director.set_bind_inputs(bind_inputs);
        self
    }
}

/// A puzzle piece placed in the level.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzlePieceRef {
    /// The puzzle entity this piece belongs to.
    pub puzzle: Entity,
    pub id: i64,
}

/// Marks a piece as selected in the editor.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectedInEditor {
    /// Position in the selection sequence; lower was selected first.
    pub order: u32,
}
