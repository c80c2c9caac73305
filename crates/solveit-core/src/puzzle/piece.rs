//! Puzzle pieces — the slots an edge moveset refers to by id.

use super::{PuzzleComponent, PuzzleId};

/// Capability of anything that can be picked as part of a moveset.
pub trait PuzzlePiece {
    /// The puzzle this piece belongs to.
    fn owner(&self) -> PuzzleId;

    fn id(&self) -> i64;

    /// Whether the piece is currently selected in the editor.
    fn is_selected(&self) -> bool;
}

/// Plain piece component with an integer id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceComponent {
    owner: PuzzleId,
    id: i64,
    selected: bool,
}

impl PieceComponent {
    /// A piece that starts out selected, matching how editor selections
    /// hand pieces to the authoring tool.
    pub fn new(owner: PuzzleId, id: i64) -> Self {
        Self {
            owner,
            id,
            selected: true,
        }
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl PuzzlePiece for PieceComponent {
    fn owner(&self) -> PuzzleId {
        self.owner
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn is_selected(&self) -> bool {
        self.selected
    }
}

impl PuzzleComponent for PieceComponent {
    fn as_piece(&self) -> Option<&dyn PuzzlePiece> {
        Some(self)
    }
}
