//! Moveset authoring — turns an editor selection of pieces into an edge moveset.
//!
//! ```text
//!   selection ──→ pieces (capability query) ──→ selected only
//!             ──→ fold { owner, ordered_ids, first_id }
//!             ──→ close loop (push first_id)
//!             ──→ owner's edge by name ──→ add_moveset
//! ```

use crate::puzzle::{EdgeMoveset, Puzzle, PuzzleComponent, PuzzleEdgeStore, PuzzleId};

/// Why a moveset could not be added. Nothing is written to any edge when
/// one of these is returned.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthoringError {
    #[error("no selected puzzle pieces")]
    NoPiecesSelected,
    #[error("selection spans two puzzles ({first} and {second})")]
    MixedOwners { first: PuzzleId, second: PuzzleId },
    #[error("edge name is empty")]
    EmptyEdgeName,
    #[error("{0} not found")]
    PuzzleNotFound(PuzzleId),
    #[error("edge `{edge}` not found on {puzzle}")]
    EdgeNotFound { puzzle: PuzzleId, edge: String },
}

/// A moveset collected from a selection, not yet attached to an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovesetDraft {
    pub owner: PuzzleId,
    /// Piece ids in selection order, with the first id repeated at the end.
    pub ordered_ids: Vec<i64>,
    pub first_id: i64,
}

/// A moveset that was attached to an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedMoveset {
    pub owner: PuzzleId,
    pub edge_name: String,
    pub moveset: EdgeMoveset,
}

/// Finds the edge store of a puzzle by id.
pub trait PuzzleResolver {
    fn edge_store_mut(&mut self, owner: PuzzleId) -> Option<&mut dyn PuzzleEdgeStore>;
}

impl PuzzleResolver for [Puzzle] {
    fn edge_store_mut(&mut self, owner: PuzzleId) -> Option<&mut dyn PuzzleEdgeStore> {
        self.iter_mut()
            .find(|p| p.id() == owner)
            .map(|p| p as &mut dyn PuzzleEdgeStore)
    }
}

impl PuzzleResolver for Puzzle {
    fn edge_store_mut(&mut self, owner: PuzzleId) -> Option<&mut dyn PuzzleEdgeStore> {
        (self.id() == owner).then_some(self as &mut dyn PuzzleEdgeStore)
    }
}

/// Build a closed moveset from the selected pieces in `selection`.
///
/// Components without the piece capability, and pieces that are not selected,
/// are skipped. Every contributing piece must belong to the same puzzle.
pub fn collect_moveset(selection: &[&dyn PuzzleComponent]) -> Result<MovesetDraft, AuthoringError> {
    let draft = selection
        .iter()
        .filter_map(|component| component.as_piece())
        .filter(|piece| piece.is_selected())
        .try_fold(None::<MovesetDraft>, |acc, piece| {
            let id = piece.id();
            match acc {
                None => Ok(Some(MovesetDraft {
                    owner: piece.owner(),
                    ordered_ids: vec![id],
                    first_id: id,
                })),
                Some(draft) if draft.owner != piece.owner() => Err(AuthoringError::MixedOwners {
                    first: draft.owner,
                    second: piece.owner(),
                }),
                Some(mut draft) => {
                    draft.ordered_ids.push(id);
                    Ok(Some(draft))
                }
            }
        })?;

    let mut draft = draft.ok_or(AuthoringError::NoPiecesSelected)?;
    draft.ordered_ids.push(draft.first_id);
    Ok(draft)
}

/// Editor-side tool that appends movesets to a named edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovesetAuthoringTool {
    edge_name: String,
}

impl MovesetAuthoringTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edge_name(&self) -> &str {
        &self.edge_name
    }

    /// Handle the "edge name changed" event.
    pub fn set_edge_name(&mut self, name: impl Into<String>) {
        self.edge_name = name.into();
    }

    /// Handle the "confirm moveset" event: collect the selection and append
    /// it to the current edge of the owning puzzle.
    pub fn add_moveset<R>(
        &self,
        selection: &[&dyn PuzzleComponent],
        puzzles: &mut R,
    ) -> Result<AddedMoveset, AuthoringError>
    where
        R: PuzzleResolver + ?Sized,
    {
        let draft = collect_moveset(selection)?;
        for id in &draft.ordered_ids[..draft.ordered_ids.len() - 1] {
            tracing::debug!("element with id {id} added to moveset");
        }

        if self.edge_name.is_empty() {
            return Err(AuthoringError::EmptyEdgeName);
        }
        let store = puzzles
            .edge_store_mut(draft.owner)
            .ok_or(AuthoringError::PuzzleNotFound(draft.owner))?;
        let edge = store
            .lookup_edge(&self.edge_name)
            .ok_or_else(|| AuthoringError::EdgeNotFound {
                puzzle: draft.owner,
                edge: self.edge_name.clone(),
            })?;

        let moveset = EdgeMoveset::new(draft.ordered_ids);
        edge.add_moveset(moveset.clone());
        tracing::info!("moveset added for {} edge", self.edge_name);

        Ok(AddedMoveset {
            owner: draft.owner,
            edge_name: self.edge_name.clone(),
            moveset,
        })
    }
}
