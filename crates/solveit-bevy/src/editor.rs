//! Edge editor — attaches movesets to puzzle edges from the current selection.
//!
//! The panel itself (button and edge name text box) lives in the host editor
//! and talks to this plugin through [`EdgeEditorCommand`] messages. Results
//! come back as [`EdgeEditorFeedback`].

use std::collections::HashMap;

use bevy::prelude::*;
use solveit_core::authoring::PuzzleResolver;
use solveit_core::puzzle::{PieceComponent, PuzzleEdgeStore};
use solveit_core::{PuzzleComponent, PuzzleId};

use crate::components::{PuzzleActor, PuzzlePieceRef, SelectedInEditor, puzzle_id};
use crate::events::{EdgeEditorCommand, EdgeEditorFeedback};
use crate::resources::EdgeEditorState;

/// Registers the edge editor's messages, state, and command handler.
pub struct EdgeEditorPlugin;

impl Plugin for EdgeEditorPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<EdgeEditorCommand>()
            .add_message::<EdgeEditorFeedback>()
            .init_resource::<EdgeEditorState>()
            .add_systems(
                Update,
                (
                    assign_puzzle_ids,
                    handle_edge_editor_commands.after(assign_puzzle_ids),
                ),
            );
    }
}

/// Resolves selection owners to puzzle entities.
struct PuzzleEntities<'a, 'w, 's, 'q> {
    owners: &'a HashMap<PuzzleId, Entity>,
    puzzles: &'a mut Query<'w, 's, &'q mut PuzzleActor>,
}

impl PuzzleResolver for PuzzleEntities<'_, '_, '_, '_> {
    fn edge_store_mut(&mut self, owner: PuzzleId) -> Option<&mut dyn PuzzleEdgeStore> {
        let entity = *self.owners.get(&owner)?;
        let actor = self.puzzles.get_mut(entity).ok()?;
        actor.into_inner().puzzle.edge_store_mut(owner)
    }
}

/// Key newly added puzzles by their entity.
pub fn assign_puzzle_ids(mut added: Query<(Entity, &mut PuzzleActor), Added<PuzzleActor>>) {
    for (entity, mut actor) in added.iter_mut() {
        let id = puzzle_id(entity);
        if actor.puzzle.id() != id {
            tracing::debug!("{entity:?}: puzzle `{}` keyed as {id}", actor.puzzle.name());
            actor.puzzle.set_id(id);
        }
    }
}

/// Process edge editor commands.
pub fn handle_edge_editor_commands(
    mut commands: MessageReader<EdgeEditorCommand>,
    mut state: ResMut<EdgeEditorState>,
    selection: Query<(&PuzzlePieceRef, &SelectedInEditor)>,
    mut puzzles: Query<&mut PuzzleActor>,
    mut feedback: MessageWriter<EdgeEditorFeedback>,
) {
    for command in commands.read() {
        match command {
            EdgeEditorCommand::SetEdgeName(name) => {
                state.tool.set_edge_name(name.clone());
            }
            EdgeEditorCommand::ConfirmMoveset => {
                let mut selected: Vec<(SelectedInEditor, PuzzlePieceRef)> =
                    selection.iter().map(|(piece, sel)| (*sel, *piece)).collect();
                selected.sort_by_key(|(sel, _)| sel.order);

                let pieces: Vec<PieceComponent> = selected
                    .iter()
                    .map(|(_, piece)| PieceComponent::new(puzzle_id(piece.puzzle), piece.id))
                    .collect();
                let components: Vec<&dyn PuzzleComponent> =
                    pieces.iter().map(|p| p as &dyn PuzzleComponent).collect();
                let owners: HashMap<PuzzleId, Entity> = selected
                    .iter()
                    .map(|(_, piece)| (puzzle_id(piece.puzzle), piece.puzzle))
                    .collect();

                let mut resolver = PuzzleEntities {
                    owners: &owners,
                    puzzles: &mut puzzles,
                };
                match state.tool.add_moveset(&components, &mut resolver) {
                    Ok(added) => {
                        if let Some(&puzzle) = owners.get(&added.owner) {
                            feedback.write(EdgeEditorFeedback::MovesetAdded {
                                puzzle,
                                edge_name: added.edge_name,
                                moveset: added.moveset,
                            });
                        }
                    }
                    Err(e) => {
                        tracing::warn!("could not add moveset: {e}");
                        feedback.write(EdgeEditorFeedback::Failed(e));
                    }
                }
            }
        }
    }
}
