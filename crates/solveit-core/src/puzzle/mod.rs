//! Puzzle model — the owning puzzle and its capability-queried components.
//!
//! A [`Puzzle`] is a named bag of components. Components advertise what they
//! can do through capability queries ([`PuzzleComponent::as_receiver`],
//! [`PuzzleComponent::as_piece`], [`PuzzleComponent::as_edge`]) instead of
//! being inspected by concrete type.

pub mod edge;
pub mod piece;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::input::receiver::InputReceiver;

pub use edge::{EdgeComponent, EdgeHandle, EdgeMoveset, PuzzleEdgeStore};
pub use piece::{PieceComponent, PuzzlePiece};

/// Opaque identity of a puzzle, shared by the puzzle and its pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PuzzleId(pub u64);

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "puzzle#{}", self.0)
    }
}

/// Generational reference to a component inside its owning puzzle.
///
/// Replacing a component bumps its slot generation, so ids handed out for
/// the old component stop resolving instead of reaching the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    index: usize,
    generation: u32,
}

impl ComponentId {
    pub fn index(&self) -> usize {
        self.index
    }

    #[cfg(test)]
    pub(crate) fn first_generation(index: usize) -> Self {
        Self {
            index,
            generation: 0,
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}v{}", self.index, self.generation)
    }
}

struct ComponentSlot {
    generation: u32,
    component: Box<dyn PuzzleComponent>,
}

/// A sub-object of a puzzle.
///
/// Every capability defaults to "not supported"; implementers opt in by
/// overriding the matching query.
pub trait PuzzleComponent: Send + Sync + 'static {
    /// Receiver capability: can this component accept named input actions?
    fn as_receiver(&self) -> Option<&dyn InputReceiver> {
        None
    }

    /// Mutable form of [`PuzzleComponent::as_receiver`].
    fn as_receiver_mut(&mut self) -> Option<&mut dyn InputReceiver> {
        None
    }

    /// Puzzle-piece capability, used by the moveset authoring tool.
    fn as_piece(&self) -> Option<&dyn PuzzlePiece> {
        None
    }

    /// Edge capability.
    fn as_edge(&self) -> Option<&EdgeComponent> {
        None
    }

    /// Mutable form of [`PuzzleComponent::as_edge`].
    fn as_edge_mut(&mut self) -> Option<&mut EdgeComponent> {
        None
    }
}

/// The view of an owning puzzle the input director works against.
pub trait VisualPuzzle {
    /// Name used to namespace this puzzle's input actions.
    fn puzzle_name(&self) -> &str;

    /// All components that currently answer the receiver capability, in
    /// component order.
    fn receiver_ids(&self) -> Vec<ComponentId>;

    /// Receiver capability query for a single component.
    fn receiver(&self, id: ComponentId) -> Option<&dyn InputReceiver>;

    /// Mutable receiver capability query for a single component.
    fn receiver_mut(&mut self, id: ComponentId) -> Option<&mut dyn InputReceiver>;
}

/// Whatever hosts an input director.
///
/// Only owners that resolve to a [`VisualPuzzle`] can have actions bound.
pub trait PuzzleOwner {
    fn as_visual_puzzle(&self) -> Option<&dyn VisualPuzzle>;
}

/// A named puzzle and its components.
pub struct Puzzle {
    id: PuzzleId,
    name: String,
    components: Vec<ComponentSlot>,
}

impl Puzzle {
    pub fn new(id: PuzzleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            components: Vec::new(),
        }
    }

    /// Builder form of [`Puzzle::add_component`].
    pub fn with_component(mut self, component: impl PuzzleComponent) -> Self {
        self.add_component(component);
        self
    }

    pub fn id(&self) -> PuzzleId {
        self.id
    }

    /// Re-key the puzzle, e.g. when a host assigns its own identity.
    pub fn set_id(&mut self, id: PuzzleId) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a component and return its id.
    pub fn add_component(&mut self, component: impl PuzzleComponent) -> ComponentId {
        self.components.push(ComponentSlot {
            generation: 0,
            component: Box::new(component),
        });
        ComponentId {
            index: self.components.len() - 1,
            generation: 0,
        }
    }

    /// Swap the component behind `id` for another one, returning the new id
    /// and the old component. `id` and every copy of it go stale.
    ///
    /// Returns `None` (and drops `component`) if `id` is already stale.
    pub fn replace_component(
        &mut self,
        id: ComponentId,
        component: impl PuzzleComponent,
    ) -> Option<(ComponentId, Box<dyn PuzzleComponent>)> {
        let slot = self.slot_mut(id)?;
        slot.generation = slot.generation.wrapping_add(1);
        let old = std::mem::replace(&mut slot.component, Box::new(component));
        let new_id = ComponentId {
            index: id.index,
            generation: slot.generation,
        };
        tracing::debug!(puzzle = %self.id, old = %id, new = %new_id, "component replaced");
        Some((new_id, old))
    }

    fn slot(&self, id: ComponentId) -> Option<&ComponentSlot> {
        self.components
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
    }

    fn slot_mut(&mut self, id: ComponentId) -> Option<&mut ComponentSlot> {
        self.components
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
    }

    /// First edge component with the given name.
    pub fn edge(&self, name: &str) -> Option<&EdgeComponent> {
        self.components
            .iter()
            .filter_map(|slot| slot.component.as_edge())
            .find(|edge| edge.name() == name)
    }

    /// Mutable form of [`Puzzle::edge`].
    pub fn edge_mut(&mut self, name: &str) -> Option<&mut EdgeComponent> {
        self.components
            .iter_mut()
            .filter_map(|slot| slot.component.as_edge_mut())
            .find(|edge| edge.name() == name)
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeComponent> {
        self.components
            .iter()
            .filter_map(|slot| slot.component.as_edge())
    }
}

impl fmt::Debug for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Puzzle")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("components", &self.components.len())
            .finish()
    }
}

impl VisualPuzzle for Puzzle {
    fn puzzle_name(&self) -> &str {
        &self.name
    }

    fn receiver_ids(&self) -> Vec<ComponentId> {
        self.components
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.component.as_receiver().is_some())
            .map(|(index, slot)| ComponentId {
                index,
                generation: slot.generation,
            })
            .collect()
    }

    fn receiver(&self, id: ComponentId) -> Option<&dyn InputReceiver> {
        self.slot(id)?.component.as_receiver()
    }

    fn receiver_mut(&mut self, id: ComponentId) -> Option<&mut dyn InputReceiver> {
        self.slot_mut(id)?.component.as_receiver_mut()
    }
}

impl PuzzleOwner for Puzzle {
    fn as_visual_puzzle(&self) -> Option<&dyn VisualPuzzle> {
        Some(self)
    }
}

impl PuzzleEdgeStore for Puzzle {
    fn lookup_edge(&mut self, name: &str) -> Option<&mut dyn EdgeHandle> {
        self.edge_mut(name).map(|edge| edge as &mut dyn EdgeHandle)
    }
}
