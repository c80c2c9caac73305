//! Action executors and the generational arena that owns them.
//!
//! An executor pairs one action label with one receiver so that a generic
//! "trigger fired" callback can be routed without the binding layer knowing
//! about receivers. Executors are referred to by [`ExecutorHandle`]; clearing
//! the arena bumps every occupied slot's generation, so all handles go stale
//! at once and can no longer reach a receiver.

use std::fmt;

use crate::puzzle::{ComponentId, VisualPuzzle};

/// Errors from running an executor.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExecuteError {
    /// The component was replaced or no longer answers the receiver
    /// capability. The executor outlived the wiring it was created for.
    #[error("{component} is no longer an input receiver (action `{action_label}`)")]
    ReceiverLost {
        action_label: String,
        component: ComponentId,
    },
}

/// One `(action_label, receiver)` pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionExecutor {
    action_label: String,
    receiver: ComponentId,
}

impl ActionExecutor {
    /// Create an executor. The receiver is not validated here; the director
    /// only pairs labels with components it just discovered as receivers.
    pub fn new(action_label: impl Into<String>, receiver: ComponentId) -> Self {
        Self {
            action_label: action_label.into(),
            receiver,
        }
    }

    pub fn action_label(&self) -> &str {
        &self.action_label
    }

    pub fn receiver(&self) -> ComponentId {
        self.receiver
    }

    /// Deliver the action label to the paired receiver.
    pub fn execute(&self, puzzle: &mut dyn VisualPuzzle) -> Result<(), ExecuteError> {
        let receiver =
            puzzle
                .receiver_mut(self.receiver)
                .ok_or_else(|| ExecuteError::ReceiverLost {
                    action_label: self.action_label.clone(),
                    component: self.receiver,
                })?;
        receiver.receive_input(&self.action_label);
        Ok(())
    }
}

/// Generational reference to an executor in an [`ExecutorArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExecutorHandle {
    index: u32,
    generation: u32,
}

impl fmt::Display for ExecutorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "executor#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    executor: Option<ActionExecutor>,
}

/// Owns executors; hands out generational handles.
#[derive(Debug, Default)]
pub struct ExecutorArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl ExecutorArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, executor: ActionExecutor) -> ExecutorHandle {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.executor = Some(executor);
            return ExecutorHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            executor: Some(executor),
        });
        ExecutorHandle {
            index,
            generation: 0,
        }
    }

    /// The executor behind `handle`, or `None` if the handle is stale.
    pub fn get(&self, handle: ExecutorHandle) -> Option<&ActionExecutor> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.executor.as_ref()
    }

    /// Destroy every executor, invalidating all outstanding handles.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.executor.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.live = 0;
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{EdgeComponent, Puzzle, PuzzleId};

    struct Decoration;

    impl crate::puzzle::PuzzleComponent for Decoration {}

    fn north_only() -> (Puzzle, ComponentId) {
        let mut puzzle = Puzzle::new(PuzzleId(1), "Cube1");
        let north = puzzle.add_component(EdgeComponent::new("North"));
        (puzzle, north)
    }

    #[test]
    fn test_execute_reaches_receiver() {
        let (mut puzzle, north) = north_only();
        let executor = ActionExecutor::new("Rotate", north);
        executor.execute(&mut puzzle).unwrap();
        assert_eq!(puzzle.edge("North").unwrap().pending_turns(), ["Rotate"]);
    }

    #[test]
    fn test_execute_fails_when_receiver_replaced() {
        let (mut puzzle, north) = north_only();
        puzzle.replace_component(north, Decoration);

        let executor = ActionExecutor::new("Rotate", north);
        assert_eq!(
            executor.execute(&mut puzzle),
            Err(ExecuteError::ReceiverLost {
                action_label: "Rotate".into(),
                component: north,
            })
        );
    }

    #[test]
    fn test_execute_fails_when_replaced_by_another_receiver() {
        let (mut puzzle, north) = north_only();
        puzzle.replace_component(north, EdgeComponent::new("West"));

        let executor = ActionExecutor::new("Rotate", north);
        assert!(matches!(
            executor.execute(&mut puzzle),
            Err(ExecuteError::ReceiverLost { .. })
        ));
        assert!(puzzle.edge("West").unwrap().pending_turns().is_empty());
    }

    #[test]
    fn test_cleared_slot_does_not_revive_old_handle() {
        let mut arena = ExecutorArena::new();
        let old = arena.insert(ActionExecutor::new("Rotate", ComponentId::first_generation(0)));
        arena.clear();

        let new = arena.insert(ActionExecutor::new("Flip", ComponentId::first_generation(1)));
        assert_ne!(old, new);
        assert!(arena.get(old).is_none());
        assert_eq!(arena.get(new).map(|e| e.action_label()), Some("Flip"));
    }

    #[test]
    fn test_clear_invalidates_everything() {
        let mut arena = ExecutorArena::new();
        let handles: Vec<_> = (0..3)
            .map(|i| arena.insert(ActionExecutor::new("Rotate", ComponentId::first_generation(i))))
            .collect();
        arena.clear();

        assert_eq!(arena.len(), 0);
        assert!(arena.is_empty());
        assert!(handles.iter().all(|h| arena.get(*h).is_none()));

        let fresh = arena.insert(ActionExecutor::new("Rotate", ComponentId::first_generation(0)));
        assert!(arena.get(fresh).is_some());
        assert_eq!(arena.len(), 1);
    }
}
