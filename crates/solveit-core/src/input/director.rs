//! Input director — binds a puzzle's declared actions to its receivers.
//!
//! # Binding
//! For every [`PuzzleAction`], in declaration order:
//! ```text
//!   action_id = "{puzzle_name}_{action_label}"
//!   existing mappings for action_id ──→ keep their key, remove them
//!   register trigger(action_id, key)
//!   for each receiver named target_edge_name:
//!       executor(action_label, receiver) ──→ bind (action_id, Pressed)
//! ```
//! Executors from the previous bind are destroyed before any of this
//! happens, so a rebind never leaves two generations of wiring alive.
//!
//! # State
//! `Unbound → Binding → Bound`. Rebinding from `Bound` goes through `Binding`
//! again and ends in the same bound state for an unchanged action table.

use serde::{Deserialize, Serialize};

use super::binding::InputBindingTarget;
use super::executor::{ActionExecutor, ExecuteError, ExecutorArena, ExecutorHandle};
use super::settings::InputConfigStore;
use super::trigger::{make_action_id, InputTrigger, Modifiers, PhysicalKey, TriggerPhase};
use crate::puzzle::{ComponentId, PuzzleOwner, VisualPuzzle};

/// A designer-authored action: a label routed to the receivers of one edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleAction {
    /// Label delivered to receivers, e.g. `"Rotate"`.
    pub action_label: String,
    /// Receiver name this action is routed to.
    pub target_edge_name: String,
    /// Resolved trigger. Only `key` and `modifiers` are meaningful before the
    /// first bind; they act as the default key combination.
    #[serde(default)]
    pub trigger: InputTrigger,
}

impl PuzzleAction {
    pub fn new(action_label: impl Into<String>, target_edge_name: impl Into<String>) -> Self {
        Self {
            action_label: action_label.into(),
            target_edge_name: target_edge_name.into(),
            trigger: InputTrigger::default(),
        }
    }

    /// Key used when no mapping for this action exists yet.
    pub fn with_default_key(mut self, key: PhysicalKey) -> Self {
        self.trigger.key = Some(key);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.trigger.modifiers = modifiers;
        self
    }
}

/// Lifecycle of a director's bindings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectorState {
    #[default]
    Unbound,
    Binding,
    Bound,
}

/// Errors that abort a bind before anything is mutated.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BindError {
    #[error("input director owner is not a visual puzzle")]
    NotAPuzzle,
}

/// Errors from dispatching a single executor.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("{0} was destroyed by a rebind")]
    StaleExecutor(ExecutorHandle),
    #[error(transparent)]
    Execute(#[from] ExecuteError),
}

/// What a completed bind produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindSummary {
    /// Triggers registered with the input configuration, in action order.
    pub triggers: Vec<InputTrigger>,
    pub executors_created: usize,
    /// Labels of actions that found no receiver.
    pub unmatched_actions: Vec<String>,
}

/// Result of [`InputDirector::bind_puzzle_actions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindOutcome {
    /// Binding is switched off for this director; nothing was touched.
    Disabled,
    Bound(BindSummary),
}

/// Routes a puzzle's input actions to its receivers.
#[derive(Debug)]
pub struct InputDirector {
    actions: Vec<PuzzleAction>,
    bind_inputs: bool,
    state: DirectorState,
    arena: ExecutorArena,
    executors: Vec<ExecutorHandle>,
    bound_action_ids: Vec<String>,
}

impl Default for InputDirector {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InputDirector {
    /// Director for `actions`, with input binding switched on.
    pub fn new(actions: Vec<PuzzleAction>) -> Self {
        Self {
            actions,
            bind_inputs: true,
            state: DirectorState::Unbound,
            arena: ExecutorArena::new(),
            executors: Vec::new(),
            bound_action_ids: Vec::new(),
        }
    }

    pub fn with_bind_inputs(mut self, bind_inputs: bool) -> Self {
        self.bind_inputs = bind_inputs;
        self
    }

    pub fn actions(&self) -> &[PuzzleAction] {
        &self.actions
    }

    pub fn bind_inputs(&self) -> bool {
        self.bind_inputs
    }

    pub fn set_bind_inputs(&mut self, bind_inputs: bool) {
        self.bind_inputs = bind_inputs;
    }

    pub fn state(&self) -> DirectorState {
        self.state
    }

    /// Handles of the executors created by the last bind.
    pub fn executors(&self) -> &[ExecutorHandle] {
        &self.executors
    }

    pub fn executor_count(&self) -> usize {
        self.executors.len()
    }

    pub fn executor(&self, handle: ExecutorHandle) -> Option<&ActionExecutor> {
        self.arena.get(handle)
    }

    /// Resolve every action to a unique trigger and bind it to the matching
    /// receivers of `owner`.
    ///
    /// Fails with [`BindError::NotAPuzzle`] before touching anything if the
    /// owner is not a visual puzzle. Returns [`BindOutcome::Disabled`] without
    /// touching anything if binding is switched off.
    pub fn bind_puzzle_actions<S, T>(
        &mut self,
        owner: &dyn PuzzleOwner,
        store: &mut S,
        target: &mut T,
    ) -> Result<BindOutcome, BindError>
    where
        S: InputConfigStore + ?Sized,
        T: InputBindingTarget + ?Sized,
    {
        let Some(puzzle) = owner.as_visual_puzzle() else {
            tracing::warn!("input director is not attached to a visual puzzle; bind skipped");
            return Err(BindError::NotAPuzzle);
        };
        if !self.bind_inputs {
            tracing::debug!(puzzle = puzzle.puzzle_name(), "input binding disabled");
            return Ok(BindOutcome::Disabled);
        }

        self.state = DirectorState::Binding;
        self.destroy_executors(target);

        let puzzle_name = puzzle.puzzle_name();
        let receivers: Vec<(ComponentId, String)> = puzzle
            .receiver_ids()
            .into_iter()
            .filter_map(|id| {
                puzzle
                    .receiver(id)
                    .map(|r| (id, r.receiver_name().to_string()))
            })
            .collect();

        let mut summary = BindSummary::default();
        for action in self.actions.iter_mut() {
            let action_id = make_action_id(puzzle_name, &action.action_label);
            action.trigger.action_id = action_id.clone();
            take_existing_mappings(store, &mut action.trigger);
            store.add_mapping(action.trigger.clone());
            summary.triggers.push(action.trigger.clone());
            self.bound_action_ids.push(action_id.clone());

            let mut matched = 0;
            for (component, _) in receivers
                .iter()
                .filter(|(_, name)| *name == action.target_edge_name)
            {
                let executor = ActionExecutor::new(action.action_label.clone(), *component);
                let handle = self.arena.insert(executor);
                target.bind_action(&action_id, TriggerPhase::Pressed, handle);
                self.executors.push(handle);
                matched += 1;
            }

            if matched == 0 {
                tracing::debug!(
                    action = %action_id,
                    edge = %action.target_edge_name,
                    "no receiver for puzzle action"
                );
                summary.unmatched_actions.push(action.action_label.clone());
            }
            summary.executors_created += matched;
        }

        self.state = DirectorState::Bound;
        tracing::info!(
            puzzle = puzzle_name,
            actions = self.actions.len(),
            executors = summary.executors_created,
            "puzzle actions bound"
        );
        Ok(BindOutcome::Bound(summary))
    }

    /// Tear down every executor and binding this director created.
    ///
    /// Mappings stay in the input configuration; other systems may still
    /// resolve them by name.
    pub fn unbind<T>(&mut self, target: &mut T)
    where
        T: InputBindingTarget + ?Sized,
    {
        self.destroy_executors(target);
        self.state = DirectorState::Unbound;
    }

    /// Run a single executor against `puzzle`.
    pub fn dispatch(
        &self,
        handle: ExecutorHandle,
        puzzle: &mut dyn VisualPuzzle,
    ) -> Result<(), DispatchError> {
        let executor = self
            .arena
            .get(handle)
            .ok_or(DispatchError::StaleExecutor(handle))?;
        executor.execute(puzzle)?;
        Ok(())
    }

    /// Deliver a fired trigger to every executor bound under
    /// `(action_id, phase)`. Returns how many receivers were reached.
    ///
    /// Handles destroyed by a rebind are ignored.
    pub fn fire<T>(
        &self,
        action_id: &str,
        phase: TriggerPhase,
        target: &T,
        puzzle: &mut dyn VisualPuzzle,
    ) -> usize
    where
        T: InputBindingTarget + ?Sized,
    {
        let mut reached = 0;
        for &handle in target.handles(action_id, phase) {
            match self.dispatch(handle, puzzle) {
                Ok(()) => reached += 1,
                Err(DispatchError::StaleExecutor(handle)) => {
                    tracing::trace!(action = action_id, %handle, "ignoring destroyed executor");
                }
                Err(DispatchError::Execute(e)) => {
                    tracing::error!(action = action_id, %handle, "executor outlived its receiver: {e}");
                }
            }
        }
        reached
    }

    fn destroy_executors<T>(&mut self, target: &mut T)
    where
        T: InputBindingTarget + ?Sized,
    {
        for action_id in self.bound_action_ids.drain(..) {
            target.unbind_action(&action_id);
        }
        self.arena.clear();
        self.executors.clear();
    }
}

/// Remove every mapping already registered under the trigger's action id,
/// carrying the key combination of the last one over to `trigger`.
fn take_existing_mappings<S>(store: &mut S, trigger: &mut InputTrigger)
where
    S: InputConfigStore + ?Sized,
{
    for existing in store.find_mappings_by_action_id(&trigger.action_id) {
        trigger.key = existing.key;
        trigger.modifiers = existing.modifiers;
        store.remove_mapping(&existing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::binding::InputBindingTable;
    use crate::input::receiver::InputReceiver;
    use crate::input::settings::InputSettings;
    use crate::puzzle::{EdgeComponent, Puzzle, PuzzleComponent, PuzzleId};

    struct NotAPuzzle;

    impl PuzzleOwner for NotAPuzzle {
        fn as_visual_puzzle(&self) -> Option<&dyn VisualPuzzle> {
            None
        }
    }

    /// A non-edge receiver that shares an edge's name.
    struct Lever {
        name: String,
    }

    impl InputReceiver for Lever {
        fn receiver_name(&self) -> &str {
            &self.name
        }

        fn receive_input(&mut self, _action_label: &str) {}
    }

    impl PuzzleComponent for Lever {
        fn as_receiver(&self) -> Option<&dyn InputReceiver> {
            Some(self)
        }

        fn as_receiver_mut(&mut self) -> Option<&mut dyn InputReceiver> {
            Some(self)
        }
    }

    struct Decoration;

    impl PuzzleComponent for Decoration {}

    fn cube() -> Puzzle {
        Puzzle::new(PuzzleId(1), "Cube1")
            .with_component(EdgeComponent::new("North"))
            .with_component(EdgeComponent::new("South"))
            .with_component(Lever {
                name: "North".into(),
            })
    }

    fn actions() -> Vec<PuzzleAction> {
        vec![
            PuzzleAction::new("Rotate", "North").with_default_key(PhysicalKey::R),
            PuzzleAction::new("Flip", "South").with_default_key(PhysicalKey::F),
            PuzzleAction::new("Spin", "East").with_default_key(PhysicalKey::S),
        ]
    }

    fn bound(outcome: BindOutcome) -> BindSummary {
        match outcome {
            BindOutcome::Bound(summary) => summary,
            BindOutcome::Disabled => panic!("expected a bound outcome"),
        }
    }

    #[test]
    fn test_executor_count_matches_name_pairs() {
        let puzzle = cube();
        let mut store = InputSettings::new();
        let mut table = InputBindingTable::new();
        let mut director = InputDirector::new(actions());

        let summary = bound(
            director
                .bind_puzzle_actions(&puzzle, &mut store, &mut table)
                .unwrap(),
        );

        // Rotate → North edge + North lever, Flip → South edge, Spin → nothing.
        assert_eq!(summary.executors_created, 3);
        assert_eq!(director.executor_count(), 3);
        assert_eq!(summary.unmatched_actions, vec!["Spin".to_string()]);
        assert_eq!(director.state(), DirectorState::Bound);
        assert_eq!(table.handles("Cube1_Rotate", TriggerPhase::Pressed).len(), 2);
        assert!(table.handles("Cube1_Spin", TriggerPhase::Pressed).is_empty());
    }

    #[test]
    fn test_unmatched_action_still_registers_trigger() {
        let puzzle = cube();
        let mut store = InputSettings::new();
        let mut table = InputBindingTable::new();
        let mut director = InputDirector::new(actions());
        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();

        assert_eq!(
            store.find_mappings_by_action_id("Cube1_Spin"),
            vec![InputTrigger::new("Cube1_Spin", Some(PhysicalKey::S))]
        );
    }

    #[test]
    fn test_fire_multicasts_to_every_matching_receiver() {
        let mut puzzle = cube();
        let mut store = InputSettings::new();
        let mut table = InputBindingTable::new();
        let mut director = InputDirector::new(actions());
        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();

        let reached = director.fire("Cube1_Rotate", TriggerPhase::Pressed, &table, &mut puzzle);
        assert_eq!(reached, 2);
        assert_eq!(puzzle.edge("North").unwrap().pending_turns(), ["Rotate"]);
        assert!(puzzle.edge("South").unwrap().pending_turns().is_empty());
        let lever = puzzle.receiver(ComponentId::first_generation(2)).unwrap();
        assert_eq!(lever.receiver_name(), "North");

        assert_eq!(
            director.fire("Cube1_Rotate", TriggerPhase::Released, &table, &mut puzzle),
            0
        );
        assert_eq!(director.fire("Cube1_Unknown", TriggerPhase::Pressed, &table, &mut puzzle), 0);
    }

    #[test]
    fn test_rebind_preserves_keys_and_replaces_executors() {
        let puzzle = cube();
        let mut store = InputSettings::new();
        let mut table = InputBindingTable::new();
        let mut director = InputDirector::new(actions());

        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();
        let first_store = store.clone();
        let first_handles = director.executors().to_vec();

        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();

        assert_eq!(store, first_store);
        assert_eq!(director.executor_count(), first_handles.len());
        assert_eq!(table.len(), first_handles.len());
        assert!(first_handles.iter().all(|h| director.executor(*h).is_none()));
    }

    #[test]
    fn test_rebind_keeps_previously_assigned_key() {
        let puzzle = cube();
        let mut store = InputSettings::from_mappings(vec![InputTrigger::new(
            "Cube1_Rotate",
            Some(PhysicalKey::K),
        )]);
        let mut table = InputBindingTable::new();
        let mut director = InputDirector::new(actions());

        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();
        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();

        assert_eq!(
            store.find_mappings_by_action_id("Cube1_Rotate"),
            vec![InputTrigger::new("Cube1_Rotate", Some(PhysicalKey::K))]
        );
        assert_eq!(director.actions()[0].trigger.key, Some(PhysicalKey::K));
    }

    #[test]
    fn test_duplicate_mappings_collapse_to_one() {
        let puzzle = cube();
        let mut store = InputSettings::from_mappings(vec![
            InputTrigger::new("Cube1_Rotate", Some(PhysicalKey::Q)),
            InputTrigger::new("Cube1_Rotate", Some(PhysicalKey::W)),
        ]);
        let mut table = InputBindingTable::new();
        let mut director = InputDirector::new(actions());
        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();

        for action_id in ["Cube1_Rotate", "Cube1_Flip", "Cube1_Spin"] {
            assert_eq!(store.find_mappings_by_action_id(action_id).len(), 1);
        }
        // The most recently registered duplicate decides the key.
        assert_eq!(
            store.find_mappings_by_action_id("Cube1_Rotate")[0].key,
            Some(PhysicalKey::W)
        );
    }

    #[test]
    fn test_disabled_director_touches_nothing() {
        let puzzle = cube();
        let mut store = InputSettings::from_mappings(vec![InputTrigger::new(
            "Cube1_Rotate",
            Some(PhysicalKey::K),
        )]);
        let mut table = InputBindingTable::new();
        let mut director = InputDirector::new(actions()).with_bind_inputs(false);

        let before = store.clone();
        let outcome = director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();

        assert_eq!(outcome, BindOutcome::Disabled);
        assert_eq!(store, before);
        assert!(table.is_empty());
        assert_eq!(director.executor_count(), 0);
        assert_eq!(director.state(), DirectorState::Unbound);
    }

    #[test]
    fn test_disabling_after_bind_keeps_existing_wiring() {
        let puzzle = cube();
        let mut store = InputSettings::new();
        let mut table = InputBindingTable::new();
        let mut director = InputDirector::new(actions());
        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();

        director.set_bind_inputs(false);
        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();
        assert_eq!(director.executor_count(), 3);
        assert_eq!(director.state(), DirectorState::Bound);
    }

    #[test]
    fn test_wrong_owner_aborts_without_side_effects() {
        let puzzle = cube();
        let mut store = InputSettings::new();
        let mut table = InputBindingTable::new();
        let mut director = InputDirector::new(actions());
        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();
        let store_before = store.clone();
        let table_before = table.clone();
        let handles = director.executors().to_vec();

        let result = director.bind_puzzle_actions(&NotAPuzzle, &mut store, &mut table);

        assert_eq!(result, Err(BindError::NotAPuzzle));
        assert_eq!(store, store_before);
        assert_eq!(table, table_before);
        assert_eq!(director.executors(), handles.as_slice());
    }

    #[test]
    fn test_stale_handle_cannot_reach_receiver() {
        let mut puzzle = cube();
        let mut store = InputSettings::new();
        let mut table = InputBindingTable::new();
        let mut director = InputDirector::new(actions());
        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();
        let old = director.executors()[0];

        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();

        assert_eq!(
            director.dispatch(old, &mut puzzle),
            Err(DispatchError::StaleExecutor(old))
        );
        assert!(puzzle.edge("North").unwrap().pending_turns().is_empty());
    }

    #[test]
    fn test_fire_skips_receivers_replaced_since_bind() {
        let mut puzzle = cube();
        let mut store = InputSettings::new();
        let mut table = InputBindingTable::new();
        let mut director = InputDirector::new(actions());
        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();

        puzzle.replace_component(ComponentId::first_generation(0), Decoration);
        let reached = director.fire("Cube1_Rotate", TriggerPhase::Pressed, &table, &mut puzzle);
        assert_eq!(reached, 1);
    }

    #[test]
    fn test_fire_skips_receiver_swapped_for_another_receiver() {
        let mut puzzle = cube();
        let mut store = InputSettings::new();
        let mut table = InputBindingTable::new();
        let mut director = InputDirector::new(actions());
        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();

        puzzle.replace_component(ComponentId::first_generation(0), EdgeComponent::new("West"));
        let reached = director.fire("Cube1_Rotate", TriggerPhase::Pressed, &table, &mut puzzle);

        // Only the lever, still named "North", is reached.
        assert_eq!(reached, 1);
        assert!(puzzle.edge("West").unwrap().pending_turns().is_empty());

        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();
        assert_eq!(director.fire("Cube1_Rotate", TriggerPhase::Pressed, &table, &mut puzzle), 1);
        assert!(puzzle.edge("West").unwrap().pending_turns().is_empty());
    }

    #[test]
    fn test_unbind_clears_bindings_but_keeps_mappings() {
        let mut puzzle = cube();
        let mut store = InputSettings::new();
        let mut table = InputBindingTable::new();
        let mut director = InputDirector::new(actions());
        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();

        director.unbind(&mut table);

        assert_eq!(director.state(), DirectorState::Unbound);
        assert_eq!(director.executor_count(), 0);
        assert!(table.is_empty());
        assert_eq!(store.mappings().len(), 3);
        assert_eq!(director.fire("Cube1_Rotate", TriggerPhase::Pressed, &table, &mut puzzle), 0);
    }

    #[test]
    fn test_new_receivers_are_picked_up_on_rebind() {
        let mut puzzle = cube();
        let mut store = InputSettings::new();
        let mut table = InputBindingTable::new();
        let mut director = InputDirector::new(actions());
        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();
        assert_eq!(director.executor_count(), 3);

        puzzle.add_component(EdgeComponent::new("East"));
        director
            .bind_puzzle_actions(&puzzle, &mut store, &mut table)
            .unwrap();

        assert_eq!(director.executor_count(), 4);
        assert_eq!(director.fire("Cube1_Spin", TriggerPhase::Pressed, &table, &mut puzzle), 1);
        assert_eq!(puzzle.edge("East").unwrap().pending_turns(), ["Spin"]);
    }

    #[test]
    fn test_puzzle_action_from_json() {
        let action: PuzzleAction = serde_json::from_str(
            r#"{ "action_label": "Rotate", "target_edge_name": "North",
                 "trigger": { "action_id": "", "key": "R" } }"#,
        )
        .unwrap();
        assert_eq!(action, PuzzleAction::new("Rotate", "North").with_default_key(PhysicalKey::R));
    }
}
