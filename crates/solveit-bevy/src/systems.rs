//! Bevy systems for puzzle input binding.
//!
//! Binding requests are handled before pressed keys are routed, so a rebind
//! requested this frame is in place before any trigger fires.

use bevy::prelude::*;
use solveit_core::input::binding::InputBindingTarget;
use solveit_core::input::director::BindOutcome;
use solveit_core::puzzle::{PuzzleOwner, VisualPuzzle};
use solveit_core::{InputSettings, Puzzle, TriggerPhase};

use crate::components::{InputDirectorComponent, PuzzleActor};
use crate::config::InputDirectorConfig;
use crate::events::{BindPuzzleActions, EdgeInputReceived};
use crate::keys::{held_modifiers, keycode_to_physical};
use crate::resources::InputConfigResource;

/// Owner view of a director entity: a puzzle only if the entity has one.
struct EntityOwner<'a>(Option<&'a Puzzle>);

impl PuzzleOwner for EntityOwner<'_> {
    fn as_visual_puzzle(&self) -> Option<&dyn VisualPuzzle> {
        self.0.map(|puzzle| puzzle as &dyn VisualPuzzle)
    }
}

/// Startup system: load the input settings file, if one is configured.
pub fn load_input_settings(
    config: Res<InputDirectorConfig>,
    mut input_config: ResMut<InputConfigResource>,
) {
    let Some(path) = config.settings_path.as_deref() else {
        return;
    };
    if !path.exists() {
        tracing::info!(
            "input settings {} not found, starting with no mappings",
            path.display()
        );
        return;
    }

    match InputSettings::load(path) {
        Ok(settings) => {
            tracing::info!(
                "loaded {} input mappings from {}",
                settings.mappings().len(),
                path.display()
            );
            input_config.settings = settings;
            input_config.dirty = false;
        }
        Err(e) => {
            tracing::warn!("failed to load input settings {}: {e}", path.display());
        }
    }
}

/// Process `BindPuzzleActions` requests.
pub fn handle_bind_requests(
    mut requests: MessageReader<BindPuzzleActions>,
    mut directors: Query<(Option<&PuzzleActor>, &mut InputDirectorComponent)>,
    mut input_config: ResMut<InputConfigResource>,
) {
    for request in requests.read() {
        let Ok((actor, mut component)) = directors.get_mut(request.puzzle) else {
            tracing::warn!("BindPuzzleActions: {:?} has no input director", request.puzzle);
            continue;
        };

        let owner = EntityOwner(actor.map(|a| &a.puzzle));
        let InputDirectorComponent { director, bindings } = &mut *component;
        match director.bind_puzzle_actions(&owner, &mut input_config.settings, bindings) {
            Ok(BindOutcome::Bound(summary)) => {
                input_config.dirty = true;
                tracing::debug!(
                    "{:?}: {} triggers, {} executors",
                    request.puzzle,
                    summary.triggers.len(),
                    summary.executors_created
                );
            }
            Ok(BindOutcome::Disabled) => {}
            Err(e) => {
                tracing::debug!("BindPuzzleActions on {:?}: {e}", request.puzzle);
            }
        }
    }
}

/// Route this frame's key presses and releases to bound triggers.
pub fn fire_pressed_triggers(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    input_config: Res<InputConfigResource>,
    mut puzzles: Query<(Entity, &mut PuzzleActor, &InputDirectorComponent)>,
    mut received: MessageWriter<EdgeInputReceived>,
) {
    let Some(keys) = keys else { return };
    let held = held_modifiers(&keys);

    let events: Vec<(TriggerPhase, KeyCode)> = keys
        .get_just_pressed()
        .map(|code| (TriggerPhase::Pressed, *code))
        .chain(
            keys.get_just_released()
                .map(|code| (TriggerPhase::Released, *code)),
        )
        .collect();

    for (phase, code) in events {
        let Some(key) = keycode_to_physical(code) else {
            continue;
        };
        for action_id in input_config.settings.actions_for_key(key, &held) {
            fire_action(action_id, phase, &mut puzzles, &mut received);
        }
    }
}

fn fire_action(
    action_id: &str,
    phase: TriggerPhase,
    puzzles: &mut Query<(Entity, &mut PuzzleActor, &InputDirectorComponent)>,
    received: &mut MessageWriter<EdgeInputReceived>,
) {
    for (entity, mut actor, component) in puzzles.iter_mut() {
        if component.bindings.handles(action_id, phase).is_empty() {
            continue;
        }
        let reached =
            component
                .director
                .fire(action_id, phase, &component.bindings, &mut actor.puzzle);
        if reached > 0 {
            tracing::trace!("{action_id} ({phase:?}) reached {reached} receivers on {entity:?}");
            received.write(EdgeInputReceived {
                puzzle: entity,
                action_id: action_id.to_string(),
                receivers: reached,
            });
        }
    }
}

/// Write the input settings back to disk after a bind changed them.
pub fn save_input_settings(
    config: Res<InputDirectorConfig>,
    mut input_config: ResMut<InputConfigResource>,
) {
    if !input_config.dirty || !config.save_after_bind {
        return;
    }
    let Some(path) = config.settings_path.as_deref() else {
        return;
    };

    match input_config.settings.save(path) {
        Ok(()) => {
            input_config.dirty = false;
            tracing::info!("saved input settings to {}", path.display());
        }
        Err(e) => {
            // Not retried; the next bind marks the settings dirty again.
            input_config.dirty = false;
            tracing::warn!("failed to save input settings {}: {e}", path.display());
        }
    }
}
