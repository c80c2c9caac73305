//! Solveit Bevy plugins — puzzle input binding and edge authoring in Bevy's ECS.
//!
//! Provides `PuzzleInputPlugin`, which binds each puzzle's actions to the
//! process-wide input settings and routes key presses to puzzle receivers,
//! and `EdgeEditorPlugin`, which turns the editor selection into edge movesets.

pub mod components;
pub mod config;
pub mod editor;
pub mod events;
pub mod keys;
pub mod resources;
pub mod systems;

use bevy::prelude::*;

pub use editor::EdgeEditorPlugin;

use config::InputDirectorConfig;
use events::{BindPuzzleActions, EdgeInputReceived};
use resources::InputConfigResource;
use systems::{fire_pressed_triggers, handle_bind_requests, load_input_settings, save_input_settings};

/// Runtime plugin for puzzle input.
///
/// Registers resources, messages, and systems for:
/// - Loading the input settings file at startup
/// - Binding puzzle actions on `BindPuzzleActions` requests
/// - Firing bound triggers from keyboard input
/// - Writing the settings back after a bind, when enabled
///
/// Insert an `InputDirectorConfig` before adding the plugin to override the
/// environment-derived default.
pub struct PuzzleInputPlugin;

impl Plugin for PuzzleInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<BindPuzzleActions>()
            .add_message::<EdgeInputReceived>()
            .init_resource::<InputDirectorConfig>()
            .init_resource::<InputConfigResource>()
            .add_systems(Startup, load_input_settings)
            .add_systems(
                Update,
                (
                    handle_bind_requests,
                    fire_pressed_triggers.after(handle_bind_requests),
                    save_input_settings.after(handle_bind_requests),
                ),
            );
    }
}
