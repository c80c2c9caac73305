//! Bevy resources for puzzle input and edge editing.

use bevy::prelude::*;
use solveit_core::{InputSettings, MovesetAuthoringTool};

/// The process-wide input configuration that triggers resolve against.
#[derive(Resource, Default)]
pub struct InputConfigResource {
    pub settings: InputSettings,
    /// Whether `settings` changed since it was last written to disk.
    pub dirty: bool,
}

/// Edge editor panel state.
#[derive(Resource, Default)]
pub struct EdgeEditorState {
    pub tool: MovesetAuthoringTool,
}
