//! Runtime configuration for the puzzle input plugin.

use bevy::prelude::*;
use std::path::PathBuf;

/// Environment variable naming the input settings file.
const SETTINGS_PATH_VAR: &str = "SOLVEIT_INPUT_CONFIG";
/// Environment variable that enables writing settings back after a bind.
const SAVE_AFTER_BIND_VAR: &str = "SOLVEIT_SAVE_INPUT_CONFIG";

/// Where input settings live and whether binds persist them.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct InputDirectorConfig {
    /// JSON input settings file. `None` keeps settings in memory only.
    pub settings_path: Option<PathBuf>,
    /// Write the settings file after every bind that changed it.
    pub save_after_bind: bool,
}

impl Default for InputDirectorConfig {
    fn default() -> Self {
        Self {
            settings_path: std::env::var_os(SETTINGS_PATH_VAR).map(PathBuf::from),
            save_after_bind: std::env::var(SAVE_AFTER_BIND_VAR).is_ok(),
        }
    }
}
