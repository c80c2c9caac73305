//! Input configuration — the process-wide table of action mappings.
//!
//! The store keeps mappings exactly as they are added; it never merges or
//! deduplicates. Keeping one mapping per action id is the input director's job.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::trigger::{InputTrigger, Modifiers, PhysicalKey};

/// Errors from reading or writing an input settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid input settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage of action mappings that triggers are resolved against.
pub trait InputConfigStore {
    /// Every mapping registered under `action_id`, in registration order.
    fn find_mappings_by_action_id(&self, action_id: &str) -> Vec<InputTrigger>;

    fn add_mapping(&mut self, trigger: InputTrigger);

    /// Remove mappings equal to `trigger`.
    fn remove_mapping(&mut self, trigger: &InputTrigger);
}

/// In-memory input configuration, persisted as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    #[serde(default)]
    action_mappings: Vec<InputTrigger>,
}

impl InputSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_mappings(action_mappings: Vec<InputTrigger>) -> Self {
        Self { action_mappings }
    }

    pub fn mappings(&self) -> &[InputTrigger] {
        &self.action_mappings
    }

    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            mappings = settings.action_mappings.len(),
            "input settings loaded"
        );
        Ok(settings)
    }

    /// Write settings to a JSON file, replacing any previous contents.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        tracing::debug!(
            path = %path.display(),
            mappings = self.action_mappings.len(),
            "input settings saved"
        );
        Ok(())
    }

    /// Action ids whose mapping is activated by `key` with `held` modifiers.
    pub fn actions_for_key(&self, key: PhysicalKey, held: &Modifiers) -> Vec<&str> {
        self.action_mappings
            .iter()
            .filter(|m| m.matches(key, held))
            .map(|m| m.action_id.as_str())
            .collect()
    }
}

impl InputConfigStore for InputSettings {
    fn find_mappings_by_action_id(&self, action_id: &str) -> Vec<InputTrigger> {
        self.action_mappings
            .iter()
            .filter(|m| m.action_id == action_id)
            .cloned()
            .collect()
    }

    fn add_mapping(&mut self, trigger: InputTrigger) {
        self.action_mappings.push(trigger);
    }

    fn remove_mapping(&mut self, trigger: &InputTrigger) {
        self.action_mappings.retain(|m| m != trigger);
    }
}
