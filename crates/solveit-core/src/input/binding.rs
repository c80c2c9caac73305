//! Binding targets — where resolved triggers are attached to executors.

use std::collections::BTreeMap;

use super::executor::ExecutorHandle;
use super::trigger::TriggerPhase;

/// A per-player input surface that executors are bound to.
pub trait InputBindingTarget {
    fn bind_action(&mut self, action_id: &str, phase: TriggerPhase, handle: ExecutorHandle);

    /// Drop every binding registered under `action_id`, in all phases.
    fn unbind_action(&mut self, action_id: &str);

    /// Handles bound under `(action_id, phase)`, in binding order.
    fn handles(&self, action_id: &str, phase: TriggerPhase) -> &[ExecutorHandle];
}

/// Map-backed binding target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBindingTable {
    bindings: BTreeMap<(String, TriggerPhase), Vec<ExecutorHandle>>,
}

impl InputBindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of bound handles across all actions.
    pub fn len(&self) -> usize {
        self.bindings.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl InputBindingTarget for InputBindingTable {
    fn bind_action(&mut self, action_id: &str, phase: TriggerPhase, handle: ExecutorHandle) {
        self.bindings
            .entry((action_id.to_string(), phase))
            .or_default()
            .push(handle);
    }

    fn unbind_action(&mut self, action_id: &str) {
        self.bindings.retain(|(id, _), _| id != action_id);
    }

    fn handles(&self, action_id: &str, phase: TriggerPhase) -> &[ExecutorHandle] {
        self.bindings
            .get(&(action_id.to_string(), phase))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
