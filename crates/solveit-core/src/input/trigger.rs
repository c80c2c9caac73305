//! Input triggers — named, key-bound actions recognized by the host input layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Framework-neutral physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PhysicalKey {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl fmt::Display for PhysicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Modifier keys that must be held for a trigger to fire.
///
/// A modifier left `false` is not required; it does not have to be released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub cmd: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        cmd: false,
    };

    /// Whether the modifiers in `held` cover every modifier `self` requires.
    pub fn is_satisfied_by(&self, held: &Modifiers) -> bool {
        (!self.shift || held.shift)
            && (!self.ctrl || held.ctrl)
            && (!self.alt || held.alt)
            && (!self.cmd || held.cmd)
    }
}

/// Phase of a key event a binding listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TriggerPhase {
    Pressed,
    Released,
}

/// A named input action and the key combination bound to it.
///
/// Identified by `action_id` within the input configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputTrigger {
    pub action_id: String,
    #[serde(default)]
    pub key: Option<PhysicalKey>,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl InputTrigger {
    pub fn new(action_id: impl Into<String>, key: Option<PhysicalKey>) -> Self {
        Self {
            action_id: action_id.into(),
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether pressing `key` while holding `held` activates this trigger.
    pub fn matches(&self, key: PhysicalKey, held: &Modifiers) -> bool {
        self.key == Some(key) && self.modifiers.is_satisfied_by(held)
    }
}

/// Globally namespaced action id for a puzzle's action.
///
/// The `"{puzzle}_{label}"` format is relied on by anything that looks
/// mappings up by name, so it must not change.
pub fn make_action_id(puzzle_name: &str, action_label: &str) -> String {
    format!("{puzzle_name}_{action_label}")
}
