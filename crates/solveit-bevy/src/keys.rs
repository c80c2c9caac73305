//! Conversion between Bevy key codes and framework-neutral physical keys.

use bevy::prelude::*;
use solveit_core::{Modifiers, PhysicalKey};

/// Map a Bevy `KeyCode` to a `PhysicalKey`. Modifier keys and keys the input
/// configuration cannot express map to `None`.
pub fn keycode_to_physical(code: KeyCode) -> Option<PhysicalKey> {
    let key = match code {
        KeyCode::KeyA => PhysicalKey::A,
        KeyCode::KeyB => PhysicalKey::B,
        KeyCode::KeyC => PhysicalKey::C,
        KeyCode::KeyD => PhysicalKey::D,
        KeyCode::KeyE => PhysicalKey::E,
        KeyCode::KeyF => PhysicalKey::F,
        KeyCode::KeyG => PhysicalKey::G,
        KeyCode::KeyH => PhysicalKey::H,
        KeyCode::KeyI => PhysicalKey::I,
        KeyCode::KeyJ => PhysicalKey::J,
        KeyCode::KeyK => PhysicalKey::K,
        KeyCode::KeyL => PhysicalKey::L,
        KeyCode::KeyM => PhysicalKey::M,
        KeyCode::KeyN => PhysicalKey::N,
        KeyCode::KeyO => PhysicalKey::O,
        KeyCode::KeyP => PhysicalKey::P,
        KeyCode::KeyQ => PhysicalKey::Q,
        KeyCode::KeyR => PhysicalKey::R,
        KeyCode::KeyS => PhysicalKey::S,
        KeyCode::KeyT => PhysicalKey::T,
        KeyCode::KeyU => PhysicalKey::U,
        KeyCode::KeyV => PhysicalKey::V,
        KeyCode::KeyW => PhysicalKey::W,
        KeyCode::KeyX => PhysicalKey::X,
        KeyCode::KeyY => PhysicalKey::Y,
        KeyCode::KeyZ => PhysicalKey::Z,
        KeyCode::Digit0 => PhysicalKey::Digit0,
        KeyCode::Digit1 => PhysicalKey::Digit1,
        KeyCode::Digit2 => PhysicalKey::Digit2,
        KeyCode::Digit3 => PhysicalKey::Digit3,
        KeyCode::Digit4 => PhysicalKey::Digit4,
        KeyCode::Digit5 => PhysicalKey::Digit5,
        KeyCode::Digit6 => PhysicalKey::Digit6,
        KeyCode::Digit7 => PhysicalKey::Digit7,
        KeyCode::Digit8 => PhysicalKey::Digit8,
        KeyCode::Digit9 => PhysicalKey::Digit9,
        KeyCode::ArrowUp => PhysicalKey::ArrowUp,
        KeyCode::ArrowDown => PhysicalKey::ArrowDown,
        KeyCode::ArrowLeft => PhysicalKey::ArrowLeft,
        KeyCode::ArrowRight => PhysicalKey::ArrowRight,
        KeyCode::Space => PhysicalKey::Space,
        KeyCode::Enter => PhysicalKey::Enter,
        KeyCode::Escape => PhysicalKey::Escape,
        KeyCode::Tab => PhysicalKey::Tab,
        KeyCode::Backspace => PhysicalKey::Backspace,
        KeyCode::F1 => PhysicalKey::F1,
        KeyCode::F2 => PhysicalKey::F2,
        KeyCode::F3 => PhysicalKey::F3,
        KeyCode::F4 => PhysicalKey::F4,
        KeyCode::F5 => PhysicalKey::F5,
        KeyCode::F6 => PhysicalKey::F6,
        KeyCode::F7 => PhysicalKey::F7,
        KeyCode::F8 => PhysicalKey::F8,
        KeyCode::F9 => PhysicalKey::F9,
        KeyCode::F10 => PhysicalKey::F10,
        KeyCode::F11 => PhysicalKey::F11,
        KeyCode::F12 => PhysicalKey::F12,
        _ => return None,
    };
    Some(key)
}

/// Modifiers currently held, either side counts.
pub fn held_modifiers(keys: &ButtonInput<KeyCode>) -> Modifiers {
    Modifiers {
        shift: keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        ctrl: keys.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]),
        alt: keys.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]),
        cmd: keys.any_pressed([KeyCode::SuperLeft, KeyCode::SuperRight]),
    }
}
