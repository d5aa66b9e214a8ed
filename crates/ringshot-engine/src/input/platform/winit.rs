use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{Key, KeyEvent, KeyState};

/// Translates a winit keyboard event into an engine `KeyEvent`.
pub(crate) fn translate_key_event(event: &winit::event::KeyEvent) -> KeyEvent {
    let state = match event.state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    };

    KeyEvent {
        key: map_key(event.physical_key),
        state,
        repeat: event.repeat,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::KeyQ => Key::Q,
            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,
            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode is not a u32 in winit 0.30; keep "unknown" without a stable numeric.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
