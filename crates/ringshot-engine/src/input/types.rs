use std::fmt;

/// Keyboard key identifier.
///
/// Only the keys the viewer reacts to are named. Everything else maps to
/// `Key::Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Q,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A single keyboard transition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
    /// True when the platform generated the event by auto-repeat.
    pub repeat: bool,
}

impl KeyEvent {
    pub const fn pressed(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
            repeat: false,
        }
    }

    pub const fn released(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Released,
            repeat: false,
        }
    }

    pub const fn repeated(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
            repeat: true,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
