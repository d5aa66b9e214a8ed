use crate::coords::Vec2;

use super::{Key, KeyEvent, KeyState};

/// Offset step and optional bound.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InteractionConfig {
    /// Offset change per accepted arrow-key event.
    pub step: f32,

    /// Symmetric clamp applied to both axes after every change.
    ///
    /// `None` lets the offset accumulate without bound.
    pub limit: Option<f32>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            step: 0.05,
            limit: None,
        }
    }
}

/// Result of feeding one key event to the interaction state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyOutcome {
    /// Escape or Q: the window should close.
    Close,
    /// The offset changed; a redraw will pick it up.
    Moved,
    Ignored,
}

/// Key-driven shading offset.
///
/// Owned by the render-thread application and mutated only through
/// [`InteractionState::handle_key`]. The redraw step reads `offset`.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    config: InteractionConfig,
    offset: Vec2,
}

impl InteractionState {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            offset: Vec2::zero(),
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Applies one key event.
    ///
    /// Escape and Q close on any transition. Arrow keys move on release or
    /// repeat, never on the initial press: Up decreases y, Down increases it.
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        if matches!(event.key, Key::Escape | Key::Q) {
            return KeyOutcome::Close;
        }

        let accepted = event.state == KeyState::Released || event.repeat;
        if !accepted {
            return KeyOutcome::Ignored;
        }

        let step = self.config.step;
        let delta = match event.key {
            Key::ArrowLeft => Vec2::new(-step, 0.0),
            Key::ArrowRight => Vec2::new(step, 0.0),
            Key::ArrowUp => Vec2::new(0.0, -step),
            Key::ArrowDown => Vec2::new(0.0, step),
            _ => return KeyOutcome::Ignored,
        };

        self.offset += delta;
        if let Some(limit) = self.config.limit {
            self.offset = self.offset.clamp_abs(limit);
        }

        log::info!("offset: {:.6}/{:.6}", self.offset.x, self.offset.y);
        KeyOutcome::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn left_release_moves_left() {
        let mut state = InteractionState::default();
        assert_eq!(
            state.handle_key(&KeyEvent::released(Key::ArrowLeft)),
            KeyOutcome::Moved
        );
        assert!(close(state.offset().x, -0.05));
        assert_eq!(state.offset().y, 0.0);
    }

    #[test]
    fn right_twice_then_left_once() {
        let mut state = InteractionState::new(InteractionConfig::default());
        state.handle_key(&KeyEvent::released(Key::ArrowRight));
        state.handle_key(&KeyEvent::released(Key::ArrowRight));
        state.handle_key(&KeyEvent::released(Key::ArrowLeft));
        assert!(close(state.offset().x, 0.05));
        assert_eq!(state.offset().y, 0.0);
    }

    #[test]
    fn initial_press_is_ignored_but_repeat_counts() {
        let mut state = InteractionState::new(InteractionConfig::default());
        assert_eq!(
            state.handle_key(&KeyEvent::pressed(Key::ArrowDown)),
            KeyOutcome::Ignored
        );
        assert_eq!(state.offset(), Vec2::zero());

        state.handle_key(&KeyEvent::repeated(Key::ArrowDown));
        state.handle_key(&KeyEvent::repeated(Key::ArrowDown));
        assert!(close(state.offset().y, 0.1));
    }

    #[test]
    fn up_decreases_y() {
        let mut state = InteractionState::new(InteractionConfig::default());
        state.handle_key(&KeyEvent::released(Key::ArrowUp));
        assert!(close(state.offset().y, -0.05));
    }

    #[test]
    fn escape_and_q_close_on_any_transition() {
        let mut state = InteractionState::new(InteractionConfig::default());
        for event in [
            KeyEvent::pressed(Key::Escape),
            KeyEvent::released(Key::Escape),
            KeyEvent::pressed(Key::Q),
            KeyEvent::repeated(Key::Q),
        ] {
            assert_eq!(state.handle_key(&event), KeyOutcome::Close);
        }
        assert_eq!(state.offset(), Vec2::zero());
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut state = InteractionState::new(InteractionConfig::default());
        assert_eq!(
            state.handle_key(&KeyEvent::released(Key::Unknown(42))),
            KeyOutcome::Ignored
        );
        assert_eq!(state.offset(), Vec2::zero());
    }

    #[test]
    fn unbounded_by_default() {
        let mut state = InteractionState::new(InteractionConfig::default());
        for _ in 0..1000 {
            state.handle_key(&KeyEvent::released(Key::ArrowRight));
        }
        assert!((state.offset().x - 50.0).abs() < 0.01);
    }

    #[test]
    fn limit_clamps_both_axes() {
        let mut state = InteractionState::new(InteractionConfig {
            step: 0.5,
            limit: Some(1.0),
        });
        for _ in 0..5 {
            state.handle_key(&KeyEvent::released(Key::ArrowLeft));
            state.handle_key(&KeyEvent::released(Key::ArrowDown));
        }
        assert_eq!(state.offset(), Vec2::new(-1.0, 1.0));
    }
}
