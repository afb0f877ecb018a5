use std::collections::HashSet;

use super::types::{
    InputEvent,
    Key,
    KeyState,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for a single window.
///
/// Holds "is down" information and the current pointer position. Event
/// handlers read it after the event that changed it has been applied.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoids stuck keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(*key);
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((*x, *y));
                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }

            InputEvent::MouseWheel { .. } => {}
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// True while any mouse button is held.
    pub fn any_button_down(&self) -> bool {
        !self.buttons_down.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(button: MouseButton, state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent { button, state, x: 4.0, y: 2.0 })
    }

    #[test]
    fn press_and_release_track_buttons() {
        let mut s = InputState::default();
        s.apply_event(&button(MouseButton::Left, MouseButtonState::Pressed));
        assert!(s.button_down(MouseButton::Left));
        assert_eq!(s.pointer_pos, Some((4.0, 2.0)));

        s.apply_event(&button(MouseButton::Left, MouseButtonState::Released));
        assert!(!s.any_button_down());
    }

    #[test]
    fn pointer_left_clears_position() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 1.0 }));
        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, None);
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut s = InputState::default();
        s.apply_event(&button(MouseButton::Right, MouseButtonState::Pressed));
        s.apply_event(&InputEvent::Key {
            key: Key::Space,
            state: KeyState::Pressed,
            repeat: false,
        });
        s.apply_event(&InputEvent::Focused(false));
        assert!(!s.any_button_down());
        assert!(!s.key_down(Key::Space));
    }
}
