use winit::dpi::PhysicalPosition;
use winit::event::{
    ElementState, KeyEvent, MouseButton as WinitButton, MouseScrollDelta, WindowEvent,
};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::input::{
    InputEvent, InputState, Key, KeyState, MouseButton, MouseButtonState, MouseWheelDelta,
    PointerButtonEvent, PointerMoveEvent,
};

/// Maps a winit window event onto the engine's input vocabulary.
///
/// Positions and pixel wheel deltas come out in logical pixels. Events the
/// input layer has no use for yield `None`.
pub(crate) fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::Focused(focused) => InputEvent::Focused(*focused),
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,
        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = logical(window, *position);
            InputEvent::PointerMoved(PointerMoveEvent { x, y })
        }
        WindowEvent::MouseInput { state: pressed, button, .. } => {
            // Button events carry no position in winit; reuse the last motion.
            let (x, y) = state.pointer_pos.unwrap_or_default();
            InputEvent::PointerButton(PointerButtonEvent {
                button: (*button).into(),
                state: (*pressed).into(),
                x,
                y,
            })
        }
        WindowEvent::MouseWheel { delta, .. } => InputEvent::MouseWheel {
            delta: wheel_delta(window, *delta),
        },
        WindowEvent::KeyboardInput { event, .. } => key_event(event),
        _ => return None,
    };
    Some(ev)
}

fn logical(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let p = pos.to_logical::<f64>(window.scale_factor());
    (p.x as f32, p.y as f32)
}

fn wheel_delta(window: &Window, delta: MouseScrollDelta) -> MouseWheelDelta {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x, y },
        MouseScrollDelta::PixelDelta(p) => {
            let (x, y) = logical(window, p);
            MouseWheelDelta::Pixel { x, y }
        }
    }
}

fn key_event(event: &KeyEvent) -> InputEvent {
    let key = match event.physical_key {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::Space) => Key::Space,
        PhysicalKey::Code(KeyCode::Enter) => Key::Enter,
        PhysicalKey::Code(code) => Key::Other(code as u32),
        // Native scancodes have no portable numbering.
        PhysicalKey::Unidentified(_) => Key::Other(0),
    };
    let state = match event.state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    };
    InputEvent::Key { key, state, repeat: event.repeat }
}

impl From<ElementState> for MouseButtonState {
    fn from(s: ElementState) -> Self {
        match s {
            ElementState::Pressed => MouseButtonState::Pressed,
            ElementState::Released => MouseButtonState::Released,
        }
    }
}

impl From<WinitButton> for MouseButton {
    fn from(b: WinitButton) -> Self {
        match b {
            WinitButton::Left => MouseButton::Left,
            WinitButton::Right => MouseButton::Right,
            WinitButton::Middle => MouseButton::Middle,
            WinitButton::Back => MouseButton::Back,
            WinitButton::Forward => MouseButton::Forward,
            WinitButton::Other(code) => MouseButton::Other(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_state_maps_to_button_state() {
        assert_eq!(MouseButtonState::from(ElementState::Pressed), MouseButtonState::Pressed);
        assert_eq!(MouseButtonState::from(ElementState::Released), MouseButtonState::Released);
    }

    #[test]
    fn winit_buttons_map_one_to_one() {
        assert_eq!(MouseButton::from(WinitButton::Left), MouseButton::Left);
        assert_eq!(MouseButton::from(WinitButton::Right), MouseButton::Right);
        assert_eq!(MouseButton::from(WinitButton::Other(9)), MouseButton::Other(9));
    }
}
