/// Keys the demo reacts to; everything else is `Other` with its platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,
    Enter,
    Other(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// One wheel step or touchpad scroll.
///
/// `Line` comes from notched wheels, `Pixel` from touchpads (logical px).
/// Positive `y` means the wheel moved forward, away from the user.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Vertical component regardless of unit.
    #[inline]
    pub fn vertical(self) -> f32 {
        match self {
            MouseWheelDelta::Line { y, .. } | MouseWheelDelta::Pixel { y, .. } => y,
        }
    }
}

/// Pointer position in logical pixels, top-left origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Button transition, stamped with the last known pointer position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
}

/// Input as the app sees it: no winit types.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// Auto-repeat while held.
        repeat: bool,
    },
    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),
    MouseWheel { delta: MouseWheelDelta },
    PointerLeft,
    Focused(bool),
}
