use std::collections::HashMap;

use glam::Vec2;

/// Number of simultaneous touch points tracked.
pub const MAX_TOUCH_POINTS: usize = 10;

/// Key codes the engine reacts to itself (browser `keyCode` values).
pub mod keys {
    pub const DIGIT_1: u32 = 49;
    pub const DIGIT_2: u32 = 50;
}

/// Browser mouse button numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other(u16),
}

impl From<u16> for MouseButton {
    fn from(button: u16) -> Self {
        match button {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            other => MouseButton::Other(other),
        }
    }
}

/// Input event types fed in by the host. Positions are canvas pixels (screen space).
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    MouseMove { x: f32, y: f32 },
    MouseDown { button: MouseButton },
    MouseUp { button: MouseButton },
    /// A full click at the current mouse position.
    MouseClick,
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// `touchstart` / `touchmove`: every finger still on the screen.
    TouchChanged { points: Vec<Vec2> },
    /// `touchend`: the fingers left after the release.
    TouchEnd { points: Vec<Vec2> },
    TouchCancel,
}

/// Host window events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    Resized { width: f32, height: f32 },
    FocusGained,
    FocusLost,
    VisibilityChanged { hidden: bool },
}

/// Multi-touch snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchState {
    /// Slot `i` holds finger `i`. Slots past `fingers_detected` keep stale positions.
    pub positions: [Vec2; MAX_TOUCH_POINTS],
    pub fingers_detected: usize,
    pub screen_is_touched: bool,
}

impl Default for TouchState {
    fn default() -> Self {
        Self {
            positions: [Vec2::ZERO; MAX_TOUCH_POINTS],
            fingers_detected: 0,
            screen_is_touched: false,
        }
    }
}

impl TouchState {
    /// Overwrite the slots with the fingers currently down. Fingers beyond
    /// the slot count are ignored.
    pub fn update(&mut self, points: &[Vec2]) {
        self.fingers_detected = points.len().min(MAX_TOUCH_POINTS);
        self.screen_is_touched = !points.is_empty();
        for (slot, point) in self.positions.iter_mut().zip(points) {
            *slot = *point;
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Position of the finger that was released last, right after an `update`
    /// with the remaining fingers.
    pub fn released_position(&self) -> Vec2 {
        self.positions[self.fingers_detected.min(MAX_TOUCH_POINTS - 1)]
    }
}

/// Current input state, read by behaviours through the context.
#[derive(Debug, Clone, Default)]
pub struct Input {
    mouse_position: Vec2,
    mouse_buttons: HashMap<MouseButton, bool>,
    keys: HashMap<u32, bool>,
    pub touch: TouchState,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor position in canvas pixels.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    pub fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.get(&button).copied().unwrap_or(false)
    }

    pub fn key_down(&self, key_code: u32) -> bool {
        self.keys.get(&key_code).copied().unwrap_or(false)
    }

    /// Record the state part of an event. Hit-testing lives in the listeners.
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::MouseMove { x, y } => self.mouse_position = Vec2::new(*x, *y),
            InputEvent::MouseDown { button } => {
                self.mouse_buttons.insert(*button, true);
            }
            InputEvent::MouseUp { button } => {
                self.mouse_buttons.insert(*button, false);
            }
            InputEvent::KeyDown { key_code } => {
                self.keys.insert(*key_code, true);
            }
            InputEvent::KeyUp { key_code } => {
                self.keys.insert(*key_code, false);
            }
            InputEvent::TouchChanged { points } | InputEvent::TouchEnd { points } => {
                self.touch.update(points)
            }
            InputEvent::TouchCancel => self.touch.cancel(),
            InputEvent::MouseClick => {}
        }
    }
}
