//! Input state management

use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Action names understood by [`InputState::sample`]
pub mod actions {
    pub const FORWARD: &str = "freecam_forward";
    pub const BACKWARD: &str = "freecam_backward";
    pub const LEFT: &str = "freecam_left";
    pub const RIGHT: &str = "freecam_right";
    pub const UP: &str = "freecam_up";
    pub const DOWN: &str = "freecam_down";
    pub const FAST: &str = "freecam_fast";
    pub const LOOK: &str = "freecam_look";
}

/// Movement directions held during a frame, relative to the camera's own axes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Snapshot of everything a per-frame consumer needs from input
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSample {
    pub keys: MoveKeys,
    /// Speed boost modifier held
    pub fast: bool,
    /// Look button held
    pub look_held: bool,
    /// Cursor position, y growing upward. Only differences between
    /// successive samples are meaningful.
    pub cursor: [f32; 2],
    /// Seconds since the previous frame
    pub delta_time: f32,
}

/// Tracks keyboard and mouse input state per frame
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,

    /// Mouse button state (button index -> pressed)
    mouse_buttons_down: HashSet<u32>,

    /// Current cursor position in window pixels
    pub mouse_position: (f64, f64),

    /// Action map: action name -> list of key bindings
    action_map: HashMap<String, Vec<KeyCode>>,

    /// Mouse button action map: action name -> list of mouse button indices
    mouse_button_map: HashMap<String, Vec<u32>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_position: (0.0, 0.0),
            action_map: Self::default_action_map(),
            mouse_button_map: Self::default_mouse_button_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<KeyCode>> {
        let mut map = HashMap::new();
        map.insert(actions::LEFT.into(), vec![KeyCode::KeyA, KeyCode::ArrowLeft]);
        map.insert(actions::RIGHT.into(), vec![KeyCode::KeyD, KeyCode::ArrowRight]);
        map.insert(actions::FORWARD.into(), vec![KeyCode::KeyW, KeyCode::ArrowUp]);
        map.insert(actions::BACKWARD.into(), vec![KeyCode::KeyS, KeyCode::ArrowDown]);
        map.insert(actions::UP.into(), vec![KeyCode::Space, KeyCode::PageUp]);
        map.insert(actions::DOWN.into(), vec![KeyCode::ControlLeft, KeyCode::PageDown]);
        map.insert(actions::FAST.into(), vec![KeyCode::ShiftLeft, KeyCode::ShiftRight]);
        map
    }

    fn default_mouse_button_map() -> HashMap<String, Vec<u32>> {
        let mut map = HashMap::new();
        map.insert(actions::LOOK.into(), vec![1]); // Right mouse button
        map
    }

    /// Bind an action to one or more keys
    pub fn bind_action(&mut self, action: impl Into<String>, keys: Vec<KeyCode>) {
        self.action_map.insert(action.into(), keys);
    }

    /// Bind an action to one or more mouse buttons
    pub fn bind_mouse_action(&mut self, action: impl Into<String>, buttons: Vec<u32>) {
        self.mouse_button_map.insert(action.into(), buttons);
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Process mouse button press
    pub fn process_mouse_button_down(&mut self, button: u32) {
        self.mouse_buttons_down.insert(button);
    }

    /// Process mouse button release
    pub fn process_mouse_button_up(&mut self, button: u32) {
        self.mouse_buttons_down.remove(&button);
    }

    /// Process cursor movement in window pixels
    pub fn process_mouse_move(&mut self, x: f64, y: f64) {
        self.mouse_position = (x, y);
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
    }

    // --- Query methods ---

    /// Is a key currently held down?
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Was a key pressed this frame?
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Is a mouse button currently held?
    pub fn is_mouse_button_down(&self, button: u32) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Is an action currently held? (any bound key or mouse button is down)
    pub fn is_action_pressed(&self, action: &str) -> bool {
        let key_match = self
            .action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_down.contains(k)))
            .unwrap_or(false);
        let mouse_match = self
            .mouse_button_map
            .get(action)
            .map(|btns| btns.iter().any(|b| self.mouse_buttons_down.contains(b)))
            .unwrap_or(false);
        key_match || mouse_match
    }

    /// Build this frame's input snapshot
    pub fn sample(&self, delta_time: f32) -> InputSample {
        let (x, y) = self.mouse_position;
        InputSample {
            keys: MoveKeys {
                forward: self.is_action_pressed(actions::FORWARD),
                backward: self.is_action_pressed(actions::BACKWARD),
                left: self.is_action_pressed(actions::LEFT),
                right: self.is_action_pressed(actions::RIGHT),
                up: self.is_action_pressed(actions::UP),
                down: self.is_action_pressed(actions::DOWN),
            },
            fast: self.is_action_pressed(actions::FAST),
            look_held: self.is_action_pressed(actions::LOOK),
            // Window y grows downward
            cursor: [x as f32, -(y as f32)],
            delta_time,
        }
    }
}
