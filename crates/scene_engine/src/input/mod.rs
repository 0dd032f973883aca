//! Input management system
//!
//! The platform layer feeds raw key and mouse events in; the camera and the
//! demo harness read the per-frame state back out.

use std::collections::HashSet;

/// Input manager
#[derive(Debug, Default)]
pub struct InputManager {
    keys: HashSet<KeyCode>,
    keys_previous: HashSet<KeyCode>,
    mouse_position: Option<(f32, f32)>,
    mouse_delta: (f32, f32),
    relative_mouse_mode: bool,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame: remember the current key state and reset the mouse delta
    pub fn begin_frame(&mut self) {
        self.keys_previous.clone_from(&self.keys);
        self.mouse_delta = (0.0, 0.0);
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys.insert(key);
        } else {
            self.keys.remove(&key);
        }
    }

    /// Handle mouse movement (absolute cursor position in pixels)
    ///
    /// The first reported position only establishes the reference point.
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        if let Some((last_x, last_y)) = self.mouse_position {
            self.mouse_delta.0 += x - last_x;
            self.mouse_delta.1 += y - last_y;
        }
        self.mouse_position = Some((x, y));
    }

    /// Handle relative mouse motion, as reported while the cursor is captured
    pub fn handle_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    /// Capture (or release) the cursor; camera rotation only follows the mouse while captured
    pub fn set_relative_mouse_mode(&mut self, enabled: bool) {
        self.relative_mouse_mode = enabled;
    }

    /// Whether the cursor is captured
    pub const fn relative_mouse_mode(&self) -> bool {
        self.relative_mouse_mode
    }

    /// Whether `key` is held down
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Whether `key` went down during the current frame
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key) && !self.keys_previous.contains(&key)
    }

    /// Whether `key` was released during the current frame
    pub fn is_key_just_released(&self, key: KeyCode) -> bool {
        !self.keys.contains(&key) && self.keys_previous.contains(&key)
    }

    /// Mouse movement accumulated since [`begin_frame`](Self::begin_frame)
    pub const fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// E key
    E,
    /// Q key
    Q,
    /// S key
    S,
    /// W key
    W,
    /// N key
    N,
    /// P key
    P,
    /// L key
    L,
    /// Space key
    Space,
    /// Left shift
    LeftShift,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
}
