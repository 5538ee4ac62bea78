// Input manager - turns winit keyboard events into character key input

use super::action::{KeyInput, KeyState};
use super::config::InputConfig;
use log::trace;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Translates keyboard events through the configured bindings
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfig,
}

impl InputManager {
    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&self, event: &KeyEvent) -> Option<KeyInput> {
        // Only process physical key presses
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        self.translate(code, event.state, event.repeat)
    }

    /// Map a key code and press state. Repeats and unbound codes yield nothing.
    pub fn translate(&self, code: KeyCode, state: ElementState, repeat: bool) -> Option<KeyInput> {
        if repeat {
            return None;
        }

        let Some(key) = self.config.get_key(code) else {
            trace!("Unbound key {:?}", code);
            return None;
        };

        let state = match state {
            ElementState::Pressed => KeyState::Down,
            ElementState::Released => KeyState::Up,
        };

        Some(KeyInput { key, state })
    }

    /// Get the binding configuration
    pub fn config(&self) -> &InputConfig {
        &self.config
    }
}
