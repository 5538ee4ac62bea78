// Character keys and default key bindings

use winit::keyboard::KeyCode;

/// Keys the character reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Starts auto-run
    Trigger,
    /// Wakes a sleeping character
    Space,
}

/// Whether a key went down or came up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Down,
    Up,
}

/// A raw key event, already mapped to a character key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub state: KeyState,
}

impl KeyInput {
    pub fn down(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Down,
        }
    }

    pub fn up(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Up,
        }
    }

    /// Check for a specific key going down
    pub fn is_down(&self, key: Key) -> bool {
        self.key == key && self.state == KeyState::Down
    }

    /// Check for a specific key coming up
    pub fn is_up(&self, key: Key) -> bool {
        self.key == key && self.state == KeyState::Up
    }
}

/// Default keyboard bindings
pub fn default_bindings() -> Vec<(KeyCode, Key)> {
    vec![
        (KeyCode::ArrowLeft, Key::Left),
        (KeyCode::ArrowRight, Key::Right),
        (KeyCode::KeyA, Key::Trigger),
        (KeyCode::Space, Key::Space),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_input_queries() {
        let input = KeyInput::down(Key::Left);
        assert!(input.is_down(Key::Left));
        assert!(!input.is_up(Key::Left));
        assert!(!input.is_down(Key::Right));

        let input = KeyInput::up(Key::Right);
        assert!(input.is_up(Key::Right));
        assert!(!input.is_down(Key::Right));
    }

    #[test]
    fn test_default_bindings_cover_every_key() {
        let bindings = default_bindings();
        for key in [Key::Left, Key::Right, Key::Trigger, Key::Space] {
            assert!(
                bindings.iter().any(|(_, bound)| *bound == key),
                "{:?} has no default binding",
                key
            );
        }
    }

    #[test]
    fn test_no_duplicate_codes_in_defaults() {
        let bindings = default_bindings();
        let mut seen_codes = std::collections::HashSet::new();
        for (code, _) in bindings {
            assert!(seen_codes.insert(code), "Duplicate key code in default bindings");
        }
    }
}
