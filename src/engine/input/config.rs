// Key binding configuration and remapping

use super::action::{default_bindings, Key};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Maps physical key codes to character keys
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Mapping from key codes to keys
    bindings: HashMap<KeyCode, Key>,

    /// Reverse mapping for quick lookups (key -> all codes)
    key_to_codes: HashMap<Key, Vec<KeyCode>>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            key_to_codes: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(KeyCode, Key)>) -> Self {
        let mut config = Self::new();
        for (code, key) in bindings {
            config.bind(code, key);
        }
        config
    }

    /// Bind a key code to a key
    pub fn bind(&mut self, code: KeyCode, key: Key) {
        // Remove any existing binding for this code
        self.unbind_code(code);

        self.bindings.insert(code, key);
        self.key_to_codes.entry(key).or_default().push(code);
    }

    /// Unbind a key code
    pub fn unbind_code(&mut self, code: KeyCode) {
        if let Some(key) = self.bindings.remove(&code) {
            if let Some(codes) = self.key_to_codes.get_mut(&key) {
                codes.retain(|c| *c != code);
                if codes.is_empty() {
                    self.key_to_codes.remove(&key);
                }
            }
        }
    }

    /// Get the key bound to a code
    pub fn get_key(&self, code: KeyCode) -> Option<Key> {
        self.bindings.get(&code).copied()
    }

    /// Get all codes bound to a key
    pub fn get_codes(&self, key: Key) -> Vec<KeyCode> {
        self.key_to_codes.get(&key).cloned().unwrap_or_default()
    }

}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}
