// Input handling system
//
// - `action`: character keys, key events and default bindings
// - `config`: key code to key remapping
// - `manager`: translation of winit keyboard events
//
// Keys only become events for the character; what a key means in a given
// state is decided by the state machine's guards.

pub mod action;
pub mod config;
pub mod manager;

// Re-export commonly used types
pub use action::{Key, KeyInput};
pub use manager::InputManager;
