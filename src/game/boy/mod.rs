// The boy character
//
// - `character`: the boy itself, wiring states, context and state machine
// - `state`: state ids, events, guards and the transition table
// - `states`: Idle, Run, Sleep and AutoRun behaviour
// - `context`: fields shared by all states
// - `tuning`: gameplay constants
// - `sprite_sheet`: sheet layout

pub mod character;
pub mod context;
pub mod sprite_sheet;
pub mod state;
pub mod states;
pub mod tuning;

// Re-export commonly used types
pub use character::Boy;
pub use tuning::BoyTuning;
