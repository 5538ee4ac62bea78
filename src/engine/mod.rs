// Engine modules: rendering, input, assets, timing and the state machine

pub mod assets;
pub mod clock;
pub mod fsm;
pub mod game_loop;
pub mod input;
pub mod renderer;
