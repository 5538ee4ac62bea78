// Core helpers shared by engine and game code

pub mod math;
