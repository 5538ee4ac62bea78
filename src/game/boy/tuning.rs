// Boy tuning - every gameplay constant in one place

use glam::Vec2;

/// Movement, timing and animation constants for the boy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoyTuning {
    /// Where the boy appears (sprite center, pixels)
    pub spawn: Vec2,
    /// Frames per animation cycle (sheet columns)
    pub frame_count: u32,

    // Run
    /// Pixels moved per update while running
    pub run_step: f32,

    // Timers (seconds)
    /// Idle time before falling asleep
    pub idle_timeout: f64,
    /// How long auto-run lasts
    pub auto_run_duration: f64,

    // Auto-run
    /// Speed at the start of auto-run (pixels per update)
    pub auto_run_base_speed: f32,
    /// Speed gained per second of auto-run
    pub auto_run_acceleration: f32,
    /// Draw scale at the start of auto-run
    pub auto_run_base_scale: f32,
    /// Scale gained per second of auto-run
    pub auto_run_growth: f32,
    /// Left turnaround point
    pub min_x: f32,
    /// Right turnaround point
    pub max_x: f32,
}

/// The standard tuning
pub const BASE_TUNING: BoyTuning = BoyTuning {
    spawn: Vec2::new(400.0, 90.0),
    frame_count: 8,

    run_step: 5.0,

    idle_timeout: 5.0,
    auto_run_duration: 5.0,

    auto_run_base_speed: 3.0,
    auto_run_acceleration: 4.0,
    auto_run_base_scale: 1.0,
    auto_run_growth: 0.2,
    min_x: 50.0,
    max_x: 750.0,
};

impl Default for BoyTuning {
    fn default() -> Self {
        BASE_TUNING
    }
}

impl BoyTuning {
    /// Same tuning, different spawn point
    pub fn with_spawn(mut self, spawn: Vec2) -> Self {
        self.spawn = spawn;
        self
    }
}
