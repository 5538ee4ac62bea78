// Time sources for gameplay timers

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic time source, in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Simulated time, advanced explicitly by the game loop
///
/// Clones share the same underlying time, so the loop can hold one handle
/// and gameplay code another.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    time: Rc<Cell<f64>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `dt` seconds. Negative steps are ignored.
    pub fn advance(&self, dt: f64) {
        if dt > 0.0 {
            self.time.set(self.time.get() + dt);
        }
    }
}

impl Clock for SimClock {
    fn now(&self) -> f64 {
        self.time.get()
    }
}

/// Wall-clock time since construction
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}
