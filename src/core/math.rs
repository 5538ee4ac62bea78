// Math utilities and helper functions

/// Advance a cyclic counter over `count` values
pub fn cycle(value: u32, count: u32) -> u32 {
    if count == 0 {
        0
    } else {
        (value + 1) % count
    }
}

/// Value that starts at `base` and grows by `rate` per unit of `elapsed`
pub fn ramp(base: f32, rate: f32, elapsed: f32) -> f32 {
    base + rate * elapsed
}
