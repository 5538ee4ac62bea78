// Fields shared by every boy state

use super::sprite_sheet::SpriteSheet;
use super::tuning::BoyTuning;
use crate::core::math;
use crate::engine::clock::Clock;
use glam::Vec2;

/// Which way the sprite looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, 1 for right
    pub fn sign(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// The boy's shared, mutable fields
///
/// Handed by reference to whichever state is active; states never hold on to it.
pub struct BoyContext {
    /// Sprite center in canvas pixels
    pub position: Vec2,
    /// Persisted visual orientation
    pub facing: Facing,
    /// Movement direction this frame: -1, 0 or 1
    pub dir: i32,
    /// Animation column
    pub frame: u32,
    pub tuning: BoyTuning,
    pub sheet: SpriteSheet,
    clock: Box<dyn Clock>,
}

impl BoyContext {
    pub fn new(tuning: BoyTuning, clock: Box<dyn Clock>) -> Self {
        Self {
            position: tuning.spawn,
            facing: Facing::Right,
            dir: 0,
            frame: 0,
            tuning,
            sheet: SpriteSheet::standard(),
            clock,
        }
    }

    /// Current time from the boy's clock
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Step the animation column
    pub fn advance_frame(&mut self) {
        self.frame = math::cycle(self.frame, self.tuning.frame_count);
    }

    /// Face and move the same way
    pub fn head(&mut self, facing: Facing) {
        self.facing = facing;
        self.dir = facing.sign();
    }
}
