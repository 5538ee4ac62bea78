// AutoRun: run back and forth on its own, accelerating and growing

use crate::core::math::ramp;
use crate::engine::fsm::State;
use crate::engine::renderer::{Blit, DrawSurface};
use crate::game::boy::context::{BoyContext, Facing};
use crate::game::boy::sprite_sheet::SheetRow;
use crate::game::boy::state::Event;
use crate::game::boy::tuning::BoyTuning;

/// Speed and scale only evolve while this state is active
#[derive(Debug)]
pub struct AutoRun {
    start_time: f64,
    speed: f32,
    scale: f32,
    base_speed: f32,
    base_scale: f32,
}

impl AutoRun {
    pub fn new(tuning: &BoyTuning) -> Self {
        Self {
            start_time: 0.0,
            speed: tuning.auto_run_base_speed,
            scale: tuning.auto_run_base_scale,
            base_speed: tuning.auto_run_base_speed,
            base_scale: tuning.auto_run_base_scale,
        }
    }

    /// Pixels moved per update
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Draw scale relative to a sheet cell
    pub fn scale(&self) -> f32 {
        self.scale
    }

    fn reset(&mut self) {
        self.speed = self.base_speed;
        self.scale = self.base_scale;
    }
}

impl State<BoyContext, Event> for AutoRun {
    fn enter(&mut self, ctx: &mut BoyContext, _event: &Event) {
        ctx.dir = ctx.facing.sign();
        self.start_time = ctx.now();
        self.reset();
    }

    fn exit(&mut self, _ctx: &mut BoyContext, _event: &Event) {
        self.reset();
    }

    fn update(&mut self, ctx: &mut BoyContext) -> Option<Event> {
        ctx.advance_frame();

        let tuning = ctx.tuning;
        let elapsed = ctx.now() - self.start_time;
        let seconds = elapsed as f32;
        self.speed = ramp(tuning.auto_run_base_speed, tuning.auto_run_acceleration, seconds);
        self.scale = ramp(tuning.auto_run_base_scale, tuning.auto_run_growth, seconds);

        ctx.position.x += ctx.dir as f32 * self.speed;

        // Turn around at the edges
        if ctx.position.x <= tuning.min_x {
            ctx.position.x = tuning.min_x;
            ctx.head(Facing::Right);
        } else if ctx.position.x >= tuning.max_x {
            ctx.position.x = tuning.max_x;
            ctx.head(Facing::Left);
        }

        (elapsed >= tuning.auto_run_duration).then_some(Event::AutoRunTimeOut)
    }

    fn draw(&self, ctx: &BoyContext, surface: &mut dyn DrawSurface) {
        let src = ctx.sheet.source_rect(SheetRow::run(ctx.facing), ctx.frame);
        let size = (ctx.sheet.cell_size() * self.scale).floor();
        surface.blit(Blit::new(src, ctx.position).with_size(size));
    }
}
