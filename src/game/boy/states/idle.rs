// Idle: stand still, fall asleep after a timeout

use crate::engine::fsm::State;
use crate::engine::renderer::{Blit, DrawSurface};
use crate::game::boy::context::BoyContext;
use crate::game::boy::sprite_sheet::SheetRow;
use crate::game::boy::state::Event;

#[derive(Debug, Default)]
pub struct Idle {
    start_time: f64,
}

impl Idle {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State<BoyContext, Event> for Idle {
    fn enter(&mut self, ctx: &mut BoyContext, _event: &Event) {
        ctx.dir = 0;
        self.start_time = ctx.now();
    }

    fn update(&mut self, ctx: &mut BoyContext) -> Option<Event> {
        ctx.advance_frame();

        let elapsed = ctx.now() - self.start_time;
        (elapsed >= ctx.tuning.idle_timeout).then_some(Event::TimeOut)
    }

    fn draw(&self, ctx: &BoyContext, surface: &mut dyn DrawSurface) {
        let src = ctx.sheet.source_rect(SheetRow::idle(ctx.facing), ctx.frame);
        surface.blit(Blit::new(src, ctx.position));
    }
}
