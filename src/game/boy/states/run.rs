// Run: move while a direction key is held

use crate::engine::fsm::State;
use crate::engine::renderer::{Blit, DrawSurface};
use crate::game::boy::context::{BoyContext, Facing};
use crate::game::boy::sprite_sheet::SheetRow;
use crate::engine::input::Key;
use crate::game::boy::state::Event;

#[derive(Debug, Default)]
pub struct Run;

impl Run {
    pub fn new() -> Self {
        Self
    }
}

impl State<BoyContext, Event> for Run {
    fn enter(&mut self, ctx: &mut BoyContext, event: &Event) {
        // Releasing one arrow means the other is still held
        if event.is_down(Key::Right) || event.is_up(Key::Left) {
            ctx.head(Facing::Right);
        } else if event.is_down(Key::Left) || event.is_up(Key::Right) {
            ctx.head(Facing::Left);
        }
    }

    fn update(&mut self, ctx: &mut BoyContext) -> Option<Event> {
        ctx.advance_frame();
        ctx.position.x += ctx.dir as f32 * ctx.tuning.run_step;
        None
    }

    fn draw(&self, ctx: &BoyContext, surface: &mut dyn DrawSurface) {
        let src = ctx.sheet.source_rect(SheetRow::run(ctx.facing), ctx.frame);
        surface.blit(Blit::new(src, ctx.position));
    }
}
