// Sleep: lie down until a key wakes the boy

use std::f32::consts::FRAC_PI_2;

use crate::engine::fsm::State;
use crate::engine::renderer::{Blit, DrawSurface};
use crate::game::boy::context::{BoyContext, Facing};
use crate::game::boy::sprite_sheet::SheetRow;
use crate::game::boy::state::Event;
use glam::Vec2;

/// Shift that puts the rotated sprite on the ground
const LYING_OFFSET: f32 = 25.0;

#[derive(Debug, Default)]
pub struct Sleep;

impl Sleep {
    pub fn new() -> Self {
        Self
    }
}

impl State<BoyContext, Event> for Sleep {
    fn enter(&mut self, ctx: &mut BoyContext, _event: &Event) {
        ctx.dir = 0;
    }

    fn update(&mut self, ctx: &mut BoyContext) -> Option<Event> {
        ctx.advance_frame();
        None
    }

    fn draw(&self, ctx: &BoyContext, surface: &mut dyn DrawSurface) {
        let src = ctx.sheet.source_rect(SheetRow::idle(ctx.facing), ctx.frame);
        let (rotation, dest) = match ctx.facing {
            Facing::Right => (
                FRAC_PI_2,
                ctx.position + Vec2::new(-LYING_OFFSET, -LYING_OFFSET),
            ),
            Facing::Left => (
                -FRAC_PI_2,
                ctx.position + Vec2::new(LYING_OFFSET, -LYING_OFFSET),
            ),
        };

        surface.blit(
            Blit::new(src, dest)
                .with_size(ctx.sheet.cell_size())
                .with_rotation(rotation),
        );
    }
}
