// Sprite sheet layout for the boy

use super::context::Facing;
use crate::engine::renderer::Rect;
use glam::Vec2;

/// Rows of the sheet, bottom to top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetRow {
    RunLeft,
    RunRight,
    IdleLeft,
    IdleRight,
}

impl SheetRow {
    /// Row index counted from the bottom of the sheet
    pub fn index(self) -> u32 {
        match self {
            Self::RunLeft => 0,
            Self::RunRight => 1,
            Self::IdleLeft => 2,
            Self::IdleRight => 3,
        }
    }

    pub fn idle(facing: Facing) -> Self {
        match facing {
            Facing::Left => Self::IdleLeft,
            Facing::Right => Self::IdleRight,
        }
    }

    pub fn run(facing: Facing) -> Self {
        match facing {
            Facing::Left => Self::RunLeft,
            Facing::Right => Self::RunRight,
        }
    }
}

/// Fixed-size cells laid out in rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheet {
    /// Width of each frame in pixels
    pub frame_width: f32,
    /// Height of each frame in pixels
    pub frame_height: f32,
    /// Number of columns in the sprite sheet
    pub columns: u32,
}

impl SpriteSheet {
    pub const fn new(frame_width: f32, frame_height: f32, columns: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            columns,
        }
    }

    /// The boy's sheet: 100x100 cells, 8 per row
    pub const fn standard() -> Self {
        Self::new(100.0, 100.0, 8)
    }

    /// Size of a single cell
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(self.frame_width, self.frame_height)
    }

    /// Source rectangle for `frame` of `row`
    pub fn source_rect(&self, row: SheetRow, frame: u32) -> Rect {
        let col = frame % self.columns.max(1);
        Rect::new(
            col as f32 * self.frame_width,
            row.index() as f32 * self.frame_height,
            self.frame_width,
            self.frame_height,
        )
    }
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_by_facing() {
        assert_eq!(SheetRow::idle(Facing::Right), SheetRow::IdleRight);
        assert_eq!(SheetRow::idle(Facing::Left), SheetRow::IdleLeft);
        assert_eq!(SheetRow::run(Facing::Right), SheetRow::RunRight);
        assert_eq!(SheetRow::run(Facing::Left), SheetRow::RunLeft);
    }

    #[test]
    fn test_source_rect() {
        let sheet = SpriteSheet::standard();

        assert_eq!(
            sheet.source_rect(SheetRow::IdleRight, 0),
            Rect::new(0.0, 300.0, 100.0, 100.0)
        );
        assert_eq!(
            sheet.source_rect(SheetRow::RunLeft, 3),
            Rect::new(300.0, 0.0, 100.0, 100.0)
        );
    }

    #[test]
    fn test_frame_wraps_to_columns() {
        let sheet = SpriteSheet::standard();
        assert_eq!(
            sheet.source_rect(SheetRow::RunRight, 9),
            sheet.source_rect(SheetRow::RunRight, 1)
        );
    }
}
