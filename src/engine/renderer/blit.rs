// Blit commands and the drawing surface contract

use glam::Vec2;

/// Axis-aligned rectangle in sprite-sheet pixels
///
/// `x`/`y` address the bottom-left corner, with `y` measured from the bottom
/// of the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Width and height as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// One sprite-sheet region drawn at a screen position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blit {
    /// Region of the sheet to copy
    pub src: Rect,
    /// Center of the destination quad
    pub dest: Vec2,
    /// Destination size (defaults to the source size)
    pub size: Option<Vec2>,
    /// Counter-clockwise rotation in radians
    pub rotation: f32,
}

impl Blit {
    pub fn new(src: Rect, dest: Vec2) -> Self {
        Self {
            src,
            dest,
            size: None,
            rotation: 0.0,
        }
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// Size the quad is drawn at
    pub fn dest_size(&self) -> Vec2 {
        self.size.unwrap_or_else(|| self.src.size())
    }
}

/// Anything that accepts blit commands
pub trait DrawSurface {
    fn blit(&mut self, blit: Blit);
}

/// Recording surface
impl DrawSurface for Vec<Blit> {
    fn blit(&mut self, blit: Blit) {
        self.push(blit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dest_size_defaults_to_source() {
        let blit = Blit::new(Rect::new(0.0, 300.0, 100.0, 100.0), Vec2::new(400.0, 90.0));
        assert_eq!(blit.dest_size(), Vec2::new(100.0, 100.0));
        assert_eq!(blit.rotation, 0.0);
    }

    #[test]
    fn test_with_size_overrides() {
        let blit = Blit::new(Rect::new(0.0, 0.0, 100.0, 100.0), Vec2::ZERO)
            .with_size(Vec2::splat(140.0));
        assert_eq!(blit.dest_size(), Vec2::splat(140.0));
    }

    #[test]
    fn test_vec_records_blits() {
        let mut surface: Vec<Blit> = Vec::new();
        let blit = Blit::new(Rect::new(0.0, 0.0, 1.0, 1.0), Vec2::ONE).with_rotation(1.0);
        surface.blit(blit);
        assert_eq!(surface, vec![blit]);
    }
}
