// Persistent paint raster plus the throwaway preview built from it each frame.
// Visual: black canvas pixels are "nothing painted" and let the camera show through.

use crate::raster::{self, Shape};
use crate::types::{Color, FrameBuffer, Point};

/// Everything committed so far. Pixels change only through the commit methods
/// below or an explicit `clear`.
#[derive(Debug, Clone)]
pub struct Canvas {
    raster: FrameBuffer,
}

impl Canvas {
    /// All-zero canvas of the given frame size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { raster: FrameBuffer::black(width, height) }
    }

    pub fn width(&self) -> usize {
        self.raster.width
    }

    pub fn height(&self) -> usize {
        self.raster.height
    }

    pub fn raster(&self) -> &FrameBuffer {
        &self.raster
    }

    pub fn pixel(&self, p: Point) -> Option<Color> {
        self.raster.get(p.x, p.y)
    }

    /// True if no pixel has ever been committed (or after `clear`).
    pub fn is_blank(&self) -> bool {
        self.raster.pixels.iter().all(|&px| px == 0)
    }

    /// Commit one freehand segment (brush color, or black for the eraser).
    pub fn commit_segment(&mut self, from: Point, to: Point, color: Color, width: i32) {
        raster::draw_line(&mut self.raster, from, to, width, color);
    }

    /// Commit a finished TwoPoint shape.
    pub fn commit_shape(&mut self, shape: &Shape, color: Color, width: i32) {
        shape.render(&mut self.raster, color, width);
    }

    /// Reset every pixel to black.
    pub fn clear(&mut self) {
        self.raster.fill(Color::BLACK);
    }

    /// Fresh preview: a copy of the canvas with `shape` drawn on top.
    pub fn preview_with(&self, shape: &Shape, color: Color, width: i32) -> PreviewLayer {
        let mut raster = self.raster.clone();
        shape.render(&mut raster, color, width);
        PreviewLayer { raster }
    }
}

/// Per-frame copy of the canvas with the in-progress shape on it. Never written back.
#[derive(Debug, Clone)]
pub struct PreviewLayer {
    raster: FrameBuffer,
}

impl PreviewLayer {
    pub fn raster(&self) -> &FrameBuffer {
        &self.raster
    }

    pub fn pixel(&self, p: Point) -> Option<Color> {
        self.raster.get(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Tool;

    const GREEN: Color = Color::bgr(0, 255, 0);

    #[test]
    fn new_canvas_is_blank() {
        let c = Canvas::new(64, 48);
        assert!(c.is_blank());
        assert_eq!((c.width(), c.height()), (64, 48));
    }

    #[test]
    fn preview_does_not_touch_canvas() {
        let c = Canvas::new(64, 48);
        let shape = Shape::from_anchors(Tool::FilledRectangle, Point::new(5, 5), Point::new(20, 20)).unwrap();
        let preview = c.preview_with(&shape, GREEN, 3);
        assert_eq!(preview.pixel(Point::new(10, 10)), Some(GREEN));
        assert!(c.is_blank());
    }

    #[test]
    fn clear_resets_everything() {
        let mut c = Canvas::new(64, 48);
        c.commit_segment(Point::new(0, 0), Point::new(63, 47), GREEN, 5);
        assert!(!c.is_blank());
        c.clear();
        assert!(c.is_blank());
    }
}
