// Software rasterizer for strokes and shapes.
// Visual: thick lines, rectangles and circles painted straight into a FrameBuffer.
// Preview and commit both go through `Shape::render`, so what you see while
// dragging is exactly what lands on the canvas.

use crate::tools::Tool;
use crate::types::{Color, FrameBuffer, Point};

/// Clamp the inclusive box (x0..=x1, y0..=y1) to the frame. None if nothing is left.
fn clip_box(fb: &FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32) -> Option<(i32, i32, i32, i32)> {
    if fb.width == 0 || fb.height == 0 {
        return None;
    }
    let x0 = x0.max(0);
    let y0 = y0.max(0);
    let x1 = x1.min(fb.width as i32 - 1);
    let y1 = y1.min(fb.height as i32 - 1);
    if x0 > x1 || y0 > y1 { None } else { Some((x0, y0, x1, y1)) }
}

/// Draw a thin line between a and b using Bresenham.
/// Visual: a straight 1-pixel line.
pub fn draw_line_thin(fb: &mut FrameBuffer, a: Point, b: Point, color: Color) {
    let (mut x0, mut y0, x1, y1) = (a.x, a.y, b.x, b.y);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        fb.put(x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Squared distance from pixel (px,py) to the segment a-b.
#[inline]
fn dist2_to_segment(px: f32, py: f32, a: Point, b: Point) -> f32 {
    let (ax, ay) = (a.x as f32, a.y as f32);
    let (bx, by) = (b.x as f32, b.y as f32);
    let (vx, vy) = (bx - ax, by - ay);
    let len2 = vx * vx + vy * vy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((px - ax) * vx + (py - ay) * vy) / len2).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + vx * t, ay + vy * t);
    (px - cx) * (px - cx) + (py - cy) * (py - cy)
}

/// Draw a line `width` pixels thick with round caps.
/// Visual: a brush stroke segment; a zero-length segment is a round dot.
pub fn draw_line(fb: &mut FrameBuffer, a: Point, b: Point, width: i32, color: Color) {
    if width <= 1 {
        draw_line_thin(fb, a, b, color);
        return;
    }
    let half = width as f32 / 2.0;
    let reach = half.ceil() as i32;
    let Some((x0, y0, x1, y1)) = clip_box(
        fb,
        a.x.min(b.x) - reach,
        a.y.min(b.y) - reach,
        a.x.max(b.x) + reach,
        a.y.max(b.y) + reach,
    ) else {
        return;
    };
    let half2 = half * half;
    for y in y0..=y1 {
        for x in x0..=x1 {
            if dist2_to_segment(x as f32, y as f32, a, b) <= half2 {
                fb.put(x, y, color);
            }
        }
    }
}

/// Solid axis-aligned rectangle with a and b as opposite corners (inclusive).
pub fn fill_rect(fb: &mut FrameBuffer, a: Point, b: Point, color: Color) {
    let Some((x0, y0, x1, y1)) = clip_box(fb, a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    else {
        return;
    };
    for y in y0..=y1 {
        let row = y as usize * fb.width;
        fb.pixels[row + x0 as usize..=row + x1 as usize].fill(color.packed());
    }
}

/// Rectangle outline: the four edges drawn as thick lines.
pub fn draw_rect(fb: &mut FrameBuffer, a: Point, b: Point, width: i32, color: Color) {
    let tr = Point::new(b.x, a.y);
    let bl = Point::new(a.x, b.y);
    draw_line(fb, a, tr, width, color);
    draw_line(fb, tr, b, width, color);
    draw_line(fb, b, bl, width, color);
    draw_line(fb, bl, a, width, color);
}

/// Circle around `center`. Filled paints every pixel within `radius`;
/// outlined paints a ring `width` pixels thick centered on `radius`.
pub fn draw_circle(fb: &mut FrameBuffer, center: Point, radius: i32, width: i32, filled: bool, color: Color) {
    let half = if filled { 0.0 } else { (width.max(1) as f32) / 2.0 };
    let reach = radius + half.ceil() as i32;
    let Some((x0, y0, x1, y1)) =
        clip_box(fb, center.x - reach, center.y - reach, center.x + reach, center.y + reach)
    else {
        return;
    };
    let r = radius as f32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = (x - center.x) as f32;
            let dy = (y - center.y) as f32;
            let d = (dx * dx + dy * dy).sqrt();
            let inside = if filled { d <= r } else { (d - r).abs() <= half };
            if inside {
                fb.put(x, y, color);
            }
        }
    }
}

/// Geometry of a TwoPoint tool for one (start, end) anchor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Line { from: Point, to: Point },
    Rect { a: Point, b: Point, filled: bool },
    Circle { center: Point, radius: i32, filled: bool },
}

impl Shape {
    /// Shape for `tool` anchored at `start` and `end`; None for freehand tools.
    /// Circles are centered on `start` with radius |end - start|.
    pub fn from_anchors(tool: Tool, start: Point, end: Point) -> Option<Shape> {
        let radius = || start.distance(end).round() as i32;
        match tool {
            Tool::Brush | Tool::Eraser => None,
            Tool::Line => Some(Shape::Line { from: start, to: end }),
            Tool::Rectangle => Some(Shape::Rect { a: start, b: end, filled: false }),
            Tool::FilledRectangle => Some(Shape::Rect { a: start, b: end, filled: true }),
            Tool::Circle => Some(Shape::Circle { center: start, radius: radius(), filled: false }),
            Tool::FilledCircle => Some(Shape::Circle { center: start, radius: radius(), filled: true }),
        }
    }

    pub fn render(&self, fb: &mut FrameBuffer, color: Color, width: i32) {
        match *self {
            Shape::Line { from, to } => draw_line(fb, from, to, width, color),
            Shape::Rect { a, b, filled: true } => fill_rect(fb, a, b, color),
            Shape::Rect { a, b, filled: false } => draw_rect(fb, a, b, width, color),
            Shape::Circle { center, radius, filled } => draw_circle(fb, center, radius, width, filled, color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::bgr(0, 0, 255);

    fn painted(fb: &FrameBuffer, x: i32, y: i32) -> bool {
        fb.get(x, y).is_some_and(|c| c != Color::BLACK)
    }

    #[test]
    fn thick_line_covers_its_path_and_width() {
        let mut fb = FrameBuffer::black(100, 50);
        draw_line(&mut fb, Point::new(10, 20), Point::new(60, 20), 10, RED);
        for x in 10..=60 {
            assert!(painted(&fb, x, 20), "gap at x={x}");
        }
        assert!(painted(&fb, 30, 25));
        assert!(!painted(&fb, 30, 26));
        assert!(!painted(&fb, 30, 14));
    }

    #[test]
    fn zero_length_line_is_a_dot() {
        let mut fb = FrameBuffer::black(20, 20);
        draw_line(&mut fb, Point::new(10, 10), Point::new(10, 10), 4, RED);
        assert!(painted(&fb, 10, 10));
        assert!(painted(&fb, 12, 10));
        assert!(!painted(&fb, 13, 10));
    }

    #[test]
    fn shapes_clip_at_frame_edges() {
        let mut fb = FrameBuffer::black(20, 20);
        draw_circle(&mut fb, Point::new(0, 0), 50, 3, false, RED);
        fill_rect(&mut fb, Point::new(-10, -10), Point::new(5, 5), RED);
        assert!(painted(&fb, 0, 0));
        assert!(painted(&fb, 5, 5));
        assert!(!painted(&fb, 6, 6));
    }

    #[test]
    fn outlined_rectangle_leaves_interior_empty() {
        let mut fb = FrameBuffer::black(100, 100);
        draw_rect(&mut fb, Point::new(10, 10), Point::new(80, 60), 4, RED);
        assert!(painted(&fb, 10, 10));
        assert!(painted(&fb, 45, 60));
        assert!(painted(&fb, 80, 35));
        assert!(!painted(&fb, 45, 35));
    }

    #[test]
    fn circle_radius_is_anchor_distance() {
        let shape = Shape::from_anchors(Tool::Circle, Point::new(0, 0), Point::new(30, 40));
        assert_eq!(
            shape,
            Some(Shape::Circle { center: Point::new(0, 0), radius: 50, filled: false })
        );
    }

    #[test]
    fn filled_circle_fills_center() {
        let mut fb = FrameBuffer::black(40, 40);
        let shape = Shape::from_anchors(Tool::FilledCircle, Point::new(20, 20), Point::new(28, 20)).unwrap();
        shape.render(&mut fb, RED, 1);
        assert!(painted(&fb, 20, 20));
        assert!(painted(&fb, 28, 20));
        assert!(!painted(&fb, 29, 20));
    }

    #[test]
    fn freehand_tools_have_no_shape() {
        assert_eq!(Shape::from_anchors(Tool::Brush, Point::new(0, 0), Point::new(1, 1)), None);
        assert_eq!(Shape::from_anchors(Tool::Eraser, Point::new(0, 0), Point::new(1, 1)), None);
    }
}
