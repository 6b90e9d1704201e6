// Core value types shared by the drawing engine and the window glue.

use std::ops::{Add, Sub};

/// Integer pixel position in frame coordinates (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other` in pixels.
    pub fn distance(self, other: Point) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// One 3-channel pixel value, stored packed as 0x00RRGGBB (what minifb wants).
/// Palettes are written in B,G,R order, hence the `bgr` constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0);
    pub const WHITE: Color = Color(0x00_FF_FF_FF);

    pub const fn bgr(b: u8, g: u8, r: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn from_packed(px: u32) -> Self {
        Color(px & 0x00_FF_FF_FF)
    }

    #[inline]
    pub const fn packed(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

/// A width x height raster of packed 0x00RRGGBB pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// All-black raster ("nothing painted" / placeholder video).
    pub fn black(width: usize, height: usize) -> Self {
        Self::filled(width, height, Color::BLACK)
    }

    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self { width, height, pixels: vec![color.packed(); width * height] }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Pixel at (x,y), or None when outside the frame.
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if !self.contains(x, y) {
            return None;
        }
        Some(Color::from_packed(self.pixels[y as usize * self.width + x as usize]))
    }

    /// Write one pixel; out-of-bounds writes are dropped.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: Color) {
        if !self.contains(x, y) {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.pixels[idx] = color.packed();
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.packed());
    }

    pub fn same_size(&self, other: &FrameBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }
}
