// Software overlays drawn on top of the composited frame.
// Visual effects provided here:
// 1) A crosshair that follows the tracked fingertip.
// 2) A tiny 5x7 bitmap font for the HUD and toolbar labels.

use crate::raster::draw_line_thin;
use crate::types::{Color, FrameBuffer, Point};

pub const GLYPH_ADVANCE: i32 = 6; // 5 pixels glyph width + 1 pixel spacing

/// Draw a small crosshair centered at `c`.
/// Visual: a "+" shape (with a tiny gap at the center) follows your finger.
pub fn draw_crosshair(fb: &mut FrameBuffer, c: Point, size: i32, color: Color) {
    let (cx, cy) = (c.x, c.y);
    draw_line_thin(fb, Point::new(cx - size, cy), Point::new(cx - 2, cy), color);
    draw_line_thin(fb, Point::new(cx + 2, cy), Point::new(cx + size, cy), color);
    draw_line_thin(fb, Point::new(cx, cy - size), Point::new(cx, cy - 2), color);
    draw_line_thin(fb, Point::new(cx, cy + 2), Point::new(cx, cy + size), color);
    fb.put(cx, cy, color);
}

/* ---------- 5x7 bitmap font (upper-case ASCII, digits, a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Lower-case letters use the upper-case glyph.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '/' => g!(0b00000,0b00001,0b00010,0b00100,0b01000,0b10000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: Color) {
    let Some(rows) = glyph5x7(ch) else { return };
    // Shadow pass offset by (1,1), then the glyph itself.
    for (offset, c) in [(1, Color::BLACK), (0, color)] {
        for (ry, &rowbits) in rows.iter().enumerate() {
            for rx in 0..5i32 {
                if rowbits & (1u8 << (4 - rx)) != 0 {
                    fb.put(x + rx + offset, y + ry as i32 + offset, c);
                }
            }
        }
    }
}

/// Width in pixels `text` occupies when drawn.
pub fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * GLYPH_ADVANCE
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact HUD string appears; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: Color) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += GLYPH_ADVANCE;
    }
}
