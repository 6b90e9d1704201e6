// Window + input polling.
// Visual: a window that shows the composited camera image; mouse and keys drive it.

use air_painter::{Error, FrameBuffer, Point};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the camera feed.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// ESC or Q quits.
    pub fn quit_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape) || self.window.is_key_pressed(Key::Q, KeyRepeat::No)
    }

    /// Mouse position in window pixels; None while the pointer is outside the window.
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Point::new(x as i32, y as i32))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Visual: when pressed, the canvas is wiped.
    pub fn c_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::C, KeyRepeat::No)
    }

    /// Save the painting.
    pub fn s_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }
}
