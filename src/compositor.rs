// Lays the paint layer over the live video.
// Visual: painted (non-black) pixels are opaque paint, everything else is camera.
//
// The mask marks PAINT as foreground. Foreground takes the layer pixel, background
// takes the video pixel; the two sets partition the frame exactly.

use crate::error::Error;
use crate::types::FrameBuffer;

pub const DEFAULT_MASK_THRESHOLD: u8 = 5;

/// Integer Rec.601 luma of a packed 0x00RRGGBB pixel (0..=255).
#[inline]
pub fn luminance(px: u32) -> u8 {
    let r = (px >> 16) & 0xFF;
    let g = (px >> 8) & 0xFF;
    let b = px & 0xFF;
    ((299 * r + 587 * g + 114 * b + 500) / 1000) as u8
}

/// Binary partition of the frame: true = painted, false = video shows through.
pub struct ForegroundMask {
    pub width: usize,
    pub height: usize,
    pub painted: Vec<bool>, // length = width * height
}

impl ForegroundMask {
    /// Threshold the layer's luminance: strictly above `threshold` is painted.
    pub fn from_layer(layer: &FrameBuffer, threshold: u8) -> Self {
        let painted = layer.pixels.iter().map(|&px| luminance(px) > threshold).collect();
        Self { width: layer.width, height: layer.height, painted }
    }

    pub fn count(&self) -> usize {
        self.painted.iter().filter(|&&p| p).count()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    pub mask_threshold: u8,
}

impl Default for Compositor {
    fn default() -> Self {
        Self { mask_threshold: DEFAULT_MASK_THRESHOLD }
    }
}

impl Compositor {
    pub fn new(mask_threshold: u8) -> Self {
        Self { mask_threshold }
    }

    /// Compose into a fresh frame.
    pub fn compose(&self, video: &FrameBuffer, layer: &FrameBuffer) -> Result<FrameBuffer, Error> {
        let mut out = FrameBuffer::black(video.width, video.height);
        self.compose_into(video, layer, &mut out)?;
        Ok(out)
    }

    /// Compose into `out` (reused every frame by the main loop).
    pub fn compose_into(&self, video: &FrameBuffer, layer: &FrameBuffer, out: &mut FrameBuffer) -> Result<(), Error> {
        if !video.same_size(layer) {
            return Err(Error::SizeMismatch(format!(
                "compose: video {}x{} vs layer {}x{}",
                video.width, video.height, layer.width, layer.height
            )));
        }
        if !video.same_size(out) {
            return Err(Error::SizeMismatch("compose: output buffer".into()));
        }

        let mask = ForegroundMask::from_layer(layer, self.mask_threshold);
        for (i, dst) in out.pixels.iter_mut().enumerate() {
            *dst = if mask.painted[i] { layer.pixels[i] } else { video.pixels[i] };
        }
        Ok(())
    }
}
