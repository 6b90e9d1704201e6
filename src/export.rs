// Saves the canvas as a PNG.
// Visual: nothing on screen; a new `painting_<time>.png` appears in the save directory.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{ImageBuffer, Rgb, RgbImage};

use crate::error::Error;
use crate::types::{Color, FrameBuffer};

/// Convert a packed 0x00RRGGBB raster to an RGB image.
pub fn to_rgb_image(fb: &FrameBuffer) -> RgbImage {
    ImageBuffer::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let c = Color::from_packed(fb.pixels[y as usize * fb.width + x as usize]);
        Rgb([c.r(), c.g(), c.b()])
    })
}

/// File name for a painting saved at `when`, e.g. `painting_1718000000123.png`.
pub fn painting_file_name(when: SystemTime) -> String {
    let millis = when.duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or(0);
    format!("painting_{millis}.png")
}

/// Write `canvas` into `dir` (created if needed) and return the file path.
pub fn save_painting(canvas: &FrameBuffer, dir: &Path) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::Export(format!("create {}: {e}", dir.display())))?;
    let path = dir.join(painting_file_name(SystemTime::now()));
    to_rgb_image(canvas)
        .save(&path)
        .map_err(|e| Error::Export(format!("write {}: {e}", path.display())))?;
    log::info!("Painting saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn file_name_uses_millis() {
        let t = UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);
        assert_eq!(painting_file_name(t), "painting_1700000000123.png");
    }

    #[test]
    fn saved_png_round_trips_pixels() {
        let mut fb = FrameBuffer::black(16, 8);
        fb.put(3, 4, Color::bgr(0, 127, 255));
        let dir = std::env::temp_dir().join(format!("air_painter_export_{}", std::process::id()));

        let path = save_painting(&fb, &dir).unwrap();
        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (16, 8));
        assert_eq!(img.get_pixel(3, 4), &Rgb([255, 127, 0]));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
