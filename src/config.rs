// Runtime configuration. Every field has a default, so a missing or partial
// `air_painter.toml` is fine. The defaults match a 1280x720 webcam.
// Visual: nothing on screen; a bad file only logs a warning and the defaults apply.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::tools::EraserWidthPolicy;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "air_painter.toml";

/// Frame width the pinch threshold reference value was tuned for.
pub const REFERENCE_FRAME_WIDTH: u32 = 1280;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainterConfig {
    /// Camera device index (0 = default webcam).
    pub camera_index: u32,
    /// Requested capture resolution; the camera may pick something close.
    pub frame_width: u32,
    pub frame_height: u32,

    /// Number of recent fingertip samples averaged by the smoother.
    pub smoothing_window: usize,
    /// Pinch distance in pixels at `REFERENCE_FRAME_WIDTH`.
    pub pinch_threshold_px: f32,
    /// Display-layer luminance above which a pixel counts as painted.
    pub mask_threshold: u8,

    /// Rows `0..toolbar_band_height` belong to the toolbar.
    pub toolbar_band_height: i32,
    pub toolbar_button_height: i32,
    pub toolbar_debounce_ms: u64,

    /// Ordered stroke widths the toolbar steps through.
    pub brush_widths: Vec<i32>,
    pub brush_width_index: usize,
    pub eraser_width: i32,
    pub eraser_policy: EraserWidthPolicy,

    /// Where saved paintings go.
    pub save_dir: String,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            frame_width: 1280,
            frame_height: 720,
            smoothing_window: 5,
            pinch_threshold_px: 40.0,
            mask_threshold: 5,
            toolbar_band_height: 80,
            toolbar_button_height: 60,
            toolbar_debounce_ms: 300,
            brush_widths: vec![5, 10, 15, 20, 30],
            brush_width_index: 2,
            eraser_width: 40,
            eraser_policy: EraserWidthPolicy::Independent,
            save_dir: "paintings".to_string(),
        }
    }
}

impl PainterConfig {
    /// Read a TOML config; falls back to defaults when the file is missing or broken.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<PainterConfig>(&content) {
                Ok(cfg) => {
                    log::info!("Config loaded from {}", path.display());
                    cfg.sanitized()
                }
                Err(e) => {
                    log::warn!("Config file {} is malformed, using defaults: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Pinch threshold scaled to the frame width actually delivered by the camera.
    pub fn pinch_threshold_for_width(&self, width: usize) -> f32 {
        self.pinch_threshold_px * width as f32 / REFERENCE_FRAME_WIDTH as f32
    }

    /// Repair values that would make the engine misbehave (empty ladder, zero window).
    fn sanitized(mut self) -> Self {
        if self.brush_widths.is_empty() {
            log::warn!("brush_widths is empty, restoring defaults");
            self.brush_widths = Self::default().brush_widths;
        }
        self.brush_widths.sort_unstable();
        self.brush_width_index = self.brush_width_index.min(self.brush_widths.len() - 1);
        self.smoothing_window = self.smoothing_window.max(1);
        self.toolbar_band_height = self.toolbar_band_height.max(self.toolbar_button_height);
        self
    }
}
