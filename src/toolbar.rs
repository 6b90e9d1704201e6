// Toolbar band at the top of the frame: layout, hit-testing, click debounce.
// Visual: a row of color swatches, tool names, width -/+, CLEAR and SAVE across
// the top. Pinching over a button fires it at most once per debounce window.

use std::time::{Duration, Instant};

use log::debug;

use crate::hud::{GLYPH_ADVANCE, draw_text_5x7, text_width};
use crate::raster::{draw_rect, fill_rect};
use crate::tools::{PALETTE, Tool, ToolState};
use crate::types::{Color, FrameBuffer, Point};

const MARGIN_X: i32 = 8;
const MARGIN_Y: i32 = 10;
const GAP: i32 = 4;
const COLOR_BUTTON_WIDTH: i32 = 40;
const TOOL_BUTTON_WIDTH: i32 = 84;
const STEP_BUTTON_WIDTH: i32 = 40;
const ACTION_BUTTON_WIDTH: i32 = 80;

const BUTTON_FACE: Color = Color::bgr(60, 60, 60);
const BUTTON_ACTIVE: Color = Color::bgr(40, 140, 40);
const HIGHLIGHT: Color = Color::WHITE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    SelectColor(Color),
    SelectTool(Tool),
    DecreaseWidth,
    IncreaseWidth,
    Clear,
    Save,
}

impl ToolbarAction {
    fn label(self) -> &'static str {
        match self {
            ToolbarAction::SelectColor(_) => "",
            ToolbarAction::SelectTool(tool) => tool.label(),
            ToolbarAction::DecreaseWidth => "-",
            ToolbarAction::IncreaseWidth => "+",
            ToolbarAction::Clear => "CLEAR",
            ToolbarAction::Save => "SAVE",
        }
    }
}

/// One clickable rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub action: ToolbarAction,
}

impl Button {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2, self.y + self.h / 2)
    }
}

pub struct Toolbar {
    band_height: i32,
    buttons: Vec<Button>,
    debounce: Duration,
    last_press: Option<Instant>,
}

/// Buttons left to right with their width on a 1280 wide frame.
fn natural_row() -> Vec<(i32, ToolbarAction)> {
    let mut row = Vec::new();
    for color in PALETTE {
        row.push((COLOR_BUTTON_WIDTH, ToolbarAction::SelectColor(color)));
    }
    for tool in Tool::ALL {
        row.push((TOOL_BUTTON_WIDTH, ToolbarAction::SelectTool(tool)));
    }
    row.push((STEP_BUTTON_WIDTH, ToolbarAction::DecreaseWidth));
    row.push((STEP_BUTTON_WIDTH, ToolbarAction::IncreaseWidth));
    row.push((ACTION_BUTTON_WIDTH, ToolbarAction::Clear));
    row.push((ACTION_BUTTON_WIDTH, ToolbarAction::Save));
    row
}

/// Longest prefix of `label` that fits in `w` pixels with a 1px border each side.
fn fit_label(label: &str, w: i32) -> &str {
    let max_chars = ((w - 2) / GLYPH_ADVANCE).max(0) as usize;
    match label.char_indices().nth(max_chars) {
        Some((cut, _)) => label[..cut].trim_end(),
        None => label,
    }
}

impl Toolbar {
    /// Lay out colors, tools, width steppers, then clear/save, left to right.
    /// On frames narrower than the natural row, widths and gaps shrink in
    /// proportion so the whole row stays inside `frame_width`.
    pub fn new(frame_width: usize, band_height: i32, button_height: i32, debounce: Duration) -> Self {
        let h = button_height.min(band_height - MARGIN_Y).max(1);
        let row = natural_row();
        let natural: i32 = row.iter().map(|(w, _)| w).sum::<i32>() + GAP * (row.len() as i32 - 1);
        let available = (frame_width as i32 - 2 * MARGIN_X).max(1);
        let scale = |v: i32| if natural <= available { v } else { (v * available / natural).max(1) };
        let gap = if natural <= available { GAP } else { GAP * available / natural };

        let mut buttons = Vec::with_capacity(row.len());
        let mut x = MARGIN_X;
        for (w, action) in row {
            let w = scale(w);
            buttons.push(Button { x, y: MARGIN_Y, w, h, action });
            x += w + gap;
        }
        if natural > available {
            debug!("toolbar scaled to {available}px of {natural}px");
        }

        Self { band_height, buttons, debounce, last_press: None }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// True for points in the reserved rows at the top of the frame.
    pub fn in_band(&self, p: Point) -> bool {
        p.y < self.band_height
    }

    /// Button under `p`, ignoring the debounce.
    pub fn hit(&self, p: Point) -> Option<ToolbarAction> {
        self.buttons.iter().find(|b| b.contains(p)).map(|b| b.action)
    }

    /// A press at `p`. Returns the action only if the debounce window since the
    /// last accepted press has elapsed. Presses on empty band space don't arm it.
    pub fn press(&mut self, p: Point, now: Instant) -> Option<ToolbarAction> {
        if let Some(last) = self.last_press {
            if now.saturating_duration_since(last) < self.debounce {
                return None;
            }
        }
        let action = self.hit(p)?;
        self.last_press = Some(now);
        debug!("toolbar press {action:?}");
        Some(action)
    }

    /// Draw the band over `fb`, highlighting the active color and tool.
    pub fn render(&self, fb: &mut FrameBuffer, tools: &ToolState) {
        for b in &self.buttons {
            let a = Point::new(b.x, b.y);
            let z = Point::new(b.x + b.w - 1, b.y + b.h - 1);
            let (face, selected) = match b.action {
                ToolbarAction::SelectColor(c) => (c, c == tools.color()),
                ToolbarAction::SelectTool(t) if t == tools.tool() => (BUTTON_ACTIVE, true),
                _ => (BUTTON_FACE, false),
            };
            fill_rect(fb, a, z, face);
            if selected {
                draw_rect(fb, a, z, 3, HIGHLIGHT);
            }
            let label = fit_label(b.action.label(), b.w);
            if !label.is_empty() {
                let c = b.center();
                draw_text_5x7(fb, c.x - text_width(label) / 2, c.y - 3, label, Color::WHITE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toolbar() -> Toolbar {
        toolbar_for(1280)
    }

    fn toolbar_for(frame_width: usize) -> Toolbar {
        Toolbar::new(frame_width, 80, 60, Duration::from_millis(300))
    }

    fn button_for(tb: &Toolbar, action: ToolbarAction) -> Point {
        tb.buttons().iter().find(|b| b.action == action).unwrap().center()
    }

    #[test]
    fn band_predicate() {
        let tb = toolbar();
        assert!(tb.in_band(Point::new(500, 0)));
        assert!(tb.in_band(Point::new(500, 79)));
        assert!(!tb.in_band(Point::new(500, 80)));
    }

    #[test]
    fn layout_fits_a_1280_frame() {
        let tb = toolbar();
        let last = tb.buttons().last().unwrap();
        assert_eq!(last.action, ToolbarAction::Save);
        assert!(last.x + last.w <= 1280);
        assert!(tb.buttons().iter().all(|b| b.y + b.h <= 80));
        // Full size, nothing scaled.
        assert_eq!(tb.buttons()[7].w, TOOL_BUTTON_WIDTH);
    }

    #[test]
    fn every_button_fits_inside_the_frame() {
        for width in [640usize, 800, 1280, 1920] {
            let tb = toolbar_for(width);
            assert_eq!(tb.buttons().len(), PALETTE.len() + Tool::ALL.len() + 4);
            for b in tb.buttons() {
                assert!(b.x >= 0 && b.x + b.w <= width as i32, "{:?} at {width}", b.action);
                assert!(b.w > 0);
            }
        }
    }

    #[test]
    fn narrow_frame_buttons_stay_distinct() {
        let tb = toolbar_for(640);
        for pair in tb.buttons().windows(2) {
            assert!(pair[0].x + pair[0].w <= pair[1].x, "{:?} overlaps {:?}", pair[0].action, pair[1].action);
        }
        for b in tb.buttons() {
            assert!(b.center().x < 640);
            assert_eq!(tb.hit(b.center()), Some(b.action));
        }
    }

    #[test]
    fn labels_are_cut_to_the_button() {
        assert_eq!(fit_label("FILL RECT", 84), "FILL RECT");
        assert_eq!(fit_label("FILL RECT", 44), "FILL RE");
        // A cut that lands after a space drops the trailing blank.
        assert_eq!(fit_label("FILL RECT", 32), "FILL");
        assert_eq!(fit_label("SAVE", 1), "");
    }

    #[test]
    fn hit_finds_each_button() {
        let tb = toolbar();
        for b in tb.buttons() {
            assert_eq!(tb.hit(b.center()), Some(b.action));
        }
        assert_eq!(tb.hit(Point::new(1270, 40)), None);
    }

    #[test]
    fn sustained_press_is_debounced() {
        let mut tb = toolbar();
        let t0 = Instant::now();
        let p = button_for(&tb, ToolbarAction::IncreaseWidth);
        assert_eq!(tb.press(p, t0), Some(ToolbarAction::IncreaseWidth));
        assert_eq!(tb.press(p, t0 + Duration::from_millis(100)), None);
        assert_eq!(tb.press(p, t0 + Duration::from_millis(299)), None);
        assert_eq!(tb.press(p, t0 + Duration::from_millis(300)), Some(ToolbarAction::IncreaseWidth));
    }

    #[test]
    fn render_highlights_active_tool() {
        let tb = toolbar();
        let mut fb = FrameBuffer::black(1280, 720);
        let tools = ToolState::default();
        tb.render(&mut fb, &tools);
        let brush = tb.buttons().iter().find(|b| b.action == ToolbarAction::SelectTool(Tool::Brush)).unwrap();
        assert_eq!(fb.get(brush.x, brush.y), Some(HIGHLIGHT));
        let red = tb.buttons()[0];
        assert_eq!(fb.get(red.x + 10, red.y + 10), Some(PALETTE[0]));
        // Below the band nothing is drawn.
        assert_eq!(fb.get(10, 100), Some(Color::BLACK));
    }
}
