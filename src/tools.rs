// Drawing tools and the per-session tool settings.
// Visual: what the toolbar selects, i.e. the ink color, the stroke width and which tool draws.

use serde::{Deserialize, Serialize};

use crate::types::Color;

/// How a tool turns motion into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Commits a segment every frame along the motion path.
    Freehand,
    /// Start anchor + live end anchor, committed once on release.
    TwoPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Brush,
    Eraser,
    Line,
    Rectangle,
    FilledRectangle,
    Circle,
    FilledCircle,
}

impl Tool {
    /// Toolbar order.
    pub const ALL: [Tool; 7] = [
        Tool::Brush,
        Tool::Eraser,
        Tool::Line,
        Tool::Rectangle,
        Tool::FilledRectangle,
        Tool::Circle,
        Tool::FilledCircle,
    ];

    pub fn kind(self) -> ToolKind {
        match self {
            Tool::Brush | Tool::Eraser => ToolKind::Freehand,
            Tool::Line
            | Tool::Rectangle
            | Tool::FilledRectangle
            | Tool::Circle
            | Tool::FilledCircle => ToolKind::TwoPoint,
        }
    }

    pub fn is_two_point(self) -> bool {
        self.kind() == ToolKind::TwoPoint
    }

    /// Short upper-case label for the toolbar and HUD font.
    pub fn label(self) -> &'static str {
        match self {
            Tool::Brush => "BRUSH",
            Tool::Eraser => "ERASER",
            Tool::Line => "LINE",
            Tool::Rectangle => "RECT",
            Tool::FilledRectangle => "FILL RECT",
            Tool::Circle => "CIRCLE",
            Tool::FilledCircle => "FILL CIRC",
        }
    }
}

/// How the eraser width is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EraserWidthPolicy {
    /// Eraser keeps its own configured width.
    Independent,
    /// Eraser is twice the current brush width.
    DoubleBrush,
}

/// Default palette, written B,G,R: red, orange, yellow, green, blue, magenta, grey.
pub const PALETTE: [Color; 7] = [
    Color::bgr(0, 0, 255),
    Color::bgr(0, 127, 255),
    Color::bgr(0, 255, 255),
    Color::bgr(0, 255, 0),
    Color::bgr(255, 0, 0),
    Color::bgr(255, 0, 255),
    Color::bgr(150, 150, 150),
];

pub const DEFAULT_WIDTHS: [i32; 5] = [5, 10, 15, 20, 30];

#[derive(Debug, Clone)]
pub struct ToolState {
    tool: Tool,
    color: Color,
    widths: Vec<i32>,
    width_index: usize,
    eraser_width: i32,
    eraser_policy: EraserWidthPolicy,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTHS.to_vec(), 2, 40, EraserWidthPolicy::Independent)
    }
}

impl ToolState {
    /// `widths` is sorted ascending and deduplicated, so stepping up always
    /// means wider. Empty falls back to the default ladder; the index is
    /// clamped into range of the sorted ladder.
    pub fn new(
        mut widths: Vec<i32>,
        width_index: usize,
        eraser_width: i32,
        eraser_policy: EraserWidthPolicy,
    ) -> Self {
        widths.sort_unstable();
        widths.dedup();
        let widths = if widths.is_empty() { DEFAULT_WIDTHS.to_vec() } else { widths };
        let width_index = width_index.min(widths.len() - 1);
        Self {
            tool: Tool::Brush,
            color: PALETTE[0],
            widths,
            width_index,
            eraser_width,
            eraser_policy,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Current stroke width for brush and shapes.
    pub fn width(&self) -> i32 {
        self.widths[self.width_index]
    }

    pub fn eraser_width(&self) -> i32 {
        match self.eraser_policy {
            EraserWidthPolicy::Independent => self.eraser_width,
            EraserWidthPolicy::DoubleBrush => self.width() * 2,
        }
    }

    /// Color and width a freehand segment of `tool` is committed with.
    pub fn pen_for(&self, tool: Tool) -> (Color, i32) {
        match tool {
            Tool::Eraser => (Color::BLACK, self.eraser_width()),
            _ => (self.color, self.width()),
        }
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn select_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Step up the width ladder; stays on the last entry.
    pub fn increase_width(&mut self) {
        if self.width_index + 1 < self.widths.len() {
            self.width_index += 1;
        }
    }

    /// Step down the width ladder; stays on the first entry.
    pub fn decrease_width(&mut self) {
        self.width_index = self.width_index.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_kinds() {
        assert_eq!(Tool::Brush.kind(), ToolKind::Freehand);
        assert_eq!(Tool::Eraser.kind(), ToolKind::Freehand);
        for t in [Tool::Line, Tool::Rectangle, Tool::FilledRectangle, Tool::Circle, Tool::FilledCircle] {
            assert!(t.is_two_point(), "{t:?}");
        }
    }

    #[test]
    fn width_is_clamped_at_both_ends() {
        let mut ts = ToolState::default();
        assert_eq!(ts.width(), 15);
        for _ in 0..10 {
            ts.increase_width();
        }
        assert_eq!(ts.width(), 30);
        for _ in 0..10 {
            ts.decrease_width();
        }
        assert_eq!(ts.width(), 5);
    }

    #[test]
    fn unordered_ladder_still_steps_wider() {
        let mut ts = ToolState::new(vec![20, 5, 10, 5], 0, 40, EraserWidthPolicy::Independent);
        assert_eq!(ts.width(), 5);
        ts.increase_width();
        assert_eq!(ts.width(), 10);
        ts.increase_width();
        assert_eq!(ts.width(), 20);
        ts.increase_width();
        assert_eq!(ts.width(), 20);
    }

    #[test]
    fn empty_ladder_uses_defaults() {
        let ts = ToolState::new(Vec::new(), 9, 40, EraserWidthPolicy::Independent);
        assert_eq!(ts.width(), 30);
    }

    #[test]
    fn eraser_width_independent_by_default() {
        let mut ts = ToolState::default();
        ts.increase_width();
        assert_eq!(ts.eraser_width(), 40);
    }

    #[test]
    fn eraser_width_can_follow_brush() {
        let mut ts = ToolState::new(DEFAULT_WIDTHS.to_vec(), 2, 40, EraserWidthPolicy::DoubleBrush);
        assert_eq!(ts.eraser_width(), 30);
        ts.increase_width();
        assert_eq!(ts.eraser_width(), 40);
    }

    #[test]
    fn eraser_pen_is_black() {
        let mut ts = ToolState::default();
        ts.select_tool(Tool::Eraser);
        assert_eq!(ts.pen_for(Tool::Eraser), (Color::BLACK, 40));
        ts.select_color(PALETTE[3]);
        assert_eq!(ts.pen_for(Tool::Brush), (PALETTE[3], 15));
    }
}
