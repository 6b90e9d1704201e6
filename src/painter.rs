// Gesture-driven drawing state machine, fed once per frame with the smoothed
// fingertip, the pinch flag and whether the point sits in the toolbar band.
// Visual: brush and eraser leave ink every pinched frame; shapes follow the
// finger as a preview and land on the canvas when the pinch opens.

use log::debug;

use crate::canvas::{Canvas, PreviewLayer};
use crate::raster::Shape;
use crate::tools::{Tool, ToolKind, ToolState};
use crate::types::{FrameBuffer, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    /// First pinched frame; the start anchor was just latched.
    Engaging,
    Drawing,
}

/// What a single `step` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No pinch: the point is only a cursor.
    Moving,
    /// Point is in the toolbar band; drawing is suspended.
    Toolbar,
    Engaged,
    SegmentCommitted,
    Previewed,
    ShapeCommitted,
    StrokeEnded,
}

/// The in-progress interaction, present whenever the state is not Idle.
#[derive(Debug, Clone, Copy)]
struct Engagement {
    tool: Tool,
    start: Point,
    /// Last point seen outside the toolbar band; the TwoPoint end anchor.
    last: Point,
    /// Freehand stroke cursor; None until the first point of the stroke.
    cursor: Option<Point>,
}

pub struct DrawingStateMachine {
    canvas: Canvas,
    state: GestureState,
    engagement: Option<Engagement>,
    preview: Option<PreviewLayer>,
}

impl DrawingStateMachine {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            state: GestureState::Idle,
            engagement: None,
            preview: None,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The preview built this frame, if a TwoPoint shape is being dragged.
    pub fn preview(&self) -> Option<&PreviewLayer> {
        self.preview.as_ref()
    }

    /// Start anchor of the current interaction.
    pub fn start(&self) -> Option<Point> {
        self.engagement.map(|e| e.start)
    }

    /// Freehand stroke cursor; None whenever no stroke is in progress.
    pub fn stroke_cursor(&self) -> Option<Point> {
        self.engagement.and_then(|e| e.cursor)
    }

    /// Raster the compositor should show this frame.
    pub fn display_layer(&self) -> &FrameBuffer {
        match &self.preview {
            Some(preview) => preview.raster(),
            None => self.canvas.raster(),
        }
    }

    /// Advance one frame.
    pub fn step(&mut self, tools: &ToolState, point: Point, pinch: bool, in_toolbar: bool) -> StepOutcome {
        // The preview lives for exactly one frame.
        self.preview = None;

        if in_toolbar {
            if self.state != GestureState::Idle {
                debug!("pointer entered toolbar band, forcing idle");
                self.finish(tools);
            }
            return StepOutcome::Toolbar;
        }

        match (self.state, pinch) {
            (GestureState::Idle, false) => StepOutcome::Moving,
            (GestureState::Idle, true) => self.engage(tools, point),
            (GestureState::Engaging | GestureState::Drawing, true) => {
                self.state = GestureState::Drawing;
                self.advance(tools, point)
            }
            (GestureState::Engaging | GestureState::Drawing, false) => {
                if let Some(e) = self.engagement.as_mut() {
                    e.last = point;
                }
                self.finish(tools)
            }
        }
    }

    /// End any interaction as if the pinch was released at the last in-canvas point.
    /// Used when the hand disappears from the frame.
    pub fn release(&mut self, tools: &ToolState) -> Option<StepOutcome> {
        self.preview = None;
        if self.state == GestureState::Idle {
            return None;
        }
        Some(self.finish(tools))
    }

    /// Wipe the canvas. Any in-progress stroke keeps going on the blank canvas.
    pub fn clear_canvas(&mut self) {
        self.canvas.clear();
        self.preview = None;
    }

    fn engage(&mut self, tools: &ToolState, point: Point) -> StepOutcome {
        let tool = tools.tool();
        debug!("engage {tool:?} at ({}, {})", point.x, point.y);
        let cursor = match tool.kind() {
            ToolKind::Freehand => Some(point),
            ToolKind::TwoPoint => None,
        };
        self.engagement = Some(Engagement { tool, start: point, last: point, cursor });
        self.state = GestureState::Engaging;
        if tool.is_two_point() {
            self.build_preview(tools, tool, point, point);
        }
        StepOutcome::Engaged
    }

    fn advance(&mut self, tools: &ToolState, point: Point) -> StepOutcome {
        let Some(mut e) = self.engagement else {
            // Drawing without an engagement can't happen; treat the frame as a fresh engage.
            return self.engage(tools, point);
        };
        e.last = point;
        let from = match e.tool.kind() {
            ToolKind::Freehand => e.cursor.replace(point),
            ToolKind::TwoPoint => None,
        };
        self.engagement = Some(e);

        match (e.tool.kind(), from) {
            (ToolKind::Freehand, Some(from)) => {
                let (color, width) = tools.pen_for(e.tool);
                self.canvas.commit_segment(from, point, color, width);
                StepOutcome::SegmentCommitted
            }
            (ToolKind::Freehand, None) => StepOutcome::Engaged,
            (ToolKind::TwoPoint, _) => {
                self.build_preview(tools, e.tool, e.start, point);
                StepOutcome::Previewed
            }
        }
    }

    fn build_preview(&mut self, tools: &ToolState, tool: Tool, start: Point, end: Point) {
        if let Some(shape) = Shape::from_anchors(tool, start, end) {
            self.preview = Some(self.canvas.preview_with(&shape, tools.color(), tools.width()));
        }
    }

    fn finish(&mut self, tools: &ToolState) -> StepOutcome {
        self.state = GestureState::Idle;
        self.preview = None;
        let Some(e) = self.engagement.take() else {
            return StepOutcome::StrokeEnded;
        };
        match Shape::from_anchors(e.tool, e.start, e.last) {
            Some(shape) => {
                debug!("commit {:?} {:?} -> {:?}", e.tool, e.start, e.last);
                self.canvas.commit_shape(&shape, tools.color(), tools.width());
                StepOutcome::ShapeCommitted
            }
            None => {
                debug!("end {:?} stroke", e.tool);
                StepOutcome::StrokeEnded
            }
        }
    }
}
