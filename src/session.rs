// One painting session: everything the frame loop mutates, in one place.
// Per frame: raw tracker sample -> pinch classification (raw space) ->
// smoothing -> toolbar routing -> drawing state machine.
// Visual: compositing shows the live shape preview while one is dragged,
// otherwise the committed canvas.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::canvas::Canvas;
use crate::compositor::Compositor;
use crate::config::PainterConfig;
use crate::error::Error;
use crate::gesture::{GestureClassifier, HandInput};
use crate::painter::{DrawingStateMachine, GestureState, StepOutcome};
use crate::smoothing::PointSmoother;
use crate::toolbar::{Toolbar, ToolbarAction};
use crate::tools::ToolState;
use crate::types::{FrameBuffer, Point};

/// What happened during one `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Smoothed fingertip, None when no hand was tracked.
    pub cursor: Option<Point>,
    pub pinch: bool,
    pub outcome: Option<StepOutcome>,
    pub toolbar_action: Option<ToolbarAction>,
    /// The toolbar asked for the canvas to be saved; the caller does the I/O.
    pub save_requested: bool,
}

pub struct PaintSession {
    smoother: PointSmoother,
    classifier: GestureClassifier,
    toolbar: Toolbar,
    tools: ToolState,
    machine: DrawingStateMachine,
    compositor: Compositor,
}

impl PaintSession {
    /// Session for frames of `width` x `height` pixels.
    pub fn new(config: &PainterConfig, width: usize, height: usize) -> Self {
        Self {
            smoother: PointSmoother::new(config.smoothing_window),
            classifier: GestureClassifier::new(config.pinch_threshold_for_width(width)),
            toolbar: Toolbar::new(
                width,
                config.toolbar_band_height,
                config.toolbar_button_height,
                Duration::from_millis(config.toolbar_debounce_ms),
            ),
            tools: ToolState::new(
                config.brush_widths.clone(),
                config.brush_width_index,
                config.eraser_width,
                config.eraser_policy,
            ),
            machine: DrawingStateMachine::new(width, height),
            compositor: Compositor::new(config.mask_threshold),
        }
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolState {
        &mut self.tools
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn canvas(&self) -> &Canvas {
        self.machine.canvas()
    }

    pub fn gesture_state(&self) -> GestureState {
        self.machine.state()
    }

    /// Run one frame. `None` means the tracker saw no hand this frame.
    pub fn step(&mut self, input: Option<HandInput>, now: Instant) -> FrameReport {
        let Some(hand) = input else {
            self.smoother.reset();
            let outcome = self.machine.release(&self.tools);
            if outcome.is_some() {
                debug!("hand lost, interaction ended");
            }
            return FrameReport { outcome, ..FrameReport::default() };
        };

        let pinch = self.classifier.is_pinch(&hand);
        let cursor = self.smoother.observe(hand.index_tip);
        let in_band = self.toolbar.in_band(cursor);

        let outcome = self.machine.step(&self.tools, cursor, pinch, in_band);

        let mut report = FrameReport {
            cursor: Some(cursor),
            pinch,
            outcome: Some(outcome),
            ..FrameReport::default()
        };
        if in_band && pinch {
            if let Some(action) = self.toolbar.press(cursor, now) {
                report.toolbar_action = Some(action);
                report.save_requested = self.apply(action);
            }
        }
        report
    }

    /// Apply a toolbar action. Returns true when it asks for a save.
    pub fn apply(&mut self, action: ToolbarAction) -> bool {
        match action {
            ToolbarAction::SelectColor(c) => self.tools.select_color(c),
            ToolbarAction::SelectTool(t) => self.tools.select_tool(t),
            ToolbarAction::DecreaseWidth => self.tools.decrease_width(),
            ToolbarAction::IncreaseWidth => self.tools.increase_width(),
            ToolbarAction::Clear => self.clear(),
            ToolbarAction::Save => return true,
        }
        false
    }

    /// Wipe every committed stroke.
    pub fn clear(&mut self) {
        self.machine.clear_canvas();
        info!("Canvas cleared");
    }

    /// Raster on display this frame: the preview while a shape is dragged, else the canvas.
    pub fn display_layer(&self) -> &FrameBuffer {
        self.machine.display_layer()
    }

    pub fn compose(&self, video: &FrameBuffer) -> Result<FrameBuffer, Error> {
        self.compositor.compose(video, self.display_layer())
    }

    pub fn compose_into(&self, video: &FrameBuffer, out: &mut FrameBuffer) -> Result<(), Error> {
        self.compositor.compose_into(video, self.display_layer(), out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{PALETTE, Tool};

    fn session() -> PaintSession {
        PaintSession::new(&PainterConfig::default(), 1280, 720)
    }

    fn pinched(p: Point) -> Option<HandInput> {
        Some(HandInput::new(p, p + Point::new(10, 0)))
    }

    fn open(p: Point) -> Option<HandInput> {
        Some(HandInput::new(p, p + Point::new(100, 0)))
    }

    #[test]
    fn pinch_is_judged_on_raw_tips() {
        let mut s = session();
        let r = s.step(pinched(Point::new(400, 400)), Instant::now());
        assert!(r.pinch);
        assert_eq!(r.outcome, Some(StepOutcome::Engaged));
        let r = s.step(open(Point::new(400, 400)), Instant::now());
        assert!(!r.pinch);
    }

    #[test]
    fn toolbar_press_changes_color_once_per_window() {
        let mut s = session();
        let green = PALETTE[3];
        let button = s
            .toolbar()
            .buttons()
            .iter()
            .find(|b| b.action == ToolbarAction::SelectColor(green))
            .unwrap()
            .center();
        let t0 = Instant::now();
        // Fill the smoother so the cursor sits on the button.
        for i in 0..5 {
            s.step(open(button), t0 + Duration::from_millis(i));
        }
        let r = s.step(pinched(button), t0 + Duration::from_millis(10));
        assert_eq!(r.toolbar_action, Some(ToolbarAction::SelectColor(green)));
        assert_eq!(s.tools().color(), green);

        s.tools_mut().select_color(PALETTE[0]);
        let r = s.step(pinched(button), t0 + Duration::from_millis(50));
        assert_eq!(r.toolbar_action, None);
        assert_eq!(s.tools().color(), PALETTE[0]);
    }

    #[test]
    fn small_camera_frame_keeps_every_button_reachable() {
        let mut s = PaintSession::new(&PainterConfig::default(), 640, 480);
        let buttons = s.toolbar().buttons().to_vec();
        let outside: Vec<_> = buttons.iter().filter(|b| b.x + b.w > 640).map(|b| b.action).collect();
        assert!(outside.is_empty(), "{outside:?}");

        // Pinch on the circle button, then on save, a debounce window apart.
        let t0 = Instant::now();
        let circle = buttons.iter().find(|b| b.action == ToolbarAction::SelectTool(Tool::Circle)).unwrap();
        s.step(None, t0);
        let r = s.step(pinched(circle.center()), t0);
        assert_eq!(r.toolbar_action, Some(ToolbarAction::SelectTool(Tool::Circle)));
        assert_eq!(s.tools().tool(), Tool::Circle);

        let save = buttons.iter().find(|b| b.action == ToolbarAction::Save).unwrap();
        s.step(None, t0);
        let r = s.step(pinched(save.center()), t0 + Duration::from_millis(400));
        assert!(r.save_requested);
    }

    #[test]
    fn save_action_is_reported_not_performed() {
        let mut s = session();
        assert!(s.apply(ToolbarAction::Save));
        assert!(!s.apply(ToolbarAction::SelectTool(Tool::Circle)));
        assert_eq!(s.tools().tool(), Tool::Circle);
    }

    #[test]
    fn losing_the_hand_ends_stroke_and_reseeds_smoother() {
        let mut s = session();
        let now = Instant::now();
        s.step(pinched(Point::new(300, 300)), now);
        s.step(pinched(Point::new(310, 300)), now);
        let r = s.step(None, now);
        assert_eq!(r.outcome, Some(StepOutcome::StrokeEnded));
        assert_eq!(r.cursor, None);
        assert_eq!(s.gesture_state(), GestureState::Idle);

        // Next sighting is not averaged with the old position.
        let r = s.step(open(Point::new(900, 600)), now);
        assert_eq!(r.cursor, Some(Point::new(900, 600)));
    }

    #[test]
    fn no_hand_still_composes_canvas_over_video() {
        let mut s = session();
        s.step(None, Instant::now());
        let video = FrameBuffer::black(1280, 720);
        let out = s.compose(&video).unwrap();
        assert_eq!(out, video);
    }
}
