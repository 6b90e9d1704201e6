// Source of fingertip samples for the session.
// A landmark detector plugs in through `HandTracker`; `PointerTracker` stands in
// for one with the mouse (cursor = index tip, button held = pinch).

use crate::gesture::HandInput;
use crate::types::{FrameBuffer, Point};

pub trait HandTracker {
    /// Fingertips found in `frame`, or None when no hand is visible.
    fn track(&mut self, frame: &FrameBuffer) -> Option<HandInput>;
}

/// Mouse-driven stand-in for a hand detector.
pub struct PointerTracker {
    pos: Option<Point>,
    down: bool,
    open_spread: i32, // fake fingertip gap while the button is up
}

impl PointerTracker {
    /// `pinch_threshold` is the classifier's; the fake gap is kept well above it.
    pub fn new(pinch_threshold: f32) -> Self {
        Self { pos: None, down: false, open_spread: (pinch_threshold * 2.0).ceil() as i32 + 1 }
    }

    /// Latest pointer state from the window (None = pointer outside it).
    pub fn update(&mut self, pos: Option<Point>, down: bool) {
        self.pos = pos;
        self.down = down;
    }
}

impl HandTracker for PointerTracker {
    fn track(&mut self, _frame: &FrameBuffer) -> Option<HandInput> {
        let p = self.pos?;
        let spread = if self.down { 0 } else { self.open_spread };
        Some(HandInput::new(p, p + Point::new(spread, 0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::GestureClassifier;

    #[test]
    fn button_state_maps_to_pinch() {
        let classifier = GestureClassifier::new(40.0);
        let frame = FrameBuffer::black(4, 4);
        let mut t = PointerTracker::new(40.0);

        assert_eq!(t.track(&frame), None);

        t.update(Some(Point::new(200, 300)), false);
        let hand = t.track(&frame).unwrap();
        assert_eq!(hand.index_tip, Point::new(200, 300));
        assert!(!classifier.is_pinch(&hand));

        t.update(Some(Point::new(200, 300)), true);
        assert!(classifier.is_pinch(&t.track(&frame).unwrap()));
    }
}
