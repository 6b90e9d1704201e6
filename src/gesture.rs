// Pinch classification from two tracked fingertips.
// Visual: fingertips closer than the threshold draw, farther apart just move the cursor.
// No memory and no hysteresis: a distance sitting right at the threshold may flip
// between pinch and no-pinch every frame. `threshold` is the knob for that chatter.

use crate::types::Point;

/// One tracker sample: the two landmarks used for the pinch test, in raw
/// frame-pixel space (before smoothing). `index_tip` is also the draw point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandInput {
    pub index_tip: Point,
    pub middle_tip: Point,
}

impl HandInput {
    pub fn new(index_tip: Point, middle_tip: Point) -> Self {
        Self { index_tip, middle_tip }
    }
}

/// True when the fingertips are strictly closer than `threshold` pixels.
pub fn classify(tip_a: Point, tip_b: Point, threshold: f32) -> bool {
    tip_a.distance(tip_b) < threshold
}

/// `classify` bound to a fixed threshold for the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureClassifier {
    pub threshold: f32,
}

impl GestureClassifier {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn is_pinch(&self, hand: &HandInput) -> bool {
        classify(hand.index_tip, hand.middle_tip, self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_tips_pinch() {
        assert!(classify(Point::new(100, 100), Point::new(110, 100), 40.0));
    }

    #[test]
    fn far_tips_do_not_pinch() {
        assert!(!classify(Point::new(100, 100), Point::new(200, 100), 40.0));
    }

    #[test]
    fn exactly_at_threshold_is_not_a_pinch() {
        // 3-4-5 triangle scaled x8 -> distance 40.
        assert!(!classify(Point::new(0, 0), Point::new(24, 32), 40.0));
        assert!(classify(Point::new(0, 0), Point::new(24, 31), 40.0));
    }

    #[test]
    fn classifier_uses_its_threshold() {
        let hand = HandInput::new(Point::new(0, 0), Point::new(30, 0));
        assert!(GestureClassifier::new(40.0).is_pinch(&hand));
        assert!(!GestureClassifier::new(20.0).is_pinch(&hand));
    }
}
