// Moving-average smoother for the tracked fingertip.
// Visual: strokes follow the finger without the per-frame shake of the raw tracker.

use std::collections::VecDeque;

use crate::types::Point;

pub const DEFAULT_WINDOW: usize = 5;

/// Bounded FIFO of recent raw points; `observe` returns their rounded mean.
#[derive(Debug, Clone)]
pub struct PointSmoother {
    history: VecDeque<Point>,
    capacity: usize,
}

impl Default for PointSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl PointSmoother {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { history: VecDeque::with_capacity(capacity), capacity }
    }

    /// Push `p` (evicting the oldest sample when full) and return the mean of the window.
    /// The pushed point is always in the window, so the mean never divides by zero.
    pub fn observe(&mut self, p: Point) -> Point {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(p);

        let n = self.history.len() as f64;
        let (sx, sy) = self
            .history
            .iter()
            .fold((0i64, 0i64), |(sx, sy), q| (sx + q.x as i64, sy + q.y as i64));
        Point::new((sx as f64 / n).round() as i32, (sy as f64 / n).round() as i32)
    }

    /// Forget the history (the hand left the frame).
    pub fn reset(&mut self) {
        self.history.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_is_returned_exactly() {
        let mut s = PointSmoother::default();
        assert_eq!(s.observe(Point::new(123, 456)), Point::new(123, 456));
    }

    #[test]
    fn oldest_point_is_evicted() {
        let mut s = PointSmoother::default();
        s.observe(Point::new(1000, 1000));
        for _ in 0..4 {
            s.observe(Point::new(0, 0));
        }
        // Window is now [1000, 0, 0, 0, 0]; the next push drops the 1000.
        assert_eq!(s.len(), 5);
        assert_eq!(s.observe(Point::new(0, 0)), Point::new(0, 0));
    }

    #[test]
    fn mean_is_rounded() {
        let mut s = PointSmoother::default();
        s.observe(Point::new(0, 0));
        assert_eq!(s.observe(Point::new(3, 1)), Point::new(2, 1)); // 1.5 -> 2, 0.5 -> 1
    }

    #[test]
    fn reset_reseeds() {
        let mut s = PointSmoother::default();
        s.observe(Point::new(500, 500));
        s.reset();
        assert!(s.is_empty());
        assert_eq!(s.observe(Point::new(10, 20)), Point::new(10, 20));
    }
}
