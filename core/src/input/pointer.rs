use crate::types::{Point, Vector};

/// Pointer events forwarded by a backend, positions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Entered,
    Left,
    Moved { position: Point },
}

impl PointerEvent {
    pub fn moved(x: f32, y: f32) -> Self {
        PointerEvent::Moved {
            position: Point::new(x, y),
        }
    }
}

/// Records the raw pointer position as events arrive.
///
/// Moves are applied immediately, they are not batched until the next frame. The position seen at the
/// previous frame is kept separately so that per-frame velocity can be derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionTracker {
    position: Point,
    previous: Point,
    in_viewport: bool,
}

impl Default for PositionTracker {
    fn default() -> Self {
        Self {
            position: Point::origin(),
            previous: Point::origin(),
            in_viewport: false,
        }
    }
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn in_viewport(&self) -> bool {
        self.in_viewport
    }

    pub fn record(&mut self, position: Point) {
        self.position = position;
        self.in_viewport = true;
    }

    pub fn set_in_viewport(&mut self, in_viewport: bool) {
        self.in_viewport = in_viewport;
    }

    /// Displacement since the last call, which then becomes the new reference point.
    ///
    /// Called once per frame.
    pub fn take_velocity(&mut self) -> Vector {
        let velocity = self.position - self.previous;
        self.previous = self.position;
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_marks_in_viewport() {
        let mut tracker = PositionTracker::new();
        assert!(!tracker.in_viewport());
        tracker.record(Point::new(3., 4.));
        assert!(tracker.in_viewport());
        assert_eq!(tracker.position(), Point::new(3., 4.));
    }

    #[test]
    fn test_take_velocity() {
        let mut tracker = PositionTracker::new();
        assert_eq!(tracker.take_velocity(), Vector::zero());
        tracker.record(Point::new(10., 5.));
        assert_eq!(tracker.take_velocity(), Vector::new(10., 5.));
        assert_eq!(tracker.take_velocity(), Vector::zero());
    }

    #[test]
    fn test_only_last_move_counts_per_frame() {
        let mut tracker = PositionTracker::new();
        tracker.record(Point::new(100., 100.));
        tracker.record(Point::new(4., 2.));
        assert_eq!(tracker.take_velocity(), Vector::new(4., 2.));
    }
}
