use crate::types::Point;
use std::time::{Duration, Instant};

/// Coalesces bursts of pointer samples into at most one update per window.
///
/// Each [`push`][PositionSampler::push] cancels the pending deadline and schedules a new one, so a burst
/// only yields its last sample, once the pointer has been quiet for `window`.
#[derive(Debug, Clone)]
pub struct PositionSampler {
    window: Duration,
    pending: Option<(Point, Instant)>,
}

impl PositionSampler {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn push(&mut self, position: Point, now: Instant) {
        self.pending = Some((position, now + self.window));
    }

    /// Take the pending sample if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Point> {
        match self.pending {
            Some((position, deadline)) if now >= deadline => {
                self.pending = None;
                Some(position)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_yields_last_sample_once() {
        let start = Instant::now();
        let mut sampler = PositionSampler::new(Duration::from_millis(50));
        for i in 0..5 {
            sampler.push(
                Point::new(i as f32, 0.),
                start + Duration::from_millis(i * 10),
            );
        }
        assert_eq!(sampler.poll(start + Duration::from_millis(60)), None);
        assert_eq!(
            sampler.poll(start + Duration::from_millis(90)),
            Some(Point::new(4., 0.))
        );
        assert_eq!(sampler.poll(start + Duration::from_millis(200)), None);
    }

    #[test]
    fn test_zero_window() {
        let now = Instant::now();
        let mut sampler = PositionSampler::new(Duration::ZERO);
        sampler.push(Point::new(1., 2.), now);
        assert_eq!(sampler.poll(now), Some(Point::new(1., 2.)));
    }

    #[test]
    fn test_cancel() {
        let now = Instant::now();
        let mut sampler = PositionSampler::new(Duration::from_millis(5));
        sampler.push(Point::new(1., 2.), now);
        sampler.cancel();
        assert!(!sampler.is_pending());
        assert_eq!(sampler.poll(now + Duration::from_secs(1)), None);
    }
}
