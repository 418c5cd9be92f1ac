//! Frame-driven view binding for elements that follow the pointer.

use crate::manager::CursorState;
use crate::types::{self, Point, Size, Vector};

/// Where a [`Follower`] takes its position from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FollowSource {
    /// Use the manager's smoothed position as is.
    Smoothed,
    /// Interpolate locally toward the raw position with a factor of its own.
    Raw { factor: f32 },
}

/// Turns cursor snapshots into a per-frame translation for a view centred on the pointer.
///
/// The view's size is given up front, so stepping never queries layout.
#[derive(Debug, Clone)]
pub struct Follower {
    source: FollowSource,
    size: Size,
    current: Option<Point>,
}

impl Follower {
    pub fn new(source: FollowSource) -> Self {
        let source = match source {
            FollowSource::Raw { factor } => FollowSource::Raw {
                factor: types::clamp_factor(factor, crate::config::DEFAULT_FOLLOWER_FACTOR),
            },
            smoothed => smoothed,
        };
        Self {
            source,
            size: Size::zero(),
            current: None,
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn source(&self) -> FollowSource {
        self.source
    }

    /// The point the view is currently centred on, if it has been stepped.
    pub fn position(&self) -> Option<Point> {
        self.current
    }

    /// Advance one frame and return the translation to apply to the view.
    pub fn step(&mut self, state: &CursorState) -> Vector {
        let next = match (self.source, self.current) {
            (FollowSource::Smoothed, _) => state.smoothed_position,
            (FollowSource::Raw { .. }, None) => state.position,
            (FollowSource::Raw { factor }, Some(current)) => {
                types::lerp(current, state.position, factor)
            }
        };
        self.current = Some(next);
        self.translation()
    }

    /// Jump onto the pointer, e.g. after it teleported.
    pub fn snap(&mut self, state: &CursorState) {
        self.current = Some(match self.source {
            FollowSource::Smoothed => state.smoothed_position,
            FollowSource::Raw { .. } => state.position,
        });
    }

    pub fn translation(&self) -> Vector {
        let centre = self.current.unwrap_or_else(Point::origin);
        centre.to_vector() - self.size.to_vector() / 2.
    }
}
