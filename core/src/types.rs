//! Geometry shared by the manager, the follower and the backends.

/// An `(x, y)` coordinate in logical pixels.
pub type Point = euclid::default::Point2D<f32>;
/// A displacement between two [`Point`]s.
pub type Vector = euclid::default::Vector2D<f32>;
/// A width and height in logical pixels.
pub type Size = euclid::default::Size2D<f32>;

/// Smallest interpolation factor accepted by [`clamp_factor`].
pub const MIN_LERP_FACTOR: f32 = 0.01;
/// Largest interpolation factor accepted by [`clamp_factor`].
pub const MAX_LERP_FACTOR: f32 = 1.0;

/// Linear interpolation: `a + (b - a) * t`.
pub fn lerp(a: Point, b: Point, t: f32) -> Point {
    a + (b - a) * t
}

/// Clamp an interpolation factor into `[MIN_LERP_FACTOR, MAX_LERP_FACTOR]`.
///
/// `NaN` maps to `fallback`.
pub fn clamp_factor(factor: f32, fallback: f32) -> f32 {
    if factor.is_nan() {
        return fallback.clamp(MIN_LERP_FACTOR, MAX_LERP_FACTOR);
    }
    factor.clamp(MIN_LERP_FACTOR, MAX_LERP_FACTOR)
}

/// Map a point inside `viewport` to `[-1, 1]` on both axes, `(0, 0)` being the centre.
///
/// Without a usable viewport (unknown, or a zero dimension) the result is the origin.
pub fn normalize(point: Point, viewport: Option<Size>) -> Point {
    match viewport {
        Some(size) if size.width > 0. && size.height > 0. => Point::new(
            (2. * point.x / size.width - 1.).clamp(-1., 1.),
            (2. * point.y / size.height - 1.).clamp(-1., 1.),
        ),
        _ => Point::origin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        let mid = lerp(Point::new(0., 0.), Point::new(100., 50.), 0.5);
        assert_eq!(mid, Point::new(50., 25.));
    }

    #[test]
    fn test_normalize_corners_and_centre() {
        let viewport = Some(Size::new(800., 600.));
        assert_eq!(normalize(Point::new(400., 300.), viewport), Point::new(0., 0.));
        assert_eq!(normalize(Point::new(0., 0.), viewport), Point::new(-1., -1.));
        assert_eq!(normalize(Point::new(800., 600.), viewport), Point::new(1., 1.));
    }

    #[test]
    fn test_normalize_without_viewport() {
        assert_eq!(normalize(Point::new(120., 40.), None), Point::origin());
        assert_eq!(
            normalize(Point::new(120., 40.), Some(Size::new(0., 600.))),
            Point::origin()
        );
    }

    #[test]
    fn test_normalize_outside_viewport_is_clamped() {
        let viewport = Some(Size::new(100., 100.));
        assert_eq!(normalize(Point::new(-50., 250.), viewport), Point::new(-1., 1.));
    }

    #[test]
    fn test_clamp_factor() {
        assert_eq!(clamp_factor(0., 0.15), MIN_LERP_FACTOR);
        assert_eq!(clamp_factor(5., 0.15), MAX_LERP_FACTOR);
        assert_eq!(clamp_factor(0.3, 0.15), 0.3);
        assert_eq!(clamp_factor(f32::NAN, 0.15), 0.15);
    }
}
