use crate::error::{Error, Result};
use crate::math;
use crate::vector::Vector2D;

/// Width and height of the toroidal simulation space `[0, width) × [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    width: f32,
    height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(Error::InvalidBounds { width, height })
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn contains(&self, point: Vector2D) -> bool {
        (0.0..self.width).contains(&point.x) && (0.0..self.height).contains(&point.y)
    }

    /// Wraps each axis of `point` back into the bounds.
    pub fn wrap(&self, point: Vector2D) -> Vector2D {
        Vector2D::new(
            wrap_coordinate(point.x, self.width),
            wrap_coordinate(point.y, self.height),
        )
    }
}

/// Wrap-around for one axis.
///
/// Coordinates strictly inside `(0, bound)` are returned untouched. Anything at
/// or beyond an edge becomes `(value + bound) mod bound`, so `bound` maps to `0`,
/// `bound + d` to `d` and `-d` to `bound - d`.
pub fn wrap_coordinate(value: f32, bound: f32) -> f32 {
    if value > 0.0 && value < bound {
        return value;
    }
    let wrapped = math::rem_euclid(value + bound, bound);
    // rem_euclid may round up to `bound` for tiny negative inputs
    if wrapped >= bound {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_bounds() {
        assert!(Bounds::new(0.0, 10.0).is_err());
        assert!(Bounds::new(10.0, -1.0).is_err());
        assert!(Bounds::new(f32::INFINITY, 10.0).is_err());
        assert!(Bounds::new(f32::NAN, 10.0).is_err());
    }

    #[test]
    fn test_wrap_is_noop_inside_bounds() {
        for value in [0.0, 0.5, 1.0, 50.0, 99.0, 99.9] {
            assert_eq!(wrap_coordinate(value, 100.0), value);
        }
    }

    #[test]
    fn test_wrap_bound_maps_to_zero() {
        assert_eq!(wrap_coordinate(100.0, 100.0), 0.0);
    }

    #[test]
    fn test_wrap_past_upper_edge() {
        assert_eq!(wrap_coordinate(130.0, 100.0), 30.0);
        assert_eq!(wrap_coordinate(100.5, 100.0), 0.5);
    }

    #[test]
    fn test_wrap_below_zero() {
        assert_eq!(wrap_coordinate(-30.0, 100.0), 70.0);
        assert_eq!(wrap_coordinate(-0.5, 100.0), 99.5);
    }

    #[test]
    fn test_wrap_far_outside_stays_in_range() {
        for value in [-250.0, -1e-7, 1e6, 350.0] {
            let wrapped = wrap_coordinate(value, 100.0);
            assert!((0.0..100.0).contains(&wrapped), "{value} -> {wrapped}");
        }
    }

    #[test]
    fn test_wrap_point() {
        let bounds = Bounds::new(100.0, 50.0).unwrap();
        let wrapped = bounds.wrap(Vector2D::new(-10.0, 60.0));
        assert_eq!(wrapped, Vector2D::new(90.0, 10.0));
        assert!(bounds.contains(wrapped));
    }
}
