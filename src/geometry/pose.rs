use crate::math::vec_2d::heading_vector;
use crate::math::{Point2, Vector2};

/// A waypoint: planar position plus the heading the path must have there.
///
/// `heading` is in radians, counter-clockwise from the +x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Pose {
    /// Creates a new pose.
    #[must_use]
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    /// Returns the position as a point.
    #[must_use]
    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Returns the unit vector along the heading.
    #[must_use]
    pub fn heading_vector(&self) -> Vector2 {
        heading_vector(self.heading)
    }

    /// Returns `true` if position and heading are all finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.heading.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn heading_vector_is_unit() {
        let v = Pose::new(1.0, 2.0, PI / 3.0).heading_vector();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!((v.x - 0.5).abs() < 1e-12, "vx={}", v.x);
    }

    #[test]
    fn non_finite_detected() {
        assert!(Pose::new(0.0, 0.0, 0.0).is_finite());
        assert!(!Pose::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Pose::new(0.0, 0.0, f64::INFINITY).is_finite());
    }
}
