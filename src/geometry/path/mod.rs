mod arc_piece;
mod line;
mod segment;
mod spline;

pub use arc_piece::{ArcPiece, ArcShape};
pub use line::LinePath;
pub use segment::Segment;
pub use spline::Spline;

use crate::error::{DomainError, Result};
use crate::math::vec_2d::{cross, right_normal};
use crate::math::{Point2, Vector2, TOLERANCE};

/// A planar path parameterized by `s ∈ [0, 1]`, proportional to distance.
///
/// All queries are read-only, so a constructed path can be shared between
/// threads without locking.
pub trait Path {
    /// Evaluates the path at parameter `s`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ParameterOutOfRange`] if `s` is outside `[0, 1]`.
    fn point(&self, s: f64) -> Result<Point2>;

    /// Unit tangent at parameter `s`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ParameterOutOfRange`] if `s` is outside `[0, 1]`.
    fn tangent(&self, s: f64) -> Result<Vector2>;

    /// Total (approximate) length of the path.
    fn length(&self) -> f64;

    /// Parameter of the point on the path closest to `query`.
    ///
    /// `guess` seeds implementations that search locally; others ignore it.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if no point of the path accepts the projection.
    fn closest_point(&self, query: &Point2, guess: f64) -> Result<f64>;

    /// Tangent at `s` rotated by -90°: the direction in which
    /// [`level_set`](Path::level_set) increases.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ParameterOutOfRange`] if `s` is outside `[0, 1]`.
    fn normal(&self, s: f64) -> Result<Vector2> {
        Ok(right_normal(&self.tangent(s)?))
    }

    /// Signed distance from `query` to the path point at `s`.
    ///
    /// Positive on the right of the tangent, negative on the left, and 0
    /// when the query lies on the path point or on the tangent line.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ParameterOutOfRange`] if `s` is outside `[0, 1]`.
    fn level_set(&self, query: &Point2, s: f64) -> Result<f64> {
        let path_point = self.point(s)?;
        let tangent = self.tangent(s)?;
        let to_path = path_point - query;
        let distance = to_path.norm();
        if distance < TOLERANCE {
            return Ok(0.0);
        }
        let side = cross(&tangent, &(to_path / distance));
        let sign = if side > 0.0 {
            1.0
        } else if side < 0.0 {
            -1.0
        } else {
            0.0
        };
        Ok(sign * distance)
    }

    /// Gradient of [`level_set`](Path::level_set) with respect to the query
    /// position, evaluated at the closest parameter `s`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ParameterOutOfRange`] if `s` is outside `[0, 1]`.
    fn error_gradient(&self, _query: &Point2, s: f64) -> Result<Vector2> {
        self.normal(s)
    }
}

/// Rejects parameters outside `[0, 1]` (including NaN).
pub(crate) fn check_parameter(s: f64) -> Result<()> {
    if (0.0..=1.0).contains(&s) {
        Ok(())
    } else {
        Err(DomainError::ParameterOutOfRange { value: s }.into())
    }
}
