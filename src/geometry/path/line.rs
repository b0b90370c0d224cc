use crate::error::{ConstructionError, DomainError, Result};
use crate::math::distance_2d::project_onto_segment;
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{check_parameter, Path};

/// A straight path from `start` to `end`.
///
/// The parametric form is: `P(s) = start + s * (end - start)`, which is
/// already proportional to distance.
#[derive(Debug, Clone)]
pub struct LinePath {
    start: Point2,
    end: Point2,
    direction: Vector2,
    length: f64,
}

impl LinePath {
    /// Creates a new straight path.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::Degenerate`] if the endpoints coincide
    /// or are not finite.
    pub fn new(start: Point2, end: Point2) -> Result<Self> {
        let delta = end - start;
        let length = delta.norm();
        if !length.is_finite() || length < TOLERANCE {
            return Err(ConstructionError::Degenerate(
                "line endpoints must be distinct and finite".into(),
            )
            .into());
        }
        Ok(Self {
            start,
            end,
            direction: delta / length,
            length,
        })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }
}

impl Path for LinePath {
    fn point(&self, s: f64) -> Result<Point2> {
        check_parameter(s)?;
        Ok(self.start + self.direction * (s * self.length))
    }

    fn tangent(&self, s: f64) -> Result<Vector2> {
        check_parameter(s)?;
        Ok(self.direction)
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn closest_point(&self, query: &Point2, _guess: f64) -> Result<f64> {
        let t = project_onto_segment(query, &self.start, &self.end);
        if (0.0..=1.0).contains(&t) {
            Ok(t)
        } else {
            Err(DomainError::NoProjection.into())
        }
    }
}
