use crate::error::Result;
use crate::geometry::Path;
use crate::math::{Point2, Vector2};

/// Result of a closest point query.
#[derive(Debug, Clone, Copy)]
pub struct ClosestPointResult {
    /// The path parameter at the closest point.
    pub parameter: f64,
    /// The closest point on the path.
    pub point: Point2,
    /// Signed lateral error: positive on the right of the path.
    pub level_set: f64,
    /// Direction in which the lateral error increases.
    pub normal: Vector2,
}

impl ClosestPointResult {
    /// Unsigned distance from the query to the path.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.level_set.abs()
    }
}

/// Finds the closest point on a path to a given point, along with the
/// tracking error a path-following controller needs.
pub struct ClosestPointOnPath {
    point: Point2,
    guess: f64,
}

impl ClosestPointOnPath {
    /// Creates a new `ClosestPointOnPath` query.
    ///
    /// `guess` is the parameter found on the previous control cycle; paths
    /// that search locally start from it.
    #[must_use]
    pub fn new(point: Point2, guess: f64) -> Self {
        Self { point, guess }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the point cannot be projected onto the path.
    pub fn execute<P: Path + ?Sized>(&self, path: &P) -> Result<ClosestPointResult> {
        let parameter = path.closest_point(&self.point, self.guess)?;
        Ok(ClosestPointResult {
            parameter,
            point: path.point(parameter)?,
            level_set: path.level_set(&self.point, parameter)?,
            normal: path.normal(parameter)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{LinePath, Pose, Spline};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn spline_tracking_error() {
        let spline = Spline::new(&[
            Pose::new(0.0, 0.0, 0.0),
            Pose::new(4.0, 3.0, FRAC_PI_2),
        ])
        .unwrap();
        let s = 0.6;
        let base = spline.point(s).unwrap();
        let n = spline.normal(s).unwrap();
        let query = base - n * 0.25;

        let res = ClosestPointOnPath::new(query, 0.5).execute(&spline).unwrap();
        assert!((res.parameter - s).abs() < 1e-3, "s={}", res.parameter);
        assert!((res.level_set + 0.25).abs() < 1e-4, "level set={}", res.level_set);
        assert!((res.distance() - 0.25).abs() < 1e-4);
        assert!((res.point - base).norm() < 1e-2);
        assert!(res.normal.dot(&n) > 0.999);
    }

    #[test]
    fn works_through_trait_objects() {
        let paths: Vec<Box<dyn Path>> = vec![
            Box::new(LinePath::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)).unwrap()),
            Box::new(Spline::new(&[Pose::new(0.0, 0.0, 0.0), Pose::new(10.0, 0.0, 0.0)]).unwrap()),
        ];
        for path in &paths {
            let res = ClosestPointOnPath::new(Point2::new(2.5, 1.0), 0.0)
                .execute(path.as_ref())
                .unwrap();
            assert!((res.parameter - 0.25).abs() < 1e-3, "s={}", res.parameter);
            assert!((res.level_set + 1.0).abs() < 1e-6, "level set={}", res.level_set);
        }
    }

    #[test]
    fn off_path_is_domain_error() {
        let line = LinePath::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)).unwrap();
        let err = ClosestPointOnPath::new(Point2::new(3.0, 0.0), 0.0).execute(&line).unwrap_err();
        assert!(err.is_domain());
    }
}
