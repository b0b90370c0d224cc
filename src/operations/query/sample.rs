use crate::error::Result;
use crate::geometry::Path;
use crate::math::Point2;

/// Samples a path at evenly spaced parameters, for display or export.
pub struct SamplePath {
    count: usize,
}

impl SamplePath {
    /// Creates a new `SamplePath` query producing `count` points.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Executes the query. Both ends are included when `count >= 2`; a
    /// single sample is the start point.
    ///
    /// # Errors
    ///
    /// Returns an error if the path fails to evaluate.
    pub fn execute<P: Path + ?Sized>(&self, path: &P) -> Result<Vec<Point2>> {
        match self.count {
            0 => Ok(Vec::new()),
            1 => Ok(vec![path.point(0.0)?]),
            n => {
                #[allow(clippy::cast_precision_loss)]
                let last = (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        #[allow(clippy::cast_precision_loss)]
                        let s = (i as f64 / last).min(1.0);
                        path.point(s)
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::LinePath;

    #[test]
    fn evenly_spaced_on_line() {
        let line = LinePath::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0)).unwrap();
        let pts = SamplePath::new(5).execute(&line).unwrap();
        assert_eq!(pts.len(), 5);
        for (i, p) in pts.iter().enumerate() {
            assert!((p.x - i as f64).abs() < 1e-12, "p={p}");
        }
    }

    #[test]
    fn degenerate_counts() {
        let line = LinePath::new(Point2::new(1.0, 2.0), Point2::new(4.0, 2.0)).unwrap();
        assert!(SamplePath::new(0).execute(&line).unwrap().is_empty());
        let one = SamplePath::new(1).execute(&line).unwrap();
        assert_eq!(one.len(), 1);
        assert!((one[0] - Point2::new(1.0, 2.0)).norm() < 1e-12);
    }
}
