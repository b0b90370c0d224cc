/// 2D circular-arc math utilities.
///
/// Arcs are stored in center-radius-angle form with a signed sweep:
/// - `sweep > 0`: counter-clockwise arc
/// - `sweep < 0`: clockwise arc
use super::vec_2d::{cross, normalize_angle};
use super::{Point2, TOLERANCE};

/// Fits the unique circle through three points and returns the arc that
/// starts at `p0`, passes through `p1` and ends at `p2`.
///
/// Returns `(center, radius, start_angle, sweep)`, or `None` when the
/// points are collinear (or coincident) and no finite circle exists.
#[must_use]
pub fn arc_from_three_points(
    p0: &Point2,
    p1: &Point2,
    p2: &Point2,
) -> Option<(Point2, f64, f64, f64)> {
    // Work relative to p0 to keep the determinant well scaled.
    let b = p1 - p0;
    let c = p2 - p0;
    let d = 2.0 * cross(&b, &c);
    if d.abs() < TOLERANCE * TOLERANCE {
        return None;
    }

    let b_sq = b.norm_squared();
    let c_sq = c.norm_squared();
    let ux = (c.y * b_sq - b.y * c_sq) / d;
    let uy = (b.x * c_sq - c.x * b_sq) / d;
    let center = Point2::new(p0.x + ux, p0.y + uy);
    let radius = ux.hypot(uy);
    if !radius.is_finite() {
        return None;
    }

    let start_angle = (p0.y - center.y).atan2(p0.x - center.x);
    let end_angle = (p2.y - center.y).atan2(p2.x - center.x);

    // Turning direction of p0 -> p1 -> p2 decides which way round the circle we go.
    let sweep = if d > 0.0 {
        normalize_angle(end_angle - start_angle)
    } else {
        -normalize_angle(start_angle - end_angle)
    };

    Some((center, radius, start_angle, sweep))
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Length of an arc with the given radius and signed sweep.
#[must_use]
pub fn arc_length(radius: f64, sweep: f64) -> f64 {
    radius * sweep.abs()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOL: f64 = 1e-10;

    #[test]
    fn upper_semicircle_is_clockwise() {
        // (-1,0) -> (0,1) -> (1,0) turns right.
        let (c, r, sa, sw) = arc_from_three_points(
            &Point2::new(-1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(1.0, 0.0),
        )
        .unwrap();
        assert!(c.x.abs() < TOL, "cx={}", c.x);
        assert!(c.y.abs() < TOL, "cy={}", c.y);
        assert!((r - 1.0).abs() < TOL, "r={r}");
        assert!((sa - PI).abs() < TOL, "start={sa}");
        assert!((sw + PI).abs() < TOL, "sweep={sw}");

        let pm = arc_point_at(&c, r, sa, sw, 0.5);
        assert!(pm.x.abs() < TOL, "pm.x={}", pm.x);
        assert!((pm.y - 1.0).abs() < TOL, "pm.y={}", pm.y);
    }

    #[test]
    fn quarter_circle_ccw() {
        let h = (PI / 4.0).cos();
        let (c, r, sa, sw) = arc_from_three_points(
            &Point2::new(1.0, 0.0),
            &Point2::new(h, h),
            &Point2::new(0.0, 1.0),
        )
        .unwrap();
        assert!(c.coords.norm() < 1e-9, "center={c}");
        assert!((r - 1.0).abs() < 1e-9, "r={r}");
        assert!(sa.abs() < 1e-9, "start={sa}");
        assert!((sw - PI / 2.0).abs() < 1e-9, "sweep={sw}");
        assert!((arc_length(r, sw) - PI / 2.0).abs() < 1e-9);
    }

    #[test]
    fn sweep_crossing_the_branch_cut() {
        // Start just above the negative x axis, end just below it, going CCW
        // through the bottom would be wrong: the midpoint sits on the left.
        let (c, r, sa, sw) = arc_from_three_points(
            &Point2::new(0.0, 1.0),
            &Point2::new(-1.0, 0.0),
            &Point2::new(0.0, -1.0),
        )
        .unwrap();
        assert!((sw - PI).abs() < 1e-9, "sweep={sw}");
        let pm = arc_point_at(&c, r, sa, sw, 0.5);
        assert!((pm.x + 1.0).abs() < 1e-9, "pm.x={}", pm.x);
    }

    #[test]
    fn collinear_points_have_no_circle() {
        let fit = arc_from_three_points(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert!(fit.is_none());
    }

    #[test]
    fn endpoints_are_reproduced() {
        let p0 = Point2::new(0.3, -0.2);
        let p1 = Point2::new(1.0, 0.4);
        let p2 = Point2::new(2.1, 0.1);
        let (c, r, sa, sw) = arc_from_three_points(&p0, &p1, &p2).unwrap();
        let e0 = arc_point_at(&c, r, sa, sw, 0.0);
        let e1 = arc_point_at(&c, r, sa, sw, 1.0);
        assert!((e0 - p0).norm() < 1e-9);
        assert!((e1 - p2).norm() < 1e-9);
    }
}
