use crate::config::SplineConfig;
use crate::error::Result;
use crate::geometry::Pose;
use crate::math::arc_2d::arc_from_three_points;
use crate::math::polynomial::Quintic;
use crate::math::vec_2d::{are_collinear, inv_lerp, lerp, unit};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::ArcPiece;

/// Curvature reported where the curve has (nearly) zero speed.
const DEGENERATE_CURVATURE: f64 = 0.0;

/// One quintic piece of a spline, between two consecutive waypoints.
///
/// The polynomial parameter `u ∈ [0, 1]` is not arc length. Queries take a
/// segment fraction `f ∈ [0, 1]` that runs proportionally to length along
/// the arc table, and the spline maps its own parameter onto `f` through
/// `[begin_s, end_s]`.
#[derive(Debug, Clone)]
pub struct Segment {
    x: Quintic,
    y: Quintic,
    arcs: Vec<ArcPiece>,
    length: f64,
    begin_s: f64,
    end_s: f64,
}

impl Segment {
    /// Fits the segment from `start` to `end` and decomposes it into arcs.
    ///
    /// Each axis matches position and unit heading direction at both
    /// waypoints with zero second derivative at the ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the shared fit matrix cannot be solved.
    pub fn fit(start: &Pose, end: &Pose, config: &SplineConfig) -> Result<Self> {
        let x = Quintic::hermite(start.x, end.x, start.heading.cos(), end.heading.cos())?;
        let y = Quintic::hermite(start.y, end.y, start.heading.sin(), end.heading.sin())?;
        Ok(Self::from_polynomials(x, y, config))
    }

    /// Builds a segment from per-axis polynomials.
    #[must_use]
    pub fn from_polynomials(x: Quintic, y: Quintic, config: &SplineConfig) -> Self {
        let mut segment = Self {
            x,
            y,
            arcs: Vec::new(),
            length: 0.0,
            begin_s: 0.0,
            end_s: 1.0,
        };
        let mut arcs = segment.subdivide(config);
        segment.length = assign_shares(&mut arcs);
        segment.arcs = arcs;
        segment
    }

    /// Arc pieces in traversal order.
    #[must_use]
    pub fn arcs(&self) -> &[ArcPiece] {
        &self.arcs
    }

    /// Approximate length: the sum of the arc lengths.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Start of this segment's share of the spline parameter.
    #[must_use]
    pub fn begin_s(&self) -> f64 {
        self.begin_s
    }

    /// End of this segment's share of the spline parameter.
    #[must_use]
    pub fn end_s(&self) -> f64 {
        self.end_s
    }

    pub(super) fn set_share(&mut self, begin_s: f64, end_s: f64) {
        self.begin_s = begin_s;
        self.end_s = end_s;
    }

    /// Returns `true` if spline parameter `s` falls in this segment's share.
    #[must_use]
    pub fn contains(&self, s: f64) -> bool {
        (self.begin_s..=self.end_s).contains(&s)
    }

    /// Maps a spline parameter to this segment's length fraction.
    #[must_use]
    pub fn to_local(&self, s: f64) -> f64 {
        inv_lerp(self.begin_s, self.end_s, s).clamp(0.0, 1.0)
    }

    /// Maps this segment's length fraction to a spline parameter.
    #[must_use]
    pub fn to_global(&self, f: f64) -> f64 {
        lerp(self.begin_s, self.end_s, f)
    }

    /// Position at polynomial parameter `u`.
    #[must_use]
    pub fn eval(&self, u: f64) -> Point2 {
        Point2::new(self.x.eval(u), self.y.eval(u))
    }

    /// First derivative at polynomial parameter `u`.
    #[must_use]
    pub fn derivative(&self, u: f64) -> Vector2 {
        Vector2::new(self.x.derivative(u), self.y.derivative(u))
    }

    /// Signed curvature at polynomial parameter `u`.
    ///
    /// Returns 0 at zero-speed points, where curvature is undefined.
    #[must_use]
    pub fn curvature(&self, u: f64) -> f64 {
        let dx = self.x.derivative(u);
        let dy = self.y.derivative(u);
        let speed_sq = dx * dx + dy * dy;
        if speed_sq < TOLERANCE {
            return DEGENERATE_CURVATURE;
        }
        let ddx = self.x.second_derivative(u);
        let ddy = self.y.second_derivative(u);
        (dx * ddy - dy * ddx) / speed_sq.powf(1.5)
    }

    /// Polynomial parameter at length fraction `f`.
    #[must_use]
    pub fn poly_param(&self, f: f64) -> f64 {
        let arc = self.arc_for(f);
        arc.poly_param(arc.lambda_for(f))
    }

    /// Position at length fraction `f`.
    #[must_use]
    pub fn point_at(&self, f: f64) -> Point2 {
        self.eval(self.poly_param(f))
    }

    /// Unit tangent at length fraction `f`.
    ///
    /// Falls back to the owning arc's chord direction at a zero-speed point.
    #[must_use]
    pub fn tangent_at(&self, f: f64) -> Vector2 {
        let arc = self.arc_for(f);
        let u = arc.poly_param(arc.lambda_for(f));
        unit(&self.derivative(u))
            .or_else(|| unit(&(self.eval(arc.t_end()) - self.eval(arc.t_begin()))))
            .unwrap_or_else(Vector2::x)
    }

    /// Curvature at length fraction `f`.
    #[must_use]
    pub fn curvature_at(&self, f: f64) -> f64 {
        self.curvature(self.poly_param(f))
    }

    /// The arc whose length share contains `f`.
    fn arc_for(&self, f: f64) -> &ArcPiece {
        let idx = self.arcs.partition_point(|arc| arc.end() < f);
        &self.arcs[idx.min(self.arcs.len() - 1)]
    }

    /// Splits `[0, 1]` into arc or chord leaves, in traversal order.
    ///
    /// An interval becomes a leaf when its three-point fit is no longer than
    /// `max_arc_length` and curvature changes by at most
    /// `max_curvature_delta` across it. At `max_depth` the interval is
    /// forced into a chord.
    fn subdivide(&self, config: &SplineConfig) -> Vec<ArcPiece> {
        let mut leaves = Vec::new();
        let mut forced = 0_usize;
        let mut stack = vec![(0.0_f64, 1.0_f64, 0_u32)];

        while let Some((t0, t1, depth)) = stack.pop() {
            let tm = 0.5 * (t0 + t1);
            let p0 = self.eval(t0);
            let pm = self.eval(tm);
            let p1 = self.eval(t1);

            if depth >= config.max_depth {
                forced += 1;
                leaves.push(ArcPiece::chord(p0, p1, t0, t1));
                continue;
            }

            // A circle through collinear samples is undefined; use the chord
            // and judge it by the sampled polyline length.
            let (candidate, span) = match arc_from_three_points(&p0, &pm, &p1)
                .filter(|_| !are_collinear(&p0, &pm, &p1, config.collinear_tolerance))
            {
                Some((center, radius, start_angle, sweep)) => {
                    let arc = ArcPiece::circular(center, radius, start_angle, sweep, t0, t1);
                    let len = arc.length();
                    (arc, len)
                }
                None => (
                    ArcPiece::chord(p0, p1, t0, t1),
                    (pm - p0).norm() + (p1 - pm).norm(),
                ),
            };

            let dk = (self.curvature(t1) - self.curvature(t0)).abs();
            if span <= config.max_arc_length && dk <= config.max_curvature_delta {
                leaves.push(candidate);
            } else {
                // Right half first so the left half is processed next.
                stack.push((tm, t1, depth + 1));
                stack.push((t0, tm, depth + 1));
            }
        }

        if forced > 0 {
            tracing::warn!(
                forced,
                max_depth = config.max_depth,
                "subdivision hit the depth cap, forced chords"
            );
        }
        leaves
    }
}

/// Assigns each arc its share of the total length, cumulatively in order.
///
/// Returns the total length. The last share always ends at exactly 1.
fn assign_shares(arcs: &mut [ArcPiece]) -> f64 {
    let total: f64 = arcs.iter().map(ArcPiece::length).sum();
    #[allow(clippy::cast_precision_loss)]
    let uniform = 1.0 / arcs.len().max(1) as f64;

    let mut acc = 0.0;
    for arc in arcs.iter_mut() {
        let share = if total > TOLERANCE {
            arc.length() / total
        } else {
            uniform
        };
        let begin = acc;
        acc += share;
        arc.set_share(begin, acc);
    }
    if let Some(last) = arcs.last_mut() {
        let begin = last.begin();
        last.set_share(begin, 1.0);
    }
    total
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn quarter_turn() -> Segment {
        Segment::fit(
            &Pose::new(0.0, 0.0, 0.0),
            &Pose::new(3.0, 3.0, FRAC_PI_2),
            &SplineConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn fit_matches_waypoints() {
        let seg = quarter_turn();
        assert!((seg.eval(0.0) - Point2::new(0.0, 0.0)).norm() < 1e-12);
        assert!((seg.eval(1.0) - Point2::new(3.0, 3.0)).norm() < 1e-12);
        let d0 = seg.derivative(0.0);
        let d1 = seg.derivative(1.0);
        assert_abs_diff_eq!(d0.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d0.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d1.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d1.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn arcs_tile_the_segment() {
        let seg = quarter_turn();
        let arcs = seg.arcs();
        assert!(!arcs.is_empty());
        assert_abs_diff_eq!(arcs[0].begin(), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(arcs[0].t_begin(), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(arcs[arcs.len() - 1].end(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(arcs[arcs.len() - 1].t_end(), 1.0, epsilon = 1e-15);
        for pair in arcs.windows(2) {
            assert_abs_diff_eq!(pair[0].end(), pair[1].begin(), epsilon = 1e-15);
            assert_abs_diff_eq!(pair[0].t_end(), pair[1].t_begin(), epsilon = 1e-15);
            assert!(pair[0].begin() <= pair[0].end());
        }
        for arc in arcs {
            assert!(arc.length() <= SplineConfig::default().max_arc_length + 1e-12);
            let share = arc.end() - arc.begin();
            if arc.end() < 1.0 {
                assert_abs_diff_eq!(share, arc.length() / seg.length(), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn chord_error_is_bounded() {
        let seg = quarter_turn();
        // A circular leaf of length L fitted to a curve whose curvature
        // varies by at most dk along it deviates by about L² · dk / 8.
        let config = SplineConfig::default();
        let bound = config.max_arc_length.powi(2) * config.max_curvature_delta / 8.0;
        for arc in seg.arcs() {
            for i in 0..=8 {
                let lambda = f64::from(i) / 8.0;
                let p = seg.eval(arc.poly_param(lambda));
                let err = arc.distance_to(&p);
                assert!(err < bound, "err={err} bound={bound}");
            }
        }
    }

    #[test]
    fn length_close_to_dense_polyline() {
        let seg = quarter_turn();
        let n = 20_000;
        let mut dense = 0.0;
        let mut prev = seg.eval(0.0);
        for i in 1..=n {
            let p = seg.eval(f64::from(i) / f64::from(n));
            dense += (p - prev).norm();
            prev = p;
        }
        assert!((seg.length() - dense).abs() < 1e-4, "arcs={} dense={dense}", seg.length());
    }

    #[test]
    fn straight_segment_uses_chords() {
        let seg = Segment::fit(
            &Pose::new(0.0, 0.0, 0.0),
            &Pose::new(2.0, 0.0, 0.0),
            &SplineConfig::default(),
        )
        .unwrap();
        assert!(seg.arcs().iter().all(ArcPiece::is_chord));
        assert_abs_diff_eq!(seg.length(), 2.0, epsilon = 1e-12);
        // Length fraction is distance fraction on a straight line.
        let p = seg.point_at(0.25);
        assert!((p.x - 0.5).abs() < 1e-3, "p={p}");
    }

    #[test]
    fn straight_curvature_is_zero() {
        let seg = Segment::fit(
            &Pose::new(0.0, 0.0, 0.0),
            &Pose::new(5.0, 0.0, 0.0),
            &SplineConfig::default(),
        )
        .unwrap();
        for &u in &[0.0, 0.3, 0.7, 1.0] {
            assert_abs_diff_eq!(seg.curvature(u), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_speed_curvature_is_sentinel() {
        // Constant polynomials: zero speed everywhere.
        let flat = Quintic::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let seg = Segment::from_polynomials(flat, flat, &SplineConfig::default());
        let k = seg.curvature(0.5);
        assert!(k.is_finite());
        assert_abs_diff_eq!(k, DEGENERATE_CURVATURE, epsilon = 0.0);
        // Degenerate point curve still produces a usable table.
        assert!(!seg.arcs().is_empty());
        assert_abs_diff_eq!(seg.arcs()[seg.arcs().len() - 1].end(), 1.0, epsilon = 0.0);
    }

    #[test]
    fn circle_curvature_sign() {
        // Left turn has positive curvature, right turn negative.
        let left = quarter_turn();
        assert!(left.curvature(0.5) > 0.0);
        let right = Segment::fit(
            &Pose::new(0.0, 0.0, 0.0),
            &Pose::new(3.0, -3.0, -FRAC_PI_2),
            &SplineConfig::default(),
        )
        .unwrap();
        assert!(right.curvature(0.5) < 0.0);
    }

    #[test]
    fn depth_cap_forces_chords() {
        let config = SplineConfig {
            max_depth: 2,
            ..SplineConfig::default()
        };
        let seg =
            Segment::fit(&Pose::new(0.0, 0.0, 0.0), &Pose::new(0.0, 10.0, PI), &config).unwrap();
        assert!(seg.arcs().len() <= 4, "arcs={}", seg.arcs().len());
        assert!(seg.arcs().iter().all(ArcPiece::is_chord));
    }
}
