use std::f64::consts::TAU;

use super::{Point2, Vector2, TOLERANCE};

/// Absolute angular tolerance at the edges of an arc.
const ANGLE_EPS: f64 = 1e-10;

/// Projects `p` onto the infinite line through `a` and `b`.
///
/// Returns the scalar foot parameter `t` with `a + t * (b - a)` the foot
/// point, unclamped. A zero-length segment projects to `t = 0`.
#[must_use]
pub fn project_onto_segment(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < 1e-20 {
        return 0.0;
    }
    (p - a).dot(&ab) / len_sq
}

/// Returns the minimum distance from `p` to the segment from `a` to `b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let t = project_onto_segment(p, a, b).clamp(0.0, 1.0);
    let closest = a + (b - a) * t;
    (p - closest).norm()
}

/// Where the foot point of a projection falls relative to a piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Foot {
    /// Inside the piece, at this fraction `[0, 1]` along it.
    Within(f64),
    /// Before the start of the piece.
    BeforeStart,
    /// Past the end of the piece.
    PastEnd,
}

impl Foot {
    /// The fraction along the piece, if the foot point lies on it.
    #[must_use]
    pub fn within(self) -> Option<f64> {
        match self {
            Self::Within(lambda) => Some(lambda),
            Self::BeforeStart | Self::PastEnd => None,
        }
    }
}

/// Locates the foot point of `p` on the segment from `a` to `b`.
///
/// Feet within `slack` of either end are clamped onto the segment.
#[must_use]
pub fn locate_on_segment(p: &Point2, a: &Point2, b: &Point2, slack: f64) -> Foot {
    let t = project_onto_segment(p, a, b);
    if t < -slack {
        Foot::BeforeStart
    } else if t > 1.0 + slack {
        Foot::PastEnd
    } else {
        Foot::Within(t.clamp(0.0, 1.0))
    }
}

/// Locates the foot point of `p` on an arc, as a fraction of its sweep.
///
/// The foot point on the supporting circle is accepted if it lies within
/// the arc's angular span widened by `slack` of the sweep on each side.
/// A miss is reported against whichever end is angularly nearer. A point
/// on the center is equally close to every point and maps to the start.
#[must_use]
pub fn locate_on_arc(
    p: &Point2,
    center: &Point2,
    start_angle: f64,
    sweep: f64,
    slack: f64,
) -> Foot {
    let d = p - center;
    if d.norm() < TOLERANCE || sweep.abs() < f64::EPSILON {
        return Foot::Within(0.0);
    }
    let angle = d.y.atan2(d.x);
    locate_angle(angle, start_angle, sweep, slack)
}

/// Returns the minimum distance from `p` to a circular arc.
///
/// If the point's angle (relative to center) falls within the arc range,
/// the distance is `||p - center| - radius|`. Otherwise it is the
/// distance to the nearer arc endpoint.
#[must_use]
pub fn point_to_arc_dist(
    p: &Point2,
    center: &Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
) -> f64 {
    let d = p - center;
    let angle = d.y.atan2(d.x);
    if matches!(locate_angle(angle, start_angle, sweep, 0.0), Foot::Within(_)) {
        return (d.norm() - radius).abs();
    }

    let end_angle = start_angle + sweep;
    let ep0 = center + Vector2::new(start_angle.cos(), start_angle.sin()) * radius;
    let ep1 = center + Vector2::new(end_angle.cos(), end_angle.sin()) * radius;
    (p - ep0).norm().min((p - ep1).norm())
}

/// Maps an angle to its position relative to an arc's sweep.
fn locate_angle(angle: f64, start_angle: f64, sweep: f64, slack: f64) -> Foot {
    let span = sweep.abs();
    if span < f64::EPSILON {
        return Foot::Within(0.0);
    }
    // Angle travelled from the start in the arc's own direction, in [0, 2π).
    let delta = if sweep > 0.0 {
        angle - start_angle
    } else {
        start_angle - angle
    }
    .rem_euclid(TAU);

    let margin = slack * span + ANGLE_EPS;
    if delta <= span + margin {
        return Foot::Within((delta / span).clamp(0.0, 1.0));
    }
    let before = TAU - delta;
    if before <= margin {
        return Foot::Within(0.0);
    }
    if delta - span < before {
        Foot::PastEnd
    } else {
        Foot::BeforeStart
    }
}
