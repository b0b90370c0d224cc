//! Small 2D vector and scalar helpers shared by the path types.
use std::f64::consts::TAU;

use super::{Point2, Vector2, TOLERANCE};

/// Z component of the 3D cross product of two planar vectors.
///
/// Positive when `b` lies counter-clockwise of `a`.
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Rotates `v` by -90°, giving the normal on its right-hand side.
#[must_use]
pub fn right_normal(v: &Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}

/// Returns `v` scaled to unit length, or `None` if it is (nearly) zero.
#[must_use]
pub fn unit(v: &Vector2) -> Option<Vector2> {
    let len = v.norm();
    if len < TOLERANCE || !len.is_finite() {
        return None;
    }
    Some(v / len)
}

/// Unit vector pointing along `heading` (radians, counter-clockwise from +x).
#[must_use]
pub fn heading_vector(heading: f64) -> Vector2 {
    Vector2::new(heading.cos(), heading.sin())
}

/// Checks whether three points lie on one line.
///
/// `tolerance` is relative: the sine of the angle at `a` between `b - a`
/// and `c - a` must not exceed it. Coincident points count as collinear.
#[must_use]
pub fn are_collinear(a: &Point2, b: &Point2, c: &Point2, tolerance: f64) -> bool {
    let ab = b - a;
    let ac = c - a;
    let scale = ab.norm() * ac.norm();
    if scale < TOLERANCE * TOLERANCE {
        return true;
    }
    cross(&ab, &ac).abs() <= tolerance * scale
}

/// Linear interpolation from `a` (at `t = 0`) to `b` (at `t = 1`).
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a) * t + a
}

/// Inverse of [`lerp`]: where `value` falls between `a` and `b`.
///
/// Returns 0 for an empty range.
#[must_use]
pub fn inv_lerp(a: f64, b: f64, value: f64) -> f64 {
    let span = b - a;
    if span.abs() < f64::EPSILON {
        return 0.0;
    }
    (value - a) / span
}

/// Wraps an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
