use crate::math::arc_2d::{arc_length, arc_point_at};
use crate::math::distance_2d::{
    locate_on_arc, locate_on_segment, point_to_arc_dist, point_to_segment_dist, Foot,
};
use crate::math::vec_2d::{inv_lerp, lerp};
use crate::math::Point2;

/// Geometry of one approximating piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcShape {
    /// Circular arc from `start_angle` sweeping by the signed `sweep`.
    Circular {
        center: Point2,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
    /// Straight chord, used where the curve is (locally) straight.
    Chord { start: Point2, end: Point2 },
}

/// A short stretch of a segment approximated by a circular arc or a chord.
///
/// Carries two parameter ranges: `[t_begin, t_end]` in the segment's
/// polynomial parameter, and `[begin, end]`, the piece's share of the
/// segment's length.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcPiece {
    shape: ArcShape,
    length: f64,
    t_begin: f64,
    t_end: f64,
    begin: f64,
    end: f64,
}

impl ArcPiece {
    /// Creates a circular piece covering polynomial parameters `[t_begin, t_end]`.
    #[must_use]
    pub fn circular(
        center: Point2,
        radius: f64,
        start_angle: f64,
        sweep: f64,
        t_begin: f64,
        t_end: f64,
    ) -> Self {
        Self {
            shape: ArcShape::Circular {
                center,
                radius,
                start_angle,
                sweep,
            },
            length: arc_length(radius, sweep),
            t_begin,
            t_end,
            begin: 0.0,
            end: 1.0,
        }
    }

    /// Creates a chord piece covering polynomial parameters `[t_begin, t_end]`.
    #[must_use]
    pub fn chord(start: Point2, end: Point2, t_begin: f64, t_end: f64) -> Self {
        Self {
            shape: ArcShape::Chord { start, end },
            length: (end - start).norm(),
            t_begin,
            t_end,
            begin: 0.0,
            end: 1.0,
        }
    }

    /// Returns the piece geometry.
    #[must_use]
    pub fn shape(&self) -> &ArcShape {
        &self.shape
    }

    /// Returns `true` for a straight chord.
    #[must_use]
    pub fn is_chord(&self) -> bool {
        matches!(self.shape, ArcShape::Chord { .. })
    }

    /// Length of the arc or chord.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Start of the piece's share of its segment.
    #[must_use]
    pub fn begin(&self) -> f64 {
        self.begin
    }

    /// End of the piece's share of its segment.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Polynomial parameter at the start of the piece.
    #[must_use]
    pub fn t_begin(&self) -> f64 {
        self.t_begin
    }

    /// Polynomial parameter at the end of the piece.
    #[must_use]
    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    pub(super) fn set_share(&mut self, begin: f64, end: f64) {
        self.begin = begin;
        self.end = end;
    }

    /// Point at fraction `lambda ∈ [0, 1]` along the piece.
    #[must_use]
    pub fn point_at(&self, lambda: f64) -> Point2 {
        match self.shape {
            ArcShape::Circular {
                center,
                radius,
                start_angle,
                sweep,
            } => arc_point_at(&center, radius, start_angle, sweep, lambda),
            ArcShape::Chord { start, end } => start + (end - start) * lambda,
        }
    }

    /// Closed-form projection of `p` onto the piece.
    ///
    /// Feet within `slack` of the span are clamped onto the piece. Misses
    /// are routine: every piece but the nearest usually rejects a query.
    #[must_use]
    pub fn locate(&self, p: &Point2, slack: f64) -> Foot {
        match self.shape {
            ArcShape::Circular {
                center,
                start_angle,
                sweep,
                ..
            } => locate_on_arc(p, &center, start_angle, sweep, slack),
            ArcShape::Chord { start, end } => locate_on_segment(p, &start, &end, slack),
        }
    }

    /// Distance from `p` to the nearest point of the piece.
    #[must_use]
    pub fn distance_to(&self, p: &Point2) -> f64 {
        match self.shape {
            ArcShape::Circular {
                center,
                radius,
                start_angle,
                sweep,
            } => point_to_arc_dist(p, &center, radius, start_angle, sweep),
            ArcShape::Chord { start, end } => point_to_segment_dist(p, &start, &end),
        }
    }

    /// Maps a fraction along the piece to the segment's length fraction.
    #[must_use]
    pub fn to_segment_fraction(&self, lambda: f64) -> f64 {
        lerp(self.begin, self.end, lambda)
    }

    /// Maps a segment length fraction to a fraction along the piece.
    #[must_use]
    pub fn lambda_for(&self, f: f64) -> f64 {
        inv_lerp(self.begin, self.end, f).clamp(0.0, 1.0)
    }

    /// Polynomial parameter at fraction `lambda` along the piece.
    #[must_use]
    pub fn poly_param(&self, lambda: f64) -> f64 {
        lerp(self.t_begin, self.t_end, lambda)
    }
}
