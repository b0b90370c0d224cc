use crate::config::SplineConfig;
use crate::error::{ConstructionError, DomainError, Result};
use crate::geometry::Pose;
use crate::math::distance_2d::Foot;
use crate::math::minimize::minimize_bounded;
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{check_parameter, Path, Segment};

/// A smooth path through an ordered list of waypoints.
///
/// Each consecutive waypoint pair is joined by a quintic [`Segment`].
/// Position and heading match every waypoint exactly; curvature is zero
/// at each waypoint but is not otherwise matched across segments.
///
/// The exposed parameter `s ∈ [0, 1]` is split between segments in
/// proportion to their lengths, and within a segment in proportion to the
/// lengths of its arc pieces, so equal steps in `s` cover roughly equal
/// distances.
#[derive(Debug, Clone)]
pub struct Spline {
    waypoints: Vec<Pose>,
    segments: Vec<Segment>,
    length: f64,
    config: SplineConfig,
}

impl Spline {
    /// Builds a spline with the default tolerances.
    ///
    /// # Errors
    ///
    /// See [`Spline::with_config`].
    pub fn new(waypoints: &[Pose]) -> Result<Self> {
        Self::with_config(waypoints, SplineConfig::default())
    }

    /// Builds a spline with custom tolerances.
    ///
    /// # Errors
    ///
    /// - [`ConstructionError::TooFewWaypoints`] if fewer than 2 waypoints are given
    /// - [`ConstructionError::NonFiniteWaypoint`] if a waypoint has a NaN or infinite field
    /// - [`ConstructionError::InvalidConfig`] if `config` fails validation
    /// - [`ConstructionError::SingularFitMatrix`] if a segment cannot be fitted
    pub fn with_config(waypoints: &[Pose], config: SplineConfig) -> Result<Self> {
        if waypoints.len() < 2 {
            return Err(ConstructionError::TooFewWaypoints {
                count: waypoints.len(),
            }
            .into());
        }
        if let Some(index) = waypoints.iter().position(|w| !w.is_finite()) {
            return Err(ConstructionError::NonFiniteWaypoint { index }.into());
        }
        config.validate()?;

        let mut segments = waypoints
            .windows(2)
            .map(|pair| Segment::fit(&pair[0], &pair[1], &config))
            .collect::<Result<Vec<_>>>()?;

        let length: f64 = segments.iter().map(Segment::length).sum();
        #[allow(clippy::cast_precision_loss)]
        let uniform = 1.0 / segments.len() as f64;
        let mut acc = 0.0;
        for segment in &mut segments {
            let share = if length > TOLERANCE {
                segment.length() / length
            } else {
                uniform
            };
            let begin = acc;
            acc += share;
            segment.set_share(begin, acc);
        }
        if let Some(last) = segments.last_mut() {
            let begin = last.begin_s();
            last.set_share(begin, 1.0);
        }

        tracing::debug!(
            segments = segments.len(),
            arcs = segments.iter().map(|s| s.arcs().len()).sum::<usize>(),
            length,
            "spline built"
        );

        Ok(Self {
            waypoints: waypoints.to_vec(),
            segments,
            length,
            config,
        })
    }

    /// The waypoints the spline was built from.
    #[must_use]
    pub fn waypoints(&self) -> &[Pose] {
        &self.waypoints
    }

    /// Segments in traversal order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Tolerances the spline was built with.
    #[must_use]
    pub fn config(&self) -> &SplineConfig {
        &self.config
    }

    /// The segment whose share of `[0, 1]` contains `s`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ParameterOutOfRange`] if `s` is outside `[0, 1]`.
    pub fn segment_for(&self, s: f64) -> Result<&Segment> {
        check_parameter(s)?;
        let idx = self.segments.partition_point(|seg| seg.end_s() < s);
        self.segments
            .get(idx)
            .ok_or_else(|| DomainError::ParameterOutOfRange { value: s }.into())
    }

    /// Signed curvature at `s` (positive when turning left).
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ParameterOutOfRange`] if `s` is outside `[0, 1]`.
    pub fn curvature(&self, s: f64) -> Result<f64> {
        let segment = self.segment_for(s)?;
        Ok(segment.curvature_at(segment.to_local(s)))
    }

    /// Closest parameter to `query` by scanning every arc piece.
    ///
    /// Neighbouring pieces meet at a shared point but not with a shared
    /// tangent, so a wedge beside each join is rejected by both pieces. A
    /// query that falls past the end of one piece and before the start of
    /// the next projects onto their shared endpoint. The path's own ends
    /// accept a query on the path's side of the normal there.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NoProjection`] if no arc accepts the projection.
    pub fn closest_point_arcs(&self, query: &Point2) -> Result<f64> {
        let slack = self.config.projection_slack;
        let mut best: Option<(f64, f64)> = None;
        let mut keep = |s: f64, foot: Point2| {
            let dist_sq = (foot - query).norm_squared();
            if best.is_none_or(|(_, d)| dist_sq < d) {
                best = Some((s, dist_sq));
            }
        };

        let mut past_previous = self.ahead_of_start(query)?;
        for segment in &self.segments {
            for arc in segment.arcs() {
                let foot = arc.locate(query, slack);
                let lambda = match foot {
                    Foot::Within(lambda) => Some(lambda),
                    Foot::BeforeStart => past_previous.then_some(0.0),
                    Foot::PastEnd => None,
                };
                past_previous = matches!(foot, Foot::PastEnd);
                if let Some(lambda) = lambda {
                    keep(
                        segment.to_global(arc.to_segment_fraction(lambda)),
                        arc.point_at(lambda),
                    );
                }
            }
        }
        if past_previous && self.behind_end(query)? {
            keep(1.0, self.point(1.0)?);
        }

        match best {
            Some((s, _)) => Ok(s.clamp(0.0, 1.0)),
            None => {
                tracing::trace!(x = query.x, y = query.y, "no arc accepted the projection");
                Err(DomainError::NoProjection.into())
            }
        }
    }

    /// Closest parameter to `query` by a bounded Brent search around `guess`.
    ///
    /// Searches `guess ± search_window`, clipped to `[0, 1]`; finds the
    /// nearest local minimum, so `guess` must be close to the answer.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ParameterOutOfRange`] if `guess` is outside
    /// `[0, 1]`, or a minimizer error if the search fails.
    pub fn closest_point_gradient(&self, query: &Point2, guess: f64) -> Result<f64> {
        check_parameter(guess)?;
        let window = self.config.search_window;
        let lower = (guess - window).max(0.0);
        let upper = (guess + window).min(1.0);
        let s = minimize_bounded(
            |t| Ok((self.point(t)? - query).norm_squared()),
            lower,
            upper,
            self.config.search_tolerance,
            self.config.search_max_iters,
        )?;
        Ok(s.clamp(0.0, 1.0))
    }

    /// Returns `true` if `query` is not behind the normal line at `s = 0`.
    fn ahead_of_start(&self, query: &Point2) -> Result<bool> {
        let along = (query - self.point(0.0)?).dot(&self.tangent(0.0)?);
        Ok(along >= -TOLERANCE)
    }

    /// Returns `true` if `query` is not beyond the normal line at `s = 1`.
    fn behind_end(&self, query: &Point2) -> Result<bool> {
        let along = (query - self.point(1.0)?).dot(&self.tangent(1.0)?);
        Ok(along <= TOLERANCE)
    }
}

impl Path for Spline {
    fn point(&self, s: f64) -> Result<Point2> {
        let segment = self.segment_for(s)?;
        Ok(segment.point_at(segment.to_local(s)))
    }

    fn tangent(&self, s: f64) -> Result<Vector2> {
        let segment = self.segment_for(s)?;
        Ok(segment.tangent_at(segment.to_local(s)))
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn closest_point(&self, query: &Point2, _guess: f64) -> Result<f64> {
        self.closest_point_arcs(query)
    }
}
