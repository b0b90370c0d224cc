use crate::error::{ConstructionError, Result};

/// Tolerances that control how a spline is decomposed into arcs and how
/// the fallback search runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineConfig {
    /// Longest arc accepted as a subdivision leaf, in distance units.
    pub max_arc_length: f64,
    /// Largest absolute curvature change accepted across one leaf.
    pub max_curvature_delta: f64,
    /// Subdivision depth beyond which an interval is forced into a chord.
    pub max_depth: u32,
    /// Relative cross-product threshold below which three samples count as collinear.
    pub collinear_tolerance: f64,
    /// Fractional slack when accepting a foot point at the edge of an arc.
    pub projection_slack: f64,
    /// Half-width of the bracket searched around the caller's guess by the Brent fallback.
    pub search_window: f64,
    /// Absolute parameter tolerance of the Brent fallback.
    pub search_tolerance: f64,
    /// Iteration cap of the Brent fallback.
    pub search_max_iters: u64,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            max_arc_length: 0.1,
            max_curvature_delta: 0.1,
            max_depth: 20,
            collinear_tolerance: 1e-6,
            projection_slack: 1e-9,
            search_window: 0.1,
            search_tolerance: 1e-10,
            search_max_iters: 200,
        }
    }
}

impl SplineConfig {
    /// Checks that every tolerance is finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("max_arc_length", self.max_arc_length),
            ("max_curvature_delta", self.max_curvature_delta),
            ("collinear_tolerance", self.collinear_tolerance),
            ("search_window", self.search_window),
            ("search_tolerance", self.search_tolerance),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConstructionError::InvalidConfig(format!(
                    "{name} must be finite and positive, got {value}"
                ))
                .into());
            }
        }
        if !self.projection_slack.is_finite() || self.projection_slack < 0.0 {
            return Err(ConstructionError::InvalidConfig(format!(
                "projection_slack must be finite and non-negative, got {}",
                self.projection_slack
            ))
            .into());
        }
        if self.search_max_iters == 0 {
            return Err(
                ConstructionError::InvalidConfig("search_max_iters must be non-zero".into()).into(),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PathError;

    #[test]
    fn default_is_valid() {
        assert!(SplineConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_arc_length() {
        let config = SplineConfig {
            max_arc_length: 0.0,
            ..SplineConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            PathError::Construction(ConstructionError::InvalidConfig(ref msg))
                if msg.contains("max_arc_length")
        ));
    }

    #[test]
    fn rejects_nan_curvature_delta() {
        let config = SplineConfig {
            max_curvature_delta: f64::NAN,
            ..SplineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_slack_is_allowed() {
        let config = SplineConfig {
            projection_slack: 0.0,
            ..SplineConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
