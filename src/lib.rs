//! Smooth waypoint paths for vehicle and robot path following.
//!
//! A [`Spline`] joins consecutive [`Pose`]s with quintic segments and
//! approximates each one with short circular arcs, so that the closest
//! point to the vehicle can be found in closed form every control cycle.
pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use config::SplineConfig;
pub use error::{PathError, Result};
pub use geometry::{LinePath, Path, Pose, Spline};
