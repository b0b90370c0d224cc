//! Builds a spline through a few waypoints and follows it with a
//! simulated vehicle offset from the path.
//!
//! Run with `RUST_LOG=quintic_path=trace cargo run --example trace_spline`.
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use quintic_path::geometry::{ArcShape, Segment};
use quintic_path::operations::query::{ClosestPointOnPath, SamplePath};
use quintic_path::{Path, Pose, Spline};
use tracing_subscriber::EnvFilter;

fn main() -> quintic_path::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let spline = Spline::new(&[
        Pose::new(0.0, 0.0, 0.0),
        Pose::new(5.0, 2.0, FRAC_PI_4),
        Pose::new(8.0, 6.0, FRAC_PI_2),
    ])?;
    let (arcs, chords) = spline
        .segments()
        .iter()
        .flat_map(Segment::arcs)
        .fold((0_usize, 0_usize), |(arcs, chords), piece| match piece.shape() {
            ArcShape::Circular { .. } => (arcs + 1, chords),
            ArcShape::Chord { .. } => (arcs, chords + 1),
        });
    tracing::info!(
        length = spline.length(),
        arcs,
        chords,
        max_arc_length = spline.config().max_arc_length,
        "path ready"
    );

    for p in SamplePath::new(6).execute(&spline)? {
        tracing::info!(x = p.x, y = p.y, "sample");
    }

    let mut guess = 0.0;
    for step in 0..10 {
        let s = f64::from(step) / 10.0;
        let vehicle = spline.point(s)? + spline.normal(s)? * 0.3;
        match ClosestPointOnPath::new(vehicle, guess).execute(&spline) {
            Ok(res) => {
                guess = res.parameter;
                tracing::info!(s = res.parameter, error = res.level_set, "tracking");
            }
            Err(e) if e.is_domain() => tracing::warn!(%e, "vehicle off path"),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
