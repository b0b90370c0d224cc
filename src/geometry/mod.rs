pub mod path;
pub mod pose;

pub use path::{ArcPiece, ArcShape, LinePath, Path, Segment, Spline};
pub use pose::Pose;
