mod closest_point;
mod sample;

pub use closest_point::{ClosestPointOnPath, ClosestPointResult};
pub use sample::SamplePath;
