mod arc_segment;
mod bounds;

pub use arc_segment::{ArcSegment, ElevatedCircle, PROBE_HEIGHT};
pub use bounds::{Aabb, BoundingVolume, GradientParams};
