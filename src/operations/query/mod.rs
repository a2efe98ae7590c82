mod locate_segment;
mod recalculate_aabb;

pub use locate_segment::LocateSegment;
pub use recalculate_aabb::RecalculateAabb;
