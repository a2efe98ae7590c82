pub mod spherical;

pub use spherical::{count_true, reflex_angle, wrap_angle};

/// 3D vector type. Positions are measured from the sphere center.
pub type Vector3 = nalgebra::Vector3<f32>;

/// Global tolerance for single-precision comparisons.
pub const TOLERANCE: f32 = 1e-6;

/// Maximum out-of-plane offset accepted between the two edges of an arc frame.
pub const FRAME_TOLERANCE: f32 = 1e-3;
