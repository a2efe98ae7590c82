use std::f32::consts::{PI, TAU};

use super::Vector3;

/// Angle from `from` to `to` measured toward `up`, in `(0, 2*pi]`.
///
/// The unsigned angle between the two directions is used as is while `to`
/// lies on the positive side of `up`. Otherwise a half turn is added, which
/// lets a single arc describe more than half a circle.
#[must_use]
pub fn reflex_angle(from: &Vector3, to: &Vector3, up: &Vector3) -> f32 {
    let angle = from.angle(to);
    if up.dot(to) <= 0.0 {
        angle + PI
    } else {
        angle
    }
}

/// Maps an angle from `atan2` into `[0, 2*pi)`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}

/// Counts how many of the given flags are set.
#[must_use]
pub fn count_true(flags: &[bool]) -> usize {
    flags.iter().filter(|&&flag| flag).count()
}
