use crate::debug;
use crate::error::{GeometryError, Result, SpherewalkError};
use crate::math::{count_true, reflex_angle, wrap_angle, Vector3, FRAME_TOLERANCE, TOLERANCE};

use super::bounds::{Aabb, BoundingVolume, GradientParams};

/// Height used to probe the center-of-mass path when measuring distances.
pub const PROBE_HEIGHT: f32 = 0.01;

/// The circle traced by a body's center of mass at a given height above the foot path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevatedCircle {
    /// Circle center, raised along the path normal.
    pub center: Vector3,
    /// Circle radius, pulled in toward the normal axis.
    pub radius: f32,
}

/// One circular-arc lane of a path on the surface of a sphere.
///
/// The arc lies in a plane that cuts the sphere. It starts at parameter `0`
/// and ends at [`arc_length`](Self::arc_length), where the parameter is
/// measured as arc length along the foot path.
///
/// `P(t) = center - left * r * cos(t / r) + left_up * r * sin(t / r)`
///
/// The `-left` term is the lane's sign convention: parameter `0` maps onto
/// the mirror of the left edge while the sweep turns toward `left_up`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSegment {
    path_center: Vector3,
    path_normal: Vector3,
    arc_left: Vector3,
    arc_right: Vector3,
    arc_left_up: Vector3,
    arc_right_down: Vector3,
    arc_radius: f32,
    arc_angle: f32,
}

impl ArcSegment {
    /// Builds the frame of an arc from its two foot-level edges.
    ///
    /// # Arguments
    ///
    /// * `left_edge` - First edge point, where the feet enter the arc
    /// * `right_edge` - Second edge point, where the feet leave the arc
    /// * `normal` - Normal of the arc plane. Its sign selects which side is "up"
    ///   for the center of mass. It is normalized before use.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidFrame`] if any input is not finite, the
    /// normal is zero-length, the edges are not coplanar with the normal, either
    /// edge sits on the normal axis, or the edges point the same way.
    pub fn new(left_edge: Vector3, right_edge: Vector3, normal: Vector3) -> Result<Self> {
        let finite = left_edge
            .iter()
            .chain(right_edge.iter())
            .chain(normal.iter())
            .all(|c| c.is_finite());
        if !finite {
            return Err(invalid_frame("input is not finite"));
        }

        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(invalid_frame("normal is zero-length"));
        }
        debug::assert(
            (normal_len - 1.0).abs() < FRAME_TOLERANCE,
            "arc frame normal should be unit length",
        );
        let path_normal = normal / normal_len;

        if (right_edge - left_edge).dot(&path_normal).abs() > FRAME_TOLERANCE {
            return Err(invalid_frame("edges are not coplanar with the normal"));
        }

        let path_center = path_normal * left_edge.dot(&path_normal);

        let left_offset = left_edge - path_center;
        let arc_radius = left_offset.norm();
        if arc_radius < TOLERANCE {
            return Err(invalid_frame("left edge lies on the normal axis"));
        }
        let right_offset = right_edge - path_center;
        let right_radius = right_offset.norm();
        if right_radius < TOLERANCE {
            return Err(invalid_frame("right edge lies on the normal axis"));
        }

        let arc_left = left_offset / arc_radius;
        let arc_right = right_offset / right_radius;
        if (arc_left - arc_right).norm() < FRAME_TOLERANCE {
            return Err(invalid_frame("edges are coincident"));
        }

        let arc_left_up = path_normal.cross(&arc_left);
        let arc_right_down = -path_normal.cross(&arc_right);
        let arc_angle = reflex_angle(&arc_left, &arc_right, &arc_left_up);

        Ok(Self {
            path_center,
            path_normal,
            arc_left,
            arc_right,
            arc_left_up,
            arc_right_down,
            arc_radius,
            arc_angle,
        })
    }

    /// Rebuilds this segment's frame in place, discarding the previous geometry.
    ///
    /// On error the segment is left unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn initialize(
        &mut self,
        left_edge: Vector3,
        right_edge: Vector3,
        normal: Vector3,
    ) -> Result<()> {
        *self = Self::new(left_edge, right_edge, normal)?;
        Ok(())
    }

    /// Returns the center of the circle containing the arc.
    #[must_use]
    pub fn path_center(&self) -> &Vector3 {
        &self.path_center
    }

    /// Returns the unit normal of the arc plane.
    #[must_use]
    pub fn path_normal(&self) -> &Vector3 {
        &self.path_normal
    }

    /// Returns the unit direction from the center to the left edge.
    #[must_use]
    pub fn arc_left(&self) -> &Vector3 {
        &self.arc_left
    }

    /// Returns the unit direction from the center to the right edge.
    #[must_use]
    pub fn arc_right(&self) -> &Vector3 {
        &self.arc_right
    }

    /// Returns the in-plane direction orthogonal to `arc_left`, toward increasing parameter.
    #[must_use]
    pub fn arc_left_up(&self) -> &Vector3 {
        &self.arc_left_up
    }

    /// Returns the mirror of `arc_left_up` anchored at the right edge.
    #[must_use]
    pub fn arc_right_down(&self) -> &Vector3 {
        &self.arc_right_down
    }

    /// Returns the foot-path circle radius.
    #[must_use]
    pub fn arc_radius(&self) -> f32 {
        self.arc_radius
    }

    /// Returns the angular extent in radians, in `(0, 2*pi]`.
    #[must_use]
    pub fn arc_angle(&self) -> f32 {
        self.arc_angle
    }

    /// Returns the parameter at the end of the arc.
    #[must_use]
    pub fn arc_length(&self) -> f32 {
        self.arc_angle * self.arc_radius
    }

    /// Returns the center-of-mass circle for a body raised by `height`.
    ///
    /// `height` acts like a small pitch: the circle rises by `h * sin(h)`
    /// along the normal and shrinks by `h - h * cos(h)`.
    #[must_use]
    pub fn elevated(&self, height: f32) -> ElevatedCircle {
        let (sin, cos) = height.sin_cos();
        ElevatedCircle {
            center: self.path_center + self.path_normal * (height * sin),
            radius: self.arc_radius - (height - height * cos),
        }
    }

    /// Evaluates the foot path at parameter `t`.
    ///
    /// No bounds are enforced; parameters outside the arc extrapolate around
    /// the full circle.
    #[must_use]
    pub fn evaluate(&self, t: f32) -> Vector3 {
        self.evaluate_at_height(t, 0.0)
    }

    /// Evaluates the center-of-mass path at parameter `t` for a body raised by `height`.
    #[must_use]
    pub fn evaluate_at_height(&self, t: f32, height: f32) -> Vector3 {
        let circle = self.elevated(height);
        let (sin, cos) = (t / self.arc_radius).sin_cos();
        -self.arc_left * (circle.radius * cos) + self.arc_left_up * (circle.radius * sin) + circle.center
    }

    /// Returns the unit direction of travel at parameter `t`.
    #[must_use]
    pub fn evaluate_right(&self, t: f32) -> Vector3 {
        let (sin, cos) = (t / self.arc_radius).sin_cos();
        self.arc_left_up * cos + self.arc_left * sin
    }

    /// Returns the surface normal at `pos` for a body facing along `right`.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn evaluate_normal(&self, pos: &Vector3, right: &Vector3) -> Vector3 {
        right.cross(pos)
    }

    /// Returns whether a body at `pos` is standing on this segment.
    ///
    /// `radius_sine` is the sine of the body's angular radius: how far above
    /// the arc plane the body may be and still count as on it.
    ///
    /// Membership is approximate. The elevation must be in range and at least
    /// two of three half-space tests must pass: left side, right side, and
    /// whether the arc is obtuse.
    #[must_use]
    pub fn contains(&self, pos: &Vector3, radius_sine: f32) -> bool {
        let elevation = (pos - self.path_center).dot(&self.path_normal);
        let at_elevation = 0.0 <= elevation && elevation <= radius_sine;

        let left_contains = pos.dot(&self.arc_left_up) >= 0.0;
        let right_contains = pos.dot(&self.arc_right_down) >= 0.0;
        let obtuse = self.arc_left.dot(&self.arc_right) <= 0.0;

        at_elevation && count_true(&[left_contains, right_contains, obtuse]) >= 2
    }

    /// Finds where the great circle through `from` and `to` crosses this arc.
    ///
    /// Both vectors are directions from the sphere center. The crossing on the
    /// side of `from` is used. Returns the arc-length parameter of the crossing,
    /// or `None` when it falls outside the arc or the planes do not cross.
    #[must_use]
    pub fn intersect(&self, to: &Vector3, from: &Vector3, height: f32) -> Option<f32> {
        let right = from.cross(to);
        let mut secant = self.path_normal.cross(&right);
        if secant.dot(from) < 0.0 {
            secant = -secant;
        }
        let secant_len = secant.norm();
        if secant_len < TOLERANCE {
            return None;
        }
        let secant = secant / secant_len;

        let circle = self.elevated(height);
        if circle.radius.abs() < TOLERANCE {
            return None;
        }
        let intersection = circle.center + secant * circle.radius;

        let x = intersection.dot(&-self.arc_left) / circle.radius;
        let y = intersection.dot(&self.arc_left_up) / circle.radius;
        let angle = wrap_angle(y.atan2(x));

        (angle <= self.arc_angle).then_some(angle * self.arc_radius)
    }

    /// Straight-line distance from `from` to the point where its path toward
    /// `to` crosses this arc, probed at [`PROBE_HEIGHT`].
    #[must_use]
    pub fn distance(&self, to: &Vector3, from: &Vector3) -> Option<f32> {
        self.distance_at(to, from, PROBE_HEIGHT)
    }

    /// Like [`distance`](Self::distance) with an explicit probe height.
    #[must_use]
    pub fn distance_at(&self, to: &Vector3, from: &Vector3, height: f32) -> Option<f32> {
        let t = self.intersect(to, from, height)?;
        Some((from - self.evaluate_at_height(t, height)).norm())
    }

    /// Returns the foot-path point whose projection onto `desired` is largest.
    #[must_use]
    pub fn max_gradient(&self, desired: &Vector3) -> Vector3 {
        self.max_gradient_with(desired, GradientParams::default())
    }

    /// Directional maximization with explicit search parameters.
    ///
    /// The arc is split into `params.quadrants` equal ranges. Each range is
    /// narrowed by bisection, dropping the half whose end projects lower, and
    /// both final ends of every range compete for the maximum.
    #[must_use]
    pub fn max_gradient_with(&self, desired: &Vector3, params: GradientParams) -> Vector3 {
        let extent = self.arc_length();
        let quadrants = params.quadrants.max(1);

        let mut max_gradient = Vector3::zeros();
        let mut max_product = f32::NEG_INFINITY;

        for quadrant in 0..quadrants {
            let mut left = extent * (f32::from(quadrant) / f32::from(quadrants));
            let mut right = extent * (f32::from(quadrant + 1) / f32::from(quadrants));
            tracing::trace!(quadrant, left, right, "searching arc range");

            let mut left_product = self.evaluate(left).dot(desired);
            let mut right_product = self.evaluate(right).dot(desired);

            for _ in 0..params.iterations {
                #[allow(clippy::manual_midpoint)]
                let midpoint = (left + right) / 2.0;
                if left_product < right_product {
                    left = midpoint;
                    left_product = self.evaluate(left).dot(desired);
                } else {
                    right = midpoint;
                    right_product = self.evaluate(right).dot(desired);
                }
            }

            if max_product < right_product {
                max_gradient = self.evaluate(right);
                max_product = right_product;
            }
            if max_product < left_product {
                max_gradient = self.evaluate(left);
                max_product = left_product;
            }
        }
        max_gradient
    }

    /// Overwrites `volume` with a box enclosing the foot path.
    pub fn recalculate_aabb(&self, volume: &mut impl BoundingVolume) {
        let x_min = self.max_gradient(&-Vector3::x()).x;
        let x_max = self.max_gradient(&Vector3::x()).x;
        let y_min = self.max_gradient(&-Vector3::y()).y;
        let y_max = self.max_gradient(&Vector3::y()).y;
        let z_min = self.max_gradient(&-Vector3::z()).z;
        let z_max = self.max_gradient(&Vector3::z()).z;

        let aabb = Aabb::from_corners(
            Vector3::new(x_min, y_min, z_min),
            Vector3::new(x_max, y_max, z_max),
        );
        volume.set_center(aabb.center);
        volume.set_size(aabb.size);
    }

    /// Returns a box enclosing the foot path.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        let mut aabb = Aabb::default();
        self.recalculate_aabb(&mut aabb);
        aabb
    }
}

fn invalid_frame(reason: &str) -> SpherewalkError {
    tracing::debug!(reason, "rejected arc frame");
    GeometryError::InvalidFrame(reason.to_owned()).into()
}
