use crate::math::Vector3;

/// Sink for a derived bounding box, such as a collider owned elsewhere.
pub trait BoundingVolume {
    /// Overwrites the box center.
    fn set_center(&mut self, center: Vector3);

    /// Overwrites the box extent along each axis.
    fn set_size(&mut self, size: Vector3);
}

/// An axis-aligned bounding box stored as center and size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aabb {
    /// Center of the box.
    pub center: Vector3,
    /// Full extent along each axis.
    pub size: Vector3,
}

impl Aabb {
    /// Creates a box spanning the two corners.
    #[must_use]
    pub fn from_corners(min: Vector3, max: Vector3) -> Self {
        Self {
            center: (min + max) / 2.0,
            size: max - min,
        }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vector3 {
        self.center - self.size / 2.0
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vector3 {
        self.center + self.size / 2.0
    }

    /// Returns whether `point` lies inside the box, expanded by `margin` on every side.
    #[must_use]
    pub fn contains_point(&self, point: &Vector3, margin: f32) -> bool {
        let min = self.min();
        let max = self.max();
        (0..3).all(|i| point[i] >= min[i] - margin && point[i] <= max[i] + margin)
    }
}

impl BoundingVolume for Aabb {
    fn set_center(&mut self, center: Vector3) {
        self.center = center;
    }

    fn set_size(&mut self, size: Vector3) {
        self.size = size;
    }
}

/// Parameters of the directional maximization search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientParams {
    /// Number of equal sub-ranges searched independently.
    ///
    /// Splitting keeps a full-circle arc from being ambiguous where its
    /// two ends coincide. Zero is treated as one.
    pub quadrants: u16,
    /// Bisection steps per sub-range.
    pub iterations: usize,
}

impl Default for GradientParams {
    fn default() -> Self {
        Self {
            quadrants: 4,
            iterations: 8 * std::mem::size_of::<f32>(),
        }
    }
}
