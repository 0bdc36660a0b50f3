//! Axis-aligned bounding box over `f32` world positions.

use glam::Vec3;

/// Axis-aligned bounding box.
///
/// Invariant: `min <= max` on every axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Vec3,
    /// Maximum corner of the bounding box.
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from two corners, sorting components so `min <= max`.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// A zero-sized box at `point`.
    pub fn from_point(point: Vec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Extend the box to enclose `point`.
    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Returns the center point of the AABB.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the half-extents (half-size along each axis).
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Squared distance from `point` to the nearest point of the box; zero inside.
    pub fn distance_squared(&self, point: Vec3) -> f32 {
        point.clamp(self.min, self.max).distance_squared(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_sorts_corners() {
        let aabb = Aabb::new(Vec3::new(10.0, 0.0, 5.0), Vec3::new(0.0, 10.0, -5.0));
        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(aabb.max, Vec3::new(10.0, 10.0, 5.0));
    }

    #[test]
    fn test_grow_from_point() {
        let mut aabb = Aabb::from_point(Vec3::new(1.0, 2.0, 3.0));
        aabb.grow(Vec3::new(-1.0, 5.0, 3.0));
        aabb.grow(Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(aabb.min, Vec3::new(-1.0, 0.0, 3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 5.0, 4.0));
        assert_eq!(aabb.center(), Vec3::new(0.0, 2.5, 3.5));
        assert_eq!(aabb.extents(), Vec3::new(1.0, 2.5, 0.5));
    }

    #[test]
    fn test_distance_squared() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::splat(10.0));
        assert_eq!(aabb.distance_squared(Vec3::splat(5.0)), 0.0);
        assert_eq!(aabb.distance_squared(Vec3::new(13.0, 5.0, 5.0)), 9.0);
        assert_eq!(aabb.distance_squared(Vec3::new(-3.0, 14.0, 5.0)), 25.0);
    }

    #[test]
    fn test_contains_point_on_edge() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains_point(Vec3::ZERO));
        assert!(aabb.contains_point(Vec3::ONE));
        assert!(!aabb.contains_point(Vec3::new(1.5, 0.5, 0.5)));
    }
}
