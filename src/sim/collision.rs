//! Axis-aligned box overlap
//!
//! Every entity in the runner is a rectangle, so a strict AABB test is all
//! the collision detection the game needs. Touching edges do not count.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in world coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box whose bottom edge is centered on `anchor`
    pub fn from_bottom_center(anchor: Vec2, size: Vec2) -> Self {
        Self {
            min: Vec2::new(anchor.x - size.x / 2.0, anchor.y - size.y),
            max: Vec2::new(anchor.x + size.x / 2.0, anchor.y),
        }
    }

    /// Box centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap test
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(15.0, 15.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let right = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let below = Aabb::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 20.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_disjoint_on_one_axis() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(2.0, 30.0), Vec2::new(8.0, 40.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_anchor_constructors() {
        let feet = Aabb::from_bottom_center(Vec2::new(100.0, 700.0), Vec2::new(30.0, 40.0));
        assert_eq!(feet.min, Vec2::new(85.0, 660.0));
        assert_eq!(feet.max, Vec2::new(115.0, 700.0));

        let centered = Aabb::from_center(Vec2::new(50.0, 50.0), Vec2::new(20.0, 20.0));
        assert_eq!(centered.min, Vec2::new(40.0, 40.0));
        assert_eq!(centered.size(), Vec2::new(20.0, 20.0));
    }
}
