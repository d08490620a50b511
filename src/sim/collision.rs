//! Axis-aligned bounding box collision
//!
//! Every entity in the playfield is an axis-aligned rectangle anchored at its
//! top-left corner. Overlap uses open intervals: rectangles that only touch
//! along an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Square of side `side` at `min`
    pub fn square(min: Vec2, side: f32) -> Self {
        Self::new(min, Vec2::splat(side))
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test (touching edges don't count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// True once no part of the box lies inside `[0, width] x [0, height]`
    #[inline]
    pub fn is_outside(&self, width: f32, height: f32) -> bool {
        let max = self.max();
        max.x < 0.0 || self.min.x > width || max.y < 0.0 || self.min.y > height
    }
}
