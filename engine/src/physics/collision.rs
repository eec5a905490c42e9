//! Collision detection module
//!
//! Axis-aligned bounding boxes for placed building parts.
//!
//! Parts only rotate around Y (yaw), so every part's world-space bounds are
//! an AABB built from its local half-extents after the yaw rotation.
//! Overlap is measured as a per-axis penetration depth so that flush
//! contact (zero depth on one axis) can be told apart from genuine
//! interpenetration.
//!
//! # Example
//!
//! ```ignore
//! use fort_builder_engine::physics::AABB;
//! use glam::Vec3;
//!
//! let a = AABB::from_center_half_extents(Vec3::ZERO, Vec3::splat(1.0));
//! let b = AABB::from_center_half_extents(Vec3::new(2.0, 0.0, 0.0), Vec3::splat(1.0));
//!
//! // Touching faces, no penetration
//! assert!(!a.penetrates(&b, 0.1));
//! ```

use glam::Vec3;

/// Rounding slack added to penetration thresholds.
pub const PENETRATION_SLACK: f32 = 1e-4;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Build a box around `center` extending `half_extents` along each axis.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Bounds of a box with local `half_extents` rotated by `yaw` around Y.
    pub fn from_yawed_box(center: Vec3, half_extents: Vec3, yaw: f32) -> Self {
        Self::from_center_half_extents(center, yawed_half_extents(half_extents, yaw))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Strict intersection test (touching faces do not intersect)
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Per-axis overlap between the two boxes.
    ///
    /// Positive components are penetration depth, zero is flush contact and
    /// negative components are the gap between the boxes on that axis.
    pub fn overlap_depth(&self, other: &AABB) -> Vec3 {
        self.max.min(other.max) - self.min.max(other.min)
    }

    /// True when the boxes interpenetrate by more than `epsilon` on every
    /// axis at once. Depths within [`PENETRATION_SLACK`] of `epsilon` count
    /// as contact.
    pub fn penetrates(&self, other: &AABB, epsilon: f32) -> bool {
        self.overlap_depth(other).min_element() > epsilon + PENETRATION_SLACK
    }
}

/// World-axis half-extents of a box with local `half_extents` after a yaw
/// rotation around Y.
pub fn yawed_half_extents(half_extents: Vec3, yaw: f32) -> Vec3 {
    let (sin, cos) = yaw.sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Vec3::new(
        cos * half_extents.x + sin * half_extents.z,
        half_extents.y,
        sin * half_extents.x + cos * half_extents.z,
    )
}
