//! Placed Parts
//!
//! One record per placed object. The structure graph owns these; renderers
//! refer to them only by [`PartId`].

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::catalog::{ComponentKind, KindSpec};
use crate::physics::AABB;
use crate::world::rotate_yaw;

/// Unique identifier of a placed part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartId(pub u32);

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// World placement of a part: center position and yaw around +Y.
///
/// Pitch and roll never apply to building parts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartTransform {
    pub position: Vec3,
    pub yaw: f32,
}

impl PartTransform {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    /// World position of a point given in this part's local frame.
    pub fn local_to_world(&self, offset: Vec3) -> Vec3 {
        self.position + rotate_yaw(offset, self.yaw)
    }
}

/// A placed building part
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPart {
    pub id: PartId,
    pub kind: ComponentKind,
    pub transform: PartTransform,
    pub health: f32,
    pub max_health: f32,
}

impl PlacedPart {
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// World bounds from the kind's footprint and this transform.
    pub fn aabb(&self, spec: &KindSpec) -> AABB {
        part_aabb(spec, &self.transform)
    }

    /// Health as a fraction of max health (0.0 - 1.0)
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}

/// World bounds of a part of kind `spec` placed at `transform`.
pub fn part_aabb(spec: &KindSpec, transform: &PartTransform) -> AABB {
    AABB::from_yawed_box(transform.position, spec.half_extents(), transform.yaw)
}
