//! Snap Point Generation
//!
//! Where a part of some target kind may attach to an already placed part.
//! The relation table below is the definition of structural attachment:
//! placement snaps to these points and support checks look for them.
//!
//! | Existing   | Target     | Points (existing part's local frame)        | Relation |
//! |------------|------------|---------------------------------------------|----------|
//! | Foundation | wall panel | four edge midpoints on top                  | Below    |
//! | wall panel | Ceiling    | centered on top                             | Below    |
//! | wall panel | wall panel | both ends, flush end-to-end                 | Adjacent |
//! | wall panel | wall panel | centered on top (next story)                | Below    |
//! | Ceiling    | wall panel | four edge midpoints on top                  | Below    |
//! | Ceiling    | Ceiling    | one grid cell away along local X and Z      | Adjacent |

use glam::Vec3;

use super::catalog::{ComponentCatalog, ComponentKind, SupportRole};
use super::part::{PartTransform, PlacedPart};
use crate::world::yaws_aligned;
use std::f32::consts::{FRAC_PI_2, PI};

/// How a snapped part relates to the part it attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapRelation {
    /// The existing part sits beneath the attached one
    Below,
    /// The parts sit side by side at the same height
    Adjacent,
}

/// A world-space attachment point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoint {
    pub position: Vec3,
    pub relation: SnapRelation,
}

/// Slack allowed when matching a part against a snap point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportTolerance {
    /// XZ distance (meters)
    pub horizontal: f32,
    /// Y distance (meters)
    pub vertical: f32,
    /// Yaw difference for adjacent relations (radians)
    pub adjacent_yaw: f32,
}

impl Default for SupportTolerance {
    fn default() -> Self {
        Self {
            horizontal: 0.5,
            vertical: 0.2,
            adjacent_yaw: 0.05,
        }
    }
}

/// Enumerates attachment points on placed parts.
#[derive(Debug, Clone, Copy)]
pub struct SnapPointGenerator<'a> {
    catalog: &'a ComponentCatalog,
}

impl<'a> SnapPointGenerator<'a> {
    pub fn new(catalog: &'a ComponentCatalog) -> Self {
        Self { catalog }
    }

    /// Snap points on `existing` at which a part of `target` could attach.
    pub fn generate(&self, existing: &PlacedPart, target: ComponentKind) -> Vec<SnapPoint> {
        let existing_spec = self.catalog.get(existing.kind);
        let target_spec = self.catalog.get(target);
        let half = existing_spec.half_extents();
        let stack_height = existing_spec.half_height() + target_spec.half_height();

        let mut local: Vec<(Vec3, SnapRelation)> = Vec::with_capacity(4);
        match (existing_spec.role, target_spec.role) {
            (SupportRole::Foundation | SupportRole::Ceiling, SupportRole::WallPanel) => {
                for offset in [
                    Vec3::new(half.x, stack_height, 0.0),
                    Vec3::new(-half.x, stack_height, 0.0),
                    Vec3::new(0.0, stack_height, half.z),
                    Vec3::new(0.0, stack_height, -half.z),
                ] {
                    local.push((offset, SnapRelation::Below));
                }
            }
            (SupportRole::WallPanel, SupportRole::Ceiling) => {
                local.push((Vec3::new(0.0, stack_height, 0.0), SnapRelation::Below));
            }
            (SupportRole::WallPanel, SupportRole::WallPanel) => {
                let reach = half.x + target_spec.half_extents().x;
                local.push((Vec3::new(reach, 0.0, 0.0), SnapRelation::Adjacent));
                local.push((Vec3::new(-reach, 0.0, 0.0), SnapRelation::Adjacent));
                local.push((Vec3::new(0.0, stack_height, 0.0), SnapRelation::Below));
            }
            (SupportRole::Ceiling, SupportRole::Ceiling) => {
                let grid = self.catalog.grid_size();
                for offset in [
                    Vec3::new(grid, 0.0, 0.0),
                    Vec3::new(-grid, 0.0, 0.0),
                    Vec3::new(0.0, 0.0, grid),
                    Vec3::new(0.0, 0.0, -grid),
                ] {
                    local.push((offset, SnapRelation::Adjacent));
                }
            }
            (SupportRole::Foundation, SupportRole::Foundation | SupportRole::Ceiling)
            | (SupportRole::WallPanel | SupportRole::Ceiling, SupportRole::Foundation) => {}
        }

        local
            .into_iter()
            .map(|(offset, relation)| SnapPoint {
                position: existing.transform.local_to_world(offset),
                relation,
            })
            .collect()
    }

    /// Inverse relation: does `supporter` offer a snap point matching a part
    /// of `kind` at `transform`?
    ///
    /// Adjacent points only count when both parts face the same way (up to
    /// the target's footprint symmetry).
    pub fn supports(
        &self,
        supporter: &PlacedPart,
        kind: ComponentKind,
        transform: &PartTransform,
        tolerance: &SupportTolerance,
    ) -> Option<SnapRelation> {
        let target_spec = self.catalog.get(kind);
        if !supporter.kind.role().supports(target_spec.role) {
            return None;
        }
        let symmetry = if target_spec.is_square() { FRAC_PI_2 } else { PI };

        self.generate(supporter, kind)
            .into_iter()
            .find(|point| {
                let delta = point.position - transform.position;
                let horizontal = (delta.x * delta.x + delta.z * delta.z).sqrt();
                if horizontal > tolerance.horizontal || delta.y.abs() > tolerance.vertical {
                    return false;
                }
                match point.relation {
                    SnapRelation::Below => true,
                    SnapRelation::Adjacent => yaws_aligned(
                        supporter.transform.yaw,
                        transform.yaw,
                        symmetry,
                        tolerance.adjacent_yaw,
                    ),
                }
            })
            .map(|point| point.relation)
    }
}
