//! Placement Validation
//!
//! Checks a candidate transform against the world and the structure. The
//! checks run in a fixed order and stop at the first failure, so the
//! player always sees the most basic problem first.

use glam::Vec3;

use crate::game::building::{
    ComponentCatalog, ComponentKind, KindFilter, KindSpec, PartId, PartTransform, RejectReason,
    SnapPointGenerator, StructureGraph, SupportRole, part_aabb,
};
use crate::game::config::BuildConfig;
use crate::game::economy::ResourceLedger;
use crate::world::Terrain;

/// Read-only rule checker for candidate placements.
#[derive(Debug, Clone, Copy)]
pub struct PlacementValidator<'a> {
    catalog: &'a ComponentCatalog,
    graph: &'a StructureGraph,
    config: &'a BuildConfig,
}

impl<'a> PlacementValidator<'a> {
    pub fn new(catalog: &'a ComponentCatalog, graph: &'a StructureGraph, config: &'a BuildConfig) -> Self {
        Self { catalog, graph, config }
    }

    /// Accept or reject placing `kind` at `transform`.
    pub fn validate(
        &self,
        transform: &PartTransform,
        kind: ComponentKind,
        terrain: &dyn Terrain,
        ledger: &dyn ResourceLedger,
    ) -> Result<(), RejectReason> {
        let spec = self.catalog.get(kind);

        if transform.position.y < terrain.water_level() + self.config.water_clearance {
            return Err(RejectReason::Underwater);
        }

        if let Some(blocker) = self.first_overlap(spec, transform) {
            log::debug!("[Build] {} blocked by {}", kind.display_name(), blocker);
            return Err(RejectReason::Overlap);
        }

        if spec.role == SupportRole::Foundation {
            self.check_ground(spec, transform, terrain)?;
        } else if self.supporting_part(kind, transform).is_none() {
            return Err(RejectReason::NoSupport);
        }

        if !ledger.can_afford(spec.cost) {
            return Err(RejectReason::InsufficientResources);
        }

        Ok(())
    }

    /// First part (by id) whose bounds interpenetrate the candidate's on
    /// every axis by more than the overlap epsilon.
    fn first_overlap(&self, spec: &KindSpec, transform: &PartTransform) -> Option<PartId> {
        let candidate = part_aabb(spec, transform);
        let radius = spec.bounding_radius() + self.catalog.max_bounding_radius();
        self.graph
            .neighbors_within(transform.position, radius, KindFilter::Any)
            .into_iter()
            .find(|other| {
                let bounds = other.aabb(self.catalog.get(other.kind));
                candidate.penetrates(&bounds, self.config.overlap_epsilon)
            })
            .map(|other| other.id)
    }

    /// Foundations need defined, roughly level ground under all four corners.
    fn check_ground(&self, spec: &KindSpec, transform: &PartTransform, terrain: &dyn Terrain) -> Result<(), RejectReason> {
        let half = spec.half_extents();
        let mut min_height = f32::INFINITY;
        let mut max_height = f32::NEG_INFINITY;
        for (sx, sz) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)] {
            let corner = transform.local_to_world(Vec3::new(sx * half.x, 0.0, sz * half.z));
            let height = terrain
                .height_at(corner.x, corner.z)
                .ok_or(RejectReason::UndefinedTerrain)?;
            min_height = min_height.min(height);
            max_height = max_height.max(height);
        }

        if max_height - min_height > self.config.max_ground_variance {
            return Err(RejectReason::UnevenGround);
        }
        Ok(())
    }

    /// Lowest-id part that offers `kind` a matching snap point at `transform`.
    ///
    /// Foundations rest on terrain and never have one.
    pub fn supporting_part(&self, kind: ComponentKind, transform: &PartTransform) -> Option<PartId> {
        let role = kind.role();
        if role.is_root() {
            return None;
        }
        let snaps = SnapPointGenerator::new(self.catalog);
        let tolerance = self.config.support_tolerance();
        self.graph
            .neighbors_within(
                transform.position,
                self.catalog.support_search_radius(),
                KindFilter::SupportersOf(role),
            )
            .into_iter()
            .find(|part| snaps.supports(part, kind, transform, &tolerance).is_some())
            .map(|part| part.id)
    }
}
