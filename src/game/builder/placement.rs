//! Part Placement
//!
//! Turns a raw aim point into a candidate transform for the selected kind.
//! Foundations snap to the world grid and sit on the terrain; everything
//! else snaps to the nearest attachment point offered by nearby parts.

use glam::Vec3;

use crate::game::building::{
    ComponentCatalog, ComponentKind, KindFilter, PartId, PartTransform, SnapPointGenerator,
    SnapRelation, StructureGraph, SupportRole,
};
use crate::game::config::BuildConfig;
use crate::world::Terrain;

/// Result of a placement calculation
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementResult {
    /// The calculated placement transform
    pub transform: PartTransform,
    /// Whether this position snapped to an existing part (or the grid)
    pub snapped: bool,
    /// Part whose snap point was used
    pub anchor_part: Option<PartId>,
    pub relation: Option<SnapRelation>,
}

impl PlacementResult {
    pub fn new(transform: PartTransform) -> Self {
        Self {
            transform,
            snapped: false,
            anchor_part: None,
            relation: None,
        }
    }

    pub fn with_snap(transform: PartTransform, anchor_part: PartId, relation: SnapRelation) -> Self {
        Self {
            transform,
            snapped: true,
            anchor_part: Some(anchor_part),
            relation: Some(relation),
        }
    }
}

/// Computes candidate transforms; never mutates the structure.
#[derive(Debug, Clone, Copy)]
pub struct PlacementPlanner<'a> {
    catalog: &'a ComponentCatalog,
    graph: &'a StructureGraph,
    config: &'a BuildConfig,
}

impl<'a> PlacementPlanner<'a> {
    pub fn new(catalog: &'a ComponentCatalog, graph: &'a StructureGraph, config: &'a BuildConfig) -> Self {
        Self { catalog, graph, config }
    }

    /// Candidate transform for placing `kind` where the player aims.
    ///
    /// # Arguments
    /// * `hit_point` - World point under the cursor
    /// * `hit_normal` - Surface normal at the hit (need not be normalized)
    /// * `kind` - Part kind being placed
    /// * `yaw` - Player-chosen yaw
    /// * `terrain` - Ground source for foundations
    pub fn plan(
        &self,
        hit_point: Vec3,
        hit_normal: Vec3,
        kind: ComponentKind,
        yaw: f32,
        terrain: &dyn Terrain,
    ) -> PlacementResult {
        let spec = self.catalog.get(kind);
        if spec.role == SupportRole::Foundation {
            return self.plan_foundation(hit_point, spec.half_height(), yaw, terrain);
        }

        match self.nearest_snap(hit_point, kind, spec.role) {
            Some((position, anchor, relation)) => {
                PlacementResult::with_snap(PartTransform::new(position, yaw), anchor, relation)
            }
            None => {
                // Lift off the hit surface so previews rest on it
                let position = hit_point + hit_normal.normalize_or_zero() * spec.half_height();
                PlacementResult::new(PartTransform::new(position, yaw))
            }
        }
    }

    fn plan_foundation(&self, hit_point: Vec3, half_height: f32, yaw: f32, terrain: &dyn Terrain) -> PlacementResult {
        let snapped = self.config.grid().snap_to_grid(hit_point);
        let min_y = terrain.water_level() + self.config.water_clearance;
        let y = match terrain.height_at(snapped.x, snapped.z) {
            Some(ground) => ground + half_height,
            // Off-map; the validator rejects it
            None => hit_point.y,
        };

        PlacementResult {
            transform: PartTransform::new(Vec3::new(snapped.x, y.max(min_y), snapped.z), yaw),
            snapped: true,
            anchor_part: None,
            relation: None,
        }
    }

    /// Closest snap point to `hit_point` within the snap distance.
    ///
    /// Ties go to the lowest part id, then to generation order.
    fn nearest_snap(&self, hit_point: Vec3, kind: ComponentKind, role: SupportRole) -> Option<(Vec3, PartId, SnapRelation)> {
        let snaps = SnapPointGenerator::new(self.catalog);
        let search_radius = self.config.snap_distance + self.catalog.support_search_radius();

        let mut best: Option<(f32, Vec3, PartId, SnapRelation)> = None;
        for part in self
            .graph
            .neighbors_within(hit_point, search_radius, KindFilter::SupportersOf(role))
        {
            for point in snaps.generate(part, kind) {
                let dist = point.position.distance(hit_point);
                if dist > self.config.snap_distance {
                    continue;
                }
                if best.is_none_or(|(best_dist, ..)| dist < best_dist) {
                    best = Some((dist, point.position, part.id, point.relation));
                }
            }
        }

        if let Some((dist, position, anchor, _)) = best {
            log::debug!(
                "[Build] {} snapped to {} at {:?} ({:.2}m from aim)",
                kind.display_name(),
                anchor,
                position,
                dist
            );
        }
        best.map(|(_, position, anchor, relation)| (position, anchor, relation))
    }
}
