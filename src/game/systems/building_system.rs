//! Building part lifecycle management system.
//!
//! Owns the structure graph, the component catalog and the active
//! placement session, providing a single interface for previewing,
//! confirming, damaging and removing parts with zero render coupling.

use glam::Vec3;

use crate::game::builder::{PlacementPlanner, PlacementValidator};
use crate::game::building::{
    ComponentCatalog, ComponentKind, PartId, PartTransform, PlacedPart, RejectReason,
    SnapshotError, StructureGraph, StructureSnapshot,
};
use crate::game::config::BuildConfig;
use crate::game::economy::ResourceLedger;
use crate::game::physics::IntegrityChecker;
use crate::world::Terrain;

/// Previewed placement with its verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementCandidate {
    pub kind: ComponentKind,
    pub transform: PartTransform,
    pub verdict: Result<(), RejectReason>,
    /// Part whose snap point the candidate used, if any
    pub anchor_part: Option<PartId>,
}

impl PlacementCandidate {
    pub fn is_accepted(&self) -> bool {
        self.verdict.is_ok()
    }
}

#[derive(Debug, Clone)]
struct PlacementSession {
    kind: ComponentKind,
    candidate: Option<PlacementCandidate>,
}

/// Everything that disappeared because of one removal.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalReport {
    /// The part that was asked to go
    pub requested: PlacedPart,
    /// Parts that lost support and collapsed with it, in removal order
    pub collapsed: Vec<PlacedPart>,
}

impl RemovalReport {
    pub fn removed_ids(&self) -> Vec<PartId> {
        std::iter::once(self.requested.id)
            .chain(self.collapsed.iter().map(|part| part.id))
            .collect()
    }

    pub fn total(&self) -> usize {
        1 + self.collapsed.len()
    }
}

/// Result of applying damage to a part.
#[derive(Debug, Clone, PartialEq)]
pub enum DamageOutcome {
    Damaged { remaining: f32 },
    Destroyed(RemovalReport),
}

/// Read-only view of one part for renderers and UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartSummary {
    pub id: PartId,
    pub kind: ComponentKind,
    pub transform: PartTransform,
    pub health: f32,
}

/// Manages the full lifecycle of building parts.
///
/// Terrain and the resource ledger are borrowed per call; the system never
/// holds on to them.
#[derive(Debug, Clone)]
pub struct BuildingSystem {
    config: BuildConfig,
    catalog: ComponentCatalog,
    graph: StructureGraph,
    session: Option<PlacementSession>,
}

impl BuildingSystem {
    /// Out-of-range configs are replaced by the defaults.
    pub fn new(config: BuildConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("[Build] Rejected config ({}), using defaults", err);
                BuildConfig::default()
            }
        };
        Self {
            catalog: ComponentCatalog::new(config.grid_size),
            graph: StructureGraph::new(config.grid_size),
            config,
            session: None,
        }
    }

    // ------------------------------------------------------------------
    // Placement session
    // ------------------------------------------------------------------

    /// Start (or switch) placing parts of `kind`.
    pub fn begin_placement_session(&mut self, kind: ComponentKind) {
        log::debug!("[Build] Placement session started for {}", kind.display_name());
        self.session = Some(PlacementSession { kind, candidate: None });
    }

    pub fn end_placement_session(&mut self) {
        if self.session.take().is_some() {
            log::debug!("[Build] Placement session ended");
        }
    }

    pub fn active_kind(&self) -> Option<ComponentKind> {
        self.session.as_ref().map(|session| session.kind)
    }

    /// Last candidate computed by [`Self::update_candidate`].
    pub fn current_candidate(&self) -> Option<&PlacementCandidate> {
        self.session.as_ref().and_then(|session| session.candidate.as_ref())
    }

    /// Plan and validate a candidate for the session's kind at the aim point.
    ///
    /// Called every frame while aiming. Reads the structure only; the
    /// candidate is cached for [`Self::confirm_placement`].
    pub fn update_candidate(
        &mut self,
        hit_point: Vec3,
        hit_normal: Vec3,
        yaw: f32,
        terrain: &dyn Terrain,
        ledger: &dyn ResourceLedger,
    ) -> Result<PlacementCandidate, RejectReason> {
        let kind = self.active_kind().ok_or(RejectReason::NoActiveSession)?;

        let plan = PlacementPlanner::new(&self.catalog, &self.graph, &self.config)
            .plan(hit_point, hit_normal, kind, yaw, terrain);
        let verdict = PlacementValidator::new(&self.catalog, &self.graph, &self.config)
            .validate(&plan.transform, kind, terrain, ledger);

        let candidate = PlacementCandidate {
            kind,
            transform: plan.transform,
            verdict,
            anchor_part: plan.anchor_part,
        };
        if let Some(session) = self.session.as_mut() {
            session.candidate = Some(candidate.clone());
        }
        Ok(candidate)
    }

    /// Commit the cached candidate.
    ///
    /// Re-validates against the current world, then charges the ledger and
    /// inserts the part. A rejected confirmation leaves the structure and
    /// the ledger untouched.
    pub fn confirm_placement(
        &mut self,
        terrain: &dyn Terrain,
        ledger: &mut dyn ResourceLedger,
    ) -> Result<PartId, RejectReason> {
        let session = self.session.as_ref().ok_or(RejectReason::NoActiveSession)?;
        let candidate = session.candidate.as_ref().ok_or(RejectReason::NoCandidate)?;
        let kind = candidate.kind;
        let transform = candidate.transform;

        let validator = PlacementValidator::new(&self.catalog, &self.graph, &self.config);
        if let Err(reason) = validator.validate(&transform, kind, terrain, &*ledger) {
            log::warn!("[Build] {} rejected: {}", kind.display_name(), reason);
            return Err(reason);
        }

        let spec = self.catalog.get(kind);
        if !ledger.consume(spec.cost) {
            log::warn!("[Build] {} rejected: ledger refused payment", kind.display_name());
            return Err(RejectReason::InsufficientResources);
        }

        let id = self.graph.insert(kind, transform, spec.base_health);
        if let Some(session) = self.session.as_mut() {
            session.candidate = None;
        }

        log::info!(
            "[Build] Placed {} {} at ({:.1}, {:.1}, {:.1})",
            kind.display_name(),
            id,
            transform.position.x,
            transform.position.y,
            transform.position.z,
        );
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Removal and damage
    // ------------------------------------------------------------------

    /// Remove a part and everything that depended on it.
    pub fn remove_part(&mut self, id: PartId) -> Result<RemovalReport, RejectReason> {
        let requested = self.graph.remove(id)?;
        let collapsed = IntegrityChecker::new(&self.catalog, self.config.support_tolerance())
            .run_to_convergence(&mut self.graph);
        self.clear_candidate();

        log::info!(
            "[Build] Removed {} {} ({} collapsed)",
            requested.kind.display_name(),
            id,
            collapsed.len()
        );
        Ok(RemovalReport { requested, collapsed })
    }

    /// Reduce a part's health; at zero it is removed like [`Self::remove_part`].
    pub fn damage_part(&mut self, id: PartId, amount: f32) -> Result<DamageOutcome, RejectReason> {
        let health = self.graph.get(id).ok_or(RejectReason::NotFound)?.health;
        let remaining = self.graph.set_health(id, health - amount.max(0.0))?;
        if remaining > 0.0 {
            log::debug!("[Build] {} took {:.1} damage, {:.1} left", id, amount, remaining);
            return Ok(DamageOutcome::Damaged { remaining });
        }
        self.remove_part(id).map(DamageOutcome::Destroyed)
    }

    /// Heal a part up to its max health. Returns the new health.
    pub fn repair_part(&mut self, id: PartId, amount: f32) -> Result<f32, RejectReason> {
        let health = self.graph.get(id).ok_or(RejectReason::NotFound)?.health;
        self.graph.set_health(id, health + amount.max(0.0))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Every part in id order.
    pub fn list_parts(&self) -> Vec<PartSummary> {
        self.graph
            .all()
            .map(|part| PartSummary {
                id: part.id,
                kind: part.kind,
                transform: part.transform,
                health: part.health,
            })
            .collect()
    }

    pub fn part(&self, id: PartId) -> Option<&PlacedPart> {
        self.graph.get(id)
    }

    pub fn part_count(&self) -> usize {
        self.graph.len()
    }

    /// Parts that are currently not held up. Empty whenever the structure
    /// was only changed through this system.
    pub fn unsupported_parts(&self) -> Vec<PartId> {
        self.integrity().recompute(&self.graph).into_iter().collect()
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    pub fn graph(&self) -> &StructureGraph {
        &self.graph
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> StructureSnapshot {
        StructureSnapshot::from_graph(&self.graph)
    }

    /// Replace the structure with a snapshot. Returns the number of parts.
    pub fn restore(&mut self, snapshot: &StructureSnapshot) -> Result<usize, SnapshotError> {
        self.clear_candidate();
        let count = snapshot.restore_into(&mut self.graph, &self.catalog)?;

        let unsupported = self.unsupported_parts();
        if !unsupported.is_empty() {
            log::warn!(
                "[Build] Restored structure has {} unsupported parts: {:?}",
                unsupported.len(),
                unsupported
            );
        }
        log::info!("[Build] Restored {} parts", count);
        Ok(count)
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    fn integrity(&self) -> IntegrityChecker<'_> {
        IntegrityChecker::new(&self.catalog, self.config.support_tolerance())
    }

    fn clear_candidate(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.candidate = None;
        }
    }
}

impl Default for BuildingSystem {
    fn default() -> Self {
        Self::new(BuildConfig::default())
    }
}
