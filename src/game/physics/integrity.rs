//! Structural Integrity
//!
//! Decides which placed parts are still held up. Foundations rest on
//! terrain and are always stable; every other part is stable only if a
//! stable part offers it a matching snap point. Stability spreads outward
//! from the foundations until a full pass adds nothing, so parts that only
//! hold each other up (two walls leaning on each other, say) never become
//! stable.

use std::collections::BTreeSet;

use crate::game::building::{
    ComponentCatalog, KindFilter, PartId, PlacedPart, SnapPointGenerator, StructureGraph,
    SupportTolerance,
};

/// Stable-set solver over a structure graph.
#[derive(Debug, Clone, Copy)]
pub struct IntegrityChecker<'a> {
    catalog: &'a ComponentCatalog,
    tolerance: SupportTolerance,
}

impl<'a> IntegrityChecker<'a> {
    pub fn new(catalog: &'a ComponentCatalog, tolerance: SupportTolerance) -> Self {
        Self { catalog, tolerance }
    }

    /// Whether some part in `stable` carries `part`.
    fn held_by_stable(&self, graph: &StructureGraph, part: &PlacedPart, stable: &BTreeSet<PartId>) -> bool {
        let snaps = SnapPointGenerator::new(self.catalog);
        graph
            .neighbors_within(
                part.transform.position,
                self.catalog.support_search_radius(),
                KindFilter::SupportersOf(part.kind.role()),
            )
            .into_iter()
            .filter(|other| other.id != part.id && stable.contains(&other.id))
            .any(|other| {
                snaps
                    .supports(other, part.kind, &part.transform, &self.tolerance)
                    .is_some()
            })
    }

    /// Ids of every part that is not held up, in id order.
    ///
    /// Reads the graph only; nothing is removed.
    pub fn recompute(&self, graph: &StructureGraph) -> BTreeSet<PartId> {
        let mut stable: BTreeSet<PartId> = graph
            .all()
            .filter(|part| part.kind.role().is_root())
            .map(|part| part.id)
            .collect();

        let max_passes = graph.len() + 1;
        let mut passes = 0;
        loop {
            passes += 1;
            if passes > max_passes {
                log::error!(
                    "[Integrity] stable set did not converge after {} passes over {} parts",
                    max_passes,
                    graph.len()
                );
                debug_assert!(false, "integrity fixpoint exceeded its pass bound");
                break;
            }

            let mut grew = false;
            for part in graph.all() {
                if stable.contains(&part.id) {
                    continue;
                }
                if self.held_by_stable(graph, part, &stable) {
                    stable.insert(part.id);
                    grew = true;
                }
            }
            if !grew {
                break;
            }
        }

        let unstable: BTreeSet<PartId> = graph
            .all()
            .map(|part| part.id)
            .filter(|id| !stable.contains(id))
            .collect();
        log::debug!(
            "[Integrity] {} stable, {} unstable after {} passes",
            stable.len(),
            unstable.len(),
            passes
        );
        unstable
    }

    /// Remove unstable parts batch by batch until the structure is settled.
    ///
    /// Returns every removed part in removal order.
    pub fn run_to_convergence(&self, graph: &mut StructureGraph) -> Vec<PlacedPart> {
        let mut collapsed = Vec::new();
        let max_rounds = graph.len() + 1;
        for _ in 0..max_rounds {
            let unstable = self.recompute(graph);
            if unstable.is_empty() {
                return collapsed;
            }
            log::info!("[Integrity] collapsing {} unsupported parts", unstable.len());
            collapsed.extend(graph.remove_many(unstable));
        }

        if !self.recompute(graph).is_empty() {
            log::error!(
                "[Integrity] structure still unsettled after {} removal rounds",
                max_rounds
            );
            debug_assert!(false, "integrity removal exceeded its round bound");
        }
        collapsed
    }
}
