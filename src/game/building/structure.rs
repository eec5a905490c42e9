//! Structure Graph
//!
//! The authoritative collection of placed parts. Every mutation goes
//! through `insert`/`restore`/`remove`, which keep the id map and the
//! spatial index in step. Support edges are never stored; they are
//! recomputed on demand from snap points.

use std::collections::{BTreeMap, HashMap};

use glam::Vec3;

use super::catalog::{ComponentKind, SupportRole};
use super::part::{PartId, PartTransform, PlacedPart};
use super::reject::RejectReason;

/// Kind filter for neighbour queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    Any,
    Only(ComponentKind),
    /// Kinds whose role can carry a part with this role
    SupportersOf(SupportRole),
}

impl KindFilter {
    pub fn matches(&self, kind: ComponentKind) -> bool {
        match self {
            KindFilter::Any => true,
            KindFilter::Only(only) => *only == kind,
            KindFilter::SupportersOf(role) => kind.role().supports(*role),
        }
    }
}

/// Coarse XZ bucket grid over part centers
#[derive(Debug, Clone)]
struct SpatialIndex {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<PartId>>,
}

impl SpatialIndex {
    fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            log::warn!("[Build] Spatial index cell size {} is unusable, using 1.0", cell_size);
            1.0
        };
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    fn cell_of(&self, x: f32, z: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (z / self.cell_size).floor() as i32,
        )
    }

    fn insert(&mut self, id: PartId, position: Vec3) {
        let cell = self.cell_of(position.x, position.z);
        self.cells.entry(cell).or_default().push(id);
    }

    fn remove(&mut self, id: PartId, position: Vec3) {
        let cell = self.cell_of(position.x, position.z);
        if let Some(ids) = self.cells.get_mut(&cell) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.cells.remove(&cell);
            }
        }
    }

    /// Ids in every cell touched by the XZ square around `point`.
    fn candidates(&self, point: Vec3, radius: f32) -> impl Iterator<Item = PartId> + '_ {
        let (min_x, min_z) = self.cell_of(point.x - radius, point.z - radius);
        let (max_x, max_z) = self.cell_of(point.x + radius, point.z + radius);
        (min_x..=max_x)
            .flat_map(move |x| (min_z..=max_z).map(move |z| (x, z)))
            .filter_map(move |cell| self.cells.get(&cell))
            .flatten()
            .copied()
    }

    fn clear(&mut self) {
        self.cells.clear();
    }
}

/// Owner of all placed parts
#[derive(Debug, Clone)]
pub struct StructureGraph {
    parts: BTreeMap<PartId, PlacedPart>,
    index: SpatialIndex,
    next_id: u32,
}

impl StructureGraph {
    /// `cell_size` is the spatial index bucket size, normally the build grid.
    pub fn new(cell_size: f32) -> Self {
        Self {
            parts: BTreeMap::new(),
            index: SpatialIndex::new(cell_size),
            next_id: 1,
        }
    }

    /// Add a part with a fresh id at full health.
    pub fn insert(&mut self, kind: ComponentKind, transform: PartTransform, max_health: f32) -> PartId {
        let id = PartId(self.next_id);
        self.next_id += 1;
        self.index.insert(id, transform.position);
        self.parts.insert(
            id,
            PlacedPart {
                id,
                kind,
                transform,
                health: max_health,
                max_health,
            },
        );
        id
    }

    /// Re-insert a part under its recorded id (trusted reload).
    ///
    /// Returns the part back if the id is already taken.
    pub fn restore(&mut self, part: PlacedPart) -> Result<PartId, PlacedPart> {
        if self.parts.contains_key(&part.id) {
            return Err(part);
        }
        let id = part.id;
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.index.insert(id, part.transform.position);
        self.parts.insert(id, part);
        Ok(id)
    }

    pub fn remove(&mut self, id: PartId) -> Result<PlacedPart, RejectReason> {
        let part = self.parts.remove(&id).ok_or(RejectReason::NotFound)?;
        self.index.remove(id, part.transform.position);
        Ok(part)
    }

    /// Remove every id that is present; unknown ids are skipped.
    pub fn remove_many(&mut self, ids: impl IntoIterator<Item = PartId>) -> Vec<PlacedPart> {
        ids.into_iter().filter_map(|id| self.remove(id).ok()).collect()
    }

    pub fn get(&self, id: PartId) -> Option<&PlacedPart> {
        self.parts.get(&id)
    }

    pub fn contains(&self, id: PartId) -> bool {
        self.parts.contains_key(&id)
    }

    /// Set a part's health, clamped to `0..=max_health`. Returns the new value.
    pub fn set_health(&mut self, id: PartId, health: f32) -> Result<f32, RejectReason> {
        let part = self.parts.get_mut(&id).ok_or(RejectReason::NotFound)?;
        part.health = health.clamp(0.0, part.max_health);
        Ok(part.health)
    }

    /// Parts whose center lies within `radius` of `point`, ordered by id.
    pub fn neighbors_within(&self, point: Vec3, radius: f32, filter: KindFilter) -> Vec<&PlacedPart> {
        let radius_sq = radius * radius;
        let mut found: Vec<&PlacedPart> = self
            .index
            .candidates(point, radius)
            .filter_map(|id| self.parts.get(&id))
            .filter(|part| filter.matches(part.kind))
            .filter(|part| part.transform.position.distance_squared(point) <= radius_sq)
            .collect();
        found.sort_by_key(|part| part.id);
        found
    }

    /// All parts, ordered by id
    pub fn all(&self) -> impl Iterator<Item = &PlacedPart> {
        self.parts.values()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn clear(&mut self) {
        self.parts.clear();
        self.index.clear();
        self.next_id = 1;
    }
}

impl Default for StructureGraph {
    fn default() -> Self {
        Self::new(4.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32, z: f32) -> PartTransform {
        PartTransform::new(Vec3::new(x, y, z), 0.0)
    }

    #[test]
    fn insert_assigns_fresh_ids() {
        let mut graph = StructureGraph::default();
        let a = graph.insert(ComponentKind::Foundation, at(0.0, 0.25, 0.0), 500.0);
        let b = graph.insert(ComponentKind::Wall, at(2.0, 1.75, 0.0), 300.0);
        assert_ne!(a, b);
        assert_eq!(graph.len(), 2);

        graph.remove(b).unwrap();
        let c = graph.insert(ComponentKind::Wall, at(2.0, 1.75, 0.0), 300.0);
        assert_ne!(c, b, "ids are never reused");
    }

    #[test]
    fn zero_cell_size_still_answers_queries() {
        let mut graph = StructureGraph::new(0.0);
        let a = graph.insert(ComponentKind::Foundation, at(0.0, 0.25, 0.0), 500.0);
        graph.insert(ComponentKind::Foundation, at(40.0, 0.25, 0.0), 500.0);
        let near: Vec<_> = graph
            .neighbors_within(Vec3::new(1.0, 0.0, 1.0), 3.0, KindFilter::Any)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(near, vec![a]);
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut graph = StructureGraph::default();
        assert_eq!(graph.remove(PartId(42)), Err(RejectReason::NotFound));
        assert_eq!(graph.set_health(PartId(42), 1.0), Err(RejectReason::NotFound));
    }

    #[test]
    fn neighbor_query_filters_by_radius_and_kind() {
        let mut graph = StructureGraph::default();
        let foundation = graph.insert(ComponentKind::Foundation, at(0.0, 0.25, 0.0), 500.0);
        let wall = graph.insert(ComponentKind::Wall, at(2.0, 1.75, 0.0), 300.0);
        let far = graph.insert(ComponentKind::Foundation, at(40.0, 0.25, 40.0), 500.0);

        let near: Vec<_> = graph
            .neighbors_within(Vec3::ZERO, 5.0, KindFilter::Any)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(near, vec![foundation, wall]);

        let foundations: Vec<_> = graph
            .neighbors_within(Vec3::ZERO, 100.0, KindFilter::Only(ComponentKind::Foundation))
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(foundations, vec![foundation, far]);

        let wall_supporters: Vec<_> = graph
            .neighbors_within(Vec3::ZERO, 5.0, KindFilter::SupportersOf(SupportRole::WallPanel))
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(wall_supporters, vec![foundation, wall]);

        let ceiling_supporters: Vec<_> = graph
            .neighbors_within(Vec3::ZERO, 5.0, KindFilter::SupportersOf(SupportRole::Ceiling))
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ceiling_supporters, vec![wall]);
    }

    #[test]
    fn index_follows_removal_across_negative_cells() {
        let mut graph = StructureGraph::default();
        let id = graph.insert(ComponentKind::Foundation, at(-6.0, 0.25, -10.0), 500.0);
        assert_eq!(graph.neighbors_within(Vec3::new(-6.0, 0.0, -10.0), 1.0, KindFilter::Any).len(), 1);
        graph.remove(id).unwrap();
        assert!(graph.neighbors_within(Vec3::new(-6.0, 0.0, -10.0), 1.0, KindFilter::Any).is_empty());
    }

    #[test]
    fn restore_keeps_ids_and_rejects_duplicates() {
        let mut graph = StructureGraph::default();
        let part = PlacedPart {
            id: PartId(7),
            kind: ComponentKind::Foundation,
            transform: at(0.0, 0.25, 0.0),
            health: 120.0,
            max_health: 500.0,
        };
        assert_eq!(graph.restore(part.clone()), Ok(PartId(7)));
        assert!(graph.restore(part).is_err());

        let next = graph.insert(ComponentKind::Foundation, at(4.0, 0.25, 0.0), 500.0);
        assert_eq!(next, PartId(8));
        assert_eq!(graph.get(PartId(7)).map(|p| p.health), Some(120.0));
    }

    #[test]
    fn health_is_clamped() {
        let mut graph = StructureGraph::default();
        let id = graph.insert(ComponentKind::Wall, at(0.0, 0.0, 0.0), 300.0);
        assert_eq!(graph.set_health(id, -5.0), Ok(0.0));
        assert_eq!(graph.set_health(id, 900.0), Ok(300.0));
    }
}
