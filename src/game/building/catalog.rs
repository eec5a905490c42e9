//! Component Catalog
//!
//! The closed set of buildable part kinds and their immutable per-kind data:
//! footprint, resource cost, base health and support role.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::game::economy::{ResourceCost, ResourceType};

/// Number of buildable kinds
pub const KIND_COUNT: usize = 5;

/// Buildable part kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Foundation,
    Wall,
    Window,
    Door,
    Ceiling,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; KIND_COUNT] = [
        ComponentKind::Foundation,
        ComponentKind::Wall,
        ComponentKind::Window,
        ComponentKind::Door,
        ComponentKind::Ceiling,
    ];

    /// Stable identifier used by save files
    pub fn id(&self) -> &'static str {
        match self {
            ComponentKind::Foundation => "foundation",
            ComponentKind::Wall => "wall",
            ComponentKind::Window => "window",
            ComponentKind::Door => "door",
            ComponentKind::Ceiling => "ceiling",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentKind::Foundation => "Foundation",
            ComponentKind::Wall => "Wall",
            ComponentKind::Window => "Window",
            ComponentKind::Door => "Door",
            ComponentKind::Ceiling => "Ceiling",
        }
    }

    pub fn role(&self) -> SupportRole {
        match self {
            ComponentKind::Foundation => SupportRole::Foundation,
            ComponentKind::Wall | ComponentKind::Window | ComponentKind::Door => {
                SupportRole::WallPanel
            }
            ComponentKind::Ceiling => SupportRole::Ceiling,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// What a kind can rest on and what can rest on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportRole {
    /// Rests on terrain; always stable
    Foundation,
    /// Walls, windows and doors
    WallPanel,
    /// Ceilings, which double as the floor of the next level
    Ceiling,
}

impl SupportRole {
    /// Whether a part with this role can carry a part with role `upper`.
    pub fn supports(self, upper: SupportRole) -> bool {
        match (self, upper) {
            (_, SupportRole::Foundation) => false,
            (SupportRole::Foundation, SupportRole::WallPanel) => true,
            (SupportRole::Foundation, SupportRole::Ceiling) => false,
            (SupportRole::WallPanel, SupportRole::WallPanel | SupportRole::Ceiling) => true,
            (SupportRole::Ceiling, SupportRole::WallPanel | SupportRole::Ceiling) => true,
        }
    }

    /// Roots of the structure graph need no support.
    pub fn is_root(self) -> bool {
        self == SupportRole::Foundation
    }
}

/// Immutable catalog entry for one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct KindSpec {
    pub kind: ComponentKind,
    /// Local extent: width (X) x height (Y) x depth (Z)
    pub footprint: Vec3,
    pub cost: &'static ResourceCost,
    pub base_health: f32,
    pub role: SupportRole,
}

impl KindSpec {
    pub fn half_extents(&self) -> Vec3 {
        self.footprint * 0.5
    }

    pub fn half_height(&self) -> f32 {
        self.footprint.y * 0.5
    }

    /// Square footprints look the same after a quarter turn.
    pub fn is_square(&self) -> bool {
        (self.footprint.x - self.footprint.z).abs() < 1e-4
    }

    /// Radius of a sphere containing this kind's bounds at any yaw.
    pub fn bounding_radius(&self) -> f32 {
        let half = self.half_extents();
        Vec3::new(half.x + half.z, half.y, half.x + half.z).length()
    }
}

static FOUNDATION_COST: [(ResourceType, u32); 2] = [(ResourceType::Stone, 4), (ResourceType::Wood, 2)];
static WALL_COST: [(ResourceType, u32); 1] = [(ResourceType::Wood, 4)];
static WINDOW_COST: [(ResourceType, u32); 2] = [(ResourceType::Wood, 3), (ResourceType::Stone, 1)];
static DOOR_COST: [(ResourceType, u32); 2] = [(ResourceType::Wood, 3), (ResourceType::Iron, 1)];
static CEILING_COST: [(ResourceType, u32); 1] = [(ResourceType::Wood, 3)];

const FOUNDATION_HEIGHT: f32 = 0.5;
const WALL_HEIGHT: f32 = 3.0;
const WALL_THICKNESS: f32 = 0.2;
const CEILING_THICKNESS: f32 = 0.2;

/// Lookup table of every kind, precomputed once for a grid size.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentCatalog {
    grid_size: f32,
    specs: [KindSpec; KIND_COUNT],
    max_bounding_radius: f32,
    support_search_radius: f32,
}

impl ComponentCatalog {
    /// Build the catalog; every footprint is one grid cell wide.
    pub fn new(grid_size: f32) -> Self {
        let panel = |kind: ComponentKind, cost: &'static ResourceCost, base_health: f32| KindSpec {
            kind,
            footprint: Vec3::new(grid_size, WALL_HEIGHT, WALL_THICKNESS),
            cost,
            base_health,
            role: SupportRole::WallPanel,
        };
        let specs = [
            KindSpec {
                kind: ComponentKind::Foundation,
                footprint: Vec3::new(grid_size, FOUNDATION_HEIGHT, grid_size),
                cost: &FOUNDATION_COST,
                base_health: 500.0,
                role: SupportRole::Foundation,
            },
            panel(ComponentKind::Wall, &WALL_COST, 300.0),
            panel(ComponentKind::Window, &WINDOW_COST, 200.0),
            panel(ComponentKind::Door, &DOOR_COST, 250.0),
            KindSpec {
                kind: ComponentKind::Ceiling,
                footprint: Vec3::new(grid_size, CEILING_THICKNESS, grid_size),
                cost: &CEILING_COST,
                base_health: 250.0,
                role: SupportRole::Ceiling,
            },
        ];

        let max_bounding_radius = specs
            .iter()
            .map(KindSpec::bounding_radius)
            .fold(0.0, f32::max);
        let max_extent = specs
            .iter()
            .map(|spec| spec.footprint.max_element())
            .fold(grid_size, f32::max);

        Self {
            grid_size,
            specs,
            max_bounding_radius,
            // Every snap offset is at most one extent away per axis, plus slack for tolerances
            support_search_radius: max_extent * 2.0 + 1.0,
        }
    }

    pub fn get(&self, kind: ComponentKind) -> &KindSpec {
        &self.specs[kind.index()]
    }

    /// Look a kind up by its string id; `None` when the id is unknown.
    pub fn lookup(&self, id: &str) -> Option<&KindSpec> {
        ComponentKind::from_id(id).map(|kind| self.get(kind))
    }

    pub fn iter(&self) -> impl Iterator<Item = &KindSpec> {
        self.specs.iter()
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    /// Largest bounding radius over all kinds.
    pub fn max_bounding_radius(&self) -> f32 {
        self.max_bounding_radius
    }

    /// Upper bound on the center-to-center distance between a part and
    /// any part that can support it.
    pub fn support_search_radius(&self) -> f32 {
        self.support_search_radius
    }
}

impl Default for ComponentCatalog {
    fn default() -> Self {
        Self::new(4.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_kind() {
        let catalog = ComponentCatalog::default();
        for kind in ComponentKind::ALL {
            assert_eq!(catalog.get(kind).kind, kind);
            assert_eq!(catalog.get(kind).role, kind.role());
        }
    }

    #[test]
    fn ids_round_trip_and_unknown_is_not_found() {
        let catalog = ComponentCatalog::default();
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(catalog.lookup("wall").map(|spec| spec.kind), Some(ComponentKind::Wall));
        assert!(catalog.lookup("roof").is_none());
    }

    #[test]
    fn support_roles_match_table() {
        use SupportRole::*;
        assert!(Foundation.supports(WallPanel));
        assert!(!Foundation.supports(Ceiling));
        assert!(WallPanel.supports(WallPanel));
        assert!(WallPanel.supports(Ceiling));
        assert!(Ceiling.supports(WallPanel));
        assert!(Ceiling.supports(Ceiling));
        for role in [Foundation, WallPanel, Ceiling] {
            assert!(!role.supports(Foundation));
        }
        assert!(Foundation.is_root());
        assert!(!Ceiling.is_root());
    }

    #[test]
    fn footprints_scale_with_grid() {
        let catalog = ComponentCatalog::new(3.0);
        let foundation = catalog.get(ComponentKind::Foundation);
        assert_eq!(foundation.footprint, Vec3::new(3.0, 0.5, 3.0));
        assert!(foundation.is_square());
        assert!(!catalog.get(ComponentKind::Wall).is_square());
        assert!(catalog.support_search_radius() >= 6.0);
    }

    #[test]
    fn serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&ComponentKind::Ceiling).unwrap();
        assert_eq!(json, "\"ceiling\"");
        let kind: ComponentKind = serde_json::from_str("\"door\"").unwrap();
        assert_eq!(kind, ComponentKind::Door);
    }
}
