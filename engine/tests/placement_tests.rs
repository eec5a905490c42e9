//! Placement Tests - Grid Snapping, Snap Points, and Rejection Rules
//!
//! End-to-end tests of the placement flow through `BuildingSystem`:
//! candidate planning, validation order, and the confirm transaction.

use std::f32::consts::FRAC_PI_2;

use fort_builder_engine::game::building::{ComponentKind, PartId, RejectReason};
use fort_builder_engine::game::economy::{ResourceCost, ResourceLedger, ResourceType, Resources};
use fort_builder_engine::game::{BuildConfig, BuildingSystem, PlacementCandidate};
use fort_builder_engine::world::{FlatTerrain, HeightmapTerrain, Terrain};
use glam::Vec3;

const EPS: f32 = 1e-4;

fn scenario_terrain() -> FlatTerrain {
    FlatTerrain::new(5.0, 2.0)
}

fn preview(
    building: &mut BuildingSystem,
    terrain: &dyn Terrain,
    ledger: &Resources,
    kind: ComponentKind,
    hit: Vec3,
    yaw: f32,
) -> PlacementCandidate {
    building.begin_placement_session(kind);
    building
        .update_candidate(hit, Vec3::Y, yaw, terrain, ledger)
        .expect("session is active")
}

fn place(
    building: &mut BuildingSystem,
    terrain: &dyn Terrain,
    ledger: &mut Resources,
    kind: ComponentKind,
    hit: Vec3,
    yaw: f32,
) -> Result<PartId, RejectReason> {
    preview(building, terrain, ledger, kind, hit, yaw);
    building.confirm_placement(terrain, ledger)
}

// ============================================================================
// Foundation Grid Snapping
// ============================================================================

#[test]
fn test_foundation_xz_is_always_a_grid_multiple() {
    let terrain = scenario_terrain();
    let ledger = Resources::new();
    let mut building = BuildingSystem::default();

    let hits = [
        Vec3::new(1.2, 5.0, -0.9),
        Vec3::new(-7.9, 5.0, 13.3),
        Vec3::new(2.01, 5.0, -2.01),
        Vec3::new(-123.4, 5.0, 99.9),
        Vec3::new(0.0, 5.0, 0.0),
    ];
    for hit in hits {
        let candidate = preview(&mut building, &terrain, &ledger, ComponentKind::Foundation, hit, 0.0);
        let p = candidate.transform.position;
        assert_eq!(p.x % 4.0, 0.0, "x={} not on grid for hit {:?}", p.x, hit);
        assert_eq!(p.z % 4.0, 0.0, "z={} not on grid for hit {:?}", p.z, hit);
        assert!((p.x - hit.x).abs() <= 2.0 && (p.z - hit.z).abs() <= 2.0);
    }
}

#[test]
fn test_foundation_respects_custom_grid_size() {
    let terrain = scenario_terrain();
    let ledger = Resources::new();
    let config = BuildConfig {
        grid_size: 3.0,
        ..BuildConfig::default()
    };
    let mut building = BuildingSystem::new(config);

    let candidate = preview(&mut building, &terrain, &ledger, ComponentKind::Foundation, Vec3::new(4.4, 5.0, -1.6), 0.0);
    assert_eq!(candidate.transform.position.x, 3.0);
    assert_eq!(candidate.transform.position.z, -3.0);
}

// ============================================================================
// Concrete Scenario
// ============================================================================

#[test]
fn test_scenario_foundation_then_walls() {
    let terrain = scenario_terrain();
    let mut ledger = Resources::new();
    let mut building = BuildingSystem::default();

    let foundation = place(&mut building, &terrain, &mut ledger, ComponentKind::Foundation, Vec3::new(1.2, 5.0, -0.9), 0.0)
        .expect("foundation accepted");
    let placed = building.part(foundation).expect("foundation exists");
    assert!((placed.position() - Vec3::new(0.0, 5.25, 0.0)).length() < EPS);

    // 2 units past the +X edge
    let candidate = preview(&mut building, &terrain, &ledger, ComponentKind::Wall, Vec3::new(4.0, 5.0, 0.0), FRAC_PI_2);
    assert_eq!(candidate.verdict, Ok(()));
    assert_eq!(candidate.anchor_part, Some(foundation));
    assert!((candidate.transform.position.x - 2.0).abs() < EPS);
    let wall = building.confirm_placement(&terrain, &mut ledger).expect("wall accepted");
    assert!((building.part(wall).map(|p| p.position().x).unwrap_or(f32::NAN) - 2.0).abs() < EPS);

    let far = preview(&mut building, &terrain, &ledger, ComponentKind::Wall, Vec3::new(50.0, 5.0, 50.0), 0.0);
    assert_eq!(far.verdict, Err(RejectReason::NoSupport));
    assert_eq!(building.confirm_placement(&terrain, &mut ledger), Err(RejectReason::NoSupport));
    assert_eq!(building.part_count(), 2);
}

// ============================================================================
// Overlap
// ============================================================================

#[test]
fn test_flush_wall_end_is_accepted() {
    let terrain = scenario_terrain();
    let mut ledger = Resources::new();
    let mut building = BuildingSystem::default();

    place(&mut building, &terrain, &mut ledger, ComponentKind::Foundation, Vec3::ZERO, 0.0).unwrap();
    place(&mut building, &terrain, &mut ledger, ComponentKind::Wall, Vec3::new(4.0, 5.0, 0.0), FRAC_PI_2).unwrap();

    // Snaps to the end of the first wall; the two share a face
    let candidate = preview(&mut building, &terrain, &ledger, ComponentKind::Wall, Vec3::new(2.0, 7.0, 4.5), FRAC_PI_2);
    assert_eq!(candidate.verdict, Ok(()));
    assert!((candidate.transform.position - Vec3::new(2.0, 7.0, 4.0)).length() < EPS);
    assert!(building.confirm_placement(&terrain, &mut ledger).is_ok());
}

#[test]
fn test_four_walls_close_a_room() {
    let terrain = scenario_terrain();
    let mut ledger = Resources::new();
    let mut building = BuildingSystem::default();

    place(&mut building, &terrain, &mut ledger, ComponentKind::Foundation, Vec3::ZERO, 0.0).unwrap();

    // Each wall follows its edge and meets its neighbours at the corners
    let edges = [
        (Vec3::new(2.3, 7.0, 0.0), FRAC_PI_2, Vec3::new(2.0, 7.0, 0.0)),
        (Vec3::new(0.0, 7.0, 2.3), 0.0, Vec3::new(0.0, 7.0, 2.0)),
        (Vec3::new(-2.3, 7.0, 0.0), FRAC_PI_2, Vec3::new(-2.0, 7.0, 0.0)),
        (Vec3::new(0.0, 7.0, -2.3), 0.0, Vec3::new(0.0, 7.0, -2.0)),
    ];
    for (hit, yaw, expected) in edges {
        let candidate = preview(&mut building, &terrain, &ledger, ComponentKind::Wall, hit, yaw);
        assert_eq!(candidate.verdict, Ok(()), "wall at {:?} should close the corner", expected);
        assert!((candidate.transform.position - expected).length() < EPS);
        assert!(building.confirm_placement(&terrain, &mut ledger).is_ok());
    }
    assert_eq!(building.part_count(), 5);
    assert!(building.unsupported_parts().is_empty());
}

#[test]
fn test_interpenetrating_part_is_overlap() {
    let terrain = scenario_terrain();
    let mut ledger = Resources::new();
    let mut building = BuildingSystem::default();

    place(&mut building, &terrain, &mut ledger, ComponentKind::Foundation, Vec3::ZERO, 0.0).unwrap();

    // Lands on the same cell as the existing foundation
    let candidate = preview(&mut building, &terrain, &ledger, ComponentKind::Foundation, Vec3::new(0.0, 5.0, 0.0), 0.0);
    assert_eq!(candidate.verdict, Err(RejectReason::Overlap));

    let neighbour = preview(&mut building, &terrain, &ledger, ComponentKind::Foundation, Vec3::new(4.2, 5.0, 0.0), 0.0);
    assert_eq!(neighbour.verdict, Ok(()));
}

// ============================================================================
// Environment Rejections
// ============================================================================

#[test]
fn test_underwater_wall_is_rejected() {
    let terrain = FlatTerrain::new(1.0, 2.0);
    let ledger = Resources::new();
    let mut building = BuildingSystem::default();

    // No supports nearby: falls back to hit + half height = 1.5
    let candidate = preview(&mut building, &terrain, &ledger, ComponentKind::Wall, Vec3::new(10.0, 0.0, 10.0), 0.0);
    assert!(candidate.transform.position.y < 2.05);
    assert_eq!(candidate.verdict, Err(RejectReason::Underwater));
}

#[test]
fn test_uneven_ground_is_rejected() {
    let ledger = Resources::new();
    let mut building = BuildingSystem::default();

    // Steps 2 m up at x = 0
    let terrain = HeightmapTerrain::from_fn(-20.0, -20.0, 0.5, 81, 81, 0.0, |x, _| if x < 0.0 { 5.0 } else { 7.0 })
        .expect("valid heightmap");
    let candidate = preview(&mut building, &terrain, &ledger, ComponentKind::Foundation, Vec3::new(0.3, 5.0, 8.1), 0.0);
    assert_eq!(candidate.verdict, Err(RejectReason::UnevenGround));

    let level = preview(&mut building, &terrain, &ledger, ComponentKind::Foundation, Vec3::new(-8.3, 5.0, 8.1), 0.0);
    assert_eq!(level.verdict, Ok(()));
}

#[test]
fn test_off_map_foundation_is_rejected() {
    let terrain = FlatTerrain::bounded(5.0, 2.0, 20.0);
    let ledger = Resources::new();
    let mut building = BuildingSystem::default();

    let candidate = preview(&mut building, &terrain, &ledger, ComponentKind::Foundation, Vec3::new(19.0, 5.0, 0.0), 0.0);
    assert_eq!(candidate.verdict, Err(RejectReason::UndefinedTerrain));
}

// ============================================================================
// Resources and Transaction
// ============================================================================

#[test]
fn test_insufficient_resources_is_rejected() {
    let terrain = scenario_terrain();
    let mut ledger = Resources::empty();
    let mut building = BuildingSystem::default();

    assert_eq!(
        place(&mut building, &terrain, &mut ledger, ComponentKind::Foundation, Vec3::ZERO, 0.0),
        Err(RejectReason::InsufficientResources)
    );
    assert_eq!(building.part_count(), 0);
}

#[test]
fn test_confirm_charges_exactly_the_cost() {
    let terrain = scenario_terrain();
    let mut ledger = Resources::new();
    let mut building = BuildingSystem::default();
    let wood = ledger.get(ResourceType::Wood);
    let iron = ledger.get(ResourceType::Iron);

    place(&mut building, &terrain, &mut ledger, ComponentKind::Foundation, Vec3::ZERO, 0.0).unwrap();
    place(&mut building, &terrain, &mut ledger, ComponentKind::Door, Vec3::new(-4.0, 5.0, 0.0), FRAC_PI_2).unwrap();

    assert_eq!(ledger.get(ResourceType::Wood), wood - 2 - 3);
    assert_eq!(ledger.get(ResourceType::Iron), iron - 1);
}

/// Ledger whose balance changes between preview and confirm.
struct DrainedLedger {
    affordable: bool,
    charged: u32,
}

impl ResourceLedger for DrainedLedger {
    fn can_afford(&self, _cost: &ResourceCost) -> bool {
        self.affordable
    }

    fn consume(&mut self, cost: &ResourceCost) -> bool {
        if !self.affordable {
            return false;
        }
        self.charged += cost.iter().map(|(_, n)| n).sum::<u32>();
        true
    }
}

#[test]
fn test_confirm_revalidates_resources() {
    let terrain = scenario_terrain();
    let mut building = BuildingSystem::default();
    let mut ledger = DrainedLedger { affordable: true, charged: 0 };

    building.begin_placement_session(ComponentKind::Foundation);
    let candidate = building
        .update_candidate(Vec3::ZERO, Vec3::Y, 0.0, &terrain, &ledger)
        .unwrap();
    assert!(candidate.is_accepted());

    ledger.affordable = false;
    assert_eq!(
        building.confirm_placement(&terrain, &mut ledger),
        Err(RejectReason::InsufficientResources)
    );
    assert_eq!(building.part_count(), 0);
    assert_eq!(ledger.charged, 0);

    ledger.affordable = true;
    assert!(building.confirm_placement(&terrain, &mut ledger).is_ok());
    assert_eq!(ledger.charged, 6);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_list_parts_is_stable_without_mutation() {
    let terrain = scenario_terrain();
    let mut ledger = Resources::new();
    let mut building = BuildingSystem::default();

    place(&mut building, &terrain, &mut ledger, ComponentKind::Foundation, Vec3::ZERO, 0.0).unwrap();
    place(&mut building, &terrain, &mut ledger, ComponentKind::Foundation, Vec3::new(4.0, 5.0, 0.0), 0.0).unwrap();
    place(&mut building, &terrain, &mut ledger, ComponentKind::Wall, Vec3::new(-2.0, 7.0, 0.0), FRAC_PI_2).unwrap();

    // Previewing does not touch the structure
    preview(&mut building, &terrain, &ledger, ComponentKind::Wall, Vec3::new(6.0, 7.0, 0.0), FRAC_PI_2);

    let first = building.list_parts();
    let second = building.list_parts();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    assert!(first.windows(2).all(|pair| pair[0].id < pair[1].id));
}
