//! Fort Builder Engine Library
//!
//! Placement and structural-integrity core for grid-aligned building
//! parts. The engine half holds world-space math (grid snapping, yaw
//! rotation, terrain sampling, bounding boxes); the game half holds the
//! building rules.
//!
//! # Modules
//!
//! - [`physics`] - Yaw-aware bounding boxes and penetration tests
//! - [`world`] - Build grid, yaw helpers and terrain sampling
//! - [`game`] - Part catalog, placement, integrity and the building system
//!
//! # Example
//!
//! ```
//! use fort_builder_engine::game::{BuildingSystem, ComponentKind, Resources};
//! use fort_builder_engine::world::FlatTerrain;
//! use glam::Vec3;
//!
//! let terrain = FlatTerrain::new(5.0, 2.0);
//! let mut ledger = Resources::new();
//! let mut building = BuildingSystem::default();
//!
//! building.begin_placement_session(ComponentKind::Foundation);
//! let candidate = building
//!     .update_candidate(Vec3::new(1.2, 5.0, -0.9), Vec3::Y, 0.0, &terrain, &ledger)
//!     .unwrap();
//! assert!(candidate.is_accepted());
//! let id = building.confirm_placement(&terrain, &mut ledger).unwrap();
//! assert_eq!(building.part(id).unwrap().position(), Vec3::new(0.0, 5.25, 0.0));
//! ```

pub mod physics;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export world types for convenience
pub use world::{FlatTerrain, GridConfig, HeightmapTerrain, Terrain, snap_to_grid};
// Re-export geometry
pub use physics::AABB;
