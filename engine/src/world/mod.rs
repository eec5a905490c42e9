//! World Module
//!
//! World-space configuration shared by placement: the build grid, yaw
//! helpers and the terrain collaborator contract.

pub mod grid;
pub mod terrain;

pub use grid::{
    GridConfig, rotate_yaw, snap_to_grid, snap_value, snap_yaw_to_quarter_turn,
    yaw_from_quarter_turns, yaws_aligned,
};
pub use terrain::{FlatTerrain, HeightmapTerrain, Terrain};
