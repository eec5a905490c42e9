//! Grid Configuration Module
//!
//! Grid snapping and yaw utilities for world-space placement.
//!
//! ## Conventions
//! - 1 unit = 1 meter
//! - The build grid lies in the XZ plane; Y is never grid-snapped
//! - Yaw is a rotation in radians around +Y, player-controlled in quarter turns

use glam::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Grid configuration for world-space snapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    /// Grid cell size (one foundation footprint)
    pub grid_size: f32,
    /// Grid snapping on/off
    pub snap_enabled: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: 4.0,
            snap_enabled: true,
        }
    }
}

impl GridConfig {
    pub fn new(grid_size: f32) -> Self {
        Self {
            grid_size,
            snap_enabled: true,
        }
    }

    /// Snap a position to the grid if snapping is enabled.
    ///
    /// Only snaps X and Z coordinates; Y is preserved.
    pub fn snap_to_grid(&self, pos: Vec3) -> Vec3 {
        if !self.snap_enabled {
            return pos;
        }
        snap_to_grid(pos, self.grid_size)
    }

    /// Integer grid cell containing `pos` (XZ only).
    pub fn cell_of(&self, pos: Vec3) -> (i32, i32) {
        (
            (pos.x / self.grid_size).floor() as i32,
            (pos.z / self.grid_size).floor() as i32,
        )
    }
}

/// Round `value` to the nearest multiple of `grid_size`.
///
/// Negative zero is folded into positive zero so snapped coordinates
/// compare and serialize cleanly.
pub fn snap_value(value: f32, grid_size: f32) -> f32 {
    (value / grid_size).round() * grid_size + 0.0
}

/// Snap X and Z of `pos` to the nearest multiple of `grid_size`; Y is preserved.
pub fn snap_to_grid(pos: Vec3, grid_size: f32) -> Vec3 {
    Vec3::new(
        snap_value(pos.x, grid_size),
        pos.y,
        snap_value(pos.z, grid_size),
    )
}

/// Rotate a local-space offset into world space by `yaw`.
pub fn rotate_yaw(offset: Vec3, yaw: f32) -> Vec3 {
    if yaw == 0.0 {
        return offset;
    }
    Quat::from_rotation_y(yaw) * offset
}

/// Yaw for `turns` quarter turns, normalized to [0, 2π).
pub fn yaw_from_quarter_turns(turns: i32) -> f32 {
    (turns.rem_euclid(4) as f32) * FRAC_PI_2
}

/// Nearest quarter-turn yaw, normalized to [0, 2π).
pub fn snap_yaw_to_quarter_turn(yaw: f32) -> f32 {
    let turns = (yaw.rem_euclid(TAU) / FRAC_PI_2).round() as i32;
    yaw_from_quarter_turns(turns)
}

/// Whether two yaws agree within `tolerance`, treating yaws that differ by a
/// multiple of `period` as identical (a box is symmetric under a half turn,
/// a square under a quarter turn).
pub fn yaws_aligned(a: f32, b: f32, period: f32, tolerance: f32) -> bool {
    let diff = (a - b).rem_euclid(period);
    diff.min(period - diff) <= tolerance
}
