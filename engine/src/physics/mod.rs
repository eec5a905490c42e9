//! Physics module
//!
//! Geometric primitives shared by placement validation and structural
//! integrity. There is no dynamics simulation: parts are static boxes.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, yaw in radians around +Y.
//!
//! # Submodules
//!
//! - [`collision`] - Yaw-aware AABBs and penetration tests

pub mod collision;

pub use collision::{AABB, yawed_half_extents};
