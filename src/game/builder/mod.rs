//! Builder Module
//!
//! Candidate planning and rule validation for placing building parts.

pub mod placement;
pub mod validation;

pub use placement::{PlacementPlanner, PlacementResult};
pub use validation::PlacementValidator;
