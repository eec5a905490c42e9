//! Economy System
//!
//! Building materials and the ledger contract placement charges against.
//! Starting stock: 60 Wood, 30 Stone, 5 Iron

pub mod resources;

pub use resources::{ResourceCost, ResourceLedger, ResourceType, Resources, STARTING_RESOURCES};
