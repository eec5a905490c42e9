//! Game Module
//!
//! Fort building on top of the engine: part catalog, placement, structural
//! integrity and the building system facade.

pub mod builder;
pub mod building;
pub mod config;
pub mod economy;
pub mod physics;
pub mod render;
pub mod systems;

pub use builder::{PlacementPlanner, PlacementResult, PlacementValidator};
pub use building::{
    ComponentCatalog, ComponentKind, PartId, PartTransform, PlacedPart, RejectReason,
    StructureGraph, StructureSnapshot,
};
pub use config::{BuildConfig, ConfigError};
pub use economy::{ResourceLedger, ResourceType, Resources};
pub use physics::IntegrityChecker;
pub use render::{PartInstance, RenderHandle, RenderSink, RenderSync, build_instances};
pub use systems::{BuildingSystem, DamageOutcome, PartSummary, PlacementCandidate, RemovalReport};
