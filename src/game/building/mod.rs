//! Building Parts and Structure
//!
//! Grid-aligned building parts (foundations, wall panels, ceilings), the
//! snap-point relation that defines how they attach, and the structure
//! graph that owns every placed part.

pub mod catalog;
pub mod part;
pub mod reject;
pub mod snap_points;
pub mod snapshot;
pub mod structure;

pub use catalog::{ComponentCatalog, ComponentKind, KIND_COUNT, KindSpec, SupportRole};
pub use part::{PartId, PartTransform, PlacedPart, part_aabb};
pub use reject::RejectReason;
pub use snap_points::{SnapPoint, SnapPointGenerator, SnapRelation, SupportTolerance};
pub use snapshot::{PartRecord, PositionRecord, SNAPSHOT_VERSION, SnapshotError, StructureSnapshot};
pub use structure::{KindFilter, StructureGraph};
