//! Structure Snapshots
//!
//! JSON save/load of the structure graph. A snapshot is an ordered list of
//! part records; loading replays them in order without validation (the
//! data is trusted), keeping the recorded ids so render handles and other
//! id references stay valid across a reload.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::{ComponentCatalog, ComponentKind};
use super::part::{PartId, PartTransform, PlacedPart};
use super::structure::StructureGraph;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur during snapshot save/load.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot version {0} is not supported")]
    UnsupportedVersion(u32),
    #[error("snapshot contains part {0} twice")]
    DuplicateId(PartId),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for PositionRecord {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<PositionRecord> for Vec3 {
    fn from(p: PositionRecord) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

/// One persisted part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRecord {
    pub id: PartId,
    pub kind: ComponentKind,
    pub position: PositionRecord,
    pub yaw: f32,
    pub health: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureSnapshot {
    pub version: u32,
    pub parts: Vec<PartRecord>,
}

impl StructureSnapshot {
    /// Capture every part in id order.
    pub fn from_graph(graph: &StructureGraph) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            parts: graph
                .all()
                .map(|part| PartRecord {
                    id: part.id,
                    kind: part.kind,
                    position: part.transform.position.into(),
                    yaw: part.transform.yaw,
                    health: part.health,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), SnapshotError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, SnapshotError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Replace the contents of `graph` with this snapshot.
    ///
    /// Max health comes from the catalog; recorded health is clamped to it.
    /// On a duplicate id the graph is left empty.
    pub fn restore_into(
        &self,
        graph: &mut StructureGraph,
        catalog: &ComponentCatalog,
    ) -> Result<usize, SnapshotError> {
        graph.clear();
        for record in &self.parts {
            let max_health = catalog.get(record.kind).base_health;
            let part = PlacedPart {
                id: record.id,
                kind: record.kind,
                transform: PartTransform::new(record.position.into(), record.yaw),
                health: record.health.clamp(0.0, max_health),
                max_health,
            };
            if graph.restore(part).is_err() {
                graph.clear();
                return Err(SnapshotError::DuplicateId(record.id));
            }
        }
        Ok(graph.len())
    }
}
