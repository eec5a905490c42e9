//! GPU Instance Data for Building Parts
//!
//! One instance per placed part, drawn with a unit box mesh scaled by
//! `half_extents` and rotated by `yaw`.

use bytemuck::{Pod, Zeroable};

use crate::game::building::{ComponentCatalog, ComponentKind};
use crate::game::systems::PartSummary;

/// GPU instance data for a single building part.
///
/// Layout (32 bytes total):
/// - position:     vec3<f32> (12 bytes) - Part center
/// - yaw:          f32 (4 bytes) - Rotation around +Y (radians)
/// - half_extents: vec3<f32> (12 bytes) - Unrotated half size
/// - kind:         u16 (2 bytes) - Kind index for material lookup
/// - health_pct:   u16 (2 bytes) - Health 0-100 for damage tinting
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PartInstance {
    pub position: [f32; 3],
    pub yaw: f32,
    pub half_extents: [f32; 3],
    pub kind: u16,
    pub health_pct: u16,
}

static_assertions::assert_eq_size!(PartInstance, [u8; 32]);

impl PartInstance {
    pub fn from_summary(catalog: &ComponentCatalog, part: &PartSummary) -> Self {
        let spec = catalog.get(part.kind);
        let fraction = if spec.base_health > 0.0 {
            (part.health / spec.base_health).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            position: part.transform.position.to_array(),
            yaw: part.transform.yaw,
            half_extents: spec.half_extents().to_array(),
            kind: kind_index(part.kind),
            health_pct: (fraction * 100.0).round() as u16,
        }
    }
}

fn kind_index(kind: ComponentKind) -> u16 {
    kind as u16
}

/// Pack every part for an instanced draw, preserving order.
pub fn build_instances(catalog: &ComponentCatalog, parts: &[PartSummary]) -> Vec<PartInstance> {
    parts
        .iter()
        .map(|part| PartInstance::from_summary(catalog, part))
        .collect()
}
