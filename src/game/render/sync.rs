//! Render Representation Sync
//!
//! Keeps a renderer's per-part objects in step with the structure. The
//! building core never talks to the renderer; instead the caller diffs
//! `list_parts()` against the handles it already holds once per frame.

use std::collections::{BTreeSet, HashMap};

use crate::game::building::PartId;
use crate::game::systems::PartSummary;

/// Opaque renderer-side object handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u64);

/// Renderer hooks for creating and destroying part visuals.
pub trait RenderSink {
    fn spawn_representation(&mut self, part: &PartSummary) -> RenderHandle;
    fn despawn_representation(&mut self, handle: RenderHandle);
}

/// Changes applied by one [`RenderSync::sync`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub spawned: usize,
    pub despawned: usize,
}

/// Caller-side map from part id to render handle.
#[derive(Debug, Default)]
pub struct RenderSync {
    handles: HashMap<PartId, RenderHandle>,
}

impl RenderSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_of(&self, id: PartId) -> Option<RenderHandle> {
        self.handles.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Despawn visuals for parts that are gone, then spawn visuals for new
    /// parts. Both happen in id order.
    pub fn sync(&mut self, parts: &[PartSummary], sink: &mut dyn RenderSink) -> SyncStats {
        let live: BTreeSet<PartId> = parts.iter().map(|part| part.id).collect();
        let mut stale: Vec<PartId> = self
            .handles
            .keys()
            .copied()
            .filter(|id| !live.contains(id))
            .collect();
        stale.sort();

        let mut stats = SyncStats::default();
        for id in stale {
            if let Some(handle) = self.handles.remove(&id) {
                sink.despawn_representation(handle);
                stats.despawned += 1;
            }
        }

        for part in parts {
            if !self.handles.contains_key(&part.id) {
                let handle = sink.spawn_representation(part);
                self.handles.insert(part.id, handle);
                stats.spawned += 1;
            }
        }

        if stats != SyncStats::default() {
            log::debug!(
                "[Render] synced parts: {} spawned, {} despawned",
                stats.spawned,
                stats.despawned
            );
        }
        stats
    }

    /// Despawn everything (scene teardown).
    pub fn clear(&mut self, sink: &mut dyn RenderSink) {
        let mut ids: Vec<PartId> = self.handles.keys().copied().collect();
        ids.sort();
        for id in ids {
            if let Some(handle) = self.handles.remove(&id) {
                sink.despawn_representation(handle);
            }
        }
    }
}
