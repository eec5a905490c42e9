//! Game Render Module
//!
//! Renderer-facing data for building parts: packed instance data and the
//! id-to-handle sync used by scene code.

pub mod instances;
pub mod sync;

pub use instances::{PartInstance, build_instances};
pub use sync::{RenderHandle, RenderSink, RenderSync, SyncStats};
