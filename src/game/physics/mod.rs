//! Physics Module
//!
//! Structural integrity for placed building parts.

pub mod integrity;

pub use integrity::IntegrityChecker;
