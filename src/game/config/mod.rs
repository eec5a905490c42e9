//! Config Module
//!
//! Centralized configuration for building placement and structural support.

pub mod build_config;

pub use build_config::{BuildConfig, ConfigError};
