//! Configuration Builders
//!
//! Fluent builders for entity and operation configuration.

pub mod config;

pub use config::{EntityConfigBuilder, MethodSpecBuilder};
