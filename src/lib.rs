//! gntools - GEONIS object-name resolution
//!
//! This crate resolves the table and field names of the GEONIS data model in
//! a geodatabase workspace:
//! - Definition tables with per-deployment name overrides
//! - Name catalogues with German default names
//! - Relationship lookups from the global relation table
//! - In-memory, YAML snapshot and ClickHouse workspaces

pub mod config;
pub mod geonis;
pub mod workspace;
