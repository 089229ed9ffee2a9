//! Integration tests - Tests that exercise several layers together
//!
//! These tests read GEONIS tables from YAML workspace snapshots written to
//! temporary files. None of them needs a running ClickHouse instance.

mod definition_snapshot_tests;
mod language_tests;
mod relation_snapshot_tests;
