//! Unit tests - Tests of the public API that need no external services
//!
//! These tests run against in-memory workspaces only.

mod name_catalog_tests;
mod relation_type_tests;
mod where_filter_tests;
