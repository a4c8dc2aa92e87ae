//! Semantic model tests
//!
//! Tests for:
//! - Indexing cache and import linking
//! - Degraded parsing
//! - Scoped lookup and member resolution

pub mod tests_resolution;
pub mod tests_walker;
