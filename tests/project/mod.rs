//! Project layer tests
//!
//! Tests for:
//! - Remapping precedence and resolution
//! - Dependency packages
//! - Transitive source collection
//! - On-disk projects

pub mod tests_disk;
pub mod tests_resolution;
pub mod tests_sources;
