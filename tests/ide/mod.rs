//! IDE feature tests
//!
//! Tests for:
//! - Completion (members, scope, import paths)
//! - Hover and goto definition
//! - References and rename
//! - Document and workspace symbols

pub mod tests_completion;
pub mod tests_navigation;
pub mod tests_rename;
