//! Shared fixtures and setup for the integration tests.

pub mod cursor;
pub mod workspace;
