//! Project model: packages, remappings and import resolution.
//!
//! A [`Project`] is loaded from a root directory through a [`FileSystem`],
//! which lets the editor substitute unsaved buffers for disk contents.
//! [`SourceDocumentCollection`] builds the transitive import closure of a
//! request on top of it.

mod config;
mod error;
mod fs;
mod package;
#[allow(clippy::module_inception)]
mod project;
mod remapping;
mod settings;
mod sources;

pub use config::{FoundryConfig, FoundryProfile, PackageJson, read_remappings_file};
pub use error::{ProjectError, ProjectResult};
pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem, OverlayFileSystem};
pub use package::Package;
pub use project::{Project, RemappingSource};
pub use remapping::{Remapping, RemappingMatch, find_remapping, parse_remappings};
pub use settings::ProjectSettings;
pub use sources::{ImportStatement, SourceDocument, SourceDocumentCollection, scan_imports};
