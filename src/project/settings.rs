//! Host-provided overrides for project loading.

use crate::base::constants::{DEFAULT_ALTERNATIVE_SOURCE_DIRS, DEFAULT_DEPENDENCY_DIRS};

/// Settings an editor host passes when opening a project.
///
/// Everything here is optional: the defaults reproduce the conventions of a
/// Foundry or npm layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    /// Remapping strings used when neither `foundry.toml` nor
    /// `remappings.txt` yields any.
    pub remappings: Vec<String>,
    /// Directory names (relative to the root) holding dependency packages.
    pub dependency_dirs: Vec<String>,
    /// Overrides the root package's primary source directory.
    pub sources_dir: Option<String>,
    /// Source directories tried inside a dependency package, in order.
    pub alternative_sources_dirs: Vec<String>,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            remappings: Vec::new(),
            dependency_dirs: DEFAULT_DEPENDENCY_DIRS.iter().map(|s| s.to_string()).collect(),
            sources_dir: None,
            alternative_sources_dirs: DEFAULT_ALTERNATIVE_SOURCE_DIRS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ProjectSettings {
    pub fn with_remappings<I, S>(mut self, remappings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remappings = remappings.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dependency_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependency_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sources_dir(mut self, dir: impl Into<String>) -> Self {
        self.sources_dir = Some(dir.into());
        self
    }

    pub fn with_alternative_sources_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternative_sources_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }
}
