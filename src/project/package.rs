//! Packages: the project itself and each dependency under a dependency dir.

use indexmap::IndexMap;

use super::fs::FileSystem;
use crate::base::paths;

/// A named source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub version: Option<String>,
    /// Absolute root directory.
    pub root: String,
    /// Build output directory, relative to `root`.
    pub build_dir: String,
    /// Primary source directory relative to `root` (`""` is the root itself).
    pub sources_dir: String,
    /// Source directories tried after `sources_dir`, in order.
    pub alternative_sources_dirs: Vec<String>,
    /// Declared dependencies (name → version spec).
    pub dependencies: IndexMap<String, String>,
}

impl Package {
    pub fn new(name: impl Into<String>, root: &str) -> Self {
        Self {
            name: name.into(),
            version: None,
            root: paths::normalize(root),
            build_dir: String::new(),
            sources_dir: String::new(),
            alternative_sources_dirs: Vec::new(),
            dependencies: IndexMap::new(),
        }
    }

    pub fn with_sources_dir(mut self, dir: impl Into<String>) -> Self {
        self.sources_dir = dir.into();
        self
    }

    pub fn with_alternative_sources_dirs(mut self, dirs: Vec<String>) -> Self {
        self.alternative_sources_dirs = dirs;
        self
    }

    /// Absolute primary source directory.
    pub fn sources_path(&self) -> String {
        paths::join(&self.root, &self.sources_dir)
    }

    /// Absolute build output directory.
    pub fn build_path(&self) -> String {
        paths::join(&self.root, &self.build_dir)
    }

    /// Is `import` addressed to this package (`name/rest...`)?
    ///
    /// Single-segment imports never match.
    pub fn is_import_for_this(&self, import: &str) -> bool {
        let import = paths::to_slash(import);
        match import.split_once('/') {
            Some((first, rest)) => first == self.name && !rest.is_empty(),
            None => false,
        }
    }

    /// Absolute path of a package import. Tries the primary source directory
    /// and then each alternate; the first existing file wins, otherwise the
    /// primary candidate is returned.
    pub fn resolve_import(&self, import: &str, fs: &dyn FileSystem) -> String {
        let import = paths::to_slash(import);
        let rest = import
            .split_once('/')
            .map(|(_, rest)| rest)
            .unwrap_or_default();

        let primary = paths::join(&self.sources_path(), rest);
        if fs.is_file(&primary) {
            return primary;
        }
        for dir in &self.alternative_sources_dirs {
            let candidate = paths::join(&paths::join(&self.root, dir), rest);
            if fs.is_file(&candidate) {
                tracing::trace!(package = %self.name, %candidate, "resolved via alternate dir");
                return candidate;
            }
        }
        primary
    }

    /// Does `path` live inside this package?
    pub fn contains(&self, path: &str) -> bool {
        paths::strip_base(path, &self.root).is_some()
    }

    /// Package-style import string for `path` (`name/rest`).
    pub fn import_for(&self, path: &str) -> Option<String> {
        let dirs = std::iter::once(&self.sources_dir).chain(&self.alternative_sources_dirs);
        for dir in dirs {
            let base = paths::join(&self.root, dir);
            if let Some(rest) = paths::strip_base(path, &base).filter(|r| !r.is_empty()) {
                return Some(format!("{}/{rest}", self.name));
            }
        }
        None
    }
}
