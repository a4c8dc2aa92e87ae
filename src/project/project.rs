//! The project: root package, dependency packages and remappings.

use std::fmt;

use super::config::{FoundryConfig, PackageJson, read_remappings_file};
use super::error::{ProjectError, ProjectResult};
use super::fs::FileSystem;
use super::package::Package;
use super::remapping::{Remapping, RemappingMatch, find_remapping, parse_remappings};
use super::settings::ProjectSettings;
use crate::base::constants::{DEFAULT_BUILD_DIR, FOUNDRY_DEFAULT_OUT, FOUNDRY_DEFAULT_SRC, SOL_EXT};
use crate::base::paths;

/// Where the winning remapping list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemappingSource {
    FoundryConfig,
    RemappingsFile,
    Settings,
    None,
}

/// Everything needed to turn an import string into an absolute path.
#[derive(Clone)]
pub struct Project {
    pub root: Package,
    pub packages: Vec<Package>,
    pub dependency_dirs: Vec<String>,
    pub remappings: Vec<Remapping>,
    pub remapping_source: RemappingSource,
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("root", &self.root.root)
            .field("packages", &self.packages.len())
            .field("remappings", &self.remappings.len())
            .finish()
    }
}

impl Project {
    /// Read the project rooted at `root`.
    ///
    /// Broken config files are logged and ignored; only a missing root is an
    /// error.
    pub fn load(root: &str, settings: &ProjectSettings, fs: &dyn FileSystem) -> ProjectResult<Self> {
        let root_dir = paths::normalize(root);
        if !fs.is_dir(&root_dir) {
            return Err(ProjectError::RootNotFound(root_dir));
        }

        let foundry = FoundryConfig::read(&root_dir, fs).unwrap_or_else(|err| {
            tracing::warn!(%err, "ignoring foundry config");
            None
        });
        let package_json = PackageJson::read(&root_dir, fs).unwrap_or_else(|err| {
            tracing::warn!(%err, "ignoring package.json");
            None
        });

        let root_package = Self::root_package(&root_dir, settings, foundry.as_ref(), package_json.as_ref());

        let mut dependency_dirs = settings.dependency_dirs.clone();
        if let Some(foundry) = &foundry {
            for lib in &foundry.profile.libs {
                if !dependency_dirs.contains(lib) {
                    dependency_dirs.push(lib.clone());
                }
            }
        }

        let packages = Self::dependency_packages(&root_dir, &dependency_dirs, settings, fs);

        let (remapping_source, lines) = Self::remapping_lines(&root_dir, settings, foundry.as_ref(), fs);
        let remappings = parse_remappings(lines.iter().map(String::as_str), &root_dir);

        tracing::debug!(
            root = %root_dir,
            packages = packages.len(),
            remappings = remappings.len(),
            source = ?remapping_source,
            "loaded project"
        );

        Ok(Self {
            root: root_package,
            packages,
            dependency_dirs,
            remappings,
            remapping_source,
        })
    }

    /// A project with no config files, for hosts that only have loose files.
    pub fn detached(root: &str) -> Self {
        let root_dir = paths::normalize(root);
        let name = paths::file_name(&root_dir).to_string();
        let mut root = Package::new(name, &root_dir);
        root.build_dir = DEFAULT_BUILD_DIR.to_string();
        Self {
            root,
            packages: Vec::new(),
            dependency_dirs: Vec::new(),
            remappings: Vec::new(),
            remapping_source: RemappingSource::None,
        }
    }

    fn root_package(
        root_dir: &str,
        settings: &ProjectSettings,
        foundry: Option<&FoundryConfig>,
        package_json: Option<&PackageJson>,
    ) -> Package {
        let name = package_json
            .and_then(|pkg| pkg.name.clone())
            .unwrap_or_else(|| paths::file_name(root_dir).to_string());
        let mut package = Package::new(name, root_dir);
        package.version = package_json.and_then(|pkg| pkg.version.clone());

        let (foundry_src, foundry_out) = match foundry {
            Some(config) => (
                Some(config.profile.src.clone().unwrap_or_else(|| FOUNDRY_DEFAULT_SRC.to_string())),
                Some(config.profile.out.clone().unwrap_or_else(|| FOUNDRY_DEFAULT_OUT.to_string())),
            ),
            None => (None, None),
        };
        package.sources_dir = settings
            .sources_dir
            .clone()
            .or(foundry_src)
            .unwrap_or_default();
        package.build_dir = foundry_out.unwrap_or_else(|| DEFAULT_BUILD_DIR.to_string());
        if let Some(pkg) = package_json {
            package.dependencies = pkg
                .all_dependencies()
                .map(|(name, version)| (name.clone(), version.clone()))
                .collect();
        }
        package
    }

    /// Each immediate subdirectory of a dependency dir is a package;
    /// `@scope` directories become packages named `@scope`.
    fn dependency_packages(
        root_dir: &str,
        dependency_dirs: &[String],
        settings: &ProjectSettings,
        fs: &dyn FileSystem,
    ) -> Vec<Package> {
        let mut packages = Vec::new();
        for dir in dependency_dirs {
            let dep_dir = paths::join(root_dir, dir);
            let Ok(children) = fs.read_dir(&dep_dir) else {
                continue;
            };
            for child in children.iter().filter(|child| fs.is_dir(child)) {
                let name = paths::file_name(child);
                if name.starts_with('.') {
                    continue;
                }
                packages.push(
                    Package::new(name, child)
                        .with_alternative_sources_dirs(settings.alternative_sources_dirs.clone()),
                );
            }
        }
        packages
    }

    /// Framework config, then `remappings.txt`, then settings; the first
    /// non-empty list wins and nothing is merged.
    fn remapping_lines(
        root_dir: &str,
        settings: &ProjectSettings,
        foundry: Option<&FoundryConfig>,
        fs: &dyn FileSystem,
    ) -> (RemappingSource, Vec<String>) {
        if let Some(config) = foundry.filter(|c| !c.profile.remappings.is_empty()) {
            return (RemappingSource::FoundryConfig, config.profile.remappings.clone());
        }
        match read_remappings_file(root_dir, fs) {
            Ok(Some(lines)) if !lines.is_empty() => {
                return (RemappingSource::RemappingsFile, lines);
            }
            Ok(_) => {}
            Err(err) => tracing::warn!(%err, "ignoring remappings file"),
        }
        if !settings.remappings.is_empty() {
            return (RemappingSource::Settings, settings.remappings.clone());
        }
        (RemappingSource::None, Vec::new())
    }

    /// Absolute project root.
    pub fn root_path(&self) -> &str {
        &self.root.root
    }

    /// Resolve `import` as written in the file at `from_path`.
    ///
    /// Relative imports resolve against the importing file's directory;
    /// otherwise the most specific remapping wins, then a dependency package
    /// named by the first path segment. `None` means unresolved.
    pub fn resolve_import(&self, import: &str, from_path: &str, fs: &dyn FileSystem) -> Option<String> {
        let import = paths::to_slash(import);
        let resolved = if import.starts_with('.') {
            Some(paths::join(&paths::parent(from_path), &import))
        } else if paths::is_absolute(&import) {
            Some(paths::normalize(&import))
        } else if let Some((remapping, m)) = self.find_remapping(&import, from_path) {
            Some(remapping.apply(&import, m))
        } else {
            self.find_package(&import)
                .map(|package| package.resolve_import(&import, fs))
        };
        tracing::trace!(%import, from = %from_path, ?resolved, "resolve import");
        resolved
    }

    /// Is `import` resolved through a remapping or package (not relative)?
    pub fn is_package_import(&self, import: &str, from_path: &str) -> bool {
        let import = paths::to_slash(import);
        !import.starts_with('.')
            && !paths::is_absolute(&import)
            && (self.find_remapping(&import, from_path).is_some()
                || self.find_package(&import).is_some())
    }

    pub fn find_remapping(
        &self,
        import: &str,
        from_path: &str,
    ) -> Option<(&Remapping, RemappingMatch)> {
        find_remapping(&self.remappings, import, Some(from_path))
    }

    /// Dependency package addressed by the first segment of `import`.
    pub fn find_package(&self, import: &str) -> Option<&Package> {
        self.packages.iter().find(|pkg| pkg.is_import_for_this(import))
    }

    /// Shortest import string that resolves to `path` from `from_path`.
    pub fn import_string_for(&self, path: &str, from_path: &str) -> String {
        let mut best = paths::relative(&paths::parent(from_path), path);
        let candidates = self
            .remappings
            .iter()
            .filter(|r| r.context.is_none())
            .filter_map(|r| r.reverse(path))
            .chain(self.packages.iter().filter_map(|pkg| pkg.import_for(path)));
        for candidate in candidates {
            if candidate.len() < best.len() {
                best = candidate;
            }
        }
        best
    }

    /// Is `path` inside the root package's build output?
    pub fn is_build_output(&self, path: &str) -> bool {
        !self.root.build_dir.is_empty() && paths::strip_base(path, &self.root.build_path()).is_some()
    }

    /// Every source file of the project, dependencies included, minus build
    /// output.
    pub fn source_files(&self, fs: &dyn FileSystem) -> Vec<String> {
        fs.walk_files(self.root_path(), SOL_EXT)
            .into_iter()
            .filter(|path| !self.is_build_output(path))
            .collect()
    }
}
