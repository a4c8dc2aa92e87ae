//! Filesystem providers.
//!
//! All paths are absolute, `/`-separated strings (see [`crate::base::paths`]).
//! The indexing core only talks to [`FileSystem`]; hosts pick the disk, an
//! in-memory tree, or an overlay of open editor buffers on top of either.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use walkdir::WalkDir;

use crate::base::paths;

/// Read-only view of a file tree.
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &str) -> io::Result<String>;

    fn is_file(&self, path: &str) -> bool;

    fn is_dir(&self, path: &str) -> bool;

    /// Immediate children of a directory, as absolute paths, sorted.
    fn read_dir(&self, path: &str) -> io::Result<Vec<String>>;

    /// Every file below `root` with the given extension, sorted.
    /// Hidden directories (`.git`, ...) are skipped.
    fn walk_files(&self, root: &str, extension: &str) -> Vec<String>;
}

fn not_found(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("{path}: not found"))
}

// ============================================================================
// DISK
// ============================================================================

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &str) -> io::Result<String> {
        std::fs::read_to_string(Path::new(path))
    }

    fn is_file(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }

    fn is_dir(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<String>> {
        let mut children = Vec::new();
        for entry in std::fs::read_dir(Path::new(path))? {
            let entry = entry?;
            children.push(paths::to_slash(&entry.path().to_string_lossy()));
        }
        children.sort();
        Ok(children)
    }

    fn walk_files(&self, root: &str, extension: &str) -> Vec<String> {
        let mut files: Vec<String> = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.')
            })
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| paths::to_slash(&entry.path().to_string_lossy()))
            .filter(|path| paths::has_extension(path, extension))
            .collect();
        files.sort();
        files
    }
}

// ============================================================================
// IN-MEMORY
// ============================================================================

/// A file tree held in memory. Directories exist implicitly.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<String, String>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_file(mut self, path: &str, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: &str, text: impl Into<String>) {
        self.files.insert(paths::normalize(path), text.into());
    }

    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.files.remove(&paths::normalize(path))
    }

    fn dir_prefix(path: &str) -> String {
        let path = paths::normalize(path);
        if path.ends_with('/') {
            path
        } else {
            format!("{path}/")
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &str) -> io::Result<String> {
        self.files
            .get(&paths::normalize(path))
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn is_file(&self, path: &str) -> bool {
        self.files.contains_key(&paths::normalize(path))
    }

    fn is_dir(&self, path: &str) -> bool {
        let prefix = Self::dir_prefix(path);
        self.files.keys().any(|key| key.starts_with(&prefix))
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<String>> {
        let prefix = Self::dir_prefix(path);
        let mut children: Vec<String> = self
            .files
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .map(|rest| rest.split('/').next().unwrap_or(rest))
            .map(|child| format!("{prefix}{child}"))
            .collect();
        if children.is_empty() && !self.is_dir(path) {
            return Err(not_found(path));
        }
        children.sort();
        children.dedup();
        Ok(children)
    }

    fn walk_files(&self, root: &str, extension: &str) -> Vec<String> {
        let prefix = Self::dir_prefix(root);
        self.files
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .filter(|key| {
                !key[prefix.len()..]
                    .split('/')
                    .any(|segment| segment.starts_with('.'))
            })
            .filter(|key| paths::has_extension(key, extension))
            .cloned()
            .collect()
    }
}

// ============================================================================
// OVERLAY
// ============================================================================

/// Open editor buffers layered over another filesystem.
///
/// Reads of an overlaid path return the buffer text, so unsaved edits are
/// what the indexer sees.
pub struct OverlayFileSystem {
    base: Arc<dyn FileSystem>,
    overlays: FxHashMap<String, String>,
}

impl OverlayFileSystem {
    pub fn new(base: Arc<dyn FileSystem>) -> Self {
        Self {
            base,
            overlays: FxHashMap::default(),
        }
    }

    pub fn set_overlay(&mut self, path: &str, text: impl Into<String>) {
        self.overlays.insert(paths::normalize(path), text.into());
    }

    pub fn remove_overlay(&mut self, path: &str) -> Option<String> {
        self.overlays.remove(&paths::normalize(path))
    }

    pub fn overlay(&self, path: &str) -> Option<&str> {
        self.overlays.get(&paths::normalize(path)).map(String::as_str)
    }

    pub fn base(&self) -> &Arc<dyn FileSystem> {
        &self.base
    }
}

impl std::fmt::Debug for OverlayFileSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayFileSystem")
            .field("overlays", &self.overlays.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl FileSystem for OverlayFileSystem {
    fn read_to_string(&self, path: &str) -> io::Result<String> {
        match self.overlay(path) {
            Some(text) => Ok(text.to_string()),
            None => self.base.read_to_string(path),
        }
    }

    fn is_file(&self, path: &str) -> bool {
        self.overlay(path).is_some() || self.base.is_file(path)
    }

    fn is_dir(&self, path: &str) -> bool {
        if self.base.is_dir(path) {
            return true;
        }
        let prefix = MemoryFileSystem::dir_prefix(path);
        self.overlays.keys().any(|key| key.starts_with(&prefix))
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<String>> {
        let mut children = self.base.read_dir(path).unwrap_or_default();
        let prefix = MemoryFileSystem::dir_prefix(path);
        for key in self.overlays.keys() {
            if let Some(rest) = key.strip_prefix(&prefix) {
                let child = rest.split('/').next().unwrap_or(rest);
                children.push(format!("{prefix}{child}"));
            }
        }
        if children.is_empty() && !self.is_dir(path) {
            return Err(not_found(path));
        }
        children.sort();
        children.dedup();
        Ok(children)
    }

    fn walk_files(&self, root: &str, extension: &str) -> Vec<String> {
        let mut files = self.base.walk_files(root, extension);
        let prefix = MemoryFileSystem::dir_prefix(root);
        files.extend(
            self.overlays
                .keys()
                .filter(|key| key.starts_with(&prefix) && paths::has_extension(key, extension))
                .cloned(),
        );
        files.sort();
        files.dedup();
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file("/p/src/A.sol", "contract A {}")
            .with_file("/p/src/nested/B.sol", "contract B {}")
            .with_file("/p/.git/C.sol", "")
            .with_file("/p/README.md", "")
    }

    #[test]
    fn test_memory_dirs_are_implicit() {
        let fs = memory();
        assert!(fs.is_dir("/p"));
        assert!(fs.is_dir("/p/src/"));
        assert!(!fs.is_dir("/p/src/A.sol"));
        assert!(fs.is_file("/p/src/./A.sol"));
        assert_eq!(
            fs.read_dir("/p/src").unwrap(),
            vec!["/p/src/A.sol", "/p/src/nested"]
        );
        assert!(fs.read_dir("/nope").is_err());
    }

    #[test]
    fn test_memory_walk_skips_hidden() {
        assert_eq!(
            memory().walk_files("/p", "sol"),
            vec!["/p/src/A.sol", "/p/src/nested/B.sol"]
        );
    }

    #[test]
    fn test_overlay_shadows_base() {
        let mut fs = OverlayFileSystem::new(Arc::new(memory()));
        fs.set_overlay("/p/src/A.sol", "contract A2 {}");
        fs.set_overlay("/p/src/New.sol", "contract N {}");

        assert_eq!(fs.read_to_string("/p/src/A.sol").unwrap(), "contract A2 {}");
        assert!(fs.is_file("/p/src/New.sol"));
        assert_eq!(fs.walk_files("/p/src", "sol").len(), 3);

        fs.remove_overlay("/p/src/A.sol");
        assert_eq!(fs.read_to_string("/p/src/A.sol").unwrap(), "contract A {}");
    }

    #[test]
    fn test_os_walk() {
        let dir = tempfile::tempdir().unwrap();
        let root = paths::to_slash(&dir.path().to_string_lossy());
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/A.sol"), "contract A {}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let fs = OsFileSystem;
        let files = fs.walk_files(&root, "sol");
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/A.sol"));
        assert!(fs.is_dir(&format!("{root}/src")));
    }
}
