//! In-memory and on-disk projects wrapped in an `AnalysisHost`.

use std::path::Path;
use std::sync::Arc;

use solace::ide::AnalysisHost;
use solace::project::{MemoryFileSystem, OsFileSystem, ProjectSettings};

pub const ROOT: &str = "/work";

/// Absolute path of a fixture file under [`ROOT`].
pub fn path(relative: &str) -> String {
    format!("{ROOT}/{relative}")
}

/// Build a memory project from `(relative path, text)` pairs and index it.
pub fn memory_host(files: &[(&str, &str)]) -> AnalysisHost {
    memory_host_with(files, ProjectSettings::default())
}

pub fn memory_host_with(files: &[(&str, &str)], settings: ProjectSettings) -> AnalysisHost {
    let mut fs = MemoryFileSystem::new();
    for (relative, text) in files {
        fs.insert(&path(relative), *text);
    }
    let mut host = AnalysisHost::load(ROOT, &settings, Arc::new(fs)).expect("fixture root exists");
    host.index_project();
    host
}

/// Write `(relative path, text)` pairs under `root` on disk.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, text) in files {
        let target = root.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).expect("create fixture dir");
        }
        std::fs::write(target, text).expect("write fixture file");
    }
}

/// Index a real directory through the OS filesystem.
pub fn disk_host(root: &Path) -> AnalysisHost {
    let root = root.to_string_lossy().replace('\\', "/");
    let mut host = AnalysisHost::load(&root, &ProjectSettings::default(), Arc::new(OsFileSystem))
        .expect("temp root exists");
    host.index_project();
    host
}
