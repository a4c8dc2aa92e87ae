//! AnalysisHost and Analysis: Unified state management for IDE features.
//!
//! The `AnalysisHost` owns all mutable state and provides `Analysis` snapshots
//! for querying. This pattern ensures consistent reads across multiple queries.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::load("/work/token", &ProjectSettings::default(), fs)?;
//! host.index_project();
//!
//! // Apply editor changes
//! host.set_file_content("/work/token/src/Token.sol", text);
//!
//! // Get a snapshot for queries
//! let analysis = host.analysis();
//! let hover = analysis.hover("/work/token/src/Token.sol", line, col);
//! ```

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::base::{FileId, LineCol, TextSize, paths};
use crate::hir::{CacheEntry, IndexReport, ParsedDocument, Walker};
use crate::project::{FileSystem, OverlayFileSystem, Project, ProjectResult, ProjectSettings, SourceDocument};

use super::{
    CompletionItem, GotoResult, HoverResult, ReferenceResult, RenameResult, SymbolInfo, completion, goto, hover,
    references, rename, symbols,
};

/// Owns all mutable state for the IDE layer.
///
/// Apply changes via `set_file_content()` and `close_file()`,
/// then get a consistent snapshot via `analysis()`.
pub struct AnalysisHost {
    project: Project,
    /// Disk contents shadowed by open editor buffers.
    fs: OverlayFileSystem,
    walker: Walker,
}

impl AnalysisHost {
    pub fn new(project: Project, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            project,
            fs: OverlayFileSystem::new(fs),
            walker: Walker::new(),
        }
    }

    /// Load the project rooted at `root` and wrap it in a host.
    pub fn load(root: &str, settings: &ProjectSettings, fs: Arc<dyn FileSystem>) -> ProjectResult<Self> {
        let project = Project::load(root, settings, fs.as_ref())?;
        Ok(Self::new(project, fs))
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn walker(&self) -> &Walker {
        &self.walker
    }

    /// Index every source file of the project.
    pub fn index_project(&mut self) -> IndexReport {
        self.walker.index_project(&self.project, &self.fs)
    }

    /// Set the editor content of a file and refresh it with its imports.
    pub fn set_file_content(&mut self, path: &str, content: &str) -> IndexReport {
        let path = paths::normalize(path);
        self.fs.set_overlay(&path, content);
        self.walker.update(&self.project, &self.fs, &path, content)
    }

    /// Drop the editor buffer of a file; the disk version takes over, or the
    /// file leaves the index if it only ever existed in the editor.
    pub fn close_file(&mut self, path: &str) {
        let path = paths::normalize(path);
        self.fs.remove_overlay(&path);
        match self.fs.read_to_string(&path) {
            Ok(text) => {
                self.walker.update(&self.project, &self.fs, &path, &text);
            }
            Err(_) => self.walker.remove(&path),
        }
    }

    /// Completion at a position.
    ///
    /// Text being typed rarely parses, so unless the indexed model is clean
    /// the query runs against a model with the cursor line blanked. That
    /// model is dropped afterwards; the cache keeps the live text. The access
    /// chain itself is read from the live text.
    pub fn completions(&mut self, path: &str, line: u32, col: u32) -> Vec<CompletionItem> {
        let path = paths::normalize(path);
        let Ok(text) = self.fs.read_to_string(&path) else {
            return Vec::new();
        };

        let clean = self
            .walker
            .file_id(&path)
            .and_then(|file| self.walker.entry(file))
            .is_some_and(|entry| match entry {
                CacheEntry::Parsed(doc) => doc.blanked_lines().is_empty() && &**doc.text() == text.as_str(),
                CacheEntry::Failed { .. } => false,
            });
        if !clean {
            self.walker.update(&self.project, &self.fs, &path, &text);
            let source = SourceDocument::new(&path, text.as_str(), &self.project, &self.fs);
            let project = &self.project;
            let blanked = self.walker.with_blanked(&source, &[line], |walker, _| {
                Analysis { project, walker }.completions_in(&path, &text, line, col)
            });
            if let Some(items) = blanked {
                return items;
            }
        }
        self.analysis().completions_in(&path, &text, line, col)
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            project: &self.project,
            walker: &self.walker,
        }
    }
}

/// A read-only view over the indexed state.
///
/// Positions are 0-indexed (line, column in bytes).
#[derive(Clone, Copy)]
pub struct Analysis<'a> {
    project: &'a Project,
    walker: &'a Walker,
}

impl<'a> Analysis<'a> {
    pub fn walker(&self) -> &'a Walker {
        self.walker
    }

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.walker.file_id(&paths::normalize(path))
    }

    pub fn document(&self, path: &str) -> Option<&'a Arc<ParsedDocument>> {
        self.walker.document_by_path(&paths::normalize(path))
    }

    fn position(&self, path: &str, line: u32, col: u32) -> Option<(FileId, TextSize)> {
        let doc = self.document(path)?;
        let offset = doc.line_index().offset(LineCol::new(line, col))?;
        Some((doc.file(), offset))
    }

    pub fn hover(&self, path: &str, line: u32, col: u32) -> Option<HoverResult> {
        let (file, offset) = self.position(path, line, col)?;
        hover::hover(self.walker, file, offset)
    }

    pub fn goto_definition(&self, path: &str, line: u32, col: u32) -> GotoResult {
        match self.position(path, line, col) {
            Some((file, offset)) => goto::goto_definition(self.walker, file, offset),
            None => GotoResult::empty(),
        }
    }

    pub fn find_references(&self, path: &str, line: u32, col: u32, include_declaration: bool) -> ReferenceResult {
        match self.position(path, line, col) {
            Some((file, offset)) => references::find_references(self.walker, file, offset, include_declaration),
            None => ReferenceResult::empty(),
        }
    }

    pub fn rename(&self, path: &str, line: u32, col: u32, new_name: &str) -> Option<RenameResult> {
        let (file, offset) = self.position(path, line, col)?;
        rename::rename(self.walker, file, offset, new_name)
    }

    /// Completion against the indexed text of `path`.
    pub fn completions(&self, path: &str, line: u32, col: u32) -> Vec<CompletionItem> {
        match self.document(path) {
            Some(doc) => self.completions_in(path, doc.text(), line, col),
            None => Vec::new(),
        }
    }

    /// Completion where `text` is the live buffer, whose cursor line may
    /// differ from the indexed (blanked) one.
    fn completions_in(&self, path: &str, text: &str, line: u32, col: u32) -> Vec<CompletionItem> {
        let Some((file, offset)) = self.position(path, line, col) else {
            return Vec::new();
        };
        let line_prefix = text
            .lines()
            .nth(line as usize)
            .and_then(|l| l.get(..col as usize))
            .unwrap_or_default();
        completion::completions(self.walker, self.project, file, offset, line_prefix)
    }

    pub fn document_symbols(&self, path: &str) -> Vec<SymbolInfo> {
        match self.file_id(path) {
            Some(file) => symbols::document_symbols(self.walker, file),
            None => Vec::new(),
        }
    }

    pub fn workspace_symbols(&self, query: Option<&str>) -> Vec<SymbolInfo> {
        symbols::workspace_symbols(self.walker, query)
    }
}

/// An [`AnalysisHost`] shared between threads: one writer at a time, any
/// number of concurrent readers.
#[derive(Clone)]
pub struct SharedAnalysisHost {
    inner: Arc<RwLock<AnalysisHost>>,
}

impl SharedAnalysisHost {
    pub fn new(host: AnalysisHost) -> Self {
        Self {
            inner: Arc::new(RwLock::new(host)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, AnalysisHost> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, AnalysisHost> {
        self.inner.write()
    }

    /// Run a query against a snapshot under the read lock.
    pub fn with_analysis<T>(&self, f: impl FnOnce(Analysis<'_>) -> T) -> T {
        let host = self.inner.read();
        f(host.analysis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::MemoryFileSystem;

    const TOKEN: &str = "\
struct Point { uint x; uint y; }
contract Token {
    function f() public {
        Point memory p;
    }
}
";

    fn host() -> AnalysisHost {
        let fs = MemoryFileSystem::new().with_file("/p/Token.sol", TOKEN);
        let mut host = AnalysisHost::load("/p", &ProjectSettings::default(), Arc::new(fs)).unwrap();
        host.index_project();
        host
    }

    #[test]
    fn test_completion_on_unparsable_line() {
        let mut host = host();
        let edited = TOKEN.replace("Point memory p;\n", "Point memory p;\n        p.\n");
        host.set_file_content("/p/Token.sol", &edited);
        let items = host.completions("/p/Token.sol", 4, 10);
        let mut labels: Vec<&str> = items.iter().map(|i| &*i.label).collect();
        labels.sort_unstable();
        assert_eq!(labels, vec!["x", "y"]);
    }

    #[test]
    fn test_completion_leaves_cursor_line_resolvable() {
        let mut host = host();
        let text = "\
contract Token {
    uint total;
    function f() public {
        total = 1;
        uint x = ;
    }
}
";
        host.set_file_content("/p/Token.sol", text);
        assert_eq!(host.analysis().goto_definition("/p/Token.sol", 3, 9).targets.len(), 1);

        host.completions("/p/Token.sol", 3, 13);
        let targets = host.analysis().goto_definition("/p/Token.sol", 3, 9).targets;
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "total");
        assert_eq!(targets[0].location.start.line, 1);

        let report = host.set_file_content("/p/Token.sol", text);
        assert!(report.reparsed.is_empty());
        assert_eq!(host.analysis().goto_definition("/p/Token.sol", 3, 9).targets.len(), 1);
    }

    #[test]
    fn test_close_restores_disk_version() {
        let mut host = host();
        host.set_file_content("/p/Token.sol", "contract Other {}");
        assert_eq!(host.analysis().workspace_symbols(Some("Other")).len(), 1);
        host.close_file("/p/Token.sol");
        assert!(host.analysis().workspace_symbols(Some("Other")).is_empty());
        assert_eq!(host.analysis().workspace_symbols(Some("Token")).len(), 1);
    }

    #[test]
    fn test_shared_host_queries() {
        let shared = SharedAnalysisHost::new(host());
        let outline = shared.with_analysis(|analysis| analysis.document_symbols("/p/Token.sol"));
        assert_eq!(outline.len(), 2);
        shared.write().set_file_content("/p/Token.sol", "contract Only {}");
        assert_eq!(shared.read().analysis().document_symbols("/p/Token.sol").len(), 1);
    }
}
