//! Source document store: the transitive import closure of one request.
//!
//! Imports are found with a pattern scan instead of a parse, so a file that
//! does not currently parse still contributes its dependencies.

use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;
use regex::Regex;
use text_size::{TextRange, TextSize};

use super::fs::FileSystem;
use super::project::Project;
use crate::base::paths;

static IMPORT_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r#"\bimport\s*(?:\{[^}]*\}\s*from\s*|\*\s*as\s+[A-Za-z_$][\w$]*\s+from\s*)?["']([^"']+)["']"#,
    )
    .ok()
});

/// An import string as it appears in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    /// The path exactly as written.
    pub path: String,
    /// Range of the path text, quotes excluded.
    pub range: TextRange,
    /// Absolute target, or `None` if unresolved.
    pub resolved: Option<String>,
    /// Resolved through a remapping or dependency package.
    pub via_package: bool,
}

/// Extract import path strings with their ranges.
pub fn scan_imports(text: &str) -> Vec<(String, TextRange)> {
    let Some(re) = IMPORT_RE.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            let range = TextRange::new(
                TextSize::from(m.start() as u32),
                TextSize::from(m.end() as u32),
            );
            (m.as_str().to_string(), range)
        })
        .collect()
}

/// One file of a compilation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Absolute, slash-normalised path.
    pub path: String,
    pub text: Arc<str>,
    pub imports: Vec<ImportStatement>,
}

impl SourceDocument {
    pub fn new(path: &str, text: impl Into<Arc<str>>, project: &Project, fs: &dyn FileSystem) -> Self {
        let path = paths::normalize(path);
        let text = text.into();
        let imports = scan_imports(&text)
            .into_iter()
            .map(|(import, range)| ImportStatement {
                resolved: project.resolve_import(&import, &path, fs),
                via_package: project.is_package_import(&import, &path),
                path: import,
                range,
            })
            .collect();
        Self { path, text, imports }
    }

    /// Text with every remapped or package import rewritten to its absolute
    /// path, for handing to a compiler. Offsets differ from [`Self::text`].
    pub fn rewritten_text(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut last = 0usize;
        for import in &self.imports {
            let Some(resolved) = import.resolved.as_deref().filter(|_| import.via_package) else {
                continue;
            };
            let start = usize::from(import.range.start());
            out.push_str(&self.text[last..start]);
            out.push_str(resolved);
            last = usize::from(import.range.end());
        }
        out.push_str(&self.text[last..]);
        out
    }

    /// Resolved import targets in source order.
    pub fn resolved_imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().filter_map(|i| i.resolved.as_deref())
    }
}

/// Deduplicated set of documents reachable from the files added to it.
pub struct SourceDocumentCollection<'a> {
    project: &'a Project,
    fs: &'a dyn FileSystem,
    documents: IndexMap<String, SourceDocument>,
}

impl<'a> SourceDocumentCollection<'a> {
    pub fn new(project: &'a Project, fs: &'a dyn FileSystem) -> Self {
        Self {
            project,
            fs,
            documents: IndexMap::new(),
        }
    }

    /// Add `path` with `text` and everything it transitively imports.
    ///
    /// A path already present is returned unchanged, which is also what makes
    /// cyclic imports terminate.
    pub fn add_and_resolve(&mut self, path: &str, text: impl Into<Arc<str>>) -> &SourceDocument {
        let path = paths::normalize(path);
        if !self.documents.contains_key(&path) {
            let document = SourceDocument::new(&path, text, self.project, self.fs);
            self.documents.insert(path.clone(), document);
            self.resolve_closure(&path);
        }
        &self.documents[&path]
    }

    /// Add a file read through the filesystem. Missing files are skipped.
    pub fn add_from_fs(&mut self, path: &str) -> Option<&SourceDocument> {
        let path = paths::normalize(path);
        if !self.documents.contains_key(&path) {
            let text = self.fs.read_to_string(&path).ok()?;
            self.add_and_resolve(&path, text);
        }
        self.documents.get(&path)
    }

    fn resolve_closure(&mut self, start: &str) {
        let mut pending = vec![start.to_string()];
        while let Some(current) = pending.pop() {
            let targets: Vec<String> = match self.documents.get(&current) {
                Some(document) => document.resolved_imports().map(str::to_string).collect(),
                None => continue,
            };
            for target in targets {
                if self.documents.contains_key(&target) {
                    continue;
                }
                if !self.fs.is_file(&target) {
                    tracing::trace!(%target, from = %current, "import target missing");
                    continue;
                }
                let Ok(text) = self.fs.read_to_string(&target) else {
                    continue;
                };
                let document = SourceDocument::new(&target, text, self.project, self.fs);
                self.documents.insert(target.clone(), document);
                pending.push(target);
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&SourceDocument> {
        self.documents.get(&paths::normalize(path))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.documents.contains_key(&paths::normalize(path))
    }

    /// Documents in insertion order (entry files first).
    pub fn documents(&self) -> impl Iterator<Item = &SourceDocument> {
        self.documents.values()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{MemoryFileSystem, ProjectSettings};

    #[test]
    fn test_scan_all_import_forms() {
        let text = r#"
import "./A.sol";
import './B.sol' as B;
import * as C from "../C.sol";
import {D, E as F} from "@x/D.sol";
import{G}from"g/G.sol";
"#;
        let imports: Vec<_> = scan_imports(text).into_iter().map(|(p, _)| p).collect();
        assert_eq!(imports, vec!["./A.sol", "./B.sol", "../C.sol", "@x/D.sol", "g/G.sol"]);
    }

    #[test]
    fn test_scan_ranges_exclude_quotes() {
        let text = "import \"./A.sol\";";
        let (_, range) = scan_imports(text).remove(0);
        assert_eq!(&text[range], "./A.sol");
    }

    #[test]
    fn test_rewritten_text() {
        let fs = MemoryFileSystem::new()
            .with_file("/p/src/Main.sol", "")
            .with_file("/p/lib/oz/T.sol", "");
        let project = Project::load(
            "/p",
            &ProjectSettings::default().with_remappings(["@oz/=lib/oz/"]),
            &fs,
        )
        .unwrap();
        let doc = SourceDocument::new(
            "/p/src/Main.sol",
            "import \"@oz/T.sol\";\nimport \"./Local.sol\";\n",
            &project,
            &fs,
        );
        assert_eq!(
            doc.rewritten_text(),
            "import \"/p/lib/oz/T.sol\";\nimport \"./Local.sol\";\n"
        );
    }

    #[test]
    fn test_closure_skips_missing_and_dedups() {
        let fs = MemoryFileSystem::new()
            .with_file("/p/A.sol", "import \"./B.sol\"; import \"./Missing.sol\";")
            .with_file("/p/B.sol", "import \"./A.sol\"; import \"./C.sol\";")
            .with_file("/p/C.sol", "contract C {}");
        let project = Project::detached("/p");
        let mut collection = SourceDocumentCollection::new(&project, &fs);
        collection.add_from_fs("/p/A.sol");
        collection.add_from_fs("/p/B.sol");

        let paths: Vec<_> = collection.documents().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["/p/A.sol", "/p/B.sol", "/p/C.sol"]);
        assert!(!collection.contains("/p/Missing.sol"));
    }
}
