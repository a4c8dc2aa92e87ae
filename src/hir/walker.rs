//! The indexing cache: one semantic model per absolute path.
//!
//! ```text
//!   absent ──parse──▶ parsed(v) ──text changed──▶ parsed(v')
//!                        │
//!                        └──same text──▶ parsed(v)   (cache hit, same Arc)
//! ```
//!
//! Every request refreshes the import closure of the edited file, then
//! relinks import symbols to their target documents. Documents are replaced,
//! never mutated, and every replacement drops the resolution memo.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::document::ParsedDocument;
use super::ids::{ExprId, SymbolRef};
use super::recovery::{DegradedParse, parse_with_blanked, parse_with_recovery};
use super::resolve::ExpressionType;
use super::symbols::HirSymbol;
use crate::base::{FileId, FileTable};
use crate::parser::{ParseError, SolidityParser, SourceParser};
use crate::project::{FileSystem, Project, SourceDocument, SourceDocumentCollection};

/// Cached state of one path.
#[derive(Debug, Clone)]
pub enum CacheEntry {
    Parsed(Arc<ParsedDocument>),
    /// Recovery was exhausted for this text; queries see no symbols.
    Failed {
        text: Arc<str>,
        diagnostics: Vec<ParseError>,
    },
}

impl CacheEntry {
    fn text(&self) -> &str {
        match self {
            CacheEntry::Parsed(doc) => doc.text(),
            CacheEntry::Failed { text, .. } => text,
        }
    }
}

/// What one indexing pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub reparsed: Vec<FileId>,
    pub reused: Vec<FileId>,
    pub failed: Vec<FileId>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(super) struct MemoKey {
    pub(super) file: FileId,
    pub(super) version: u64,
    pub(super) expr: ExprId,
}

/// Lazily computed resolution results.
#[derive(Debug, Default)]
pub(super) struct Memo {
    pub(super) references: FxHashMap<MemoKey, Option<SymbolRef>>,
    pub(super) types: FxHashMap<MemoKey, Option<ExpressionType>>,
}

/// Owns every parsed document of an indexing session.
pub struct Walker {
    parser: Arc<dyn SourceParser>,
    files: FileTable,
    entries: FxHashMap<FileId, CacheEntry>,
    /// Import symbol → the document it imports.
    links: FxHashMap<SymbolRef, FileId>,
    next_version: u64,
    pub(super) memo: Mutex<Memo>,
}

impl Default for Walker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Walker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walker")
            .field("files", &self.files.len())
            .field("entries", &self.entries.len())
            .field("next_version", &self.next_version)
            .finish()
    }
}

impl Walker {
    pub fn new() -> Self {
        Self::with_parser(Arc::new(SolidityParser))
    }

    pub fn with_parser(parser: Arc<dyn SourceParser>) -> Self {
        Self {
            parser,
            files: FileTable::new(),
            entries: FxHashMap::default(),
            links: FxHashMap::default(),
            next_version: 1,
            memo: Mutex::new(Memo::default()),
        }
    }

    // ==================== Lookup ====================

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.files.get(path)
    }

    pub fn path(&self, file: FileId) -> Option<&Arc<str>> {
        self.files.path(file)
    }

    pub fn entry(&self, file: FileId) -> Option<&CacheEntry> {
        self.entries.get(&file)
    }

    pub fn document(&self, file: FileId) -> Option<&Arc<ParsedDocument>> {
        match self.entries.get(&file)? {
            CacheEntry::Parsed(doc) => Some(doc),
            CacheEntry::Failed { .. } => None,
        }
    }

    pub fn document_by_path(&self, path: &str) -> Option<&Arc<ParsedDocument>> {
        self.document(self.file_id(path)?)
    }

    /// Every parsed document, in the order paths were first seen.
    pub fn documents(&self) -> impl Iterator<Item = &Arc<ParsedDocument>> {
        (0..self.files.len() as u32).filter_map(|idx| self.document(FileId::new(idx)))
    }

    pub fn symbol(&self, symbol: SymbolRef) -> Option<&HirSymbol> {
        self.document(symbol.file)?.symbol(symbol.id)
    }

    /// Document targeted by an import symbol, after linking.
    pub fn import_target(&self, import: SymbolRef) -> Option<FileId> {
        self.links.get(&import).copied()
    }

    // ==================== Indexing ====================

    /// Refresh the models of `documents`, then relink imports.
    pub fn index<'d>(&mut self, documents: impl IntoIterator<Item = &'d SourceDocument>) -> IndexReport {
        let mut report = IndexReport::default();
        for source in documents {
            let file = self.files.intern(&source.path);
            if self
                .entries
                .get(&file)
                .is_some_and(|entry| entry.text() == &*source.text)
            {
                tracing::trace!(path = %source.path, "cache hit");
                report.reused.push(file);
                continue;
            }

            tracing::debug!(path = %source.path, "reparse");
            match parse_with_recovery(self.parser.as_ref(), &source.text) {
                Ok(parsed) => {
                    self.store(file, source, parsed);
                    report.reparsed.push(file);
                }
                Err(diagnostics) => {
                    tracing::warn!(path = %source.path, errors = diagnostics.len(), "document left unindexed");
                    self.entries.insert(
                        file,
                        CacheEntry::Failed {
                            text: source.text.clone(),
                            diagnostics,
                        },
                    );
                    report.failed.push(file);
                }
            }
        }
        if !report.reparsed.is_empty() || !report.failed.is_empty() {
            self.memo.lock().clear();
        }
        self.link_imports();
        report
    }

    /// Refresh `path` with `text` and its whole import closure.
    pub fn update(&mut self, project: &Project, fs: &dyn FileSystem, path: &str, text: &str) -> IndexReport {
        let mut collection = SourceDocumentCollection::new(project, fs);
        collection.add_and_resolve(path, text);
        self.index(collection.documents())
    }

    /// Index every source file of the project.
    pub fn index_project(&mut self, project: &Project, fs: &dyn FileSystem) -> IndexReport {
        let mut collection = SourceDocumentCollection::new(project, fs);
        for path in project.source_files(fs) {
            collection.add_from_fs(&path);
        }
        let report = self.index(collection.documents());
        tracing::debug!(
            reparsed = report.reparsed.len(),
            reused = report.reused.len(),
            failed = report.failed.len(),
            "project indexed"
        );
        report
    }

    /// Run `f` against a model of `source` with `lines` blanked, whether or
    /// not it parses as is. Used when the caller knows a line is mid-edit.
    ///
    /// The blanked model only lives for the call: the previous entry is put
    /// back before returning, so other queries never see the blanked text.
    pub fn with_blanked<T>(
        &mut self,
        source: &SourceDocument,
        lines: &[u32],
        f: impl FnOnce(&Walker, FileId) -> T,
    ) -> Option<T> {
        let file = self.files.intern(&source.path);
        let parsed = parse_with_blanked(self.parser.as_ref(), &source.text, lines).ok()?;
        let previous = self.entries.remove(&file);
        self.store(file, source, parsed);
        self.memo.lock().clear();
        self.link_imports();

        let result = f(self, file);

        match previous {
            Some(entry) => {
                self.entries.insert(file, entry);
            }
            None => {
                self.entries.remove(&file);
            }
        }
        self.memo.lock().clear();
        self.link_imports();
        Some(result)
    }

    /// Drop a path from the cache. Its id stays reserved.
    pub fn remove(&mut self, path: &str) {
        let Some(file) = self.files.get(path) else {
            return;
        };
        if self.entries.remove(&file).is_some() {
            self.memo.lock().clear();
            self.link_imports();
        }
    }

    fn store(&mut self, file: FileId, source: &SourceDocument, parsed: DegradedParse) {
        let version = self.next_version;
        self.next_version += 1;
        let doc = ParsedDocument::build(file, &parsed.unit, source, version)
            .with_recovery(parsed.blanked_lines, parsed.diagnostics);
        self.entries.insert(file, CacheEntry::Parsed(Arc::new(doc)));
    }

    fn link_imports(&mut self) {
        let mut links = FxHashMap::default();
        for doc in self.documents() {
            for id in doc.imports() {
                let Some(resolved) = doc
                    .symbol(id)
                    .and_then(HirSymbol::as_import)
                    .and_then(|import| import.resolved.as_deref())
                else {
                    continue;
                };
                if let Some(target) = self.files.get(resolved).filter(|t| self.document(*t).is_some()) {
                    links.insert(SymbolRef::new(doc.file(), id), target);
                }
            }
        }
        self.links = links;
    }

    pub(super) fn memo_key(&self, file: FileId, expr: ExprId) -> Option<MemoKey> {
        let version = self.document(file)?.version();
        Some(MemoKey { file, version, expr })
    }
}

impl Memo {
    fn clear(&mut self) {
        self.references.clear();
        self.types.clear();
    }
}
