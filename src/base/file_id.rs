//! File identifiers for tracking source files.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// An interned identifier for a source file.
///
/// `FileId` is a lightweight handle (just a u32) that uniquely identifies
/// an absolute, slash-normalised path for the lifetime of a [`FileTable`].
/// It stays stable when the file's text changes, so cross-document handles
/// survive a reparse of either side.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FileId(pub u32);

impl FileId {
    /// Create a new FileId from a raw index.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

impl From<u32> for FileId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Bidirectional path ↔ [`FileId`] interner.
///
/// Ids are never recycled: once a path is interned it keeps its id.
#[derive(Clone, Debug, Default)]
pub struct FileTable {
    paths: Vec<Arc<str>>,
    ids: FxHashMap<Arc<str>, FileId>,
}

impl FileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a path, returning its id.
    pub fn intern(&mut self, path: &str) -> FileId {
        if let Some(&id) = self.ids.get(path) {
            return id;
        }
        let id = FileId::new(self.paths.len() as u32);
        let path: Arc<str> = Arc::from(path);
        self.paths.push(path.clone());
        self.ids.insert(path, id);
        id
    }

    /// Look up an already-interned path.
    pub fn get(&self, path: &str) -> Option<FileId> {
        self.ids.get(path).copied()
    }

    /// Path for an id.
    pub fn path(&self, id: FileId) -> Option<&Arc<str>> {
        self.paths.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_equality() {
        let a = FileId::new(1);
        let b = FileId::new(1);
        let c = FileId::new(2);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_intern_is_stable() {
        let mut table = FileTable::new();
        let a = table.intern("/p/A.sol");
        let b = table.intern("/p/B.sol");
        assert_ne!(a, b);
        assert_eq!(table.intern("/p/A.sol"), a);
        assert_eq!(table.path(b).map(|p| p.as_ref()), Some("/p/B.sol"));
        assert_eq!(table.get("/p/C.sol"), None);
    }
}
