//! Rename: every reference rewritten to a new identifier.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::base::{FileId, TextRange, TextSize};
use crate::hir::Walker;

use super::navigation::FileRange;
use super::references::find_references;

/// One replacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub location: FileRange,
    pub new_text: String,
}

/// Edits grouped per file, each group in source order.
#[derive(Clone, Debug, Default)]
pub struct RenameResult {
    pub edits: BTreeMap<Arc<str>, Vec<TextEdit>>,
}

impl RenameResult {
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Total number of edits.
    pub fn len(&self) -> usize {
        self.edits.values().map(Vec::len).sum()
    }
}

fn is_identifier_char(c: char) -> bool {
    c == '$' || c == '_' || unicode_ident::is_xid_continue(c)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c == '$' || unicode_ident::is_xid_start(c))
        && chars.all(is_identifier_char)
}

/// Byte offset of the first occurrence of `name` in `text` not touching
/// another identifier character on either side.
fn find_whole_identifier(text: &str, name: &str) -> Option<usize> {
    text.match_indices(name).map(|(idx, _)| idx).find(|&idx| {
        let before = text[..idx].chars().next_back();
        let after = text[idx + name.len()..].chars().next();
        !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
    })
}

/// Rename the symbol under `offset` to `new_name`.
///
/// Each reference span is narrowed to the first whole-identifier match of
/// the old name inside it; spans with no match are skipped. Returns `None`
/// when `new_name` is not an identifier or there is nothing to rewrite.
pub fn rename(walker: &Walker, file: FileId, offset: TextSize, new_name: &str) -> Option<RenameResult> {
    if !is_identifier(new_name) {
        return None;
    }
    let references = find_references(walker, file, offset, true);
    let target = walker.symbol(references.target?)?;
    if target.name.is_empty() {
        return None;
    }

    let mut result = RenameResult::default();
    for reference in references.references {
        let Some(doc) = walker.document(reference.location.file) else {
            continue;
        };
        let span = reference.location.range;
        let Some(found) = find_whole_identifier(doc.slice(span), &target.name) else {
            continue;
        };
        let start = span.start() + TextSize::from(found as u32);
        let range = TextRange::at(start, TextSize::from(target.name.len() as u32));
        result
            .edits
            .entry(doc.path().clone())
            .or_default()
            .push(TextEdit {
                location: FileRange::new(doc, range),
                new_text: new_name.to_string(),
            });
    }
    for edits in result.edits.values_mut() {
        edits.sort_by_key(|edit| edit.location.range.start());
        edits.dedup_by_key(|edit| edit.location.range);
    }
    (!result.is_empty()).then_some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{MemoryFileSystem, Project, ProjectSettings};

    const SRC: &str = "\
contract Token {
    function transfer(address to, uint256 amount) public {
        require(amount > 0);
        uint256 amountLeft = amount;
    }
    function withdraw(uint256 amount) public {
        amount;
    }
}
";

    fn setup() -> (Walker, FileId) {
        let fs = MemoryFileSystem::new().with_file("/p/Token.sol", SRC);
        let project = Project::load("/p", &ProjectSettings::default(), &fs).unwrap();
        let mut walker = Walker::new();
        walker.index_project(&project, &fs);
        let file = walker.file_id("/p/Token.sol").unwrap();
        (walker, file)
    }

    #[test]
    fn test_rename_parameter_stays_in_function() {
        let (walker, file) = setup();
        let offset = TextSize::from(SRC.find("amount)").unwrap() as u32);
        let result = rename(&walker, file, offset, "value").unwrap();
        let edits = &result.edits["/p/Token.sol"];
        let lines: Vec<u32> = edits.iter().map(|e| e.location.start.line).collect();
        assert_eq!(lines, vec![1, 2, 3]);
        for edit in edits {
            assert_eq!(&SRC[edit.location.range], "amount");
        }
    }

    #[test]
    fn test_rejects_invalid_name() {
        let (walker, file) = setup();
        let offset = TextSize::from(SRC.find("amount)").unwrap() as u32);
        assert!(rename(&walker, file, offset, "1abc").is_none());
        assert!(rename(&walker, file, offset, "a-b").is_none());
    }

    #[test]
    fn test_rename_dollar_identifier() {
        let src = "contract C {\n    function f(uint $amt) public { $amt; }\n}\n";
        let fs = MemoryFileSystem::new().with_file("/p/C.sol", src);
        let project = Project::load("/p", &ProjectSettings::default(), &fs).unwrap();
        let mut walker = Walker::new();
        walker.index_project(&project, &fs);
        let file = walker.file_id("/p/C.sol").unwrap();

        let offset = TextSize::from(src.find("$amt)").unwrap() as u32 + 1);
        let result = rename(&walker, file, offset, "total").unwrap();
        assert_eq!(result.len(), 2);
        for edit in &result.edits["/p/C.sol"] {
            assert_eq!(&src[edit.location.range], "$amt");
        }
    }

    #[test]
    fn test_whole_identifier_match() {
        assert_eq!(find_whole_identifier("$amt + amt", "amt"), Some(7));
        assert_eq!(find_whole_identifier("amount_2 amount", "amount"), Some(9));
        assert_eq!(find_whole_identifier("x.$amt", "$amt"), Some(2));
        assert_eq!(find_whole_identifier("$amtx", "$amt"), None);
    }
}
