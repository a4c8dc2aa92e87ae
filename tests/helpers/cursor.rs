//! Cursor markers in fixture text.
//!
//! Fixtures mark the cursor with `$0`; the marker is removed and its
//! position returned as a 0-indexed (line, column) pair.

pub const MARKER: &str = "$0";

/// Strip the `$0` marker and return the clean text plus the cursor.
pub fn extract_cursor(text: &str) -> (String, u32, u32) {
    let offset = text
        .find(MARKER)
        .unwrap_or_else(|| panic!("fixture has no {MARKER} marker"));
    let clean = format!("{}{}", &text[..offset], &text[offset + MARKER.len()..]);
    let before = &text[..offset];
    let line = before.matches('\n').count() as u32;
    let col = before.rfind('\n').map_or(offset, |nl| offset - nl - 1) as u32;
    (clean, line, col)
}

/// (line, column) of the first occurrence of `needle`, plus `shift` columns.
pub fn position_of(text: &str, needle: &str, shift: u32) -> (u32, u32) {
    let offset = text
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in fixture"));
    let before = &text[..offset];
    let line = before.matches('\n').count() as u32;
    let col = before.rfind('\n').map_or(offset, |nl| offset - nl - 1) as u32;
    (line, col + shift)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cursor() {
        let (clean, line, col) = extract_cursor("a\n  b.$0\n");
        assert_eq!(clean, "a\n  b.\n");
        assert_eq!((line, col), (1, 4));
    }
}
