//! Access chains rebuilt from raw line text.
//!
//! Completion runs on text that usually does not parse (`foo.bar.` with the
//! cursor after the dot), so the chain in front of the cursor is recovered by
//! scanning the line right to left instead of asking the parser.

use smol_str::SmolStr;

/// One segment of a scanned chain, e.g. `items[i]` or `owner()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainLink {
    pub name: SmolStr,
    pub is_call: bool,
    pub index_count: u32,
}

/// The chain before the cursor plus the identifier being typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessChain {
    /// Links from the root, e.g. `[a, b]` for `a.b().`.
    pub links: Vec<ChainLink>,
    /// Partial identifier after the last dot.
    pub partial: SmolStr,
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || unicode_ident::is_xid_start(c)
}

fn is_ident_continue(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c)
}

/// Scan `line` (text from the line start up to the cursor).
///
/// Returns `None` unless the cursor sits after `chain.` with an optional
/// partial identifier.
pub fn parse_access_chain(line: &str) -> Option<AccessChain> {
    let chars: Vec<char> = line.chars().collect();
    let mut pos = chars.len();

    let partial_end = pos;
    while pos > 0 && is_ident_continue(chars[pos - 1]) {
        pos -= 1;
    }
    let partial: String = chars[pos..partial_end].iter().collect();
    if pos == 0 || chars[pos - 1] != '.' {
        return None;
    }
    pos -= 1;

    let mut links = Vec::new();
    loop {
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        let mut is_call = false;
        let mut index_count = 0;
        while pos > 0 && matches!(chars[pos - 1], ')' | ']') {
            let (open, close) = if chars[pos - 1] == ')' { ('(', ')') } else { ('[', ']') };
            pos = skip_group(&chars, pos, open, close)?;
            if close == ')' {
                is_call = true;
            } else {
                index_count += 1;
            }
            while pos > 0 && chars[pos - 1].is_whitespace() {
                pos -= 1;
            }
        }

        let end = pos;
        while pos > 0 && is_ident_continue(chars[pos - 1]) {
            pos -= 1;
        }
        if pos == end || !is_ident_start(chars[pos]) {
            return None;
        }
        links.push(ChainLink {
            name: chars[pos..end].iter().collect::<String>().into(),
            is_call,
            index_count,
        });

        let mut before = pos;
        while before > 0 && chars[before - 1].is_whitespace() {
            before -= 1;
        }
        if before > 0 && chars[before - 1] == '.' {
            pos = before - 1;
        } else {
            break;
        }
    }

    links.reverse();
    Some(AccessChain {
        links,
        partial: partial.into(),
    })
}

/// Position of the `open` matching the `close` just before `end`.
fn skip_group(chars: &[char], end: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = end;
    while pos > 0 {
        pos -= 1;
        let c = chars[pos];
        if c == close {
            depth += 1;
        } else if c == open {
            depth -= 1;
            if depth == 0 {
                return Some(pos);
            }
        }
    }
    None
}

/// Text of an unterminated `import "...` string before the cursor.
pub fn import_path_prefix(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with("import") {
        return None;
    }
    let quote = line.rfind(['"', '\''])?;
    let quote_char = line[quote..].chars().next()?;
    if line.matches(quote_char).count() % 2 == 0 {
        return None;
    }
    Some(&line[quote + 1..])
}
