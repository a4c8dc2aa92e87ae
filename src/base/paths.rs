//! Slash-normalised path helpers.
//!
//! Every path that crosses a module boundary is a `/`-separated string:
//! Windows separators are rewritten before any comparison, `.` segments are
//! dropped and `..` segments are folded. Nothing here touches the disk.

/// Replace `\` with `/`.
pub fn to_slash(path: &str) -> String {
    path.replace('\\', "/")
}

/// True for `/abs`, `C:/abs` and `\\server` style paths.
pub fn is_absolute(path: &str) -> bool {
    let path = path.as_bytes();
    if path.first() == Some(&b'/') || path.first() == Some(&b'\\') {
        return true;
    }
    path.len() >= 2 && path[0].is_ascii_alphabetic() && path[1] == b':'
}

/// Normalise separators and fold `.`/`..` segments.
pub fn normalize(path: &str) -> String {
    let path = to_slash(path);
    let (prefix, rest) = split_root(&path);

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(last) if *last != "..") {
                    segments.pop();
                } else if prefix.is_empty() {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if prefix.is_empty() {
        joined
    } else {
        format!("{prefix}{joined}")
    }
}

/// Join `tail` onto `base`. An absolute `tail` replaces `base`.
pub fn join(base: &str, tail: &str) -> String {
    if is_absolute(tail) {
        return normalize(tail);
    }
    if base.is_empty() {
        return normalize(tail);
    }
    normalize(&format!("{}/{}", to_slash(base).trim_end_matches('/'), tail))
}

/// Directory part of a path (`/a/b/C.sol` → `/a/b`).
pub fn parent(path: &str) -> String {
    let path = to_slash(path);
    match path.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
        None => String::new(),
    }
}

/// Last path segment.
pub fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed
        .rfind(['/', '\\'])
        .map(|idx| &trimmed[idx + 1..])
        .unwrap_or(trimmed)
}

/// `path` relative to `base`, if `path` lives under `base`.
pub fn strip_base<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    let base = base.trim_end_matches('/');
    let rest = path.strip_prefix(base)?;
    if base.is_empty() {
        return Some(rest.trim_start_matches('/'));
    }
    rest.strip_prefix('/').or((rest.is_empty()).then_some(rest))
}

/// Import-style relative path from directory `from_dir` to `to`
/// (`./B.sol`, `../lib/C.sol`). Both inputs must be absolute.
pub fn relative(from_dir: &str, to: &str) -> String {
    let from = normalize(from_dir);
    let to = normalize(to);
    let from_segments: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segments: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let common = from_segments
        .iter()
        .zip(&to_segments)
        .take_while(|(a, b)| a == b)
        .count();
    let ups = from_segments.len() - common;
    let rest = to_segments[common..].join("/");
    if ups == 0 {
        format!("./{rest}")
    } else {
        format!("{}{rest}", "../".repeat(ups))
    }
}

/// Does `path` carry the given extension (without dot)?
pub fn has_extension(path: &str, ext: &str) -> bool {
    file_name(path)
        .rsplit_once('.')
        .is_some_and(|(stem, e)| !stem.is_empty() && e.eq_ignore_ascii_case(ext))
}

fn split_root(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        if bytes.get(2) == Some(&b'/') {
            return (&path[..3], &path[3..]);
        }
        return (&path[..2], &path[2..]);
    }
    if path.starts_with('/') {
        return ("/", &path[1..]);
    }
    ("", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_segments() {
        assert_eq!(normalize("/p/a/./b/../C.sol"), "/p/a/C.sol");
        assert_eq!(normalize("C:\\proj\\lib\\..\\src\\A.sol"), "C:/proj/src/A.sol");
        assert_eq!(normalize("../x/y"), "../x/y");
        assert_eq!(normalize("/../x"), "/x");
    }

    #[test]
    fn test_join_and_parent() {
        assert_eq!(join("/p/src", "./B.sol"), "/p/src/B.sol");
        assert_eq!(join("/p/src", "../lib/B.sol"), "/p/lib/B.sol");
        assert_eq!(join("/p/src", "/abs/B.sol"), "/abs/B.sol");
        assert_eq!(parent("/p/src/A.sol"), "/p/src");
        assert_eq!(parent("/A.sol"), "/");
    }

    #[test]
    fn test_relative() {
        assert_eq!(relative("/p/src", "/p/src/B.sol"), "./B.sol");
        assert_eq!(relative("/p/src/a", "/p/lib/C.sol"), "../../lib/C.sol");
    }

    #[test]
    fn test_strip_base() {
        assert_eq!(strip_base("/p/src/A.sol", "/p"), Some("src/A.sol"));
        assert_eq!(strip_base("/p/src/A.sol", "/p/"), Some("src/A.sol"));
        assert_eq!(strip_base("/pq/src/A.sol", "/p"), None);
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension("/p/A.sol", "sol"));
        assert!(!has_extension("/p/A.sol.bak", "sol"));
        assert!(!has_extension("/p/.sol", "sol"));
    }
}
