//! Import remappings: `[context:]prefix=target`.
//!
//! A remapping rewrites the leading `prefix` of an import string to `target`.
//! The target is absolute or relative to the project root. An optional
//! `context` limits the rule either to imports spelled `context:prefix...`
//! or, as solc does, to files that live under the `context` directory.

use std::fmt;

use super::error::{ProjectError, ProjectResult};
use crate::base::paths;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Remapping {
    pub context: Option<String>,
    pub prefix: String,
    pub target: String,
    /// Directory relative targets are joined onto (the project root).
    pub base_path: String,
}

/// How specifically a remapping matched an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RemappingMatch {
    pub context_len: usize,
    pub prefix_len: usize,
    /// Bytes of the import string replaced by the target.
    consumed: usize,
}

impl Remapping {
    /// Parse one remapping line relative to `base_path`.
    pub fn parse(line: &str, base_path: &str) -> ProjectResult<Self> {
        let line = line.trim();
        let (lhs, target) = line
            .split_once('=')
            .ok_or_else(|| ProjectError::InvalidRemapping(line.to_string()))?;
        let (context, prefix) = match lhs.split_once(':') {
            Some((context, prefix)) => (Some(context.trim()), prefix.trim()),
            None => (None, lhs.trim()),
        };
        let target = target.trim();
        if prefix.is_empty() || target.is_empty() {
            return Err(ProjectError::InvalidRemapping(line.to_string()));
        }
        Ok(Self {
            context: context.filter(|c| !c.is_empty()).map(str::to_string),
            prefix: prefix.to_string(),
            target: paths::to_slash(target),
            base_path: paths::normalize(base_path),
        })
    }

    /// Absolute directory (or file) the prefix maps to.
    pub fn target_path(&self) -> String {
        paths::join(&self.base_path, &self.target)
    }

    /// Absolute directory of the context, if any.
    pub fn context_path(&self) -> Option<String> {
        self.context
            .as_deref()
            .map(|context| paths::join(&self.base_path, context))
    }

    /// Does this rule apply to `import` written in `from_path`?
    pub fn matches(&self, import: &str, from_path: Option<&str>) -> Option<RemappingMatch> {
        let Some(context) = &self.context else {
            return import.starts_with(&self.prefix).then(|| RemappingMatch {
                context_len: 0,
                prefix_len: self.prefix.len(),
                consumed: self.prefix.len(),
            });
        };

        let qualified = format!("{context}:{}", self.prefix);
        if import.starts_with(&qualified) {
            return Some(RemappingMatch {
                context_len: context.len(),
                prefix_len: self.prefix.len(),
                consumed: qualified.len(),
            });
        }

        let context_dir = self.context_path()?;
        let in_context = from_path
            .is_some_and(|from| paths::strip_base(&paths::normalize(from), &context_dir).is_some());
        (in_context && import.starts_with(&self.prefix)).then(|| RemappingMatch {
            context_len: context.len(),
            prefix_len: self.prefix.len(),
            consumed: self.prefix.len(),
        })
    }

    /// Rewrite `import` with this rule.
    pub fn apply(&self, import: &str, m: RemappingMatch) -> String {
        let rest = import[m.consumed..].trim_start_matches('/');
        let target = self.target_path();
        if rest.is_empty() {
            return target;
        }
        paths::normalize(&format!("{}/{rest}", target.trim_end_matches('/')))
    }

    /// The import string that would resolve to `path`, if `path` lies under
    /// this rule's target.
    pub fn reverse(&self, path: &str) -> Option<String> {
        let rest = paths::strip_base(path, &self.target_path())?;
        let prefix = self.prefix.trim_end_matches('/');
        Some(if rest.is_empty() {
            prefix.to_string()
        } else {
            format!("{prefix}/{rest}")
        })
    }
}

impl fmt::Display for Remapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{context}:")?;
        }
        write!(f, "{}={}", self.prefix, self.target)
    }
}

/// Parse every line, skipping blanks, `#` comments and malformed entries.
pub fn parse_remappings<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    base_path: &str,
) -> Vec<Remapping> {
    lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| match Remapping::parse(line, base_path) {
            Ok(remapping) => Some(remapping),
            Err(err) => {
                tracing::warn!(%err, "skipping remapping");
                None
            }
        })
        .collect()
}

/// Most specific rule for `import`: longest context, then longest prefix;
/// on a tie the rule declared last wins.
pub fn find_remapping<'r>(
    remappings: &'r [Remapping],
    import: &str,
    from_path: Option<&str>,
) -> Option<(&'r Remapping, RemappingMatch)> {
    let mut best: Option<(&Remapping, RemappingMatch)> = None;
    for remapping in remappings {
        let Some(m) = remapping.matches(import, from_path) else {
            continue;
        };
        let better = match &best {
            Some((_, current)) => {
                (m.context_len, m.prefix_len) >= (current.context_len, current.prefix_len)
            }
            None => true,
        };
        if better {
            best = Some((remapping, m));
        }
    }
    best
}
