//! Degraded parsing: blank offending lines until the file parses.
//!
//! Text typed mid-edit rarely parses. Rather than losing the whole file,
//! the line holding the first syntax error is overwritten with spaces and
//! the parse retried. Blanking keeps every byte offset, so spans in the
//! partial tree still point into the original text.

use crate::base::LineIndex;
use crate::parser::{ParseError, SourceParser};
use crate::syntax::SourceUnit;

/// A successful parse, possibly of a text with some lines blanked.
#[derive(Debug, Clone)]
pub struct DegradedParse {
    pub unit: SourceUnit,
    /// Lines (0-indexed) replaced with spaces, in the order they were blanked.
    pub blanked_lines: Vec<u32>,
    /// The error that caused each blanking.
    pub diagnostics: Vec<ParseError>,
}

impl DegradedParse {
    pub fn is_clean(&self) -> bool {
        self.blanked_lines.is_empty()
    }
}

/// Parse `text`, blanking at most one line per attempt.
///
/// Gives up, returning every error seen, once no unblanked line is left to
/// sacrifice. The number of attempts is bounded by the line count.
pub fn parse_with_recovery(parser: &dyn SourceParser, text: &str) -> Result<DegradedParse, Vec<ParseError>> {
    parse_with_blanked(parser, text, &[])
}

/// Like [`parse_with_recovery`], with `lines` blanked up front.
pub fn parse_with_blanked(
    parser: &dyn SourceParser,
    text: &str,
    lines: &[u32],
) -> Result<DegradedParse, Vec<ParseError>> {
    let index = LineIndex::new(text);
    let mut working = text.to_string();
    let mut blanked: Vec<u32> = Vec::new();
    for &line in lines {
        if blank_line(&mut working, &index, line) {
            blanked.push(line);
        }
    }
    let mut diagnostics = Vec::new();

    loop {
        let err = match parser.parse(&working) {
            Ok(unit) => {
                return Ok(DegradedParse {
                    unit,
                    blanked_lines: blanked,
                    diagnostics,
                });
            }
            Err(err) => err,
        };

        let error_line = index.line_col(err.offset).line;
        diagnostics.push(err);
        let Some(line) = line_to_blank(&working, &index, error_line, &blanked) else {
            tracing::warn!(errors = diagnostics.len(), "parse recovery exhausted");
            return Err(diagnostics);
        };
        tracing::debug!(line, "blanking line for recovery");
        blank_line(&mut working, &index, line);
        blanked.push(line);
    }
}

/// The error line itself, or the nearest earlier line that still has
/// content when the error sits on an empty line (an unexpected end of file
/// is reported past the last real token).
fn line_to_blank(text: &str, index: &LineIndex, error_line: u32, blanked: &[u32]) -> Option<u32> {
    (0..=error_line).rev().find(|&line| {
        !blanked.contains(&line)
            && index
                .line_range(line)
                .and_then(|range| text.get(usize::from(range.start())..usize::from(range.end())))
                .is_some_and(|content| !content.trim().is_empty())
    })
}

/// Overwrite one line with spaces of equal byte length.
fn blank_line(text: &mut String, index: &LineIndex, line: u32) -> bool {
    let Some(range) = index.line_range(line) else {
        return false;
    };
    let start = usize::from(range.start());
    let end = usize::from(range.end());
    let Some(content) = text.get(start..end) else {
        return false;
    };
    let spaces: String = content
        .chars()
        .map(|c| if c == '\r' { "\r".to_string() } else { " ".repeat(c.len_utf8()) })
        .collect();
    text.replace_range(start..end, &spaces);
    true
}
