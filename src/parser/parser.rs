//! Recursive descent parser for Solidity
//!
//! Builds the typed tree in [`crate::syntax::ast`] from the token stream.
//! The parser does not recover: the first syntax error aborts the parse and
//! is reported as a [`ParseError`] carrying the byte offset where it happened.
//! Recovery is a concern of the indexing layer, which blanks lines and retries.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};
use thiserror::Error;

use super::lexer::{Lexer, Token, TokenKind};
use crate::syntax::Ident;

/// The first syntax error found in a source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset:?}")]
pub struct ParseError {
    pub message: String,
    pub offset: TextSize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, offset: TextSize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

pub(crate) type PResult<T> = Result<T, ParseError>;

/// Saved position for speculative parsing.
#[derive(Clone, Copy)]
pub(crate) struct Checkpoint {
    pos: usize,
    prev_end: TextSize,
}

/// The parser state
pub(crate) struct Parser<'a> {
    text: &'a str,
    /// Non-comment tokens.
    tokens: Vec<Token<'a>>,
    /// NatSpec text keyed by the index of the token it precedes.
    docs: FxHashMap<usize, String>,
    pos: usize,
    prev_end: TextSize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let mut tokens = Vec::new();
        let mut docs = FxHashMap::default();
        let mut pending: Vec<String> = Vec::new();

        for token in Lexer::new(text) {
            match token.kind {
                TokenKind::LineComment => match token.text.strip_prefix("///") {
                    Some(rest) => pending.push(rest.trim().to_string()),
                    None => pending.clear(),
                },
                TokenKind::BlockComment => {
                    pending.clear();
                    if token.text.starts_with("/**") && token.text.len() > 4 {
                        pending.push(clean_block_doc(token.text));
                    }
                }
                _ => {
                    if !pending.is_empty() {
                        docs.insert(tokens.len(), pending.join("\n"));
                        pending.clear();
                    }
                    tokens.push(token);
                }
            }
        }

        Self {
            text,
            tokens,
            docs,
            pos: 0,
            prev_end: TextSize::from(0),
        }
    }

    pub(crate) fn source_text(&self, range: TextRange) -> &'a str {
        &self.text[range]
    }

    pub(crate) fn source_len(&self) -> TextSize {
        TextSize::of(self.text)
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    pub(crate) fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn peek(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    pub(crate) fn nth(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    pub(crate) fn nth_text(&self, n: usize) -> &'a str {
        self.tokens.get(self.pos + n).map(|t| t.text).unwrap_or("")
    }

    pub(crate) fn text(&self) -> &'a str {
        self.nth_text(0)
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Identifier with the given text (`from`, `error`, `revert`, ...).
    pub(crate) fn at_contextual(&self, word: &str) -> bool {
        self.at(TokenKind::Ident) && self.text() == word
    }

    /// Start offset of the current token (or end of input).
    pub(crate) fn start(&self) -> TextSize {
        self.current()
            .map(|t| t.range.start())
            .unwrap_or_else(|| self.source_len())
    }

    /// Range from `start` to the end of the last consumed token.
    pub(crate) fn range_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.prev_end.max(start))
    }

    /// Documentation comment attached to the current token, if any.
    pub(crate) fn take_doc(&self) -> Option<String> {
        self.docs.get(&self.pos).cloned()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(crate) fn bump(&mut self) -> TextRange {
        match self.tokens.get(self.pos) {
            Some(token) => {
                let range = token.range;
                self.prev_end = range.end();
                self.pos += 1;
                range
            }
            None => TextRange::empty(self.source_len()),
        }
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_contextual(&mut self, word: &str) -> bool {
        if self.at_contextual(word) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<TextRange> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.error_here(format!("expected {what}")))
        }
    }

    pub(crate) fn expect_contextual(&mut self, word: &str) -> PResult<TextRange> {
        if self.at_contextual(word) {
            Ok(self.bump())
        } else {
            Err(self.error_here(format!("expected `{word}`")))
        }
    }

    pub(crate) fn expect_ident(&mut self) -> PResult<Ident> {
        if self.at(TokenKind::Ident) {
            let name = SmolStr::new(self.text());
            let range = self.bump();
            Ok(Ident { name, range })
        } else {
            Err(self.error_here("expected identifier"))
        }
    }

    /// Member names after `.` may be keywords (`x.delete`, `abi.encode`).
    pub(crate) fn expect_member_name(&mut self) -> PResult<Ident> {
        match self.peek() {
            Some(kind) if kind == TokenKind::Ident || kind.is_keyword() => {
                let name = SmolStr::new(self.text());
                let range = self.bump();
                Ok(Ident { name, range })
            }
            _ => Err(self.error_here("expected member name")),
        }
    }

    // =========================================================================
    // Speculation
    // =========================================================================

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            prev_end: self.prev_end,
        }
    }

    pub(crate) fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.prev_end = checkpoint.prev_end;
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    pub(crate) fn error_here(&self, message: impl Into<String>) -> ParseError {
        let message = message.into();
        match self.current() {
            Some(token) => ParseError::new(
                format!("{message}, found `{}`", token.text),
                token.range.start(),
            ),
            None => ParseError::new(format!("{message}, found end of file"), self.source_len()),
        }
    }
}

/// Strip `/** */` fences and leading `*` gutters.
fn clean_block_doc(text: &str) -> String {
    let inner = text
        .trim_start_matches("/**")
        .trim_end_matches("*/");
    inner
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Body of a quoted literal without quotes or the `unicode`/`hex` prefix.
pub(crate) fn unquote(text: &str) -> String {
    let text = text
        .strip_prefix("unicode")
        .or_else(|| text.strip_prefix("hex"))
        .unwrap_or(text);
    if text.len() >= 2 {
        text[1..text.len() - 1].to_string()
    } else {
        String::new()
    }
}
