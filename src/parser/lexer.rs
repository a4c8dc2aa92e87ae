//! Logos-based lexer for Solidity
//!
//! Fast tokenization using the logos crate. Trivia (whitespace) is skipped by
//! logos; comments are kept so the parser can attach NatSpec documentation.

use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token with its kind, text, and range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let span = self.inner.span();
        let range = TextRange::new(
            TextSize::from(span.start as u32),
            TextSize::from(span.end as u32),
        );
        let kind = result.unwrap_or(TokenKind::Error);

        Some(Token {
            kind,
            text: self.inner.slice(),
            range,
        })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Solidity token kinds.
///
/// Contextual words (`from`, `error`, `revert`, `global`, `receive`,
/// `fallback`, `transient`, elementary type names) lex as [`TokenKind::Ident`]
/// and are recognised by the parser from their text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"0[xX][0-9a-fA-F_]*")]
    #[regex(r"[0-9][0-9_]*(\.[0-9_]+)?([eE][-+]?[0-9_]+)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][-+]?[0-9_]+)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#)]
    #[regex(r#"unicode"([^"\\\n]|\\.)*""#)]
    #[regex(r#"unicode'([^'\\\n]|\\.)*'"#)]
    String,

    #[regex(r#"hex"[0-9a-fA-F_]*""#)]
    #[regex(r#"hex'[0-9a-fA-F_]*'"#)]
    HexString,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("pragma")]
    Pragma,
    #[token("import")]
    Import,
    #[token("as")]
    As,
    #[token("abstract")]
    Abstract,
    #[token("contract")]
    Contract,
    #[token("interface")]
    Interface,
    #[token("library")]
    Library,
    #[token("is")]
    Is,
    #[token("function")]
    Function,
    #[token("modifier")]
    Modifier,
    #[token("constructor")]
    Constructor,
    #[token("event")]
    Event,
    #[token("struct")]
    Struct,
    #[token("enum")]
    Enum,
    #[token("type")]
    Type,
    #[token("using")]
    Using,
    #[token("for")]
    For,
    #[token("mapping")]
    Mapping,
    #[token("returns")]
    Returns,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("emit")]
    Emit,
    #[token("new")]
    New,
    #[token("delete")]
    Delete,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("assembly")]
    Assembly,
    #[token("unchecked")]
    Unchecked,
    #[token("public")]
    Public,
    #[token("private")]
    Private,
    #[token("internal")]
    Internal,
    #[token("external")]
    External,
    #[token("pure")]
    Pure,
    #[token("view")]
    View,
    #[token("payable")]
    Payable,
    #[token("constant")]
    Constant,
    #[token("immutable")]
    Immutable,
    #[token("virtual")]
    Virtual,
    #[token("override")]
    Override,
    #[token("memory")]
    Memory,
    #[token("storage")]
    Storage,
    #[token("calldata")]
    Calldata,
    #[token("indexed")]
    Indexed,
    #[token("anonymous")]
    Anonymous,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token(">>>=")]
    ShrUnsignedAssign,
    #[token(">>>")]
    ShrUnsigned,
    #[token("<<=")]
    ShlAssign,
    #[token(">>=")]
    ShrAssign,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("**")]
    StarStar,
    #[token("=>")]
    FatArrow,
    #[token("->")]
    Arrow,
    #[token(":=")]
    ColonAssign,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("|=")]
    PipeAssign,
    #[token("&=")]
    AmpAssign,
    #[token("^=")]
    CaretAssign,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("?")]
    Question,
    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("@")]
    At,

    /// Characters that never start a Solidity token; lexing failures map here too.
    #[token("`")]
    #[token("#")]
    #[token("\\")]
    Error,
}

impl TokenKind {
    /// Comments are trivia; whitespace never reaches the token stream.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Keywords that may still appear where a name is expected
    /// (member names such as `x.delete` are rare but legal for some of them).
    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Pragma
                | Import
                | As
                | Abstract
                | Contract
                | Interface
                | Library
                | Is
                | Function
                | Modifier
                | Constructor
                | Event
                | Struct
                | Enum
                | Type
                | Using
                | For
                | Mapping
                | Returns
                | Return
                | If
                | Else
                | While
                | Do
                | Break
                | Continue
                | Emit
                | New
                | Delete
                | Try
                | Catch
                | Assembly
                | Unchecked
                | Public
                | Private
                | Internal
                | External
                | Pure
                | View
                | Payable
                | Constant
                | Immutable
                | Virtual
                | Override
                | Memory
                | Storage
                | Calldata
                | Indexed
                | Anonymous
                | True
                | False
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keywords_and_idents() {
        assert_eq!(
            kinds("contract Token is Base"),
            vec![
                TokenKind::Contract,
                TokenKind::Ident,
                TokenKind::Is,
                TokenKind::Ident
            ]
        );
        // Contextual words stay identifiers.
        assert_eq!(kinds("from error"), vec![TokenKind::Ident, TokenKind::Ident]);
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds(r#"0x1F 1e18 .5 "a\"b" hex"00ff" unicode"hi""#),
            vec![
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::String,
                TokenKind::HexString,
                TokenKind::String,
            ]
        );
    }

    #[test]
    fn test_comments_are_tokens() {
        let tokens = tokenize("/// @notice hi\n/* block */ x");
        assert_eq!(tokens[0].kind, TokenKind::LineComment);
        assert_eq!(tokens[1].kind, TokenKind::BlockComment);
        assert_eq!(tokens[2].kind, TokenKind::Ident);
        assert_eq!(tokens[2].text, "x");
    }

    #[test]
    fn test_operators_prefer_longest() {
        assert_eq!(
            kinds(">>>= >>= => ++"),
            vec![
                TokenKind::ShrUnsignedAssign,
                TokenKind::ShrAssign,
                TokenKind::FatArrow,
                TokenKind::PlusPlus
            ]
        );
    }

    #[test]
    fn test_ranges_track_offsets() {
        let tokens = tokenize("a  bc");
        assert_eq!(tokens[1].range, TextRange::new(3.into(), 5.into()));
    }
}
