//! Token definitions for the pifuck language.
//!
//! Source text is a sequence of whitespace separated words. Every word becomes
//! exactly one token, which falls into one of a few families:
//!
//! - **π-keywords**: words that are a prefix of the digits of π (`3.`, `3.1`,
//!   `3.14`, ...). The length of the prefix selects the keyword, so `3.` ends a
//!   line, `3.1` declares a variable and `3.1415` adds.
//! - **Markers**: `--` introduces an include, `**` a function definition.
//! - **User values**: `+...+` delimited words carrying a literal or a variable
//!   name, e.g. `+42+`, `+hello+`, `+true+`.
//! - **Special**: the [`Eof`](TokenKind::Eof) sentinel and
//!   [`Error`](TokenKind::Error) for words the lexer could not classify.
//!
//! # Examples
//!
//! ```rust
//! use pifuck_syntax::{Token, TokenKind};
//!
//! // `3.1` declares a variable
//! let decl = Token {
//!     kind: TokenKind::VarDecl,
//!     text: "3.1".to_string(),
//!     line: 1,
//!     col: 1,
//! };
//!
//! // `+x+` names the variable
//! let name = Token {
//!     kind: TokenKind::UserValue,
//!     text: "+x+".to_string(),
//!     line: 1,
//!     col: 5,
//! };
//!
//! assert!(decl.kind.is_pi_keyword());
//! assert!(!name.kind.is_pi_keyword());
//! ```

use std::fmt;

/// Token types that can be produced by the pifuck lexer.
///
/// Tokens do not carry decoded payloads; the raw word is kept in
/// [`Token::text`] and user values are decoded by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Special ===

    /// End-of-file marker, always the last token of a stream
    Eof,

    /// A word the lexer could not classify. Its presence aborts parsing.
    Error,

    // === Markers ===

    /// `--` - include another source file
    DashDash,

    /// `**` - start a function definition
    StarStar,

    /// A `+...+` delimited literal or variable reference
    UserValue,

    // === π-keywords ===

    /// `3.` - end of a logical line
    Eol,

    /// `3.1` - variable declaration, also used as the `=` separator
    VarDecl,

    /// `3.14` - start an if statement
    If,

    /// `3.141` - start a for loop
    For,

    /// `3.1415` - addition
    Add,

    /// `3.14159` - subtraction
    Subtract,

    /// `3.141592` - multiplication
    Multiply,

    /// `3.1415926` - division
    Divide,

    /// `3.14159265` - close a block
    EndBlock,

    /// `3.141592653` - start a foreach loop
    Foreach,

    /// `3.1415926535` - call a function
    FunCall,

    /// `3.14159265358` - equality comparison
    Equal,

    /// `3.141592653589` - inequality comparison
    NotEqual,

    /// `3.1415926535897` - greater-than comparison
    Greater,

    /// `3.14159265358979` - smaller-than comparison
    Smaller,
}

impl TokenKind {
    /// Returns true for the eight binary operator keywords.
    pub fn is_binary_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Add
                | TokenKind::Subtract
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::Equal
                | TokenKind::NotEqual
                | TokenKind::Greater
                | TokenKind::Smaller
        )
    }

    /// Returns true for keywords spelled as a prefix of π.
    pub fn is_pi_keyword(self) -> bool {
        !matches!(
            self,
            TokenKind::Eof
                | TokenKind::Error
                | TokenKind::DashDash
                | TokenKind::StarStar
                | TokenKind::UserValue
        )
    }

    /// Returns true for keywords whose statement owns a block.
    pub fn opens_block(self) -> bool {
        matches!(
            self,
            TokenKind::If | TokenKind::For | TokenKind::Foreach | TokenKind::StarStar
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Error => "ERROR",
            TokenKind::DashDash => "DASH_DASH",
            TokenKind::StarStar => "STAR_STAR",
            TokenKind::UserValue => "USER_VALUE",
            TokenKind::Eol => "EOL",
            TokenKind::VarDecl => "VAR_DECL",
            TokenKind::If => "IF",
            TokenKind::For => "FOR",
            TokenKind::Add => "ADD",
            TokenKind::Subtract => "SUBTRACT",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::EndBlock => "END_BLOCK",
            TokenKind::Foreach => "FOREACH",
            TokenKind::FunCall => "FUN_CALL",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::Smaller => "SMALLER",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its raw text and source location.
///
/// # Fields
///
/// - `kind`: The syntactic category of this token
/// - `text`: The word exactly as written, including `+` delimiters
/// - `line`: 1-based line number in the source file
/// - `col`: 1-based column number in the source file
///
/// Position information lets diagnostics point at the offending word:
///
/// ```text
/// Parse error: Unfinished variable declaration at 2:8
///   3.1 +x+ +5+ 3.
///           ^
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type of this token
    pub kind: TokenKind,

    /// The source word, empty for the EOF sentinel
    pub text: String,

    /// Line number in the source file (1-based)
    pub line: usize,

    /// Column number in the source file (1-based)
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            col,
        }
    }
}
