//! Error handling types shared by every stage of the pifuck toolchain.
//!
//! Every failure is fatal: the first error raised by the lexer, parser or
//! interpreter propagates up through all nested blocks, function calls and
//! includes and ends the run. Errors therefore only need to describe what went
//! wrong and where, never how to recover.
//!
//! # Examples
//!
//! ```rust
//! use pifuck_syntax::error::{error, Error, ErrorKind, Result};
//!
//! fn lookup(name: &str) -> Result<i32> {
//!     error(ErrorKind::UndeclaredName, format!("Variable {} is used before declaration.", name))
//! }
//!
//! let err = lookup("x").unwrap_err();
//! assert_eq!(err.kind, ErrorKind::UndeclaredName);
//!
//! let located = Error::with_span(ErrorKind::Parse, "Expecting new line. EOF", 3, 7);
//! assert_eq!(located.to_string(), "Expecting new line. EOF at 3:7");
//! ```

use std::fmt;

/// The category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed word: not a marker, user value or π-prefix
    Lex,
    /// Grammar violation: missing token, wrong value kind, unterminated block
    Parse,
    /// A variable or function used before it was declared
    UndeclaredName,
    /// An operator applied to value types that do not support it
    Type,
    /// Division by zero or a non-terminating decimal quotient
    Arithmetic,
    /// A statement applied to a value it cannot handle (foreach source,
    /// non-boolean condition, malformed for-loop step)
    UnsupportedOperation,
    /// Reading an included file or writing program output failed
    Io,
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Lex => "Lex error",
            ErrorKind::Parse => "Parse error",
            ErrorKind::UndeclaredName
            | ErrorKind::Type
            | ErrorKind::Arithmetic
            | ErrorKind::UnsupportedOperation => "Runtime error",
            ErrorKind::Io => "IO error",
        }
    }
}

/// An error that occurred while lexing, parsing or running a program.
///
/// # Fields
///
/// - `kind`: Which stage failed and why
/// - `msg`: Human-readable error description
/// - `line`: Optional 1-based line number in source file
/// - `col`: Optional 1-based column number in source file
///
/// Runtime errors carry no location since the AST does not keep spans.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// Failure category
    pub kind: ErrorKind,

    /// Human-readable error message
    pub msg: String,

    /// Optional line number in source file (1-based)
    pub line: Option<usize>,

    /// Optional column number in source file (1-based)
    pub col: Option<usize>,
}

impl Error {
    /// Creates a new error without source location.
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
            line: None,
            col: None,
        }
    }

    /// Creates a new error pointing at a line and column of the source.
    pub fn with_span(kind: ErrorKind, msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            msg: msg.into(),
            line: Some(line),
            col: Some(col),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(l), Some(c)) = (self.line, self.col) {
            write!(f, "{} at {}:{}", self.msg, l, c)
        } else {
            write!(f, "{}", self.msg)
        }
    }
}

impl std::error::Error for Error {}

/// A specialized `Result` type for pifuck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for `Err(Error::new(kind, msg))`.
pub fn error<T>(kind: ErrorKind, msg: impl Into<String>) -> Result<T> {
    Err(Error::new(kind, msg))
}

/// Shorthand for `Err(Error::with_span(kind, msg, line, col))`.
pub fn error_at<T>(kind: ErrorKind, line: usize, col: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::with_span(kind, msg, line, col))
}
