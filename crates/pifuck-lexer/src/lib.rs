//! pifuck lexer: converts source text into tokens.
//!
//! Lexing never fails outright. Words that cannot be classified become
//! [`TokenKind::Error`] tokens and the parser refuses any stream containing
//! one, so the first malformed word aborts the run before anything executes.
use std::str::FromStr;

use bigdecimal::BigDecimal;
use once_cell::sync::Lazy;
use regex::Regex;
use pifuck_syntax::ast::UserValue;
use pifuck_syntax::token::{Token, TokenKind};

/// Reference digits every π-keyword must be a prefix of.
pub const PI_DIGITS: &str = "3.14159265358979323846264338327950288419716939937510";

static DECIMAL_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+([eE]\+[0-9]+)?)?$").expect("valid decimal pattern"));

/// Streaming word scanner that produces tokens with positions.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Drop everything up to (not including) the next newline.
    fn skip_rest_of_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn read_word(&mut self) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                break;
            }
            s.push(c);
            self.advance();
        }
        s
    }

    /// Tokenize the entire input into a vector of tokens ending with Eof.
    ///
    /// A word starting with `//` comments out the rest of its line. After an
    /// error token the rest of that line is dropped as well.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let line = self.line;
            let col = self.col;
            if self.peek().is_none() {
                tokens.push(Token::new(TokenKind::Eof, "", line, col));
                break;
            }
            let word = self.read_word();
            if word.starts_with("//") {
                self.skip_rest_of_line();
                continue;
            }
            let kind = classify_word(&word);
            tokens.push(Token::new(kind, word, line, col));
            if kind == TokenKind::Error {
                self.skip_rest_of_line();
            }
        }
        tokens
    }
}

fn classify_word(word: &str) -> TokenKind {
    match word {
        "--" => TokenKind::DashDash,
        "**" => TokenKind::StarStar,
        w if w.len() >= 2 && w.starts_with('+') && w.ends_with('+') => TokenKind::UserValue,
        w if w.starts_with("3.") => pi_keyword(w),
        _ => TokenKind::Error,
    }
}

/// Map a π-prefix to its keyword. The word must match the reference digits
/// at every position; its length then selects the keyword.
pub fn pi_keyword(word: &str) -> TokenKind {
    let mut reference = PI_DIGITS.chars();
    let mut len = 0usize;
    for c in word.chars() {
        if reference.next() != Some(c) {
            return TokenKind::Error;
        }
        len += 1;
    }
    match len {
        2 => TokenKind::Eol,
        3 => TokenKind::VarDecl,
        4 => TokenKind::If,
        5 => TokenKind::For,
        6 => TokenKind::Add,
        7 => TokenKind::Subtract,
        8 => TokenKind::Multiply,
        9 => TokenKind::Divide,
        10 => TokenKind::EndBlock,
        11 => TokenKind::Foreach,
        12 => TokenKind::FunCall,
        13 => TokenKind::Equal,
        14 => TokenKind::NotEqual,
        15 => TokenKind::Greater,
        16 => TokenKind::Smaller,
        _ => TokenKind::Error,
    }
}

/// Drop tokens with blank text, keeping the EOF sentinel.
pub fn strip_blank(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|t| t.kind == TokenKind::Eof || !t.text.trim().is_empty())
        .collect()
}

/// Lex `source` and strip blank tokens, ready for the parser.
pub fn lex(source: &str) -> Vec<Token> {
    strip_blank(Lexer::new(source).tokenize())
}

/// Decode the text of a `+...+` token into a literal or reference.
pub fn decode_user_value(raw: &str) -> UserValue {
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();
    let inner = chars.as_str();
    match inner {
        "null" => UserValue::Null,
        "true" => UserValue::Bool(true),
        "false" => UserValue::Bool(false),
        s if DECIMAL_LITERAL.is_match(s) => match BigDecimal::from_str(s) {
            Ok(d) => UserValue::Decimal(d),
            Err(_) => UserValue::Str(s.to_string()),
        },
        s => UserValue::Str(s.to_string()),
    }
}
