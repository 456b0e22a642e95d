//! Recursive-descent parser: one statement per logical line.

use pifuck_lexer::decode_user_value;
use pifuck_syntax::ast::*;
use pifuck_syntax::error::{error_at, ErrorKind, Result};
use pifuck_syntax::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens.get(self.pos).map(|t| t.kind).unwrap_or(TokenKind::Eof)
    }

    /// Position of the current token, or of the last token once past the end.
    fn span(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| (t.line, t.col))
            .unwrap_or((1, 1))
    }

    fn advance(&mut self) -> Option<&Token> {
        let tk = self.tokens.get(self.pos);
        if tk.is_some() {
            self.pos += 1;
        }
        tk
    }

    fn fail<T>(&self, msg: impl Into<String>) -> Result<T> {
        let (line, col) = self.span();
        error_at(ErrorKind::Parse, line, col, msg)
    }

    fn expect_line_end(&mut self) -> Result<()> {
        let kind = self.peek_kind();
        if kind != TokenKind::Eol {
            return self.fail(format!("Expecting new line. {}", kind));
        }
        self.advance();
        Ok(())
    }

    /// Read a user value that must decode to a string, used for every name
    /// position in the grammar.
    fn expect_name(&mut self, missing: &str, not_string: &str) -> Result<String> {
        if self.peek_kind() != TokenKind::UserValue {
            return self.fail(missing);
        }
        let (line, col) = self.span();
        let text = match self.advance().map(|tk| tk.text.clone()) {
            Some(text) => text,
            None => return self.fail(missing),
        };
        match decode_user_value(&text) {
            UserValue::Str(name) => Ok(name),
            _ => error_at(ErrorKind::Parse, line, col, not_string),
        }
    }

    fn expect_user_value(&mut self) -> Result<UserValue> {
        let kind = self.peek_kind();
        if kind != TokenKind::UserValue {
            return self.fail(format!("Expecting user value. {}", kind));
        }
        match self.advance().map(|tk| decode_user_value(&tk.text)) {
            Some(value) => Ok(value),
            None => self.fail("Expecting user value. EOF"),
        }
    }

    /// Parse the whole token stream. Any error token anywhere in the stream
    /// fails the parse before a single statement is read.
    pub fn parse_program(&mut self) -> Result<Program> {
        if let Some(bad) = self.tokens.iter().find(|t| t.kind == TokenKind::Error) {
            return error_at(
                ErrorKind::Lex,
                bad.line,
                bad.col,
                format!("Unexpected token {}", bad.text),
            );
        }
        let mut stmts = Vec::new();
        while self.peek_kind() != TokenKind::Eof {
            if let Some(stmt) = self.parse_line()? {
                stmts.push(stmt);
            }
        }
        Ok(Program { stmts })
    }

    fn parse_line(&mut self) -> Result<Option<Stmt>> {
        let stmt = match self.peek_kind() {
            TokenKind::Eol => {
                self.expect_line_end()?;
                return Ok(None);
            }
            TokenKind::Eof => return Ok(None),
            TokenKind::DashDash => self.parse_include()?,
            TokenKind::UserValue => self.parse_print()?,
            TokenKind::VarDecl => self.parse_variable_declaration()?,
            TokenKind::Foreach => self.parse_foreach()?,
            TokenKind::For => self.parse_for()?,
            TokenKind::If => self.parse_if()?,
            TokenKind::StarStar => self.parse_function()?,
            TokenKind::FunCall => self.parse_call()?,
            _ => {
                // stray END_BLOCK or operator: skip it
                self.advance();
                return Ok(None);
            }
        };
        Ok(Some(stmt))
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        let mut body = Vec::new();
        while !matches!(self.peek_kind(), TokenKind::Eof | TokenKind::EndBlock) {
            if let Some(stmt) = self.parse_line()? {
                body.push(stmt);
            }
        }
        if self.peek_kind() == TokenKind::Eof {
            return self.fail("Expected end of block statement.");
        }
        self.advance();
        self.expect_line_end()?;
        Ok(body)
    }

    fn parse_include(&mut self) -> Result<Stmt> {
        self.advance();
        let path = self.expect_name("Missing include file name", "Expecting file name to be a string")?;
        self.expect_line_end()?;
        Ok(Stmt::Include(path))
    }

    fn parse_print(&mut self) -> Result<Stmt> {
        let expr = self.parse_expr()?;
        self.expect_line_end()?;
        Ok(Stmt::Print(expr))
    }

    fn parse_variable_declaration(&mut self) -> Result<Stmt> {
        self.advance();
        let name = self.expect_name("Expecting variable name.", "Variable name should be a string.")?;
        if self.peek_kind() != TokenKind::VarDecl {
            return self.fail("Unfinished variable declaration.");
        }
        self.advance();
        let initializer = self.parse_expr()?;
        self.expect_line_end()?;
        Ok(Stmt::VariableDeclaration { name, initializer })
    }

    fn parse_foreach(&mut self) -> Result<Stmt> {
        self.advance();
        let source = self.expect_name("Expecting variable name.", "Variable name should be a string.")?;
        let var = self.expect_name("Expecting variable name.", "Variable name should be a string.")?;
        self.expect_line_end()?;
        let body = self.parse_block()?;
        Ok(Stmt::ForEach { source, var, body })
    }

    fn parse_for(&mut self) -> Result<Stmt> {
        self.advance();
        let cond = self.parse_expr()?;
        let step = self.parse_expr()?;
        let (cond, step) = match (cond, step) {
            (Some(c), Some(s)) => (c, s),
            _ => {
                return self
                    .fail("Expecting condition expression and after loop expression in for-loop.")
            }
        };
        self.expect_line_end()?;
        let body = self.parse_block()?;
        Ok(Stmt::For { cond, step, body })
    }

    fn parse_if(&mut self) -> Result<Stmt> {
        self.advance();
        let cond = match self.parse_expr()? {
            Some(c) => c,
            None => return self.fail("Expecting condition in if statement"),
        };
        self.expect_line_end()?;
        let body = self.parse_block()?;
        Ok(Stmt::If { cond, body })
    }

    fn parse_function(&mut self) -> Result<Stmt> {
        self.advance();
        let name = self.expect_name("Expecting function name", "Function name should be a string.")?;
        self.expect_line_end()?;
        let body = self.parse_block()?;
        Ok(Stmt::Function { name, body })
    }

    fn parse_call(&mut self) -> Result<Stmt> {
        self.advance();
        let name = self.expect_name("Function name should be a string.", "Function name should be a string.")?;
        self.expect_line_end()?;
        Ok(Stmt::Call(name))
    }

    /// Parse an expression: one operand, optionally followed by a binary
    /// operator and a second operand. Returns `None` at a line end.
    pub fn parse_expr(&mut self) -> Result<Option<Expr>> {
        if matches!(self.peek_kind(), TokenKind::Eol | TokenKind::Eof) {
            return Ok(None);
        }
        let left = self.expect_user_value()?;
        let op = match binary_op(self.peek_kind()) {
            Some(op) => op,
            None => return Ok(Some(Expr::Value(left))),
        };
        self.advance();
        let right = self.expect_user_value()?;
        Ok(Some(Expr::Binary { op, left, right }))
    }
}

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Add => BinaryOp::Add,
        TokenKind::Subtract => BinaryOp::Subtract,
        TokenKind::Multiply => BinaryOp::Multiply,
        TokenKind::Divide => BinaryOp::Divide,
        TokenKind::Equal => BinaryOp::Equal,
        TokenKind::NotEqual => BinaryOp::NotEqual,
        TokenKind::Greater => BinaryOp::Greater,
        TokenKind::Smaller => BinaryOp::Smaller,
        _ => return None,
    };
    Some(op)
}

/// Parse a complete token stream into a program.
pub fn parse(tokens: Vec<Token>) -> Result<Program> {
    Parser::new(tokens).parse_program()
}
