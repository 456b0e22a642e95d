//! AST (abstract syntax tree) types for the pifuck language.
//!
//! The grammar is flat: one statement per line, expressions are a single
//! operand or exactly one binary operator between two operands. Blocks are
//! plain statement lists shared by every compound statement.

use std::fmt;

use bigdecimal::BigDecimal;

use crate::decimal;

/// A literal or variable reference decoded from a `+...+` token.
///
/// `Str` doubles as an identifier: whether `+x+` names a variable or is the
/// string `"x"` is only decided at evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub enum UserValue {
    Str(String),
    Decimal(BigDecimal),
    Bool(bool),
    Null,
}

impl UserValue {
    /// Renders the value back into its `+...+` source form.
    pub fn to_literal(&self) -> String {
        format!("+{}+", self)
    }
}

impl fmt::Display for UserValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserValue::Str(s) => write!(f, "{}", s),
            UserValue::Decimal(d) => write!(f, "{}", decimal::to_plain_string(d)),
            UserValue::Bool(b) => write!(f, "{}", b),
            UserValue::Null => write!(f, "null"),
        }
    }
}

/// The eight binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Greater,
    Smaller,
}

impl BinaryOp {
    /// Operation name as used in type error messages.
    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Subtract => "subtract",
            BinaryOp::Multiply => "multiply",
            BinaryOp::Divide => "divide",
            BinaryOp::Equal => "equal",
            BinaryOp::NotEqual => "not equal",
            BinaryOp::Greater => "greater",
            BinaryOp::Smaller => "smaller",
        }
    }

    /// Operators usable as a for-loop step (`x 3.1415 +1+` means `x = x + 1`).
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide
        )
    }
}

/// Expressions: a bare operand or one binary operation on two raw operands.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Value(UserValue),
    Binary {
        op: BinaryOp,
        left: UserValue,
        right: UserValue,
    },
}

/// Statements. Names are kept as plain strings since the parser has already
/// checked that they decoded to `UserValue::Str`.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Include(String),
    Print(Option<Expr>),
    VariableDeclaration {
        name: String,
        initializer: Option<Expr>,
    },
    ForEach {
        source: String,
        var: String,
        body: Vec<Stmt>,
    },
    For {
        cond: Expr,
        step: Expr,
        body: Vec<Stmt>,
    },
    If {
        cond: Expr,
        body: Vec<Stmt>,
    },
    Function {
        name: String,
        body: Vec<Stmt>,
    },
    Call(String),
}

/// Entire program: the root statement list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}
