//! Main interpreter engine.

use std::fs;
use std::io::{self, Stdout, Write};

use bigdecimal::BigDecimal;
use pifuck_syntax::ast::*;
use pifuck_syntax::error::{error, Error, ErrorKind, Result};

use crate::env::Env;
use crate::value::{self, VariableValue};

/// Read, lex and parse a source file.
pub fn load_program(path: &str) -> Result<Program> {
    let source = fs::read_to_string(path)
        .map_err(|e| Error::new(ErrorKind::Io, format!("Failed to read file '{}': {}", path, e)))?;
    pifuck_parser::parse(pifuck_lexer::lex(&source))
}

/// Tree-walking interpreter writing program output to `W`.
pub struct Interpreter<W: Write = Stdout> {
    out: W,
}

impl Default for Interpreter<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter<Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(out: W) -> Self {
        Self { out }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run a program against fresh namespaces.
    pub fn run(&mut self, program: &Program) -> Result<()> {
        let mut env = Env::new();
        self.run_with_env(program, &mut env)
    }

    /// Run a program against existing namespaces, e.g. across REPL entries.
    pub fn run_with_env(&mut self, program: &Program, env: &mut Env) -> Result<()> {
        let result = self.exec_block(env, &program.stmts);
        self.out.flush().map_err(io_error)?;
        result
    }

    /// Every statement list, top level or nested, ends by printing an empty
    /// line. Nested blocks therefore add one blank line per execution.
    fn exec_block(&mut self, env: &mut Env, body: &[Stmt]) -> Result<()> {
        for stmt in body {
            self.exec_stmt(env, stmt)?;
        }
        writeln!(self.out).map_err(io_error)
    }

    fn exec_stmt(&mut self, env: &mut Env, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::Include(path) => {
                let program = load_program(path)?;
                self.exec_block(env, &program.stmts)
            }
            Stmt::Print(expr) => {
                match expr {
                    Some(e) => {
                        let v = self.eval_expr(env, e)?;
                        writeln!(self.out, "{}", v).map_err(io_error)
                    }
                    None => writeln!(self.out).map_err(io_error),
                }
            }
            Stmt::VariableDeclaration { name, initializer } => {
                let v = match initializer {
                    Some(e) => self.eval_expr(env, e)?,
                    None => VariableValue::Null,
                };
                env.define(name.clone(), v);
                Ok(())
            }
            Stmt::ForEach { source, var, body } => self.exec_foreach(env, source, var, body),
            Stmt::For { cond, step, body } => {
                while self.eval_condition(env, cond, "For condition should return a boolean.")? {
                    self.exec_block(env, body)?;
                    self.exec_step(env, step)?;
                }
                Ok(())
            }
            Stmt::If { cond, body } => {
                match self.eval_expr(env, cond)? {
                    VariableValue::Bool(true) => self.exec_block(env, body),
                    VariableValue::Bool(false) => Ok(()),
                    other => error(
                        ErrorKind::UnsupportedOperation,
                        format!("{} is not available in if condition.", other.type_name()),
                    ),
                }
            }
            Stmt::Function { name, body } => {
                env.define_function(name, body);
                Ok(())
            }
            Stmt::Call(name) => {
                let body = env.function(name).ok_or_else(|| {
                    Error::new(
                        ErrorKind::UndeclaredName,
                        format!("Function {} should be declared before usage.", name),
                    )
                })?;
                self.exec_block(env, &body)
            }
        }
    }

    fn exec_foreach(&mut self, env: &mut Env, source: &str, var: &str, body: &[Stmt]) -> Result<()> {
        let source_value = env.get(source).cloned().ok_or_else(|| {
            Error::new(
                ErrorKind::UndeclaredName,
                format!("Variable {} is used before declaration.", source),
            )
        })?;
        match source_value {
            VariableValue::Decimal(n) => {
                let limit = value::truncate_to_i64(&n);
                for i in 1..=limit {
                    env.define(var, VariableValue::Decimal(BigDecimal::from(i)));
                    self.exec_block(env, body)?;
                }
            }
            VariableValue::Str(s) => {
                for c in s.chars() {
                    env.define(var, VariableValue::Str(c.to_string()));
                    self.exec_block(env, body)?;
                }
            }
            other => {
                return error(
                    ErrorKind::UnsupportedOperation,
                    format!("For each is not supported on {}", other.type_name()),
                );
            }
        }
        env.remove(var);
        Ok(())
    }

    /// Apply a for-loop step as a compound assignment: `x 3.1415 +1+` binds
    /// `x` to `x + 1`.
    fn exec_step(&mut self, env: &mut Env, step: &Expr) -> Result<()> {
        match step {
            Expr::Binary { op, left, .. } if op.is_arithmetic() => match left {
                UserValue::Str(name) => {
                    let v = self.eval_expr(env, step)?;
                    env.define(name.clone(), v);
                    Ok(())
                }
                _ => error(ErrorKind::UnsupportedOperation, "Expect left handside to be a variable."),
            },
            _ => error(ErrorKind::UnsupportedOperation, "Expecting a arithmetic expression."),
        }
    }

    fn eval_condition(&self, env: &Env, cond: &Expr, msg: &str) -> Result<bool> {
        match self.eval_expr(env, cond)? {
            VariableValue::Bool(b) => Ok(b),
            _ => error(ErrorKind::UnsupportedOperation, msg),
        }
    }

    fn eval_expr(&self, env: &Env, expr: &Expr) -> Result<VariableValue> {
        match expr {
            Expr::Value(v) => Ok(resolve(env, v)),
            Expr::Binary { op, left, right } => {
                value::apply(*op, &resolve(env, left), &resolve(env, right))
            }
        }
    }
}

/// A string operand naming a declared variable evaluates to that variable;
/// anything else is a literal.
fn resolve(env: &Env, operand: &UserValue) -> VariableValue {
    if let UserValue::Str(name) = operand {
        if let Some(v) = env.get(name) {
            return v.clone();
        }
    }
    VariableValue::from_user_value(operand)
}

fn io_error(e: io::Error) -> Error {
    Error::new(ErrorKind::Io, format!("Failed to write output: {}", e))
}
