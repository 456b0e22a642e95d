//! Runtime values and the binary operator table.
//!
//! Every operator is a free function over a pair of values. Pairs that are not
//! listed in an operator's match fall through to a type error naming both
//! operand types and the operation.

use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use pifuck_syntax::ast::{BinaryOp, UserValue};
use pifuck_syntax::decimal;
use pifuck_syntax::error::{error, ErrorKind, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum VariableValue {
    /// A UTF-8 string
    Str(String),
    /// An arbitrary-precision base-10 number
    Decimal(BigDecimal),
    /// A boolean value
    Bool(bool),
    /// The null value
    Null,
}

impl VariableValue {
    pub fn from_user_value(value: &UserValue) -> Self {
        match value {
            UserValue::Str(s) => VariableValue::Str(s.clone()),
            UserValue::Decimal(d) => VariableValue::Decimal(d.clone()),
            UserValue::Bool(b) => VariableValue::Bool(*b),
            UserValue::Null => VariableValue::Null,
        }
    }

    /// Type tag used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            VariableValue::Str(_) => "string",
            VariableValue::Decimal(_) => "decimal",
            VariableValue::Bool(_) => "boolean",
            VariableValue::Null => "null",
        }
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Str(s) => write!(f, "{}", s),
            VariableValue::Decimal(d) => write!(f, "{}", decimal::to_canonical_string(d)),
            VariableValue::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            VariableValue::Null => write!(f, "null"),
        }
    }
}

fn type_error(op: BinaryOp, left: &VariableValue, right: &VariableValue) -> Result<VariableValue> {
    error(
        ErrorKind::Type,
        format!(
            "Invalid operation '{}' on {} and {}",
            op.name(),
            left.type_name(),
            right.type_name()
        ),
    )
}

/// Dispatch `op` on two already resolved operands.
pub fn apply(op: BinaryOp, left: &VariableValue, right: &VariableValue) -> Result<VariableValue> {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Subtract => subtract(left, right),
        BinaryOp::Multiply => multiply(left, right),
        BinaryOp::Divide => divide(left, right),
        BinaryOp::Equal => equal(left, right),
        BinaryOp::NotEqual => not_equal(left, right),
        BinaryOp::Greater => greater(left, right),
        BinaryOp::Smaller => smaller(left, right),
    }
}

/// Strings concatenate anything rendered after them. A decimal followed by a
/// string renders itself in front of the string.
pub fn add(left: &VariableValue, right: &VariableValue) -> Result<VariableValue> {
    use VariableValue::*;
    match (left, right) {
        (Str(a), other) => Ok(Str(format!("{}{}", a, other))),
        (Decimal(a), Decimal(b)) => Ok(Decimal(a + b)),
        (Decimal(_), Str(b)) => Ok(Str(format!("{}{}", left, b))),
        _ => type_error(BinaryOp::Add, left, right),
    }
}

pub fn subtract(left: &VariableValue, right: &VariableValue) -> Result<VariableValue> {
    match (left, right) {
        (VariableValue::Decimal(a), VariableValue::Decimal(b)) => Ok(VariableValue::Decimal(a - b)),
        _ => type_error(BinaryOp::Subtract, left, right),
    }
}

pub fn multiply(left: &VariableValue, right: &VariableValue) -> Result<VariableValue> {
    match (left, right) {
        (VariableValue::Decimal(a), VariableValue::Decimal(b)) => Ok(VariableValue::Decimal(a * b)),
        _ => type_error(BinaryOp::Multiply, left, right),
    }
}

pub fn divide(left: &VariableValue, right: &VariableValue) -> Result<VariableValue> {
    match (left, right) {
        (VariableValue::Decimal(a), VariableValue::Decimal(b)) => {
            Ok(VariableValue::Decimal(divide_exact(a, b)?))
        }
        _ => type_error(BinaryOp::Divide, left, right),
    }
}

/// Equality never fails for booleans, strings and decimals: a boolean or
/// decimal compared to another type is simply unequal, a string compares
/// against the other side's rendering. Null supports no operators at all.
pub fn equal(left: &VariableValue, right: &VariableValue) -> Result<VariableValue> {
    use VariableValue::*;
    let eq = match (left, right) {
        (Bool(a), Bool(b)) => a == b,
        (Bool(_), _) => false,
        (Str(a), other) => *a == other.to_string(),
        (Decimal(a), Decimal(b)) => a == b,
        (Decimal(_), _) => false,
        (Null, _) => return type_error(BinaryOp::Equal, left, right),
    };
    Ok(Bool(eq))
}

pub fn not_equal(left: &VariableValue, right: &VariableValue) -> Result<VariableValue> {
    use VariableValue::*;
    let ne = match (left, right) {
        (Bool(a), Bool(b)) => a != b,
        (Bool(_), _) => true,
        (Str(a), other) => *a != other.to_string(),
        (Decimal(a), Decimal(b)) => a != b,
        (Decimal(_), _) => true,
        (Null, _) => return type_error(BinaryOp::NotEqual, left, right),
    };
    Ok(Bool(ne))
}

pub fn greater(left: &VariableValue, right: &VariableValue) -> Result<VariableValue> {
    match (left, right) {
        (VariableValue::Decimal(a), VariableValue::Decimal(b)) => Ok(VariableValue::Bool(a > b)),
        _ => type_error(BinaryOp::Greater, left, right),
    }
}

pub fn smaller(left: &VariableValue, right: &VariableValue) -> Result<VariableValue> {
    match (left, right) {
        (VariableValue::Decimal(a), VariableValue::Decimal(b)) => Ok(VariableValue::Bool(a < b)),
        _ => type_error(BinaryOp::Smaller, left, right),
    }
}

/// Exact decimal division.
///
/// The quotient keeps the scale `dividend.scale - divisor.scale` unless more
/// fraction digits are needed to represent it exactly. Fails when the divisor
/// is zero or the quotient does not terminate in base 10.
pub fn divide_exact(dividend: &BigDecimal, divisor: &BigDecimal) -> Result<BigDecimal> {
    let (a, a_scale) = dividend.as_bigint_and_exponent();
    let (b, b_scale) = divisor.as_bigint_and_exponent();
    if b.is_zero() {
        let msg = if a.is_zero() { "Division undefined" } else { "Division by zero" };
        return error(ErrorKind::Arithmetic, msg);
    }
    let preferred = a_scale - b_scale;

    let g = a.gcd(&b);
    let mut num = &a / &g;
    let mut den = &b / &g;
    if den.is_negative() {
        num = -num;
        den = -den;
    }

    // den must be 2^twos * 5^fives for the quotient to terminate
    let two = BigInt::from(2);
    let five = BigInt::from(5);
    let mut twos = 0u32;
    let mut fives = 0u32;
    while (&den % &two).is_zero() {
        den /= &two;
        twos += 1;
    }
    while (&den % &five).is_zero() {
        den /= &five;
        fives += 1;
    }
    if !den.is_one() {
        return error(
            ErrorKind::Arithmetic,
            "Non-terminating decimal expansion; no exact representable decimal result.",
        );
    }

    let k = twos.max(fives);
    let mut unscaled = num * two.pow(k - twos) * five.pow(k - fives);
    let mut scale = preferred + i64::from(k);
    let ten = BigInt::from(10);
    while scale > preferred && !unscaled.is_zero() && (&unscaled % &ten).is_zero() {
        unscaled /= &ten;
        scale -= 1;
    }
    Ok(BigDecimal::new(unscaled, scale))
}

/// Integer part of a decimal, truncated toward zero and saturated to `i64`.
pub fn truncate_to_i64(value: &BigDecimal) -> i64 {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    let ten = BigInt::from(10);
    let int = if scale > 0 {
        unscaled / ten.pow(scale.unsigned_abs() as u32)
    } else {
        unscaled * ten.pow(scale.unsigned_abs() as u32)
    };
    int.to_i64().unwrap_or(if int.is_negative() { i64::MIN } else { i64::MAX })
}
