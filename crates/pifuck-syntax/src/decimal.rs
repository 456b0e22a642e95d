//! Text rendering for arbitrary-precision decimals.
//!
//! A decimal is an unscaled integer and a scale: `value = unscaled * 10^-scale`.
//! The scale is significant for rendering (`1.50` stays `1.50`), never for
//! comparison.

use bigdecimal::BigDecimal;
use num_bigint::Sign;

/// Canonical rendering: plain notation unless the scale is negative or the
/// adjusted exponent drops below -6, then scientific notation (`1.5E+3`,
/// `1E-7`).
pub fn to_canonical_string(value: &BigDecimal) -> String {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    let digits = unscaled.magnitude().to_string();
    let negative = unscaled.sign() == Sign::Minus;
    let adjusted = digits.len() as i64 - 1 - scale;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if scale >= 0 && adjusted >= -6 {
        out.push_str(&place_point(&digits, scale as usize));
    } else {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        if adjusted != 0 {
            out.push('E');
            if adjusted > 0 {
                out.push('+');
            }
            out.push_str(&adjusted.to_string());
        }
    }
    out
}

/// Plain rendering without exponent, e.g. `1.5E+3` renders as `1500`.
pub fn to_plain_string(value: &BigDecimal) -> String {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    let mut digits = unscaled.magnitude().to_string();
    let negative = unscaled.sign() == Sign::Minus;

    let body = if scale < 0 {
        digits.push_str(&"0".repeat(scale.unsigned_abs() as usize));
        digits
    } else {
        place_point(&digits, scale as usize)
    };
    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

fn place_point(digits: &str, scale: usize) -> String {
    if scale == 0 {
        digits.to_string()
    } else if digits.len() > scale {
        let (int, frac) = digits.split_at(digits.len() - scale);
        format!("{}.{}", int, frac)
    } else {
        format!("0.{}{}", "0".repeat(scale - digits.len()), digits)
    }
}
