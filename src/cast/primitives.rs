//! Primitive casts (integers, floats, booleans).

use crate::context::CastContext;
use crate::error::{Error, Result};
use crate::value::Value;

use super::{Cast, number_str};

// === Boolean ===

/// BOOL. A value starting with `t` is true, anything else is false.
///
/// Never fails: malformed input is simply false.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCast;

impl Cast for BooleanCast {
    fn name(&self) -> &'static str {
        "BOOLEAN"
    }

    fn cast_text(&self, bytes: &[u8], _ctx: &CastContext) -> Result<Value> {
        Ok(Value::Boolean(bytes.first() == Some(&b't')))
    }
}

// === Integer types ===

/// INT2, INT4 and OID to [`Value::Integer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerCast;

impl Cast for IntegerCast {
    fn name(&self) -> &'static str {
        "INTEGER"
    }

    fn cast_text(&self, bytes: &[u8], _ctx: &CastContext) -> Result<Value> {
        let wide = parse_int_literal("integer", bytes)?;
        i64::try_from(wide)
            .map(Value::Integer)
            .map_err(|_| Error::parse("integer", bytes, "out of range"))
    }
}

/// INT8 to [`Value::WideInteger`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LongIntegerCast;

impl Cast for LongIntegerCast {
    fn name(&self) -> &'static str {
        "LONGINTEGER"
    }

    fn cast_text(&self, bytes: &[u8], _ctx: &CastContext) -> Result<Value> {
        parse_int_literal("long integer", bytes).map(Value::WideInteger)
    }
}

/// Parse a signed integer literal in place.
///
/// Accepts an optional sign and an optional `0x`/`0o`/`0b` radix prefix.
/// The span is never copied, so its length has no bearing on the result.
fn parse_int_literal(kind: &str, bytes: &[u8]) -> Result<i128> {
    let s = number_str(kind, bytes)?;
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (radix, digits) = split_radix(unsigned);
    // from_str_radix would take a second sign
    if digits.starts_with(['+', '-']) {
        return Err(Error::parse(kind, bytes, "invalid digit found in string"));
    }
    let magnitude =
        u128::from_str_radix(digits, radix).map_err(|e| Error::parse(kind, bytes, e))?;
    let value = if negative {
        0_i128.checked_sub_unsigned(magnitude)
    } else {
        i128::try_from(magnitude).ok()
    };
    value.ok_or_else(|| Error::parse(kind, bytes, "out of range"))
}

fn split_radix(s: &str) -> (u32, &str) {
    for (prefix, radix) in [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ] {
        if let Some(rest) = s.strip_prefix(prefix) {
            return (radix, rest);
        }
    }
    (10, s)
}

// === Floating point types ===

/// FLOAT4 and FLOAT8 (also NUMERIC without fixed-point support).
///
/// Accepts decimal and scientific notation plus `NaN`, `Infinity` and
/// `-Infinity` as the server prints them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatCast;

impl Cast for FloatCast {
    fn name(&self) -> &'static str {
        "FLOAT"
    }

    fn cast_text(&self, bytes: &[u8], _ctx: &CastContext) -> Result<Value> {
        let s = number_str("float", bytes)?;
        s.parse::<f64>()
            .map(Value::Float)
            .map_err(|e| Error::parse("float", bytes, e))
    }
}
