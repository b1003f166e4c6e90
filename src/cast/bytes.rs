//! BYTEA cast.

use crate::context::CastContext;
use crate::error::{Error, Result};
use crate::value::Value;

use super::Cast;

/// BYTEA in either of the server's output formats.
///
/// - hex: `\x` followed by hex digit pairs (the default since 9.0)
/// - escape: printable bytes as-is, `\\` for a backslash, `\ooo` octal otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCast;

impl Cast for BinaryCast {
    fn name(&self) -> &'static str {
        "BINARY"
    }

    fn cast_text(&self, bytes: &[u8], _ctx: &CastContext) -> Result<Value> {
        match bytes.strip_prefix(b"\\x") {
            Some(hex) => decode_hex(hex),
            None => decode_escape(bytes),
        }
        .map(Value::Bytes)
    }
}

/// Decode hex string to bytes
fn decode_hex(hex: &[u8]) -> Result<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return Err(Error::parse("bytea", hex, "odd number of hex digits"));
    }

    let mut result = Vec::new();
    result.try_reserve_exact(hex.len() / 2)?;
    for chunk in hex.chunks_exact(2) {
        let (Some(high), Some(low)) = (hex_digit(chunk[0]), hex_digit(chunk[1])) else {
            return Err(Error::parse("bytea", hex, "invalid hex digit"));
        };
        result.push((high << 4) | low);
    }
    Ok(result)
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode the escape format.
fn decode_escape(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut rest = bytes;
    let mut result = Vec::new();
    result.try_reserve_exact(rest.len())?;
    while let Some(pos) = memchr::memchr(b'\\', rest) {
        result.extend_from_slice(&rest[..pos]);
        rest = &rest[pos + 1..];
        match rest {
            [b'\\', tail @ ..] => {
                result.push(b'\\');
                rest = tail;
            }
            [a @ b'0'..=b'3', b @ b'0'..=b'7', c @ b'0'..=b'7', tail @ ..] => {
                result.push(((a - b'0') << 6) | ((b - b'0') << 3) | (c - b'0'));
                rest = tail;
            }
            _ => return Err(Error::parse("bytea", bytes, "invalid escape sequence")),
        }
    }
    result.extend_from_slice(rest);
    Ok(result)
}
