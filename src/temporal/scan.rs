//! Pattern scanner with `sscanf` matching rules.
//!
//! - `Int` skips leading whitespace, takes an optional sign and at least one digit
//! - `Float` skips leading whitespace and takes a decimal or scientific literal
//! - `Whitespace` matches any run of whitespace, including none
//! - `Literal` must match one byte exactly
//!
//! Scanning stops at the first directive that does not match. Input left over
//! after the last directive is ignored.

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Directive {
    Int,
    Float,
    Whitespace,
    Literal(u8),
}

use Directive::{Float, Int, Literal, Whitespace};

/// `%d-%d-%d %d:%d:%lf`
pub(crate) const DATE_TIME: &[Directive] = &[
    Int,
    Literal(b'-'),
    Int,
    Literal(b'-'),
    Int,
    Whitespace,
    Int,
    Literal(b':'),
    Int,
    Literal(b':'),
    Float,
];

/// `%d:%d:%lf`
pub(crate) const TIME: &[Directive] = &[Int, Literal(b':'), Int, Literal(b':'), Float];

const MAX_CONVERSIONS: usize = 6;

/// Values converted by one scan, in pattern order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Scanned {
    values: [f64; MAX_CONVERSIONS],
    count: usize,
}

impl Scanned {
    /// Number of values converted before the first mismatch.
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// Integer conversion at `index` (0 when missing).
    pub(crate) fn int(&self, index: usize) -> i32 {
        self.values.get(index).map_or(0, |v| *v as i32)
    }

    /// Float conversion at `index` (0.0 when missing).
    pub(crate) fn float(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    fn push(&mut self, value: f64) -> bool {
        match self.values.get_mut(self.count) {
            Some(slot) => {
                *slot = value;
                self.count += 1;
                true
            }
            None => false,
        }
    }
}

/// Scan `input` against `pattern`.
pub(crate) fn scan(input: &[u8], pattern: &[Directive]) -> Scanned {
    let mut cursor = Cursor { input, pos: 0 };
    let mut scanned = Scanned {
        values: [0.0; MAX_CONVERSIONS],
        count: 0,
    };
    for directive in pattern {
        let matched = match *directive {
            Int => cursor.int().is_some_and(|v| scanned.push(f64::from(v))),
            Float => cursor.float().is_some_and(|v| scanned.push(v)),
            Whitespace => {
                cursor.skip_whitespace();
                true
            }
            Literal(b) => cursor.literal(b),
        };
        if !matched {
            break;
        }
    }
    trace!(components = scanned.count, "scanned temporal literal");
    scanned
}

struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn literal(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn sign(&mut self) -> bool {
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        }
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn int(&mut self) -> Option<i32> {
        self.skip_whitespace();
        let negative = self.sign();
        let start = self.pos;
        if self.digits() == 0 {
            return None;
        }
        let mut value: i32 = 0;
        for &b in self.input.get(start..self.pos)? {
            let digit = i32::from(b - b'0');
            value = value.checked_mul(10)?;
            value = if negative {
                value.checked_sub(digit)?
            } else {
                value.checked_add(digit)?
            };
        }
        Some(value)
    }

    fn float(&mut self) -> Option<f64> {
        self.skip_whitespace();
        let start = self.pos;
        self.sign();
        let mut mantissa = self.digits();
        if self.literal(b'.') {
            mantissa += self.digits();
        }
        if mantissa == 0 {
            return None;
        }
        // exponent only counts when digits follow it
        let before_exponent = self.pos;
        if self.literal(b'e') || self.literal(b'E') {
            self.sign();
            if self.digits() == 0 {
                self.pos = before_exponent;
            }
        }
        let text = simdutf8::basic::from_utf8(self.input.get(start..self.pos)?).ok()?;
        text.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_only() {
        let s = scan(b"2024-01-02", DATE_TIME);
        assert_eq!(s.count(), 3);
        assert_eq!((s.int(0), s.int(1), s.int(2)), (2024, 1, 2));
    }

    #[test]
    fn test_full_timestamp() {
        let s = scan(b"2024-01-02 03:04:05.25", DATE_TIME);
        assert_eq!(s.count(), 6);
        assert_eq!((s.int(3), s.int(4)), (3, 4));
        assert_eq!(s.float(5), 5.25);
    }

    #[test]
    fn test_partial() {
        assert_eq!(scan(b"2024-01-02 03", DATE_TIME).count(), 4);
        assert_eq!(scan(b"2024-01-02 03:04", DATE_TIME).count(), 5);
        assert_eq!(scan(b"2024/01/02", DATE_TIME).count(), 1);
        assert_eq!(scan(b"", DATE_TIME).count(), 0);
        assert_eq!(scan(b"infinity", DATE_TIME).count(), 0);
    }

    #[test]
    fn test_whitespace_rules() {
        // the space in the pattern matches any blank run, and %d skips leading blanks
        assert_eq!(scan(b"2024-01-02\t\t03:04:05", DATE_TIME).count(), 6);
        assert_eq!(scan(b"2024-01-02T03:04:05", DATE_TIME).count(), 3);
        assert_eq!(scan(b"  2024-01-02", DATE_TIME).count(), 3);
        // a literal does not skip blanks
        assert_eq!(scan(b"2024 -01-02", DATE_TIME).count(), 1);
    }

    #[test]
    fn test_trailing_ignored() {
        let s = scan(b"2024-01-02 03:04:05+02", DATE_TIME);
        assert_eq!(s.count(), 6);
        assert_eq!(s.float(5), 5.0);
        assert_eq!(scan(b"10:30:45.5-07", TIME).count(), 3);
    }

    #[test]
    fn test_signed_and_overflow() {
        let s = scan(b"-44-03-15", DATE_TIME);
        assert_eq!(s.count(), 3);
        assert_eq!(s.int(0), -44);
        assert_eq!(scan(b"99999999999-01-01", DATE_TIME).count(), 0);
    }

    #[test]
    fn test_float_forms() {
        assert_eq!(scan(b"1:2:3", TIME).float(2), 3.0);
        assert_eq!(scan(b"1:2:.5", TIME).float(2), 0.5);
        assert_eq!(scan(b"1:2:1e1", TIME).float(2), 10.0);
        // dangling exponent is left unconsumed
        assert_eq!(scan(b"1:2:3e", TIME).float(2), 3.0);
        assert_eq!(scan(b"1:2:x", TIME).count(), 2);
    }
}
