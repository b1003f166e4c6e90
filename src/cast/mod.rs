//! Casts from PostgreSQL text-format values to [`Value`]s.
//!
//! Every cast implements [`Cast`], so a caller holding only a type OID can
//! look the cast up in a [`CastTable`](crate::CastTable) and invoke it without
//! knowing what shape of value will come out.

mod bytes;
mod decimal;
mod primitives;
mod string;

pub use bytes::BinaryCast;
pub use decimal::{DecimalCast, DecimalSupport};
pub use primitives::{BooleanCast, FloatCast, IntegerCast, LongIntegerCast};
pub use string::{BytesCast, UnicodeCast};

use std::fmt;

use crate::context::CastContext;
use crate::error::{Error, Result};
use crate::field::RawField;
use crate::value::Value;

/// Converts one text-format column value into a [`Value`].
///
/// Implementations are stateless apart from options fixed at construction, so
/// one instance can serve any number of threads at once.
pub trait Cast: fmt::Debug + Send + Sync {
    /// Name of the cast (`INTEGER`, `STRING`, ...).
    fn name(&self) -> &'static str;

    /// Cast a field.
    ///
    /// NULL is handled here and never reaches [`Cast::cast_text`], so the
    /// context is not consulted for it.
    fn cast(&self, field: RawField<'_>, ctx: &CastContext) -> Result<Value> {
        match field.bytes() {
            None => Ok(Value::Null),
            Some(bytes) => self.cast_text(bytes, ctx),
        }
    }

    /// Cast a non-null value.
    fn cast_text(&self, bytes: &[u8], ctx: &CastContext) -> Result<Value>;
}

/// View a numeric literal as `&str`, without the surrounding whitespace.
fn number_str<'a>(kind: &str, bytes: &'a [u8]) -> Result<&'a str> {
    let s = simdutf8::basic::from_utf8(bytes)
        .map_err(|_| Error::parse(kind, bytes, "invalid UTF-8"))?;
    let s = s.trim_ascii();
    if s.is_empty() {
        return Err(Error::parse(kind, bytes, "empty literal"));
    }
    Ok(s)
}
