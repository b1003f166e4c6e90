//! Text and raw byte casts.

use crate::context::CastContext;
use crate::error::Result;
use crate::value::Value;

use super::Cast;

/// Decode the value in the client encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeCast;

impl Cast for UnicodeCast {
    fn name(&self) -> &'static str {
        "UNICODE"
    }

    fn cast_text(&self, bytes: &[u8], ctx: &CastContext) -> Result<Value> {
        ctx.decode(bytes).map(|s| Value::Text(s.into_owned()))
    }
}

/// Copy the value verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesCast;

impl Cast for BytesCast {
    fn name(&self) -> &'static str {
        "BYTES"
    }

    fn cast_text(&self, bytes: &[u8], _ctx: &CastContext) -> Result<Value> {
        let mut out = Vec::new();
        out.try_reserve_exact(bytes.len())?;
        out.extend_from_slice(bytes);
        Ok(Value::Bytes(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ClientEncoding, DecodeErrors};
    use crate::error::Error;
    use crate::field::RawField;

    #[test]
    fn test_string_text() {
        let ctx = CastContext::default();
        assert_eq!(
            UnicodeCast.cast_text(b"hello", &ctx).unwrap(),
            Value::Text("hello".into())
        );
    }

    #[test]
    fn test_string_invalid_utf8() {
        let ctx = CastContext::default();
        assert!(matches!(
            UnicodeCast.cast_text(b"\xc3\x28", &ctx),
            Err(Error::Decoding { .. })
        ));
        let lossy = ctx.with_decode_errors(DecodeErrors::Replace);
        assert_eq!(
            UnicodeCast.cast_text(b"a\xffb", &lossy).unwrap(),
            Value::Text("a\u{FFFD}b".into())
        );
    }

    #[test]
    fn test_string_latin1() {
        let ctx = CastContext::new(ClientEncoding::Latin1);
        assert_eq!(
            UnicodeCast.cast_text(b"na\xefve", &ctx).unwrap(),
            Value::Text("na\u{ef}ve".into())
        );
    }

    #[test]
    fn test_bytes_verbatim() {
        let ctx = CastContext::default();
        let raw = b"\\x00\xff\x00tail";
        assert_eq!(
            BytesCast.cast_text(raw, &ctx).unwrap(),
            Value::Bytes(raw.to_vec())
        );
    }

    #[test]
    fn test_bytes_respects_length() {
        let ctx = CastContext::default();
        let field = RawField::from_parts(Some(&b"abcdef"[..]), 3).unwrap();
        assert_eq!(
            BytesCast.cast(field, &ctx).unwrap(),
            Value::Bytes(b"abc".to_vec())
        );
    }

    #[test]
    fn test_null() {
        // a context that would reject any byte still yields NULL
        let ctx = CastContext::new(ClientEncoding::SqlAscii);
        assert_eq!(UnicodeCast.cast(RawField::null(), &ctx).unwrap(), Value::Null);
        assert_eq!(BytesCast.cast(RawField::null(), &ctx).unwrap(), Value::Null);
    }
}
